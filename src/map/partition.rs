//! Neighborhood point sets by cell label.

use crate::core::Point3;

/// Which stored obstacle points a partition draws from obstacle and
/// boundary cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleWindow {
    /// Points recorded in the current epoch
    CurrentEpoch,
    /// Every stored point
    AllEpochs,
}

/// Points gathered from a robot neighborhood.
///
/// `ground_points[i]` is the center of cell `ground_indices[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Partition {
    /// Ground cell indices
    pub ground_indices: Vec<usize>,
    /// Ground cell centers, aligned with `ground_indices`
    pub ground_points: Vec<Point3>,
    /// Boundary points of boundary cells
    pub boundary_points: Vec<Point3>,
    /// Obstacle points of all cells
    pub obstacle_points: Vec<Point3>,
}

impl Partition {
    /// Ground, then boundary, then obstacle points in one buffer. The first
    /// `ground_indices.len()` entries are the ground centers.
    pub fn occlusion_cloud(&self) -> Vec<Point3> {
        let mut cloud = Vec::with_capacity(
            self.ground_points.len() + self.boundary_points.len() + self.obstacle_points.len(),
        );
        cloud.extend_from_slice(&self.ground_points);
        cloud.extend_from_slice(&self.boundary_points);
        cloud.extend_from_slice(&self.obstacle_points);
        cloud
    }

    /// Number of ground cells.
    #[inline]
    pub fn ground_count(&self) -> usize {
        self.ground_indices.len()
    }
}
