//! Row-major planar grid.

use serde::{Deserialize, Serialize};

use super::{NeighborhoodMask, SpatialGrid};
use crate::core::Point3;

/// Square cells over the ground plane, bounded in z.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanarGrid {
    /// World position of the lower-left grid corner
    origin: Point3,
    /// Cell size (meters)
    resolution: f32,
    /// Width in cells
    width: usize,
    /// Height in cells
    height: usize,
    /// Lowest accepted z (meters)
    min_z: f32,
    /// Highest accepted z (meters)
    max_z: f32,
}

impl PlanarGrid {
    /// Grid with its lower-left corner at `origin`. No z limits.
    pub fn new(origin: Point3, resolution: f32, width: usize, height: usize) -> Self {
        Self {
            origin,
            resolution,
            width,
            height,
            min_z: f32::NEG_INFINITY,
            max_z: f32::INFINITY,
        }
    }

    /// Square grid spanning `center ± max_range` in x and y.
    pub fn centered_at(center: Point3, max_range: f32, resolution: f32) -> Self {
        let side = ((2.0 * max_range) / resolution).ceil().max(1.0) as usize;
        let origin = Point3::new(center.x - max_range, center.y - max_range, 0.0);
        Self::new(origin, resolution, side, side)
    }

    /// Restrict accepted points to `min_z..=max_z`.
    pub fn with_z_limits(mut self, min_z: f32, max_z: f32) -> Self {
        self.min_z = min_z;
        self.max_z = max_z;
        self
    }

    /// Cell size (meters).
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Column and row of a cell index.
    #[inline]
    pub fn col_row(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Cell index of a column and row.
    #[inline]
    pub fn index_of(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }
}

impl SpatialGrid for PlanarGrid {
    #[inline]
    fn cell_count(&self) -> usize {
        self.width * self.height
    }

    fn cell_index(&self, point: &Point3) -> Option<usize> {
        if !point.is_finite() || point.z < self.min_z || point.z > self.max_z {
            return None;
        }
        let fx = ((point.x - self.origin.x) / self.resolution).floor();
        let fy = ((point.y - self.origin.y) / self.resolution).floor();
        if fx < 0.0 || fy < 0.0 {
            return None;
        }
        self.index_of(fx as usize, fy as usize)
    }

    fn cell_center(&self, index: usize) -> Point3 {
        let (col, row) = self.col_row(index);
        Point3::new(
            self.origin.x + (col as f32 + 0.5) * self.resolution,
            self.origin.y + (row as f32 + 0.5) * self.resolution,
            0.0,
        )
    }

    fn circle_mask(&self, radius: f32) -> NeighborhoodMask {
        NeighborhoodMask::disk(radius, self.resolution)
    }

    fn neighborhood(&self, mask: &NeighborhoodMask, origin: usize) -> Vec<usize> {
        if origin >= self.cell_count() {
            return Vec::new();
        }
        let (col, row) = self.col_row(origin);
        let (col, row) = (col as i64, row as i64);
        mask.offsets()
            .iter()
            .filter_map(|&(dx, dy)| {
                let c = col + dx as i64;
                let r = row + dy as i64;
                if c < 0 || r < 0 {
                    return None;
                }
                self.index_of(c as usize, r as usize)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        let grid = PlanarGrid::new(Point3::ZERO, 1.0, 5, 5);
        assert_eq!(grid.cell_count(), 25);
        for i in 0..25 {
            let c = grid.cell_center(i);
            assert_eq!(grid.cell_index(&c), Some(i));
        }
    }

    #[test]
    fn test_outside_grid() {
        let grid = PlanarGrid::new(Point3::ZERO, 1.0, 5, 5).with_z_limits(-2.0, 7.0);
        assert_eq!(grid.cell_index(&Point3::new(-0.1, 1.0, 0.0)), None);
        assert_eq!(grid.cell_index(&Point3::new(5.1, 1.0, 0.0)), None);
        assert_eq!(grid.cell_index(&Point3::new(1.0, 1.0, 8.0)), None);
        assert_eq!(grid.cell_index(&Point3::new(1.0, 1.0, -3.0)), None);
        assert_eq!(grid.cell_index(&Point3::new(f32::NAN, 1.0, 0.0)), None);
    }

    #[test]
    fn test_centered_at() {
        let grid = PlanarGrid::centered_at(Point3::ZERO, 5.0, 0.5);
        assert_eq!(grid.width(), 20);
        let idx = grid.cell_index(&Point3::new(0.1, 0.1, 0.0)).unwrap();
        let c = grid.cell_center(idx);
        assert!((c.x - 0.25).abs() < 1e-6);
        assert!((c.y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_neighborhood_clipped_at_edge() {
        let grid = PlanarGrid::new(Point3::ZERO, 1.0, 5, 5);
        let mask = grid.circle_mask(1.5);
        assert_eq!(grid.neighborhood(&mask, 12).len(), 9);
        assert_eq!(grid.neighborhood(&mask, 0).len(), 4);
        assert_eq!(grid.neighborhood(&mask, 4).len(), 4);
        assert!(grid.neighborhood(&mask, 99).is_empty());
    }

    #[test]
    fn test_neighborhood_of_point() {
        let grid = PlanarGrid::new(Point3::ZERO, 1.0, 5, 5);
        let mask = grid.circle_mask(1.0);
        let near = grid.neighborhood_of(&mask, &Point3::new(2.5, 2.5, 0.0));
        assert_eq!(near.len(), 5);
        assert!(near.contains(&12));
        assert!(near.contains(&7));
        assert!(near.contains(&17));
        assert!(grid.neighborhood_of(&mask, &Point3::new(-4.0, 0.0, 0.0)).is_empty());
    }
}
