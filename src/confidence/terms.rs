//! Per-cycle term updates.

use log::{debug, trace, warn};

use super::ConfidenceEngine;
use crate::core::{GridCell, Point3, Reachability, gaussian_kernel};
use crate::sampling::{PointIndex, limit_occlusion_cloud};
use crate::visibility::VisibilityOracle;

impl ConfidenceEngine {
    /// Raise each cell's travel term to its Gaussian proximity to `robot`.
    ///
    /// `indices` and `points` are paired by position; surplus entries of the
    /// longer list are ignored. Returns the number of cells whose travel term
    /// increased.
    pub fn distance_term(
        &self,
        cells: &mut [GridCell],
        robot: &Point3,
        indices: &[usize],
        points: &[Point3],
    ) -> usize {
        if indices.len() != points.len() {
            warn!(
                "[Confidence] distance term: {} indices vs {} points, using {}",
                indices.len(),
                points.len(),
                indices.len().min(points.len())
            );
        }

        let mut raised = 0;
        for (&idx, point) in indices.iter().zip(points) {
            if let Some(cell) = cells.get_mut(idx)
                && cell
                    .travel_term
                    .observe(gaussian_kernel(robot, point, self.config.sigma))
            {
                raised += 1;
            }
        }
        trace!("[Confidence] distance term raised {} cells", raised);
        raised
    }

    /// Lower each cell's boundary term by its proximity to the nearest
    /// boundary point, blocking cells whose stored term exceeds the no-touch
    /// threshold.
    ///
    /// `risk = max((sigma - d) / sigma, 0)` with `d` the Euclidean distance
    /// in meters, so a cell is blocked once it has been within
    /// `no_touch_distance` meters of a boundary point.
    ///
    /// Does nothing when `boundary` is empty. Repeated boundary points are
    /// fine. Returns the number of cells blocked by this call.
    pub fn bound_term(
        &self,
        cells: &mut [GridCell],
        indices: &[usize],
        points: &[Point3],
        boundary: &[Point3],
    ) -> usize {
        if boundary.is_empty() {
            trace!("[Confidence] bound term skipped, no boundary points");
            return 0;
        }

        let index = PointIndex::build(boundary);
        if index.is_empty() {
            trace!("[Confidence] bound term skipped, no finite boundary points");
            return 0;
        }
        let sigma = self.config.sigma;
        let no_touch = self.config.no_touch_threshold();

        let mut blocked = 0;
        for (&idx, point) in indices.iter().zip(points) {
            let (Some(cell), Some(distance)) = (cells.get_mut(idx), index.nearest_distance(point))
            else {
                continue;
            };
            let risk = ((sigma - distance) / sigma).max(0.0);
            cell.bound_term.observe(risk);

            if cell.bound_term.value() > no_touch && !cell.is_blocked() {
                cell.reachability = Reachability::Blocked;
                blocked += 1;
            }
        }

        if blocked > 0 {
            debug!(
                "[Confidence] bound term blocked {} of {} cells ({} boundary points)",
                blocked,
                indices.len(),
                boundary.len()
            );
        }
        blocked
    }

    /// Count sightings of ground cells from a past viewpoint.
    ///
    /// `cloud` holds the ground points first, one per entry of
    /// `ground_indices`, followed by boundary and obstacle points. The
    /// viewpoint is raised by the configured vertical offset. Oversized
    /// non-ground tails are strided before the oracle runs. Returns the number
    /// of ground cells seen.
    pub fn occlusion_term(
        &self,
        cells: &mut [GridCell],
        cloud: &[Point3],
        ground_indices: &[usize],
        viewpoint: &Point3,
        oracle: &dyn VisibilityOracle,
    ) -> usize {
        let ground_count = ground_indices.len().min(cloud.len());
        let view = viewpoint.raised(self.config.view_z_offset);

        let limited = limit_occlusion_cloud(
            cloud,
            ground_count,
            self.config.occlusion_sample_threshold,
        );
        if let Some(ref reduced) = limited {
            debug!(
                "[Confidence] occlusion cloud strided {} -> {} points",
                cloud.len(),
                reduced.len()
            );
        }
        let input = limited.as_deref().unwrap_or(cloud);

        let mut seen = 0;
        for i in oracle.visible_indices(input, &view) {
            if i < ground_count
                && let Some(cell) = cells.get_mut(ground_indices[i])
            {
                cell.visibility_term.observe(1.0);
                seen += 1;
            }
        }
        trace!(
            "[Confidence] occlusion term: {} of {} ground cells visible",
            seen, ground_count
        );
        seen
    }

    /// Store the quality of `points` on one cell. Returns the measured value.
    pub fn quality_term(&mut self, cells: &mut [GridCell], index: usize, points: &[Point3]) -> f32 {
        let value = self.quality.measure(points, &mut self.rng);
        if let Some(cell) = cells.get_mut(index) {
            cell.quality_term = value;
        }
        value
    }

    /// Combine each cell's score into its total value. Returns the number of
    /// cells whose total increased.
    pub fn fuse(&self, cells: &mut [GridCell], indices: &[usize]) -> usize {
        let mut raised = 0;
        for &idx in indices {
            if let Some(cell) = cells.get_mut(idx) {
                let candidate = self.scoring.score(cell);
                if cell.total_value.observe(candidate) {
                    raised += 1;
                }
            }
        }
        raised
    }
}

#[cfg(test)]
mod tests {
    use super::super::{ConfidenceConfig, VisibilityWeightedFusion};
    use super::*;

    fn engine(sigma: f32) -> ConfidenceEngine {
        ConfidenceEngine::new(ConfidenceConfig {
            sigma,
            ..ConfidenceConfig::default()
        })
        .with_seed(7)
    }

    #[test]
    fn test_distance_term_at_robot() {
        let e = engine(2.0);
        let mut cells = vec![GridCell::default(); 3];
        let n = e.distance_term(&mut cells, &Point3::ZERO, &[1], &[Point3::ZERO]);
        assert_eq!(n, 1);
        assert!((cells[1].travel_term.value() - 1.0).abs() < 1e-6);
        assert_eq!(cells[0].travel_term.value(), 0.0);
    }

    #[test]
    fn test_distance_term_keeps_max() {
        let e = engine(2.0);
        let mut cells = vec![GridCell::default()];
        let p = Point3::new(1.0, 0.0, 0.0);
        e.distance_term(&mut cells, &p, &[0], &[p]);
        let near = cells[0].travel_term.value();
        e.distance_term(&mut cells, &Point3::new(5.0, 0.0, 0.0), &[0], &[p]);
        assert_eq!(cells[0].travel_term.value(), near);
    }

    #[test]
    fn test_distance_term_length_mismatch() {
        let e = engine(2.0);
        let mut cells = vec![GridCell::default(); 3];
        let n = e.distance_term(&mut cells, &Point3::ZERO, &[0, 1, 2], &[Point3::ZERO]);
        assert_eq!(n, 1);
        assert_eq!(cells[2].travel_term.value(), 0.0);
    }

    #[test]
    fn test_distance_term_out_of_range_index() {
        let e = engine(2.0);
        let mut cells = vec![GridCell::default()];
        assert_eq!(e.distance_term(&mut cells, &Point3::ZERO, &[9], &[Point3::ZERO]), 0);
    }

    #[test]
    fn test_bound_term_empty_boundary() {
        let e = engine(5.0);
        let mut cells = vec![GridCell::default(); 2];
        cells[0].bound_term.observe(0.4);
        let before = cells.clone();
        let n = e.bound_term(&mut cells, &[0, 1], &[Point3::ZERO, Point3::ZERO], &[]);
        assert_eq!(n, 0);
        assert_eq!(cells, before);
    }

    #[test]
    fn test_bound_term_far_boundary() {
        let e = engine(5.0);
        let mut cells = vec![GridCell::default()];
        let boundary = [Point3::new(10.0, 0.0, 0.0), Point3::new(0.0, 12.0, 0.1)];
        let n = e.bound_term(&mut cells, &[0], &[Point3::ZERO], &boundary);
        assert_eq!(n, 0);
        assert_eq!(cells[0].bound_term.value(), 0.0);
        assert_eq!(cells[0].reachability, Reachability::Unknown);
    }

    #[test]
    fn test_bound_term_partial_risk() {
        let e = engine(5.0);
        let mut cells = vec![GridCell::default()];
        let boundary = [Point3::new(2.0, 0.0, 0.0), Point3::new(0.0, 4.0, 0.3)];
        e.bound_term(&mut cells, &[0], &[Point3::ZERO], &boundary);
        assert!((cells[0].bound_term.value() - 0.6).abs() < 1e-5);
        assert!(!cells[0].is_blocked());
    }

    #[test]
    fn test_bound_term_blocks_close_cells() {
        let e = engine(5.0);
        let mut cells = vec![GridCell::default(); 2];
        cells[0].reachability = Reachability::Travelable;
        let boundary = [Point3::new(0.2, 0.0, 0.0), Point3::new(3.0, 3.1, 0.2)];
        let n = e.bound_term(
            &mut cells,
            &[0, 1],
            &[Point3::ZERO, Point3::new(0.0, -4.5, 0.0)],
            &boundary,
        );
        assert_eq!(n, 1);
        assert!(cells[0].is_blocked());
        assert!(!cells[1].is_blocked());
        assert!(cells.iter().all(|c| (0.0..=1.0).contains(&c.bound_term.value())));
    }

    #[test]
    fn test_bound_term_repeated_boundary_point() {
        let e = engine(5.0);
        let mut cells = vec![GridCell::default(); 2];
        let boundary = vec![Point3::new(1.0, 1.0, 0.3); 100];
        let n = e.bound_term(
            &mut cells,
            &[0, 1],
            &[Point3::ZERO, Point3::new(1.0, 1.2, 0.3)],
            &boundary,
        );
        let expected = (5.0 - 2.09f32.sqrt()) / 5.0;
        assert!((cells[0].bound_term.value() - expected).abs() < 1e-5);
        assert!(!cells[0].is_blocked());
        assert_eq!(n, 1);
        assert!(cells[1].is_blocked());
    }

    #[test]
    fn test_occlusion_counts_ground_prefix_only() {
        let e = engine(5.0);
        let mut cells = vec![GridCell::default(); 4];
        let cloud = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 5.0, 1.0),
        ];
        let everything = |c: &[Point3], _: &Point3| (0..c.len()).collect::<Vec<_>>();
        let seen = e.occlusion_term(&mut cells, &cloud, &[3, 1], &Point3::ZERO, &everything);
        assert_eq!(seen, 2);
        assert_eq!(cells[3].visibility_term.value(), 1.0);
        assert_eq!(cells[1].visibility_term.value(), 1.0);
        assert_eq!(cells[0].visibility_term.value(), 0.0);

        e.occlusion_term(&mut cells, &cloud, &[3, 1], &Point3::ZERO, &everything);
        assert_eq!(cells[3].visibility_term.value(), 2.0);
    }

    #[test]
    fn test_occlusion_applies_view_offset() {
        let e = ConfidenceEngine::new(ConfidenceConfig {
            view_z_offset: 1.5,
            ..ConfidenceConfig::default()
        });
        let mut cells = vec![GridCell::default()];
        let above = |c: &[Point3], v: &Point3| {
            if (v.z - 1.5).abs() < 1e-6 {
                (0..c.len()).collect()
            } else {
                Vec::new()
            }
        };
        let seen = e.occlusion_term(&mut cells, &[Point3::ZERO], &[0], &Point3::ZERO, &above);
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_occlusion_valve_keeps_ground() {
        let e = ConfidenceEngine::new(ConfidenceConfig {
            occlusion_sample_threshold: 4,
            ..ConfidenceConfig::default()
        });
        let mut cells = vec![GridCell::default(); 2];
        let mut cloud = vec![Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        cloud.extend((0..20).map(|i| Point3::new(0.0, i as f32, 2.0)));
        let count_check = |c: &[Point3], _: &Point3| {
            assert_eq!(c.len(), 2 + 4);
            vec![0, 1]
        };
        assert_eq!(
            e.occlusion_term(&mut cells, &cloud, &[0, 1], &Point3::ZERO, &count_check),
            2
        );
    }

    #[test]
    fn test_fuse_default_weights() {
        let e = engine(5.0);
        let mut cells = vec![GridCell::default()];
        cells[0].travel_term.observe(1.0);
        cells[0].bound_term.observe(0.5);
        assert_eq!(e.fuse(&mut cells, &[0]), 1);
        assert!((cells[0].total_value.value() - 0.8).abs() < 1e-6);

        // Lower inputs never lower the total
        let mut lower = cells.clone();
        lower[0].bound_term.observe(0.0);
        e.fuse(&mut lower, &[0]);
        assert!((lower[0].total_value.value() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_fuse_with_visibility_strategy() {
        let e = engine(5.0).with_scoring(Box::new(VisibilityWeightedFusion::default()));
        assert_eq!(e.scoring_name(), "visibility_weighted");
        let mut cells = vec![GridCell::default()];
        cells[0].bound_term.observe(0.0);
        for _ in 0..5 {
            cells[0].visibility_term.observe(1.0);
        }
        e.fuse(&mut cells, &[0]);
        assert!((cells[0].total_value.value() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_quality_term_written() {
        let mut e = engine(5.0);
        let mut cells = vec![GridCell::default(); 2];
        let pts = [Point3::ZERO];
        let v = e.quality_term(&mut cells, 1, &pts);
        assert_eq!(v, 1.0);
        assert_eq!(cells[1].quality_term, 1.0);
    }
}
