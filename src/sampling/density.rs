//! Sampled neighbor-density estimate.

use rand::Rng;

use super::PointIndex;
use super::sample_without_replacement;
use crate::core::Point3;

/// Neighbor search radius for density samples (meters).
pub const DENSITY_SEARCH_RADIUS: f32 = 0.3;

/// Mean neighbor count around `sample_count` random points.
///
/// - Fewer points than `sample_count`: returns 1.0.
/// - `indexed == false`: returns the raw point count.
/// - Otherwise: draws `sample_count` distinct points, counts neighbors within
///   [`DENSITY_SEARCH_RADIUS`] of each (the point itself included) and
///   returns the mean.
pub fn density_estimate<R: Rng + ?Sized>(
    points: &[Point3],
    sample_count: usize,
    indexed: bool,
    rng: &mut R,
) -> f32 {
    if points.len() < sample_count {
        return 1.0;
    }
    if !indexed {
        return points.len() as f32;
    }
    if sample_count == 0 {
        return 0.0;
    }

    let index = PointIndex::build(points);
    let total: usize = sample_without_replacement(points.len(), sample_count, rng)
        .into_iter()
        .map(|i| index.count_within(&points[i], DENSITY_SEARCH_RADIUS))
        .sum();

    total as f32 / sample_count as f32
}
