//! Sampling and down-sampling utilities.
//!
//! All randomized routines take an explicit random source so a seeded
//! [`rand::rngs::StdRng`] reproduces the same draws.

mod density;
mod index;

pub use density::{DENSITY_SEARCH_RADIUS, density_estimate};
pub use index::PointIndex;

use rand::Rng;

use crate::core::Point3;

/// Draw `k` distinct indices from `0..n` with a partial Fisher–Yates shuffle.
///
/// Each step picks a uniform position among the not-yet-selected prefix and
/// swaps it to the tail; the selected tail is returned last-position first.
/// When `k >= n` all indices are returned in order without drawing.
pub fn sample_without_replacement<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..n).collect();
    if k >= n {
        return pool;
    }

    for c in 0..k {
        let last = n - 1 - c;
        let pick = rng.random_range(0..=last);
        pool.swap(pick, last);
    }

    pool[n - k..].iter().rev().copied().collect()
}

/// Keep the first `keep_prefix` points verbatim and every `stride`-th point of
/// the remainder.
///
/// A stride of 0 or 1 keeps everything.
pub fn stride_downsample(points: &[Point3], keep_prefix: usize, stride: usize) -> Vec<Point3> {
    let keep_prefix = keep_prefix.min(points.len());
    let stride = stride.max(1);
    let mut out = Vec::with_capacity(keep_prefix + (points.len() - keep_prefix) / stride + 1);
    out.extend_from_slice(&points[..keep_prefix]);
    out.extend(points[keep_prefix..].iter().step_by(stride).copied());
    out
}

/// Bound the non-ground part of an occlusion cloud.
///
/// If more than `threshold` points follow the `ground_count` prefix, the tail
/// is strided by `non_ground / threshold`. Returns `None` when the cloud is
/// already small enough.
pub fn limit_occlusion_cloud(
    cloud: &[Point3],
    ground_count: usize,
    threshold: usize,
) -> Option<Vec<Point3>> {
    let ground_count = ground_count.min(cloud.len());
    let non_ground = cloud.len() - ground_count;
    if threshold == 0 || non_ground <= threshold {
        return None;
    }
    let stride = non_ground / threshold;
    Some(stride_downsample(cloud, ground_count, stride))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_sample_all_when_k_large() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(sample_without_replacement(5, 5, &mut rng), vec![0, 1, 2, 3, 4]);
        assert_eq!(sample_without_replacement(3, 10, &mut rng), vec![0, 1, 2]);
        assert!(sample_without_replacement(0, 2, &mut rng).is_empty());
    }

    #[test]
    fn test_sample_distinct_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for k in 0..20 {
            let picks = sample_without_replacement(20, k, &mut rng);
            assert_eq!(picks.len(), k);
            let unique: HashSet<_> = picks.iter().copied().collect();
            assert_eq!(unique.len(), k);
            assert!(picks.iter().all(|&i| i < 20));
        }
    }

    #[test]
    fn test_sample_reproducible() {
        let a = sample_without_replacement(1000, 10, &mut StdRng::seed_from_u64(3));
        let b = sample_without_replacement(1000, 10, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_stride_downsample_keeps_prefix() {
        let pts: Vec<Point3> = (0..10).map(|i| Point3::new(i as f32, 0.0, 0.0)).collect();
        let out = stride_downsample(&pts, 3, 3);
        let xs: Vec<f32> = out.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 6.0, 9.0]);

        assert_eq!(stride_downsample(&pts, 0, 0).len(), 10);
        assert_eq!(stride_downsample(&pts, 50, 4).len(), 10);
    }

    #[test]
    fn test_occlusion_limit() {
        let pts: Vec<Point3> = (0..25).map(|i| Point3::new(i as f32, 0.0, 0.0)).collect();
        assert!(limit_occlusion_cloud(&pts, 5, 20).is_none());

        // 20 non-ground over a threshold of 10: stride 2
        let limited = limit_occlusion_cloud(&pts, 5, 10).unwrap();
        assert_eq!(limited.len(), 15);
        assert_eq!(&limited[..5], &pts[..5]);
        assert_eq!(limited[5].x, 5.0);
        assert_eq!(limited[6].x, 7.0);
    }
}
