//! Kernels and point statistics.

use super::point::Point3;

/// Gaussian proximity kernel: `exp(-|q - t|² / sigma²)`.
///
/// 1.0 at zero distance, decreasing with distance. `sigma` is not checked;
/// zero or non-finite values propagate NaN/Inf.
#[inline]
pub fn gaussian_kernel(query: &Point3, target: &Point3, sigma: f32) -> f32 {
    (-query.distance_squared(target) / (sigma * sigma)).exp()
}

/// Saturating linear ramp: `value / threshold` below the threshold, 1.0 at or
/// above it.
#[inline]
pub fn linear_kernel(value: f32, threshold: f32) -> f32 {
    if value < threshold {
        value / threshold
    } else {
        1.0
    }
}

/// Mean position. Origin for an empty set.
pub fn centroid(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::ZERO;
    }
    let sum = points.iter().fold(Point3::ZERO, |acc, p| acc + *p);
    sum / points.len() as f32
}

/// Mean position of the indexed subset. Origin for an empty subset.
///
/// Out-of-range indices are skipped.
pub fn centroid_of(points: &[Point3], indices: &[usize]) -> Point3 {
    let mut sum = Point3::ZERO;
    let mut count = 0usize;
    for p in indices.iter().filter_map(|&i| points.get(i)) {
        sum = sum + *p;
        count += 1;
    }
    if count == 0 {
        Point3::ZERO
    } else {
        sum / count as f32
    }
}

/// Root-mean-square distance to the centroid. 0 for an empty set.
pub fn standard_deviation(points: &[Point3]) -> f32 {
    if points.is_empty() {
        return 0.0;
    }
    let center = centroid(points);
    let sum_sq: f32 = points.iter().map(|p| p.distance_squared(&center)).sum();
    (sum_sq / points.len() as f32).sqrt()
}

/// Min-max scale in place to [0, 1].
///
/// Returns false, leaving every value at 0.0, when the list is empty or its
/// range is zero or non-finite.
pub fn normalize(values: &mut [f32]) -> bool {
    let (min, max) = values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        values.iter_mut().for_each(|v| *v = 0.0);
        return false;
    }
    for v in values.iter_mut() {
        *v = (*v - min) / range;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_kernel_at_zero() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!((gaussian_kernel(&p, &p, 5.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_gaussian_kernel_decreasing() {
        let robot = Point3::ZERO;
        let mut last = 1.0;
        for i in 1..20 {
            let v = gaussian_kernel(&robot, &Point3::new(i as f32 * 0.5, 0.0, 0.0), 5.0);
            assert!(v < last);
            assert!(v > 0.0);
            last = v;
        }
    }

    #[test]
    fn test_gaussian_kernel_at_sigma() {
        let v = gaussian_kernel(&Point3::ZERO, &Point3::new(2.0, 0.0, 0.0), 2.0);
        assert!((v - (-1.0f32).exp()).abs() < 1e-6);
    }

    #[test]
    fn test_gaussian_kernel_zero_sigma_propagates() {
        let v = gaussian_kernel(&Point3::ZERO, &Point3::ZERO, 0.0);
        assert!(v.is_nan());
    }

    #[test]
    fn test_linear_kernel() {
        assert!((linear_kernel(2.0, 5.0) - 0.4).abs() < 1e-6);
        assert_eq!(linear_kernel(5.0, 5.0), 1.0);
        assert_eq!(linear_kernel(9.0, 5.0), 1.0);
        assert_eq!(linear_kernel(0.0, 5.0), 0.0);
    }

    #[test]
    fn test_centroid() {
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 4.0),
        ];
        assert_eq!(centroid(&pts), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(centroid(&[]), Point3::ZERO);
        assert_eq!(centroid_of(&pts, &[0, 1]), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(centroid_of(&pts, &[]), Point3::ZERO);
        assert_eq!(centroid_of(&pts, &[42]), Point3::ZERO);
    }

    #[test]
    fn test_standard_deviation() {
        let pts = [Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        assert!((standard_deviation(&pts) - 1.0).abs() < 1e-6);
        assert_eq!(standard_deviation(&[]), 0.0);
        assert_eq!(standard_deviation(&[Point3::new(3.0, 3.0, 3.0)]), 0.0);
    }

    #[test]
    fn test_normalize() {
        let mut v = vec![2.0, 4.0, 6.0];
        assert!(normalize(&mut v));
        assert_eq!(v, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_degenerate() {
        let mut v = vec![3.0, 3.0, 3.0];
        assert!(!normalize(&mut v));
        assert!(v.iter().all(|x| *x == 0.0));

        let mut empty: Vec<f32> = Vec::new();
        assert!(!normalize(&mut empty));

        let mut inf = vec![0.0, f32::INFINITY];
        assert!(!normalize(&mut inf));
        assert!(inf.iter().all(|x| x.is_finite()));
    }
}
