//! Local point-cloud quality metrics.
//!
//! Quality is a per-cell diagnostic written to `quality_term`. It does not
//! feed the default fusion.

use std::collections::HashSet;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::core::{Point3, standard_deviation};
use crate::sampling::density_estimate;

/// Measures a local point set.
pub trait QualityMetric: Send + Sync {
    /// Quality of `points`. Randomized metrics draw from `rng`.
    fn measure(&self, points: &[Point3], rng: &mut dyn RngCore) -> f32;

    /// Metric name for logging.
    fn name(&self) -> &'static str;
}

/// Sampled neighbor density.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DensityQuality {
    /// Points sampled per estimate
    pub sample_count: usize,
}

impl Default for DensityQuality {
    fn default() -> Self {
        Self { sample_count: 5 }
    }
}

impl QualityMetric for DensityQuality {
    fn measure(&self, points: &[Point3], rng: &mut dyn RngCore) -> f32 {
        density_estimate(points, self.sample_count, true, rng)
    }

    fn name(&self) -> &'static str {
        "density"
    }
}

/// RMS spread around the centroid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpreadQuality;

impl QualityMetric for SpreadQuality {
    fn measure(&self, points: &[Point3], _rng: &mut dyn RngCore) -> f32 {
        standard_deviation(points)
    }

    fn name(&self) -> &'static str {
        "spread"
    }
}

/// Distance of the box-counting dimension from a flat surface: `|D - 2|`.
///
/// Boxes of size `min_box * 2^k` for `k in 0..levels`; `D` is the
/// least-squares slope of `ln N(s)` against `ln(1/s)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensionQuality {
    /// Smallest box edge (meters)
    pub min_box: f32,
    /// Number of box sizes
    pub levels: u32,
}

impl Default for BoxDimensionQuality {
    fn default() -> Self {
        Self {
            min_box: 0.1,
            levels: 5,
        }
    }
}

impl BoxDimensionQuality {
    /// Box-counting dimension of `points`. 0 for fewer than two points.
    pub fn dimension(&self, points: &[Point3]) -> f32 {
        if points.len() < 2 || self.levels < 2 || self.min_box <= 0.0 {
            return 0.0;
        }

        let mut boxes: HashSet<(i64, i64, i64)> = HashSet::with_capacity(points.len());
        let mut samples: Vec<(f32, f32)> = Vec::with_capacity(self.levels as usize);
        for level in 0..self.levels {
            let size = self.min_box * (1u32 << level) as f32;
            boxes.clear();
            for p in points {
                boxes.insert((
                    (p.x / size).floor() as i64,
                    (p.y / size).floor() as i64,
                    (p.z / size).floor() as i64,
                ));
            }
            samples.push(((1.0 / size).ln(), (boxes.len() as f32).ln()));
        }

        let n = samples.len() as f32;
        let mean_x = samples.iter().map(|s| s.0).sum::<f32>() / n;
        let mean_y = samples.iter().map(|s| s.1).sum::<f32>() / n;
        let (mut sxy, mut sxx) = (0.0f32, 0.0f32);
        for (x, y) in &samples {
            sxy += (x - mean_x) * (y - mean_y);
            sxx += (x - mean_x) * (x - mean_x);
        }
        if sxx <= 0.0 { 0.0 } else { sxy / sxx }
    }
}

impl QualityMetric for BoxDimensionQuality {
    fn measure(&self, points: &[Point3], _rng: &mut dyn RngCore) -> f32 {
        (self.dimension(points) - 2.0).abs()
    }

    fn name(&self) -> &'static str {
        "box_dimension"
    }
}
