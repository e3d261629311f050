//! Visibility oracle: which points of a cloud are unoccluded from a viewpoint.
//!
//! The confidence engine treats visibility as an opaque query behind
//! [`VisibilityOracle`]. Any `Fn(&[Point3], &Point3) -> Vec<usize>` is an
//! oracle, so callers can plug in their own hidden-point-removal.
//!
//! [`AngularZBuffer`] is the bundled oracle. It bins every point by its
//! direction from the viewpoint and keeps, per bin, the points no farther
//! than the nearest range plus a depth tolerance:
//!
//! ```text
//!   viewpoint ●───────► a        b        (same bin)
//!                       ▲        ▲
//!                    nearest   occluded (b - a > tolerance)
//! ```

use std::collections::HashMap;
use std::f32::consts::PI;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::Point3;

/// Answers "which of these points can be seen from here".
pub trait VisibilityOracle {
    /// Indices into `cloud` of points unoccluded from `viewpoint`.
    fn visible_indices(&self, cloud: &[Point3], viewpoint: &Point3) -> Vec<usize>;
}

impl<F> VisibilityOracle for F
where
    F: Fn(&[Point3], &Point3) -> Vec<usize>,
{
    fn visible_indices(&self, cloud: &[Point3], viewpoint: &Point3) -> Vec<usize> {
        self(cloud, viewpoint)
    }
}

/// Angular z-buffer visibility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngularZBuffer {
    /// Angular bin size (radians)
    pub angular_resolution: f32,
    /// Points up to this far behind the nearest hit in a bin stay visible (meters)
    pub depth_tolerance: f32,
}

impl Default for AngularZBuffer {
    fn default() -> Self {
        Self {
            angular_resolution: 0.5_f32.to_radians(),
            depth_tolerance: 0.2,
        }
    }
}

impl AngularZBuffer {
    /// Oracle with the given bin size and depth tolerance.
    pub fn new(angular_resolution: f32, depth_tolerance: f32) -> Self {
        Self {
            angular_resolution,
            depth_tolerance,
        }
    }

    #[inline]
    fn bin_of(&self, offset: &Point3) -> (i32, i32) {
        let azimuth = offset.y.atan2(offset.x) + PI;
        let planar = (offset.x * offset.x + offset.y * offset.y).sqrt();
        let elevation = offset.z.atan2(planar) + PI / 2.0;
        (
            (azimuth / self.angular_resolution).floor() as i32,
            (elevation / self.angular_resolution).floor() as i32,
        )
    }
}

impl VisibilityOracle for AngularZBuffer {
    fn visible_indices(&self, cloud: &[Point3], viewpoint: &Point3) -> Vec<usize> {
        if cloud.is_empty() || self.angular_resolution.is_nan() || self.angular_resolution <= 0.0 {
            return Vec::new();
        }

        let mut bins: Vec<((i32, i32), f32)> = Vec::with_capacity(cloud.len());
        let mut nearest: HashMap<(i32, i32), f32> = HashMap::with_capacity(cloud.len() / 4 + 1);

        for p in cloud {
            let offset = *p - *viewpoint;
            let range = offset.length();
            let bin = self.bin_of(&offset);
            nearest
                .entry(bin)
                .and_modify(|r| *r = r.min(range))
                .or_insert(range);
            bins.push((bin, range));
        }

        let visible: Vec<usize> = bins
            .iter()
            .enumerate()
            .filter(|(_, (bin, range))| {
                nearest
                    .get(bin)
                    .is_some_and(|&r| *range <= r + self.depth_tolerance)
            })
            .map(|(i, _)| i)
            .collect();

        trace!(
            "[ZBuffer] {} of {} points visible from ({:.2}, {:.2}, {:.2}), {} bins",
            visible.len(),
            cloud.len(),
            viewpoint.x,
            viewpoint.y,
            viewpoint.z,
            nearest.len()
        );
        visible
    }
}
