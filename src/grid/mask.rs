//! Disk-shaped neighborhood masks.

use serde::{Deserialize, Serialize};

/// Precomputed relative cell offsets approximating a disk.
///
/// ```text
///   radius 1.5 cells        radius 2.2 cells
///        . # .                 . # # # .
///        # o #                 # # # # #
///        . # .   (+ diag)      # # o # #
///                              # # # # #
///                              . # # # .
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodMask {
    offsets: Vec<(i32, i32)>,
}

impl NeighborhoodMask {
    /// Mask from explicit offsets.
    pub fn from_offsets(offsets: Vec<(i32, i32)>) -> Self {
        Self { offsets }
    }

    /// Offsets whose center lies within `radius` meters on a grid of cell size
    /// `resolution`. The origin offset is included.
    ///
    /// Offsets are ordered by row, then column.
    pub fn disk(radius: f32, resolution: f32) -> Self {
        if radius.is_nan() || radius < 0.0 || resolution.is_nan() || resolution <= 0.0 {
            return Self::from_offsets(vec![(0, 0)]);
        }
        let reach = (radius / resolution).ceil() as i32;
        let mut offsets = Vec::with_capacity(((2 * reach + 1) * (2 * reach + 1)) as usize);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let dist = ((dx * dx + dy * dy) as f32).sqrt() * resolution;
                if dist <= radius {
                    offsets.push((dx, dy));
                }
            }
        }
        Self { offsets }
    }

    /// Relative offsets.
    #[inline]
    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    /// Number of offsets.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True if the mask has no offsets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_radius_is_plus() {
        let mask = NeighborhoodMask::disk(1.0, 1.0);
        assert_eq!(mask.len(), 5);
        assert!(mask.offsets().contains(&(0, 0)));
        assert!(mask.offsets().contains(&(1, 0)));
        assert!(!mask.offsets().contains(&(1, 1)));
    }

    #[test]
    fn test_eight_connected() {
        let mask = NeighborhoodMask::disk(1.5, 1.0);
        assert_eq!(mask.len(), 9);
        assert!(mask.offsets().contains(&(1, 1)));
        assert!(mask.offsets().contains(&(-1, -1)));
    }

    #[test]
    fn test_metric_radius() {
        // 0.5m at 0.1m cells: 5 cells reach
        let mask = NeighborhoodMask::disk(0.5, 0.1);
        assert!(mask.offsets().contains(&(5, 0)));
        assert!(!mask.offsets().contains(&(4, 4)));
        assert!(mask.offsets().contains(&(3, 3)));
    }

    #[test]
    fn test_degenerate_radius() {
        assert_eq!(NeighborhoodMask::disk(0.0, 0.1).offsets(), &[(0, 0)]);
        assert_eq!(NeighborhoodMask::disk(f32::NAN, 0.1).offsets(), &[(0, 0)]);
    }
}
