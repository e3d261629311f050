//! Spatial grid interface.
//!
//! The engine never computes cell geometry itself. It asks a [`SpatialGrid`]
//! to map points to cell indices and to expand a [`NeighborhoodMask`] around
//! a cell. [`PlanarGrid`] is the reference implementation: a square,
//! row-major 2D grid over the ground plane with vertical limits.
//!
//! ```text
//!  index = row * width + col
//!
//!  row 2 │ 10 11 12 13 14
//!  row 1 │  5  6  7  8  9
//!  row 0 │  0  1  2  3  4
//!        └───────────────
//!          col 0 ...  4
//! ```

mod mask;
mod planar;

pub use mask::NeighborhoodMask;
pub use planar::PlanarGrid;

use crate::core::Point3;

/// Point → cell mapping and mask-driven neighborhood queries.
pub trait SpatialGrid {
    /// Number of cells. Cell indices run `0..cell_count()`.
    fn cell_count(&self) -> usize;

    /// Cell containing `point`, or `None` outside the grid.
    fn cell_index(&self, point: &Point3) -> Option<usize>;

    /// Center of a cell (z = 0).
    fn cell_center(&self, index: usize) -> Point3;

    /// Mask approximating a disk of `radius` meters on this grid.
    fn circle_mask(&self, radius: f32) -> NeighborhoodMask;

    /// Cells covered by `mask` around `origin`, in mask order. Offsets
    /// falling outside the grid are dropped.
    fn neighborhood(&self, mask: &NeighborhoodMask, origin: usize) -> Vec<usize>;

    /// Cells covered by `mask` around the cell containing `point`.
    fn neighborhood_of(&self, mask: &NeighborhoodMask, point: &Point3) -> Vec<usize> {
        match self.cell_index(point) {
            Some(origin) => self.neighborhood(mask, origin),
            None => Vec::new(),
        }
    }
}
