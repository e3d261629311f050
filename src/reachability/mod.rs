//! Incremental reachability growing.
//!
//! Reachability is decided only for a batch of freshly touched cells, by
//! flood-filling through mask neighbors and checking whether the component
//! touches space already known to be travelable.
//!
//! ```text
//!   touches T:   ? ? ?   seed    N N N   grow    T T T
//!                ? T ?   ───►    N T N   ───►    T T T
//!                ? ? ?           N N N           T T T
//!
//!   isolated:    ? ?     seed    N N     grow    0 0    re-arm   N N
//!                ? ?     ───►    N N     ───►    0 0    ─────►   N N
//!
//!  ? Unknown   N NewlyScanned   T Travelable   0 NotReachableYet
//! ```
//!
//! Cells are marked `Settled` as soon as they are pushed, so every cell is
//! visited at most once per call and the walk always terminates.
//!
//! # Buffer reuse
//!
//! [`RegionGrower`] keeps its seed stack and visit lists between calls.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::core::{CellLabel, GridCell, Reachability};
use crate::grid::{NeighborhoodMask, SpatialGrid};

/// Outcome of one grow pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowReport {
    /// Unknown batch cells turned into `NewlyScanned`
    pub seeded: usize,
    /// Unknown batch cells turned into `Blocked`
    pub blocked: usize,
    /// Connected components walked
    pub components: usize,
    /// Cells visited
    pub visited: usize,
    /// Visited cells now `Travelable`
    pub travelable: usize,
    /// Visited cells re-armed for the next pass
    pub pending: usize,
}

/// Flood-fill reachability classifier with reusable buffers.
#[derive(Clone, Debug, Default)]
pub struct RegionGrower {
    /// Seed stack for the current component.
    seeds: Vec<usize>,
    /// Cells of the current component.
    component: Vec<usize>,
    /// Every cell visited in the current call.
    visited: Vec<usize>,
}

impl RegionGrower {
    /// Create a grower with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a grower with a capacity hint (cells per call).
    pub fn with_capacity(expected_cells: usize) -> Self {
        Self {
            seeds: Vec::with_capacity(expected_cells),
            component: Vec::with_capacity(expected_cells),
            visited: Vec::with_capacity(expected_cells),
        }
    }

    /// Grow reachability from `batch`.
    ///
    /// 1. Unknown batch cells become `NewlyScanned` if labeled ground, else
    ///    `Blocked`.
    /// 2. Every batch cell still `NewlyScanned` starts a walk over
    ///    `NewlyScanned` mask neighbors. The component becomes `Travelable`
    ///    if any member has a `Travelable` neighbor, otherwise
    ///    `NotReachableYet`. Visited cells get `node_count = epoch`.
    /// 3. Visited cells left `NotReachableYet` are re-armed to
    ///    `NewlyScanned`.
    ///
    /// Indices outside `cells` are ignored.
    pub fn grow<G: SpatialGrid + ?Sized>(
        &mut self,
        cells: &mut [GridCell],
        batch: &[usize],
        grid: &G,
        mask: &NeighborhoodMask,
        epoch: u32,
    ) -> GrowReport {
        let mut report = GrowReport::default();
        self.visited.clear();

        for &idx in batch {
            if let Some(cell) = cells.get_mut(idx)
                && cell.reachability == Reachability::Unknown
            {
                if cell.label == CellLabel::Ground {
                    cell.reachability = Reachability::NewlyScanned;
                    report.seeded += 1;
                } else {
                    cell.reachability = Reachability::Blocked;
                    report.blocked += 1;
                }
            }
        }

        for &start in batch {
            match cells.get_mut(start) {
                Some(cell) if cell.reachability == Reachability::NewlyScanned => {
                    cell.reachability = Reachability::Settled;
                }
                _ => continue,
            }

            let touched = self.walk(cells, start, grid, mask);
            let state = if touched {
                Reachability::Travelable
            } else {
                Reachability::NotReachableYet
            };

            for &idx in &self.component {
                let cell = &mut cells[idx];
                cell.reachability = state;
                cell.node_count = epoch;
            }
            if touched {
                report.travelable += self.component.len();
            }
            report.components += 1;
            report.visited += self.component.len();
            trace!(
                "[RegionGrow] component from {}: {} cells, travelable={}",
                start,
                self.component.len(),
                touched
            );
            self.visited.extend_from_slice(&self.component);
        }

        for &idx in &self.visited {
            let cell = &mut cells[idx];
            if cell.reachability == Reachability::NotReachableYet {
                cell.reachability = Reachability::NewlyScanned;
                report.pending += 1;
            }
        }

        debug!(
            "[RegionGrow] batch={} seeded={} blocked={} visited={} travelable={} pending={}",
            batch.len(),
            report.seeded,
            report.blocked,
            report.visited,
            report.travelable,
            report.pending
        );
        report
    }

    /// Walk the component containing the already-settled `start`. Fills
    /// `self.component`; returns true if it touches a travelable cell.
    fn walk<G: SpatialGrid + ?Sized>(
        &mut self,
        cells: &mut [GridCell],
        start: usize,
        grid: &G,
        mask: &NeighborhoodMask,
    ) -> bool {
        self.seeds.clear();
        self.component.clear();
        self.seeds.push(start);

        let mut touched = false;
        while let Some(seed) = self.seeds.pop() {
            self.component.push(seed);
            for neighbor in grid.neighborhood(mask, seed) {
                let Some(cell) = cells.get_mut(neighbor) else {
                    continue;
                };
                match cell.reachability {
                    Reachability::NewlyScanned => {
                        cell.reachability = Reachability::Settled;
                        self.seeds.push(neighbor);
                    }
                    Reachability::Travelable => touched = true,
                    _ => {}
                }
            }
        }
        touched
    }
}
