//! Per-cell data model.

use serde::{Deserialize, Serialize};

use super::accumulator::{MaxAccumulator, MinAccumulator, SumAccumulator};
use super::point::Point3;

/// Sensor classification of a cell.
///
/// Ordered by rank. A cell's label only ever moves up this order:
/// `Unset < Obstacle < Ground < Boundary`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellLabel {
    /// Never classified
    #[default]
    Unset = 0,
    /// Obstacle surface
    Obstacle = 1,
    /// Ground surface
    Ground = 2,
    /// Map boundary (ceiling-free edge, drop-off, unexplored border)
    Boundary = 3,
}

impl CellLabel {
    /// Convert from the raw rank.
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => CellLabel::Obstacle,
            2 => CellLabel::Ground,
            3 => CellLabel::Boundary,
            _ => CellLabel::Unset,
        }
    }

    /// Escalate towards `observed`. Returns true if the label changed.
    #[inline]
    pub fn escalate(&mut self, observed: CellLabel) -> bool {
        if observed > *self {
            *self = observed;
            true
        } else {
            false
        }
    }

    /// True once the cell carries any classification.
    #[inline]
    pub fn is_set(&self) -> bool {
        *self != CellLabel::Unset
    }
}

/// Reachability state of a cell.
///
/// ```text
///   Unknown ──seed──► NewlyScanned (ground) ──grow──► Travelable
///      │                   ▲                   └────► NotReachableYet
///      └──seed──► Blocked  └──────── re-arm ────────────────┘
/// ```
///
/// `Settled` only exists while a grow pass is running. `Blocked` is
/// permanent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i8)]
pub enum Reachability {
    /// Never considered
    #[default]
    Unknown = -1,
    /// Grown, but not connected to travelable space yet
    NotReachableYet = 0,
    /// Connected to travelable space
    Travelable = 1,
    /// Ground awaiting the next grow pass
    NewlyScanned = 2,
    /// Visited during the current grow pass
    Settled = 3,
    /// Never traversable
    Blocked = 4,
}

impl Reachability {
    /// Raw value as stored in exported layers.
    #[inline]
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// Convert from the raw value. Out-of-range values map to `Unknown`.
    #[inline]
    pub fn from_i8(value: i8) -> Self {
        match value {
            0 => Reachability::NotReachableYet,
            1 => Reachability::Travelable,
            2 => Reachability::NewlyScanned,
            3 => Reachability::Settled,
            4 => Reachability::Blocked,
            _ => Reachability::Unknown,
        }
    }
}

/// One grid cell's fused metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Sensor classification.
    pub label: CellLabel,
    /// Reachability state.
    pub reachability: Reachability,
    /// Proximity-to-robot evidence (max-ratchet).
    pub travel_term: MaxAccumulator,
    /// Boundary safety (clamped min-ratchet, starts at 1).
    pub bound_term: MinAccumulator,
    /// Times seen unoccluded from a past viewpoint.
    pub visibility_term: SumAccumulator,
    /// Fused confidence (max-ratchet).
    pub total_value: MaxAccumulator,
    /// Local point-cloud quality diagnostic.
    pub quality_term: f32,
    /// Epoch in which the cell was last actively considered.
    pub node_count: u32,
    /// Representative location. z tracks the ground height.
    pub center_point: Point3,
}

impl GridCell {
    /// Fresh cell centered at `center`.
    pub fn at(center: Point3) -> Self {
        Self {
            center_point: center,
            ..Self::default()
        }
    }

    /// True if the cell is connected to travelable space.
    #[inline]
    pub fn is_travelable(&self) -> bool {
        self.reachability == Reachability::Travelable
    }

    /// True if the cell is permanently excluded.
    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.reachability == Reachability::Blocked
    }
}
