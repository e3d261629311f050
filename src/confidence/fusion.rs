//! Pluggable scoring of a cell's fused confidence.

use serde::{Deserialize, Serialize};

use crate::core::{GridCell, linear_kernel};

/// Turns a cell's accumulated terms into a fusion candidate.
///
/// The engine combines the candidate into `total_value` with a max-ratchet,
/// so a strategy only decides the candidate, never the update rule.
pub trait ScoringStrategy: Send + Sync {
    /// Candidate fused score for one cell.
    fn score(&self, cell: &GridCell) -> f32;

    /// Strategy name for logging.
    fn name(&self) -> &'static str;
}

/// `travel_weight * travel + bound_weight * bound`.
///
/// Visibility and quality do not contribute.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedFusion {
    /// Weight of the travel term
    pub travel_weight: f32,
    /// Weight of the boundary term
    pub bound_weight: f32,
}

impl Default for WeightedFusion {
    fn default() -> Self {
        Self {
            travel_weight: 0.6,
            bound_weight: 0.4,
        }
    }
}

impl ScoringStrategy for WeightedFusion {
    #[inline]
    fn score(&self, cell: &GridCell) -> f32 {
        self.travel_weight * cell.travel_term.value() + self.bound_weight * cell.bound_term.value()
    }

    fn name(&self) -> &'static str {
        "weighted"
    }
}

/// [`WeightedFusion`] plus a saturating visibility contribution:
/// `visibility_weight * linear_kernel(visibility, visibility_threshold)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibilityWeightedFusion {
    /// Travel/bound part
    pub base: WeightedFusion,
    /// Weight of the visibility contribution
    pub visibility_weight: f32,
    /// Sightings at which visibility saturates
    pub visibility_threshold: f32,
}

impl Default for VisibilityWeightedFusion {
    fn default() -> Self {
        Self {
            base: WeightedFusion::default(),
            visibility_weight: 0.3,
            visibility_threshold: 5.0,
        }
    }
}

impl ScoringStrategy for VisibilityWeightedFusion {
    #[inline]
    fn score(&self, cell: &GridCell) -> f32 {
        self.base.score(cell)
            + self.visibility_weight
                * linear_kernel(cell.visibility_term.value(), self.visibility_threshold)
    }

    fn name(&self) -> &'static str {
        "visibility_weighted"
    }
}
