//! Incremental confidence fusion.
//!
//! Each sensor cycle updates the cells near the robot with independent terms,
//! every one stored in a monotone accumulator:
//!
//! ```text
//!   ground cells ──► travel term     (max of Gaussian proximity)
//!                ──► boundary term   (min of boundary risk, may block)
//!                ──► occlusion term  (sum of sightings from a past view)
//!   obstacles    ──► quality term    (local cloud diagnostic)
//!
//!   travel + bound ──► ScoringStrategy ──► total_value (max)
//! ```
//!
//! The engine owns its random source. A configured seed makes every sampled
//! quantity reproducible.

mod fusion;
mod quality;
mod terms;

pub use fusion::{ScoringStrategy, VisibilityWeightedFusion, WeightedFusion};
pub use quality::{BoxDimensionQuality, DensityQuality, QualityMetric, SpreadQuality};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Runtime parameters of the confidence engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    /// Reach radius (meters). Gaussian width and boundary risk scale.
    pub sigma: f32,
    /// Vertical bias added to past viewpoints (meters)
    pub view_z_offset: f32,
    /// Non-ground points above which occlusion input is strided
    pub occlusion_sample_threshold: usize,
    /// Boundary distance below which a cell is never touched (meters)
    pub no_touch_distance: f32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            sigma: 5.0,
            view_z_offset: 0.0,
            occlusion_sample_threshold: 500_000,
            no_touch_distance: 0.5,
        }
    }
}

impl ConfidenceConfig {
    /// Stored boundary term above which a cell is blocked:
    /// `(sigma - no_touch_distance) / sigma`.
    #[inline]
    pub fn no_touch_threshold(&self) -> f32 {
        (self.sigma - self.no_touch_distance) / self.sigma
    }
}

/// Confidence term engine.
pub struct ConfidenceEngine {
    config: ConfidenceConfig,
    scoring: Box<dyn ScoringStrategy>,
    quality: Box<dyn QualityMetric>,
    rng: StdRng,
}

impl ConfidenceEngine {
    /// Engine with weighted fusion, density quality and an OS-seeded RNG.
    pub fn new(config: ConfidenceConfig) -> Self {
        Self {
            config,
            scoring: Box::new(WeightedFusion::default()),
            quality: Box::new(DensityQuality::default()),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the scoring strategy.
    pub fn with_scoring(mut self, scoring: Box<dyn ScoringStrategy>) -> Self {
        self.scoring = scoring;
        self
    }

    /// Replace the quality metric.
    pub fn with_quality(mut self, quality: Box<dyn QualityMetric>) -> Self {
        self.quality = quality;
        self
    }

    /// Reseed the random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Runtime parameters.
    #[inline]
    pub fn config(&self) -> &ConfidenceConfig {
        &self.config
    }

    /// Active scoring strategy name.
    pub fn scoring_name(&self) -> &'static str {
        self.scoring.name()
    }

    /// Active quality metric name.
    pub fn quality_name(&self) -> &'static str {
        self.quality.name()
    }
}

impl std::fmt::Debug for ConfidenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfidenceEngine")
            .field("config", &self.config)
            .field("scoring", &self.scoring.name())
            .field("quality", &self.quality.name())
            .finish()
    }
}
