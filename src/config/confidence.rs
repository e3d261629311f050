//! Confidence engine configuration section.

use serde::{Deserialize, Serialize};

use crate::confidence::{
    BoxDimensionQuality, ConfidenceConfig, ConfidenceEngine, DensityQuality, QualityMetric,
    ScoringStrategy, SpreadQuality, VisibilityWeightedFusion, WeightedFusion,
};

use super::defaults;
use super::error::{ConfigError, finite, positive};

/// Fusion formula
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringKind {
    /// Travel and boundary terms only
    #[default]
    Weighted,
    /// Travel, boundary and saturating visibility
    VisibilityWeighted,
}

/// Quality diagnostic
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityKind {
    /// Sampled neighbor density
    #[default]
    Density,
    /// RMS spread around the centroid
    Spread,
    /// Box-counting dimension distance from a plane
    BoxDimension,
}

/// Confidence configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSection {
    /// Reach radius around the robot (meters)
    #[serde(default = "defaults::sigma")]
    pub sigma: f32,

    /// Sightings at which visibility saturates
    #[serde(default = "defaults::visibility_threshold")]
    pub visibility_threshold: f32,

    /// Travel term weight
    #[serde(default = "defaults::travel_weight")]
    pub travel_weight: f32,

    /// Boundary term weight
    #[serde(default = "defaults::bound_weight")]
    pub bound_weight: f32,

    /// Visibility weight (visibility_weighted scoring only)
    #[serde(default = "defaults::visibility_weight")]
    pub visibility_weight: f32,

    /// Fusion formula
    #[serde(default)]
    pub scoring: ScoringKind,

    /// Vertical bias added to past viewpoints (meters)
    #[serde(default)]
    pub view_z_offset: f32,

    /// Boundary distance that blocks a cell (meters)
    #[serde(default = "defaults::no_touch_distance")]
    pub no_touch_distance: f32,

    /// Non-ground occlusion points before striding
    #[serde(default = "defaults::occlusion_sample_threshold")]
    pub occlusion_sample_threshold: usize,

    /// Quality diagnostic
    #[serde(default)]
    pub quality: QualityKind,

    /// Samples per density estimate
    #[serde(default = "defaults::quality_sample_count")]
    pub quality_sample_count: usize,

    /// Random seed. OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ConfidenceSection {
    fn default() -> Self {
        Self {
            sigma: defaults::sigma(),
            visibility_threshold: defaults::visibility_threshold(),
            travel_weight: defaults::travel_weight(),
            bound_weight: defaults::bound_weight(),
            visibility_weight: defaults::visibility_weight(),
            scoring: ScoringKind::default(),
            view_z_offset: 0.0,
            no_touch_distance: defaults::no_touch_distance(),
            occlusion_sample_threshold: defaults::occlusion_sample_threshold(),
            quality: QualityKind::default(),
            quality_sample_count: defaults::quality_sample_count(),
            seed: None,
        }
    }
}

impl ConfidenceSection {
    /// Convert to ConfidenceConfig
    pub fn to_confidence_config(&self) -> ConfidenceConfig {
        ConfidenceConfig {
            sigma: self.sigma,
            view_z_offset: self.view_z_offset,
            occlusion_sample_threshold: self.occlusion_sample_threshold,
            no_touch_distance: self.no_touch_distance,
        }
    }

    /// Scoring strategy selected by `scoring`
    pub fn scoring_strategy(&self) -> Box<dyn ScoringStrategy> {
        let base = WeightedFusion {
            travel_weight: self.travel_weight,
            bound_weight: self.bound_weight,
        };
        match self.scoring {
            ScoringKind::Weighted => Box::new(base),
            ScoringKind::VisibilityWeighted => Box::new(VisibilityWeightedFusion {
                base,
                visibility_weight: self.visibility_weight,
                visibility_threshold: self.visibility_threshold,
            }),
        }
    }

    /// Quality metric selected by `quality`
    pub fn quality_metric(&self) -> Box<dyn QualityMetric> {
        match self.quality {
            QualityKind::Density => Box::new(DensityQuality {
                sample_count: self.quality_sample_count,
            }),
            QualityKind::Spread => Box::new(SpreadQuality),
            QualityKind::BoxDimension => Box::new(BoxDimensionQuality::default()),
        }
    }

    /// Fully configured engine
    pub fn to_engine(&self) -> ConfidenceEngine {
        let engine = ConfidenceEngine::new(self.to_confidence_config())
            .with_scoring(self.scoring_strategy())
            .with_quality(self.quality_metric());
        match self.seed {
            Some(seed) => engine.with_seed(seed),
            None => engine,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        positive("confidence.sigma", self.sigma)?;
        positive("confidence.visibility_threshold", self.visibility_threshold)?;
        finite("confidence.travel_weight", self.travel_weight)?;
        finite("confidence.bound_weight", self.bound_weight)?;
        finite("confidence.visibility_weight", self.visibility_weight)?;
        finite("confidence.view_z_offset", self.view_z_offset)?;
        finite("confidence.no_touch_distance", self.no_touch_distance)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridCell;

    #[test]
    fn test_visibility_threshold_reaches_scoring() {
        let section = ConfidenceSection {
            scoring: ScoringKind::VisibilityWeighted,
            visibility_threshold: 2.0,
            ..ConfidenceSection::default()
        };
        let mut cell = GridCell::default();
        cell.visibility_term.observe(1.0);

        // 0.6 * 0 + 0.4 * 1 + 0.3 * (1 / 2)
        let score = section.scoring_strategy().score(&cell);
        assert!((score - 0.55).abs() < 1e-6);
        assert_eq!(section.to_engine().scoring_name(), "visibility_weighted");
    }
}
