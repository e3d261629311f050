//! Neighborhood mask radii.

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::{ConfigError, positive};

/// Mask configuration section. All radii in meters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaskSection {
    /// Connectivity radius of the reachability walk
    #[serde(default = "defaults::region_grow_radius")]
    pub region_grow_radius: f32,

    /// Boundary defend radius as a multiple of `region_grow_radius`
    #[serde(default = "defaults::bound_defend_rate")]
    pub bound_defend_rate: f32,

    /// Radius marked travelable around the start pose
    #[serde(default = "defaults::initial_radius")]
    pub initial_radius: f32,

    /// Obstacle neighborhood measured by the quality term
    #[serde(default = "defaults::quality_radius")]
    pub quality_radius: f32,
}

impl Default for MaskSection {
    fn default() -> Self {
        Self {
            region_grow_radius: defaults::region_grow_radius(),
            bound_defend_rate: defaults::bound_defend_rate(),
            initial_radius: defaults::initial_radius(),
            quality_radius: defaults::quality_radius(),
        }
    }
}

impl MaskSection {
    /// Radius blocked around a new boundary cell
    #[inline]
    pub fn bound_defend_radius(&self) -> f32 {
        self.bound_defend_rate * self.region_grow_radius
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        positive("masks.region_grow_radius", self.region_grow_radius)?;
        positive("masks.bound_defend_rate", self.bound_defend_rate)?;
        positive("masks.initial_radius", self.initial_radius)?;
        positive("masks.quality_radius", self.quality_radius)?;
        Ok(())
    }
}
