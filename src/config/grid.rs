//! Grid configuration section.

use serde::{Deserialize, Serialize};

use crate::core::Point3;
use crate::grid::PlanarGrid;

use super::defaults;
use super::error::{ConfigError, finite, positive};

/// Grid configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Cell resolution (meters)
    #[serde(default = "defaults::resolution")]
    pub resolution: f32,

    /// Half-width of the mapped square around the start pose (meters)
    #[serde(default = "defaults::max_range")]
    pub max_range: f32,

    /// Lowest accepted point height (meters)
    #[serde(default = "defaults::min_z")]
    pub min_z: f32,

    /// Highest accepted point height (meters)
    #[serde(default = "defaults::max_z")]
    pub max_z: f32,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            resolution: defaults::resolution(),
            max_range: defaults::max_range(),
            min_z: defaults::min_z(),
            max_z: defaults::max_z(),
        }
    }
}

impl GridSection {
    /// Planar grid centered on `center`
    pub fn to_planar_grid(&self, center: Point3) -> PlanarGrid {
        PlanarGrid::centered_at(center, self.max_range, self.resolution)
            .with_z_limits(self.min_z, self.max_z)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        positive("grid.resolution", self.resolution)?;
        positive("grid.max_range", self.max_range)?;
        finite("grid.min_z", self.min_z)?;
        finite("grid.max_z", self.max_z)?;
        if self.min_z > self.max_z {
            return Err(ConfigError::InvertedZLimits {
                min_z: self.min_z,
                max_z: self.max_z,
            });
        }
        Ok(())
    }
}
