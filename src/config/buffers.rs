//! Point buffer limits.

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::{ConfigError, non_zero};

/// Buffer configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BufferSection {
    /// Boundary points kept before downsampling
    #[serde(default = "defaults::boundary_cap")]
    pub boundary_cap: usize,

    /// Obstacle points kept before downsampling
    #[serde(default = "defaults::obstacle_cap")]
    pub obstacle_cap: usize,

    /// Per-cell stride applied when a cap is exceeded
    #[serde(default = "defaults::downsample_stride")]
    pub downsample_stride: usize,

    /// Take every n-th incoming point
    #[serde(default = "defaults::point_sample_stride")]
    pub point_sample_stride: usize,

    /// Obstacle points above which a ground cell contributes them to occlusion
    #[serde(default = "defaults::ground_obstacle_threshold")]
    pub ground_obstacle_threshold: usize,
}

impl Default for BufferSection {
    fn default() -> Self {
        Self {
            boundary_cap: defaults::boundary_cap(),
            obstacle_cap: defaults::obstacle_cap(),
            downsample_stride: defaults::downsample_stride(),
            point_sample_stride: defaults::point_sample_stride(),
            ground_obstacle_threshold: defaults::ground_obstacle_threshold(),
        }
    }
}

impl BufferSection {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        non_zero("buffers.boundary_cap", self.boundary_cap)?;
        non_zero("buffers.obstacle_cap", self.obstacle_cap)?;
        non_zero("buffers.downsample_stride", self.downsample_stride)?;
        non_zero("buffers.point_sample_stride", self.point_sample_stride)?;
        Ok(())
    }
}
