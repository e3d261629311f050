//! Odometry sampling cadence.

use serde::{Deserialize, Serialize};

use super::defaults;
use super::error::{ConfigError, non_zero, positive};

/// Cadence configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CadenceSection {
    /// Incoming odometry rate (Hz)
    #[serde(default = "defaults::odometry_raw_hz")]
    pub odometry_raw_hz: f32,

    /// Confidence cycle rate (Hz)
    #[serde(default = "defaults::sampling_hz")]
    pub sampling_hz: f32,

    /// How far back the past viewpoint lies (seconds)
    #[serde(default = "defaults::past_view_duration")]
    pub past_view_duration: f32,

    /// Every n-th cycle runs the occlusion term
    #[serde(default = "defaults::full_cycle_interval")]
    pub full_cycle_interval: u32,
}

impl Default for CadenceSection {
    fn default() -> Self {
        Self {
            odometry_raw_hz: defaults::odometry_raw_hz(),
            sampling_hz: defaults::sampling_hz(),
            past_view_duration: defaults::past_view_duration(),
            full_cycle_interval: defaults::full_cycle_interval(),
        }
    }
}

impl CadenceSection {
    /// Odometry frames per cycle (at least 1)
    pub fn frames_per_cycle(&self) -> u32 {
        ((self.odometry_raw_hz / self.sampling_hz).round() as u32).max(1)
    }

    /// Cycles of pose history behind the current pose (at least 1)
    pub fn past_view_len(&self) -> usize {
        ((self.past_view_duration * self.sampling_hz).round() as usize).max(1)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        positive("cadence.odometry_raw_hz", self.odometry_raw_hz)?;
        positive("cadence.sampling_hz", self.sampling_hz)?;
        positive("cadence.past_view_duration", self.past_view_duration)?;
        non_zero("cadence.full_cycle_interval", self.full_cycle_interval as usize)?;
        Ok(())
    }
}
