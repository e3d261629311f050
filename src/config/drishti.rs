//! Main DrishtiConfig and loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::buffers::BufferSection;
use super::cadence::CadenceSection;
use super::confidence::ConfidenceSection;
use super::error::{ConfigError, ConfigLoadError};
use super::grid::GridSection;
use super::masks::MaskSection;

/// Full configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct DrishtiConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridSection,

    /// Confidence engine settings
    #[serde(default)]
    pub confidence: ConfidenceSection,

    /// Neighborhood mask radii
    #[serde(default)]
    pub masks: MaskSection,

    /// Point buffer limits
    #[serde(default)]
    pub buffers: BufferSection,

    /// Odometry cadence
    #[serde(default)]
    pub cadence: CadenceSection,
}

impl DrishtiConfig {
    /// Load and validate configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/config.yaml)
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new("configs/config.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.confidence.validate()?;
        self.masks.validate()?;
        self.buffers.validate()?;
        self.cadence.validate()?;
        Ok(())
    }
}
