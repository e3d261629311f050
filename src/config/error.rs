//! Configuration errors.

use thiserror::Error;

/// Failure reading or parsing a configuration file.
#[derive(Error, Debug, Clone)]
pub enum ConfigLoadError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// YAML could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Parsed values failed validation
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// A configuration value outside its valid range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value must be positive and finite
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive {
        /// Dotted field path
        field: &'static str,
        /// Offending value
        value: f32,
    },

    /// Value must be finite
    #[error("{field} must be finite, got {value}")]
    NotFinite {
        /// Dotted field path
        field: &'static str,
        /// Offending value
        value: f32,
    },

    /// Count or stride must be at least 1
    #[error("{field} must be at least 1")]
    Zero {
        /// Dotted field path
        field: &'static str,
    },

    /// Lower z limit above the upper one
    #[error("z limits inverted: min_z {min_z} > max_z {max_z}")]
    InvertedZLimits {
        /// Configured lower limit
        min_z: f32,
        /// Configured upper limit
        max_z: f32,
    },
}

/// Require a positive, finite value.
pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Require a finite value.
pub(crate) fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// Require a non-zero count.
pub(crate) fn non_zero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::Zero { field })
    }
}
