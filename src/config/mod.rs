//! Configuration loading.
//!
//! Loads all configuration from a single YAML file with sensible defaults.
//! Every field is optional; missing fields take the values below.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti_map::config::DrishtiConfig;
//!
//! // Load from default path (configs/config.yaml)
//! let config = DrishtiConfig::load_default()?;
//!
//! // Or use built-in defaults (no file needed)
//! let config = DrishtiConfig::default();
//!
//! let engine = config.confidence.to_engine();
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Resolution, mapped range, z limits |
//! | [`ConfidenceSection`] | Reach radius, fusion weights, scoring, quality, seed |
//! | [`MaskSection`] | Region-grow, boundary-defend, initial and quality radii |
//! | [`BufferSection`] | Point caps and downsampling strides |
//! | [`CadenceSection`] | Odometry rate, cycle rate, past-view window |
//!
//! ## Example YAML
//!
//! ```yaml
//! grid:
//!   resolution: 0.1        # 10cm cells
//!   max_range: 250.0
//! confidence:
//!   sigma: 5.0             # robot reach radius
//!   travel_weight: 0.6
//!   bound_weight: 0.4
//!   scoring: weighted      # or visibility_weighted
//!   quality: density       # density | spread | box_dimension
//!   seed: 7                # omit for OS entropy
//! masks:
//!   region_grow_radius: 0.5
//!   bound_defend_rate: 1.5
//! buffers:
//!   boundary_cap: 3000000
//!   obstacle_cap: 8000000
//! cadence:
//!   odometry_raw_hz: 50.0
//!   sampling_hz: 2.0
//! ```

mod buffers;
mod cadence;
mod confidence;
mod defaults;
mod drishti;
mod error;
mod grid;
mod masks;

pub use drishti::DrishtiConfig;
pub use error::{ConfigError, ConfigLoadError};

pub use buffers::BufferSection;
pub use cadence::CadenceSection;
pub use confidence::{ConfidenceSection, QualityKind, ScoringKind};
pub use grid::GridSection;
pub use masks::MaskSection;
