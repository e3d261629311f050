//! # DrishtiMap
//!
//! Incremental confidence fusion and reachability growing for the grid map of
//! a ground robot exploring unmapped space.
//!
//! ## Overview
//!
//! Streaming 3D observations are classified per cell as ground, boundary or
//! obstacle. Every sensor cycle the cells near the robot receive independent
//! evidence terms, each kept in a monotone accumulator so repeated, partial
//! or contradictory observations never undo earlier evidence:
//!
//! - **Travel**: Gaussian proximity to the robot (max-ratchet)
//! - **Boundary**: distance to the nearest boundary point (clamped min-ratchet)
//! - **Visibility**: sightings from a past viewpoint (running sum)
//! - **Total**: pluggable fusion of the above (max-ratchet)
//!
//! Reachability is decided by a bounded flood fill over the newly touched
//! cells only.
//!
//! ```text
//!   ground / boundary / obstacle points
//!                  │
//!                  ▼
//!   ┌───────────────────────────────┐      ┌──────────────────┐
//!   │        ExplorationMap         │─────►│   RegionGrower   │
//!   │  cells · point stores · masks │      └──────────────────┘
//!   │                               │      ┌──────────────────┐
//!   │                               │─────►│ ConfidenceEngine │──► VisibilityOracle
//!   └───────────────────────────────┘      └──────────────────┘
//!                  │
//!                  ▼
//!              MapLayers ──► route optimizer / renderer
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti_map::{AngularZBuffer, DrishtiConfig, ExplorationMap, Point3};
//!
//! let config = DrishtiConfig::load_default()?;
//! let mut map = ExplorationMap::planar(config, Point3::ZERO)?;
//! map.initialize(&Point3::ZERO);
//!
//! map.ingest_ground(&ground_points);
//! map.ingest_boundary(&boundary_points);
//! map.ingest_obstacles(&obstacle_points);
//!
//! let oracle = AngularZBuffer::default();
//! if let Some(report) = map.observe_pose(&robot, &oracle) {
//!     println!("{} ground cells scored", report.ground_cells);
//! }
//! let layers = map.layers();
//! ```

#![warn(missing_docs)]

// Points, cells, accumulators, statistics
pub mod core;

// Sampling and down-sampling
pub mod sampling;

// Spatial grid interface and planar grid
pub mod grid;

// Visibility oracle
pub mod visibility;

// Reachability region growing
pub mod reachability;

// Confidence terms and fusion
pub mod confidence;

// Per-cell point buffers
pub mod store;

// Unified configuration
pub mod config;

// Orchestration
pub mod map;

// Re-export commonly used types
pub use core::{
    AccumulateRule, Accumulator, CellLabel, GridCell, MaxAccumulator, MinAccumulator, Point3,
    Reachability, SumAccumulator, gaussian_kernel, linear_kernel, normalize,
};

pub use grid::{NeighborhoodMask, PlanarGrid, SpatialGrid};

pub use visibility::{AngularZBuffer, VisibilityOracle};

pub use reachability::{GrowReport, RegionGrower};

pub use confidence::{
    BoxDimensionQuality, ConfidenceConfig, ConfidenceEngine, DensityQuality, QualityMetric,
    ScoringStrategy, SpreadQuality, VisibilityWeightedFusion, WeightedFusion,
};

pub use store::PointStore;

pub use config::{ConfigError, ConfigLoadError, DrishtiConfig};

pub use map::{
    CycleKind, CycleReport, ExplorationMap, MapLayers, ObstacleWindow, Partition, PoseCadence,
};
