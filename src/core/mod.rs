//! Core types: points, cells, monotone accumulators and statistics.

pub mod accumulator;
pub mod cell;
pub mod math;
pub mod point;

pub use accumulator::{
    AccumulateRule, Accumulator, ClampedMinRule, MaxAccumulator, MaxRule, MinAccumulator,
    SumAccumulator, SumRule,
};
pub use cell::{CellLabel, GridCell, Reachability};
pub use math::{centroid, centroid_of, gaussian_kernel, linear_kernel, normalize, standard_deviation};
pub use point::Point3;
