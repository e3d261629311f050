//! Test utilities for DrishtiMap.
//!
//! Helpers for building grids, labeled cells and synthetic point clouds.

#![allow(dead_code)]

use drishti_map::{CellLabel, DrishtiConfig, GridCell, PlanarGrid, Point3, Reachability};

/// Unit-cell grid with its corner at the origin.
pub fn unit_grid(width: usize, height: usize) -> PlanarGrid {
    PlanarGrid::new(Point3::ZERO, 1.0, width, height)
}

/// Fresh cells for a grid of `n` cells.
pub fn blank_cells(n: usize) -> Vec<GridCell> {
    vec![GridCell::default(); n]
}

/// Label the given cells as ground.
pub fn label_ground(cells: &mut [GridCell], indices: &[usize]) {
    for &i in indices {
        cells[i].label = CellLabel::Ground;
    }
}

/// Label a cell ground and mark it travelable.
pub fn seed_travelable(cells: &mut [GridCell], index: usize) {
    cells[index].label = CellLabel::Ground;
    cells[index].reachability = Reachability::Travelable;
}

/// Flat ground samples over `[-half, half]²` at height `z`.
///
/// Each sample is emitted twice to survive the ground ingestion stride.
pub fn flat_ground(half: f32, step: f32, z: f32) -> Vec<Point3> {
    let n = (2.0 * half / step).round() as i32;
    let mut pts = Vec::with_capacity(2 * ((n + 1) * (n + 1)) as usize);
    for i in 0..=n {
        for j in 0..=n {
            let p = Point3::new(-half + i as f32 * step, -half + j as f32 * step, z);
            pts.push(p);
            pts.push(p);
        }
    }
    pts
}

/// Vertical wall along x = `x` from y0 to y1, sampled every `step`.
///
/// Coordinates are jittered so no two points share a value on any axis.
pub fn wall(x: f32, y0: f32, y1: f32, step: f32) -> Vec<Point3> {
    let n = ((y1 - y0) / step).round() as usize;
    (0..=n)
        .flat_map(|i| {
            let y = y0 + i as f32 * step;
            (0..4).map(move |k| {
                let jitter = (i * 4 + k) as f32 * 1e-4;
                Point3::new(x + jitter, y, 0.2 + k as f32 * 0.3 + i as f32 * 1e-4)
            })
        })
        .collect()
}

/// Small deterministic configuration for a 10m x 10m map.
pub fn small_config() -> DrishtiConfig {
    let mut config = DrishtiConfig::default();
    config.grid.resolution = 0.25;
    config.grid.max_range = 5.0;
    config.confidence.sigma = 2.0;
    config.confidence.seed = Some(17);
    config.masks.region_grow_radius = 0.4;
    config.masks.initial_radius = 0.75;
    config.cadence.odometry_raw_hz = 2.0;
    config.cadence.sampling_hz = 2.0;
    config.cadence.past_view_duration = 1.0;
    config
}

/// Oracle that sees every point.
pub fn see_all(cloud: &[Point3], _view: &Point3) -> Vec<usize> {
    (0..cloud.len()).collect()
}

/// Install a test logger once.
pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}
