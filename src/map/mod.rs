//! Exploration map: sensor ingestion and per-cycle confidence updates.
//!
//! [`ExplorationMap`] owns the cell array, the accumulated boundary and
//! obstacle points, the confidence engine and the region grower, and runs
//! them in a fixed order every cycle:
//!
//! ```text
//!   ingest_ground / ingest_boundary / ingest_obstacles     (any time)
//!                          │
//!   compute(robot, past_view)
//!     1. neighborhood     cells within sigma of the robot
//!     2. region grow      reachability of labeled cells
//!     3. partition        ground centers / boundary / obstacle points
//!     4. travel term      Gaussian proximity
//!     5. occlusion term   with a past view and >= 3 ground cells
//!        quality term     without a past view
//!     6. boundary term    may block cells near the boundary
//!     7. fusion           total_value of ground cells
//! ```

mod cadence;
mod layers;
mod partition;

pub use cadence::{CycleKind, PoseCadence};
pub use layers::MapLayers;
pub use partition::{ObstacleWindow, Partition};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, DrishtiConfig};
use crate::confidence::ConfidenceEngine;
use crate::core::{CellLabel, GridCell, Point3, Reachability};
use crate::grid::{NeighborhoodMask, PlanarGrid, SpatialGrid};
use crate::reachability::{GrowReport, RegionGrower};
use crate::store::PointStore;
use crate::visibility::VisibilityOracle;

/// Precomputed masks.
#[derive(Clone, Debug)]
struct MapMasks {
    /// Robot neighborhood (radius sigma)
    robot: NeighborhoodMask,
    /// Reachability connectivity
    grow: NeighborhoodMask,
    /// Cells blocked around a new boundary cell
    defend: NeighborhoodMask,
    /// Travelable disk around the start pose
    initial: NeighborhoodMask,
    /// Obstacle neighborhood for the quality term
    quality: NeighborhoodMask,
}

/// Statistics of one compute cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    /// Epoch the cycle ran in
    pub epoch: u32,
    /// Cells in the robot neighborhood
    pub neighborhood: usize,
    /// Region grow outcome
    pub grow: GrowReport,
    /// Ground cells scored
    pub ground_cells: usize,
    /// Cells whose travel term rose
    pub travel_raised: usize,
    /// True if the occlusion term ran
    pub occlusion: bool,
    /// Ground cells seen from the past view
    pub visible: usize,
    /// Cells given a quality value
    pub quality_cells: usize,
    /// Cells blocked by the boundary term
    pub bound_blocked: usize,
    /// Cells whose total value rose
    pub fused: usize,
}

/// Incremental exploration map over a spatial grid.
pub struct ExplorationMap<G: SpatialGrid = PlanarGrid> {
    config: DrishtiConfig,
    grid: G,
    cells: Vec<GridCell>,
    boundary: PointStore,
    obstacles: PointStore,
    engine: ConfidenceEngine,
    grower: RegionGrower,
    masks: MapMasks,
    cadence: PoseCadence,
    epoch: u32,
}

impl ExplorationMap<PlanarGrid> {
    /// Map on a planar grid centered on `center`, sized by `config.grid`.
    pub fn planar(config: DrishtiConfig, center: Point3) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid.to_planar_grid(center);
        Self::new(config, grid)
    }
}

impl<G: SpatialGrid> ExplorationMap<G> {
    /// Map over `grid`. Fails if the configuration is invalid.
    pub fn new(config: DrishtiConfig, grid: G) -> Result<Self, ConfigError> {
        config.validate()?;

        let masks = MapMasks {
            robot: grid.circle_mask(config.confidence.sigma),
            grow: grid.circle_mask(config.masks.region_grow_radius),
            defend: grid.circle_mask(config.masks.bound_defend_radius()),
            initial: grid.circle_mask(config.masks.initial_radius),
            quality: grid.circle_mask(config.masks.quality_radius),
        };
        let cells = (0..grid.cell_count())
            .map(|i| GridCell::at(grid.cell_center(i)))
            .collect();

        let engine = config.confidence.to_engine();
        info!(
            "[ExplorationMap] {} cells, sigma={}, scoring={}, quality={}",
            grid.cell_count(),
            config.confidence.sigma,
            engine.scoring_name(),
            engine.quality_name()
        );

        Ok(Self {
            engine,
            grower: RegionGrower::with_capacity(masks.robot.len()),
            boundary: PointStore::with_cap(config.buffers.boundary_cap),
            obstacles: PointStore::with_cap(config.buffers.obstacle_cap),
            cadence: PoseCadence::new(&config.cadence),
            masks,
            cells,
            grid,
            config,
            epoch: 0,
        })
    }

    /// Mark the disk around the start pose travelable. Returns the number of
    /// cells marked.
    pub fn initialize(&mut self, robot: &Point3) -> usize {
        let near = self.grid.neighborhood_of(&self.masks.initial, robot);
        for &idx in &near {
            let cell = &mut self.cells[idx];
            cell.reachability = Reachability::Travelable;
            cell.node_count = self.epoch;
        }
        info!("[ExplorationMap] initialized {} travelable cells", near.len());
        near.len()
    }

    /// Add ground points. Returns cells labeled ground for the first time.
    ///
    /// Every `2 * point_sample_stride`-th point is used. A cell's height is
    /// set by its first ground point and averaged with later ones.
    pub fn ingest_ground(&mut self, points: &[Point3]) -> Vec<usize> {
        let stride = 2 * self.config.buffers.point_sample_stride;
        let mut fresh = Vec::new();
        for p in points.iter().step_by(stride) {
            let Some(idx) = self.grid.cell_index(p) else {
                continue;
            };
            let cell = &mut self.cells[idx];
            if cell.label.is_set() {
                cell.center_point.z = (cell.center_point.z + p.z) / 2.0;
                cell.label.escalate(CellLabel::Ground);
            } else {
                cell.center_point.z = p.z;
                cell.label = CellLabel::Ground;
                fresh.push(idx);
            }
        }
        debug!(
            "[ExplorationMap] ground: {} points, {} new cells",
            points.len(),
            fresh.len()
        );
        fresh
    }

    /// Add boundary points. A cell newly labeled boundary blocks every cell
    /// in its defend mask. Returns the number of new boundary cells.
    pub fn ingest_boundary(&mut self, points: &[Point3]) -> usize {
        let mut fresh = 0;
        for p in points.iter().step_by(self.config.buffers.point_sample_stride) {
            let Some(idx) = self.grid.cell_index(p) else {
                continue;
            };
            self.boundary.push(idx, *p, self.epoch);
            if self.cells[idx].label.escalate(CellLabel::Boundary) {
                fresh += 1;
                for n in self.grid.neighborhood(&self.masks.defend, idx) {
                    self.cells[n].reachability = Reachability::Blocked;
                }
            }
        }
        self.boundary.enforce_cap(self.config.buffers.downsample_stride);
        debug!(
            "[ExplorationMap] boundary: {} points, {} new cells, {} stored",
            points.len(),
            fresh,
            self.boundary.len()
        );
        fresh
    }

    /// Add obstacle points tagged with the current epoch. An unlabeled cell
    /// becomes an obstacle and is blocked. Returns the number of new obstacle
    /// cells.
    pub fn ingest_obstacles(&mut self, points: &[Point3]) -> usize {
        let mut fresh = 0;
        for p in points.iter().step_by(self.config.buffers.point_sample_stride) {
            let Some(idx) = self.grid.cell_index(p) else {
                continue;
            };
            self.obstacles.push(idx, *p, self.epoch);
            let cell = &mut self.cells[idx];
            if !cell.label.is_set() {
                cell.label = CellLabel::Obstacle;
                cell.reachability = Reachability::Blocked;
                fresh += 1;
            }
        }
        self.obstacles.enforce_cap(self.config.buffers.downsample_stride);
        debug!(
            "[ExplorationMap] obstacles: {} points, {} new cells, {} stored",
            points.len(),
            fresh,
            self.obstacles.len()
        );
        fresh
    }

    /// Split a neighborhood by label.
    ///
    /// - obstacle cells: obstacle points within `window`
    /// - ground cells: the cell center, plus all obstacle points when the
    ///   cell holds more than `ground_obstacle_threshold` of them
    /// - boundary cells: boundary points and obstacle points within `window`
    pub fn partition(&self, near: &[usize], window: ObstacleWindow) -> Partition {
        let mut part = Partition::default();
        let threshold = self.config.buffers.ground_obstacle_threshold;
        for &idx in near {
            let Some(cell) = self.cells.get(idx) else {
                continue;
            };
            match cell.label {
                CellLabel::Obstacle => self.extend_obstacles(&mut part, idx, window),
                CellLabel::Ground => {
                    part.ground_indices.push(idx);
                    part.ground_points.push(cell.center_point);
                    if self.obstacles.count_in(idx) > threshold {
                        part.obstacle_points.extend(self.obstacles.points_in(idx));
                    }
                }
                CellLabel::Boundary => {
                    part.boundary_points.extend(self.boundary.points_in(idx));
                    self.extend_obstacles(&mut part, idx, window);
                }
                CellLabel::Unset => {}
            }
        }
        part
    }

    fn extend_obstacles(&self, part: &mut Partition, idx: usize, window: ObstacleWindow) {
        match window {
            ObstacleWindow::CurrentEpoch => part
                .obstacle_points
                .extend(self.obstacles.points_in_epoch(idx, self.epoch)),
            ObstacleWindow::AllEpochs => part.obstacle_points.extend(self.obstacles.points_in(idx)),
        }
    }

    /// Run one confidence cycle around `robot`.
    ///
    /// With a `past_view` the occlusion term runs (given at least three
    /// ground cells); without one the quality term runs instead. Only
    /// labeled cells enter the region grower, so unobserved cells stay
    /// `Unknown` until a sensor classifies them.
    pub fn compute(
        &mut self,
        robot: &Point3,
        past_view: Option<&Point3>,
        oracle: &dyn VisibilityOracle,
    ) -> CycleReport {
        let mut report = CycleReport {
            epoch: self.epoch,
            ..CycleReport::default()
        };

        let near = self.grid.neighborhood_of(&self.masks.robot, robot);
        report.neighborhood = near.len();

        let labeled: Vec<usize> = near
            .iter()
            .copied()
            .filter(|&i| self.cells[i].label.is_set())
            .collect();
        report.grow = self.grower.grow(
            &mut self.cells,
            &labeled,
            &self.grid,
            &self.masks.grow,
            self.epoch,
        );

        // Occlusion needs every occluder seen so far
        let window = match past_view {
            Some(_) => ObstacleWindow::AllEpochs,
            None => ObstacleWindow::CurrentEpoch,
        };
        let part = self.partition(&near, window);
        report.ground_cells = part.ground_count();

        report.travel_raised = self.engine.distance_term(
            &mut self.cells,
            robot,
            &part.ground_indices,
            &part.ground_points,
        );

        match past_view {
            Some(view) if part.ground_count() >= 3 => {
                report.occlusion = true;
                report.visible = self.engine.occlusion_term(
                    &mut self.cells,
                    &part.occlusion_cloud(),
                    &part.ground_indices,
                    view,
                    oracle,
                );
            }
            Some(_) => {}
            None => report.quality_cells = self.quality_pass(&near),
        }

        report.bound_blocked = self.engine.bound_term(
            &mut self.cells,
            &part.ground_indices,
            &part.ground_points,
            &part.boundary_points,
        );
        report.fused = self.engine.fuse(&mut self.cells, &part.ground_indices);

        debug!(
            "[ExplorationMap] cycle epoch={} near={} ground={} visible={} blocked={} fused={}",
            report.epoch,
            report.neighborhood,
            report.ground_cells,
            report.visible,
            report.bound_blocked,
            report.fused
        );
        report
    }

    /// Feed one odometry pose. Runs a cycle when the cadence samples it.
    pub fn observe_pose(
        &mut self,
        robot: &Point3,
        oracle: &dyn VisibilityOracle,
    ) -> Option<CycleReport> {
        match self.cadence.admit(*robot)? {
            CycleKind::Full { past_view } => Some(self.compute(robot, Some(&past_view), oracle)),
            CycleKind::Light => Some(self.compute(robot, None, oracle)),
        }
    }

    /// Quality of the current-epoch obstacle points around each obstacle or
    /// boundary cell of `near`.
    fn quality_pass(&mut self, near: &[usize]) -> usize {
        let mut measured = 0;
        let mut local: Vec<Point3> = Vec::new();
        for &idx in near {
            if !matches!(
                self.cells[idx].label,
                CellLabel::Obstacle | CellLabel::Boundary
            ) {
                continue;
            }
            local.clear();
            for n in self.grid.neighborhood(&self.masks.quality, idx) {
                local.extend(self.obstacles.points_in_epoch(n, self.epoch));
            }
            self.engine.quality_term(&mut self.cells, idx, &local);
            measured += 1;
        }
        measured
    }

    /// Close the current exploration round. Returns the new epoch.
    pub fn advance_epoch(&mut self) -> u32 {
        self.epoch += 1;
        info!("[ExplorationMap] epoch {}", self.epoch);
        self.epoch
    }

    /// Current epoch.
    #[inline]
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Snapshot of all cell layers.
    pub fn layers(&self) -> MapLayers {
        MapLayers::from_cells(&self.cells)
    }

    /// All cells.
    #[inline]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// One cell.
    #[inline]
    pub fn cell(&self, index: usize) -> Option<&GridCell> {
        self.cells.get(index)
    }

    /// The spatial grid.
    #[inline]
    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// Configuration in use.
    #[inline]
    pub fn config(&self) -> &DrishtiConfig {
        &self.config
    }

    /// Accumulated boundary points.
    #[inline]
    pub fn boundary_points(&self) -> &[Point3] {
        self.boundary.points()
    }

    /// Accumulated obstacle points.
    #[inline]
    pub fn obstacle_points(&self) -> &[Point3] {
        self.obstacles.points()
    }
}
