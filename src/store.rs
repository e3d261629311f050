//! Accumulated boundary and obstacle points.
//!
//! Points are appended with the cell they fall in and the epoch they were
//! seen in. When a store outgrows its cap it is stride-downsampled per cell:
//! each non-empty cell keeps its first point and every `stride`-th after it,
//! and all per-cell index lists are rebuilt against the compacted buffer.

use std::collections::HashMap;

use log::info;

use crate::core::Point3;

/// Point buffer indexed by cell.
#[derive(Clone, Debug, Default)]
pub struct PointStore {
    points: Vec<Point3>,
    epochs: Vec<u32>,
    cells: Vec<usize>,
    by_cell: HashMap<usize, Vec<usize>>,
    cap: usize,
}

impl PointStore {
    /// Empty store that downsamples beyond `cap` points.
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap,
            ..Self::default()
        }
    }

    /// Number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no points are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Configured cap.
    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// All stored points.
    #[inline]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Append a point seen in `cell` during `epoch`.
    pub fn push(&mut self, cell: usize, point: Point3, epoch: u32) {
        self.by_cell.entry(cell).or_default().push(self.points.len());
        self.points.push(point);
        self.epochs.push(epoch);
        self.cells.push(cell);
    }

    /// Number of points stored for `cell`.
    pub fn count_in(&self, cell: usize) -> usize {
        self.by_cell.get(&cell).map_or(0, Vec::len)
    }

    /// Points stored for `cell`.
    pub fn points_in(&self, cell: usize) -> impl Iterator<Item = &Point3> + '_ {
        self.by_cell
            .get(&cell)
            .into_iter()
            .flatten()
            .map(move |&i| &self.points[i])
    }

    /// Points stored for `cell` during `epoch`.
    pub fn points_in_epoch(&self, cell: usize, epoch: u32) -> impl Iterator<Item = &Point3> + '_ {
        self.by_cell
            .get(&cell)
            .into_iter()
            .flatten()
            .filter(move |&&i| self.epochs[i] == epoch)
            .map(move |&i| &self.points[i])
    }

    /// Downsample if over the cap. Returns the sizes before and after.
    pub fn enforce_cap(&mut self, stride: usize) -> Option<(usize, usize)> {
        if self.cap == 0 || self.points.len() <= self.cap {
            return None;
        }
        let before = self.points.len();
        self.downsample(stride);
        info!(
            "[PointStore] over cap {}: downsampled {} -> {} points",
            self.cap,
            before,
            self.points.len()
        );
        Some((before, self.points.len()))
    }

    /// Keep every `stride`-th point of each cell, starting with the first.
    ///
    /// Point order is preserved. A stride of 0 or 1 is a no-op.
    pub fn downsample(&mut self, stride: usize) {
        if stride <= 1 {
            return;
        }

        let mut keep = vec![false; self.points.len()];
        for indices in self.by_cell.values() {
            for &i in indices.iter().step_by(stride) {
                keep[i] = true;
            }
        }

        let mut points = Vec::with_capacity(self.points.len() / stride + self.by_cell.len());
        let mut epochs = Vec::with_capacity(points.capacity());
        let mut cells = Vec::with_capacity(points.capacity());
        let mut by_cell: HashMap<usize, Vec<usize>> = HashMap::with_capacity(self.by_cell.len());

        for (i, kept) in keep.into_iter().enumerate() {
            if !kept {
                continue;
            }
            by_cell.entry(self.cells[i]).or_default().push(points.len());
            points.push(self.points[i]);
            epochs.push(self.epochs[i]);
            cells.push(self.cells[i]);
        }

        self.points = points;
        self.epochs = epochs;
        self.cells = cells;
        self.by_cell = by_cell;
    }
}
