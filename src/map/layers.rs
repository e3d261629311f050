//! Per-cell layers for rendering and downstream planners.

use serde::{Deserialize, Serialize};

use crate::core::{GridCell, Reachability, normalize};

/// Snapshot of every cell metric as parallel arrays indexed by cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapLayers {
    /// Epoch each cell was last considered in
    pub node_count: Vec<u32>,
    /// Travel term
    pub travel: Vec<f32>,
    /// Boundary term
    pub bound: Vec<f32>,
    /// Visibility sightings
    pub visibility: Vec<f32>,
    /// Fused confidence
    pub total: Vec<f32>,
    /// Quality diagnostic
    pub quality: Vec<f32>,
    /// Raw reachability state
    pub reachability: Vec<i8>,
    /// Raw label rank
    pub label: Vec<u8>,
    /// Cells currently travelable
    pub travelable_count: usize,
}

impl MapLayers {
    /// Snapshot `cells`.
    pub fn from_cells(cells: &[GridCell]) -> Self {
        let n = cells.len();
        let mut layers = Self {
            node_count: Vec::with_capacity(n),
            travel: Vec::with_capacity(n),
            bound: Vec::with_capacity(n),
            visibility: Vec::with_capacity(n),
            total: Vec::with_capacity(n),
            quality: Vec::with_capacity(n),
            reachability: Vec::with_capacity(n),
            label: Vec::with_capacity(n),
            travelable_count: 0,
        };
        for cell in cells {
            layers.node_count.push(cell.node_count);
            layers.travel.push(cell.travel_term.value());
            layers.bound.push(cell.bound_term.value());
            layers.visibility.push(cell.visibility_term.value());
            layers.total.push(cell.total_value.value());
            layers.quality.push(cell.quality_term);
            layers.reachability.push(cell.reachability.as_i8());
            layers.label.push(cell.label as u8);
            if cell.reachability == Reachability::Travelable {
                layers.travelable_count += 1;
            }
        }
        layers
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.total.len()
    }

    /// True if there are no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    /// Visibility scaled to [0, 1]; all zero when every cell was seen
    /// equally often.
    pub fn normalized_visibility(&self) -> Vec<f32> {
        let mut values = self.visibility.clone();
        normalize(&mut values);
        values
    }

    /// Quality scaled to [0, 1]; all zero when uniform.
    pub fn normalized_quality(&self) -> Vec<f32> {
        let mut values = self.quality.clone();
        normalize(&mut values);
        values
    }
}
