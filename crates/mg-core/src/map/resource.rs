//! Resource maps: the hand-made input a map is generated from

use serde::{Deserialize, Serialize};

use crate::config::MapMeta;
use crate::consts::LAYER_COUNT;
use crate::error::GenError;
use crate::placement::MarkerTemplate;

/// A reference map holding palette sample cells, tags and marker templates
///
/// Tile data uses the layered layout `data[(z * height + y) * width + x]`.
/// Event slots may be empty, as in the editor's own files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceMap {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub data: Vec<u32>,
    #[serde(default)]
    pub meta: MapMeta,
    #[serde(default)]
    pub events: Vec<Option<MarkerTemplate>>,
}

impl ResourceMap {
    /// A blank resource map carrying only tags
    pub fn new(width: usize, height: usize, meta: MapMeta) -> Self {
        Self {
            width,
            height,
            data: vec![0; LAYER_COUNT * width * height],
            meta,
            events: Vec::new(),
        }
    }

    /// Tile id at a cell and layer, 0 when absent
    pub fn loaded_tile_id(&self, x: usize, y: usize, z: usize) -> u32 {
        self.data
            .get((z * self.height + y) * self.width + x)
            .copied()
            .unwrap_or(0)
    }

    /// Set the tile id at a cell and layer, growing the data when short
    pub fn set_tile(&mut self, x: usize, y: usize, z: usize, tile: u32) {
        let idx = (z * self.height + y) * self.width + x;
        if idx >= self.data.len() {
            self.data.resize(idx + 1, 0);
        }
        self.data[idx] = tile;
    }

    /// Marker templates present in the event slots
    pub fn templates(&self) -> impl Iterator<Item = &MarkerTemplate> {
        self.events.iter().flatten()
    }

    /// Check that the tile data covers at most the stacked layers
    ///
    /// Empty data is accepted and reads as all zeros.
    pub fn check_shape(&self) -> Result<(), GenError> {
        let expected = LAYER_COUNT * self.width * self.height;
        if !self.data.is_empty() && self.data.len() > expected {
            return Err(GenError::LayerDataMismatch {
                expected,
                found: self.data.len(),
            });
        }
        Ok(())
    }
}
