//! Stacked visual tile layers

use serde::{Deserialize, Serialize};

use crate::consts::LAYER_COUNT;

/// Tile ids for every layer of a map, indexed `(z * height + y) * width + x`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLayers {
    width: usize,
    height: usize,
    data: Vec<u32>,
}

impl TileLayers {
    /// Empty layers (all tile ids 0)
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; LAYER_COUNT * width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when the tile data covers every layer exactly
    pub fn is_well_formed(&self) -> bool {
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(LAYER_COUNT))
            == Some(self.data.len())
    }

    /// Flat index of a cell on a layer
    pub fn tile_index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.height + y) * self.width + x
    }

    /// Tile id, or 0 outside the map
    pub fn get(&self, x: i32, y: i32, z: usize) -> u32 {
        if x < 0 || y < 0 || z >= LAYER_COUNT {
            return 0;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[self.tile_index(x, y, z)]
    }

    /// Write a tile id; writes outside the map are dropped
    pub fn set(&mut self, x: usize, y: usize, z: usize, tile: u32) {
        if x < self.width && y < self.height && z < LAYER_COUNT {
            let idx = self.tile_index(x, y, z);
            self.data[idx] = tile;
        }
    }

    /// Write a full layer stack at one cell
    pub fn set_stack(&mut self, x: usize, y: usize, stack: &[u32; LAYER_COUNT]) {
        for (z, &tile) in stack.iter().enumerate() {
            self.set(x, y, z, tile);
        }
    }

    pub fn data(&self) -> &[u32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_index_layout() {
        let mut layers = TileLayers::new(4, 3);
        assert_eq!(layers.data().len(), 4 * 3 * LAYER_COUNT);
        layers.set(1, 2, 3, 77);
        assert_eq!(layers.data()[(3 * 3 + 2) * 4 + 1], 77);
        assert_eq!(layers.get(1, 2, 3), 77);
        assert_eq!(layers.get(-1, 2, 3), 0);
        assert_eq!(layers.get(1, 2, LAYER_COUNT), 0);
    }
}
