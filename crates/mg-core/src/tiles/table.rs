//! Role to tile-stack palette read from a resource map

use std::collections::BTreeMap;

use super::role::TileRole;
use crate::consts::LAYER_COUNT;
use crate::error::GenError;
use crate::flavor::Flavor;
use crate::map::ResourceMap;

/// Resource map cell holding the sample stack for a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteSource {
    pub role: TileRole,
    pub x: usize,
    pub y: usize,
}

impl PaletteSource {
    pub const fn new(role: TileRole, x: usize, y: usize) -> Self {
        Self { role, x, y }
    }
}

/// The tile ids painted on each layer for every role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileRoleTable {
    stacks: BTreeMap<TileRole, [u32; LAYER_COUNT]>,
}

impl TileRoleTable {
    /// Read every source cell of the palette from the resource map
    ///
    /// Floor edge roles without a source of their own share the floor stack.
    pub fn load(
        resource: &ResourceMap,
        flavor: Flavor,
        sources: &[PaletteSource],
    ) -> Result<Self, GenError> {
        let mut table = Self::default();
        for source in sources {
            if source.x >= resource.width || source.y >= resource.height {
                return Err(GenError::PaletteOutOfBounds {
                    flavor,
                    width: resource.width,
                    height: resource.height,
                });
            }
            let mut stack = [0; LAYER_COUNT];
            for (z, tile) in stack.iter_mut().enumerate() {
                *tile = resource.loaded_tile_id(source.x, source.y, z);
            }
            table.stacks.insert(source.role, stack);
        }

        if let Some(floor) = table.stacks.get(&TileRole::Floor).copied() {
            for role in [
                TileRole::FTop,
                TileRole::FRight,
                TileRole::FBottom,
                TileRole::FLeft,
                TileRole::FCenter,
            ] {
                table.stacks.entry(role).or_insert(floor);
            }
        }
        Ok(table)
    }

    /// Set the stack of a role
    pub fn insert(&mut self, role: TileRole, stack: [u32; LAYER_COUNT]) {
        self.stacks.insert(role, stack);
    }

    /// Tile stack for a role, empty tiles when the palette lacks it
    pub fn stack(&self, role: TileRole) -> [u32; LAYER_COUNT] {
        self.stacks.get(&role).copied().unwrap_or([0; LAYER_COUNT])
    }

    pub fn contains(&self, role: TileRole) -> bool {
        self.stacks.contains_key(&role)
    }
}
