use super::{Flavor, MapFlavor};
use crate::config::GenSettings;
use crate::generator::{BspStyle, SpacePartitioner};
use crate::grid::Grid;
use crate::rng::MapRng;
use crate::tiles::TileRole;

use TileRole::{Floor, WallTop};

/// Background, corridor, room interior, room border, spare
const DUNGEON_VALUES: [TileRole; 5] = [WallTop, Floor, Floor, WallTop, WallTop];

/// Rooms and corridors from a space partition
#[derive(Debug, Clone, Copy, Default)]
pub struct DungeonFlavor;

impl MapFlavor for DungeonFlavor {
    fn flavor(&self) -> Flavor {
        Flavor::Dungeon
    }

    fn build_coarse_grid(
        &self,
        width: usize,
        height: usize,
        settings: &GenSettings,
        rng: &mut MapRng,
    ) -> Grid<TileRole> {
        SpacePartitioner::new(BspStyle::Dungeon, settings.max_leaf_size).generate(
            width,
            height,
            &DUNGEON_VALUES,
            rng,
        )
    }
}
