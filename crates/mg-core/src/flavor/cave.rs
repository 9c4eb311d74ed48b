use super::{Flavor, MapFlavor};
use crate::config::GenSettings;
use crate::generator::NoiseField;
use crate::grid::Grid;
use crate::rng::MapRng;
use crate::tiles::TileRole;

use TileRole::{Floor, WallTop};

/// Noise bands from lowest to highest; the low third becomes open floor
const CAVE_BANDS: [TileRole; 17] = [
    Floor, Floor, Floor, Floor, Floor, Floor, WallTop, WallTop, WallTop, WallTop, WallTop, WallTop,
    WallTop, WallTop, WallTop, WallTop, WallTop,
];

/// Caverns carved from a noise field
#[derive(Debug, Clone, Copy, Default)]
pub struct CaveFlavor;

impl MapFlavor for CaveFlavor {
    fn flavor(&self) -> Flavor {
        Flavor::Cave
    }

    fn build_coarse_grid(
        &self,
        width: usize,
        height: usize,
        settings: &GenSettings,
        rng: &mut MapRng,
    ) -> Grid<TileRole> {
        NoiseField::seeded(settings.noise, settings.divisor, rng).generate(
            width,
            height,
            WallTop,
            &CAVE_BANDS,
        )
    }
}
