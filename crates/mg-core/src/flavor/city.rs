use super::{Flavor, MapFlavor};
use crate::config::GenSettings;
use crate::generator::{BspStyle, SpacePartitioner};
use crate::grid::Grid;
use crate::rng::MapRng;
use crate::tiles::{PaletteSource, TileRole, can_place_walled};

use TileRole::{Floor, Ground, Road, WallTop};

/// Background, road, room interior, room border, spare
const CITY_VALUES: [TileRole; 5] = [Ground, Road, Floor, WallTop, WallTop];

const CITY_PALETTE: &[PaletteSource] = &[
    PaletteSource::new(Floor, 0, 0),
    PaletteSource::new(WallTop, 0, 1),
    PaletteSource::new(TileRole::WallBase, 0, 2),
    PaletteSource::new(Road, 0, 3),
    PaletteSource::new(Ground, 0, 4),
];

const CITY_ROLES: &[TileRole] = &[
    WallTop,
    TileRole::WallBase,
    Floor,
    TileRole::FTop,
    TileRole::FRight,
    TileRole::FBottom,
    TileRole::FLeft,
    TileRole::FCenter,
    Road,
    Ground,
];

/// Walled buildings on a road grid
///
/// Roads and open ground are outdoor cells: they keep their coarse role and
/// markers for them need the exact role underneath.
#[derive(Debug, Clone, Copy, Default)]
pub struct CityFlavor;

impl MapFlavor for CityFlavor {
    fn flavor(&self) -> Flavor {
        Flavor::City
    }

    fn build_coarse_grid(
        &self,
        width: usize,
        height: usize,
        settings: &GenSettings,
        rng: &mut MapRng,
    ) -> Grid<TileRole> {
        SpacePartitioner::new(BspStyle::City, settings.max_leaf_size).generate(
            width,
            height,
            &CITY_VALUES,
            rng,
        )
    }

    fn can_place(&self, coarse: &Grid<TileRole>, role: TileRole, x: i32, y: i32) -> bool {
        match role {
            Road | Ground => coarse.at(x, y) == Some(role),
            _ => can_place_walled(coarse, role, x, y),
        }
    }

    fn roles(&self) -> &'static [TileRole] {
        CITY_ROLES
    }

    fn palette(&self) -> &'static [PaletteSource] {
        CITY_PALETTE
    }

    fn is_entry_cell(&self, role: TileRole) -> bool {
        role == Road
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapMeta;

    #[test]
    fn test_outdoor_markers_need_exact_role() {
        let settings = MapMeta::for_flavor(Flavor::City).validate(60, 40).unwrap();
        let mut rng = MapRng::new(5);
        let grid = CityFlavor.build_coarse_grid(60, 40, &settings, &mut rng);

        let (x, y, _) = grid.iter().find(|&(_, _, r)| r == Road).unwrap();
        assert!(CityFlavor.can_place(&grid, Road, x as i32, y as i32));
        assert!(!CityFlavor.can_place(&grid, Ground, x as i32, y as i32));
        assert!(CityFlavor.is_entry_cell(Road));
        assert!(!CityFlavor.is_entry_cell(Floor));
    }
}
