//! Map flavors
//!
//! A flavor picks the coarse generator, the classification rules and the
//! role palette of a map. [`Flavor`] is the tag written on resource maps and
//! [`Flavor::generator`] resolves it to its [`MapFlavor`] implementation.

mod cave;
mod city;
mod dungeon;
mod maze;

pub use cave::CaveFlavor;
pub use city::CityFlavor;
pub use dungeon::DungeonFlavor;
pub use maze::MazeFlavor;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::config::GenSettings;
use crate::grid::Grid;
use crate::rng::MapRng;
use crate::tiles::{PaletteSource, TileRole, can_place_walled, classify_walled};

/// Palette cells shared by every walled flavor
pub const WALLED_PALETTE: &[PaletteSource] = &[
    PaletteSource::new(TileRole::Floor, 0, 0),
    PaletteSource::new(TileRole::WallTop, 0, 1),
    PaletteSource::new(TileRole::WallBase, 0, 2),
];

/// Roles produced by every walled flavor, in spawn-name order
pub const WALLED_ROLES: &[TileRole] = &[
    TileRole::WallTop,
    TileRole::WallBase,
    TileRole::Floor,
    TileRole::FTop,
    TileRole::FRight,
    TileRole::FBottom,
    TileRole::FLeft,
    TileRole::FCenter,
];

/// Named map generation style
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Flavor {
    /// Noise caverns
    Cave,
    /// Rooms joined by corridors
    Dungeon,
    /// Walled blocks between roads
    City,
    /// Block-scaled maze
    Maze,
}

impl Flavor {
    /// The implementation registered for this flavor
    pub fn generator(self) -> &'static dyn MapFlavor {
        match self {
            Flavor::Cave => &CaveFlavor,
            Flavor::Dungeon => &DungeonFlavor,
            Flavor::City => &CityFlavor,
            Flavor::Maze => &MazeFlavor,
        }
    }
}

/// Generation capability of a flavor
pub trait MapFlavor: Sync {
    fn flavor(&self) -> Flavor;

    /// Paint the coarse role grid before the border frame is applied
    fn build_coarse_grid(
        &self,
        width: usize,
        height: usize,
        settings: &GenSettings,
        rng: &mut MapRng,
    ) -> Grid<TileRole>;

    /// Fine role of a coarse cell
    fn classify(&self, coarse: &Grid<TileRole>, x: i32, y: i32) -> TileRole {
        classify_walled(coarse, x, y)
    }

    /// Whether a marker wanting `role` may stand on a coarse cell
    fn can_place(&self, coarse: &Grid<TileRole>, role: TileRole, x: i32, y: i32) -> bool {
        can_place_walled(coarse, role, x, y)
    }

    /// Roles this flavor classifies into
    fn roles(&self) -> &'static [TileRole] {
        WALLED_ROLES
    }

    /// Resource map cells sampled for the role palette
    fn palette(&self) -> &'static [PaletteSource] {
        WALLED_PALETTE
    }

    /// Whether an entrance or exit may be placed on a coarse role
    fn is_entry_cell(&self, role: TileRole) -> bool {
        role == TileRole::Floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_registry_matches_tag() {
        for flavor in Flavor::iter() {
            assert_eq!(flavor.generator().flavor(), flavor);
        }
    }

    #[test]
    fn test_flavor_names() {
        assert_eq!("cave".parse::<Flavor>().unwrap(), Flavor::Cave);
        assert_eq!("City".parse::<Flavor>().unwrap(), Flavor::City);
        assert_eq!(Flavor::Dungeon.to_string(), "dungeon");
        assert!("swamp".parse::<Flavor>().is_err());
    }

    #[test]
    fn test_palettes_cover_roles() {
        for flavor in Flavor::iter() {
            let imp = flavor.generator();
            for source in imp.palette() {
                assert!(imp.roles().contains(&source.role), "{flavor}: {}", source.role);
            }
        }
    }
}
