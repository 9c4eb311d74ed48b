//! Tile roles, neighbour classification and autotiling

pub mod autotile;
pub mod classify;
pub mod layers;
pub mod role;
pub mod table;

pub use autotile::{AutotileGroup, EdgeMask, resolve_tile_index};
pub use classify::{Neighbourhood, can_place_walled, classify_walled, fix_block_tiles, shadow_cells};
pub use layers::TileLayers;
pub use role::TileRole;
pub use table::{PaletteSource, TileRoleTable};
