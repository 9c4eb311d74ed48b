//! mg-core: procedural tile map generation
//!
//! Turns a hand-made resource map into a playable tile map: a coarse layout
//! from noise, a maze or a binary space partition, neighbour-based tile
//! classification, autotile shape resolution and constrained marker placement.
//!
//! This crate holds no I/O. Persistence lives in `mg-save`.

pub mod config;
pub mod consts;
pub mod error;
pub mod flavor;
pub mod generator;
pub mod grid;
pub mod map;
pub mod placement;
pub mod rng;
pub mod tiles;

pub use config::{GenSettings, MapMeta};
pub use error::{ConfigError, GenError};
pub use flavor::{Flavor, MapFlavor};
pub use grid::{Direction, Grid, Point};
pub use map::{GeneratedMap, ResourceMap, generate, generate_map};
pub use placement::{EntranceExit, MarkerMeta, MarkerTemplate, PlacedMarker};
pub use rng::MapRng;
pub use tiles::{TileLayers, TileRole};
