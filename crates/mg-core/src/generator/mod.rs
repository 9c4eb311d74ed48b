//! Coarse grid generators
//!
//! Each generator produces a grid of coarse categories that the tile
//! classifier later refines into roles.

pub mod bsp;
pub mod maze;
pub mod noise;
pub mod rect;

pub use bsp::{BspNode, BspStyle, BspTree, SpacePartitioner};
pub use maze::{MazeCarver, MazeCell};
pub use noise::{NoiseField, NoiseStyle};
pub use rect::Rect;
