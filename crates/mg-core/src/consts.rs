//! Generation constants
//!
//! Values mirror the tile engine the generated maps are handed to.

/// Number of visual tile layers per cell
pub const LAYER_COUNT: usize = 6;

/// Layer receiving drop shadows
pub const SHADOW_LAYER: usize = 4;

/// Value written into the shadow layer for a shadowed cell
pub const SHADOW_BITS: u32 = 5;

/// First autotile id; every autotile kind owns 48 consecutive ids from here
pub const AUTOTILE_BASE: u32 = 2048;

/// Number of visual variants per autotile kind
pub const AUTOTILE_VARIANTS: u32 = 48;

/// Smallest BSP leaf edge
pub const MIN_LEAF_SIZE: i32 = 11;

/// Preferred smallest room edge
pub const MIN_ROOM_SIZE: i32 = 8;

/// Leaves larger than this always split
pub const DEFAULT_MAX_LEAF_SIZE: i32 = 13;

/// Default noise coordinate divisor
pub const DEFAULT_NOISE_DIVISOR: f64 = 12.0;

/// Default border thickness forced to wall
pub const DEFAULT_BORDER: u32 = 2;

/// Maze complexity/density coefficient
pub const MAZE_COEFFICIENT: f64 = 0.75;

/// Smallest map edge any flavor can generate on
pub const MIN_MAP_SIZE: usize = 8;
