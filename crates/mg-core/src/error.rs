//! Generation errors
//!
//! Only configuration and resource-map shape problems are errors. Running out
//! of candidate cells or room space degrades the output instead.

use thiserror::Error;

use crate::flavor::Flavor;

/// Missing or inconsistent map metadata
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Map type undefined")]
    MissingFlavor,

    #[error("Unknown map type '{0}'")]
    UnknownFlavor(String),

    #[error("Fog of war is enabled but the map does not define a fog range")]
    MissingFogRange,

    #[error("Border of {border} leaves no interior on a {width}x{height} map")]
    BorderTooThick {
        border: u32,
        width: usize,
        height: usize,
    },

    #[error("Block size must be at least 1")]
    ZeroBlockSize,

    #[error("Max leaf size must be at least {min}, found {found}")]
    LeafSizeTooSmall { min: u32, found: u32 },

    #[error("Noise divisor must be positive, found {0}")]
    InvalidDivisor(f64),
}

/// Errors that abort map generation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenError {
    #[error("Invalid map configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Resource map layer data has {found} entries, expected {expected}")]
    LayerDataMismatch { expected: usize, found: usize },

    #[error("Map of {width}x{height} is smaller than the minimum {min}x{min}")]
    MapTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },

    #[error("Resource map of {width}x{height} cannot hold the {flavor} tile palette")]
    PaletteOutOfBounds {
        flavor: Flavor,
        width: usize,
        height: usize,
    },
}
