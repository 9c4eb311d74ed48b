//! Resource map metadata
//!
//! [`MapMeta`] is the typed form of the tags written on a resource map.
//! [`MapMeta::validate`] resolves defaults and rejects inconsistent tags
//! before any generation work starts.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BORDER, DEFAULT_MAX_LEAF_SIZE, DEFAULT_NOISE_DIVISOR, MIN_LEAF_SIZE};
use crate::error::ConfigError;
use crate::flavor::Flavor;
use crate::generator::NoiseStyle;

/// Map-level tags of a resource map
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapMeta {
    /// Flavor name (`cave`, `dungeon`, `city`, `maze`)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,

    /// Wall frame thickness; absent or 0 means the default of 2
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<u32>,

    /// Hide cells until the player has seen them
    #[serde(rename = "fow")]
    pub fog_of_war: bool,

    /// Tile shown on hidden cells
    #[serde(rename = "fowtile")]
    pub fog_tile: u32,

    /// Reveal radius, only read with fog of war
    #[serde(rename = "fowrange", skip_serializing_if = "Option::is_none")]
    pub fog_range: Option<u32>,

    /// Rebuild the map on every visit instead of restoring the cached one
    pub regenerate: bool,

    /// Autotile kinds left untouched by autotiling
    pub skip: Vec<u32>,

    /// Coarse cell size of maze maps
    #[serde(rename = "blocksize", skip_serializing_if = "Option::is_none")]
    pub block_size: Option<u32>,

    /// Largest partition leaf before a forced split
    #[serde(rename = "maxleafsize", skip_serializing_if = "Option::is_none")]
    pub max_leaf_size: Option<u32>,

    /// Noise sample scale for cave maps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divisor: Option<f64>,

    /// Noise function for cave maps
    pub noise: NoiseStyle,

    /// Fixed seed; absent means a fresh map on every generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Validated generation settings
#[derive(Debug, Clone, PartialEq)]
pub struct GenSettings {
    pub flavor: Flavor,
    /// Wall frame thickness, never 0
    pub border: u32,
    /// Reveal radius, `None` when the map has no fog of war
    pub fog_range: Option<u32>,
    pub fog_tile: u32,
    /// Autotile kinds left untouched
    pub skip: Vec<u32>,
    /// Maze coarse cell size in tiles
    pub block_size: usize,
    /// Partition leaf limit, at least the minimum leaf size
    pub max_leaf_size: i32,
    /// Cave noise scale, always positive
    pub divisor: f64,
    pub noise: NoiseStyle,
    pub seed: Option<u64>,
}

impl MapMeta {
    /// Meta for a flavor with every other tag at its default
    pub fn for_flavor(flavor: Flavor) -> Self {
        Self {
            flavor: Some(flavor.to_string()),
            ..Self::default()
        }
    }

    /// Resolve defaults and check the tags against the map size
    pub fn validate(&self, width: usize, height: usize) -> Result<GenSettings, ConfigError> {
        let name = self
            .flavor
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(ConfigError::MissingFlavor)?;
        let flavor: Flavor = name
            .parse()
            .map_err(|_| ConfigError::UnknownFlavor(name.to_string()))?;

        let fog_range = if self.fog_of_war {
            match self.fog_range {
                Some(range) if range > 0 => Some(range),
                _ => return Err(ConfigError::MissingFogRange),
            }
        } else {
            None
        };

        let border = match self.border {
            Some(0) | None => DEFAULT_BORDER,
            Some(border) => border,
        };
        // entrance lines sit one cell inside the border on every side
        let span = 2 * (border as usize + 1);
        if width <= span || height <= span {
            return Err(ConfigError::BorderTooThick {
                border,
                width,
                height,
            });
        }

        let block_size = match self.block_size {
            Some(0) => return Err(ConfigError::ZeroBlockSize),
            Some(size) => size as usize,
            None => 1,
        };

        let max_leaf_size = match self.max_leaf_size {
            Some(size) if (size as i32) < MIN_LEAF_SIZE => {
                return Err(ConfigError::LeafSizeTooSmall {
                    min: MIN_LEAF_SIZE as u32,
                    found: size,
                });
            }
            Some(size) => size as i32,
            None => DEFAULT_MAX_LEAF_SIZE,
        };

        let divisor = match self.divisor {
            Some(d) if !(d.is_finite() && d > 0.0) => return Err(ConfigError::InvalidDivisor(d)),
            Some(d) => d,
            None => DEFAULT_NOISE_DIVISOR,
        };

        Ok(GenSettings {
            flavor,
            border,
            fog_range,
            fog_tile: self.fog_tile,
            skip: self.skip.clone(),
            block_size,
            max_leaf_size,
            divisor,
            noise: self.noise,
            seed: self.seed,
        })
    }
}
