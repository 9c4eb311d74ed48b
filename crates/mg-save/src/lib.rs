//! mg-save: persistence for generated maps
//!
//! Generated maps are written as JSON, one file per map, under a per-slot
//! directory. [`MapSession`] keeps the maps of the running game in memory
//! and decides on each visit whether to restore, reload or generate.

mod session;
mod store;

pub use session::MapSession;
pub use store::MapStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mg_core::{GenError, GeneratedMap};

/// Current map file format version
pub const SAVE_VERSION: u32 = 1;

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Map file not found")]
    NotFound,

    #[error("Incompatible save version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Invalid map file header")]
    InvalidHeader,

    #[error("Map file holds map {found}, expected {expected}")]
    WrongMap { expected: u32, found: u32 },

    #[error("Map file {0} is corrupted: grid sizes disagree")]
    Corrupted(u32),

    #[error("Map generation failed: {0}")]
    Generation(#[from] GenError),
}

/// Map file header for versioning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Magic identifier
    pub magic: String,
    /// Save format version
    pub version: u32,
    /// Id of the map in the game's map list
    pub map_id: u32,
    /// Timestamp of save
    pub timestamp: u64,
}

impl SaveHeader {
    const MAGIC: &'static str = "MGRS";

    pub fn new(map_id: u32) -> Self {
        Self {
            magic: Self::MAGIC.to_string(),
            version: SAVE_VERSION,
            map_id,
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        if self.magic != Self::MAGIC {
            return Err(SaveError::InvalidHeader);
        }
        if self.version != SAVE_VERSION {
            return Err(SaveError::IncompatibleVersion {
                expected: SAVE_VERSION,
                found: self.version,
            });
        }
        Ok(())
    }
}

/// Complete map file structure
#[derive(Serialize, Deserialize)]
pub struct MapFile {
    pub header: SaveHeader,
    pub map: GeneratedMap,
}

/// Header-only view of a map file
#[derive(Deserialize)]
struct HeaderOnly {
    header: SaveHeader,
}
