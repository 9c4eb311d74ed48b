//! Per-slot map files

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use mg_core::GeneratedMap;

use crate::{HeaderOnly, MapFile, SaveError, SaveHeader};

/// Map files of one save slot, stored as `<root>/file<slot>/file/MapNNN.json`
#[derive(Debug, Clone)]
pub struct MapStore {
    root: PathBuf,
    slot: u32,
}

impl MapStore {
    pub fn new(root: impl Into<PathBuf>, slot: u32) -> Self {
        Self {
            root: root.into(),
            slot,
        }
    }

    /// Store under the platform's local data directory
    pub fn in_default_root(slot: u32) -> Self {
        Self::new(Self::default_root(), slot)
    }

    /// The local data directory for map saves
    pub fn default_root() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("mapgen");
        path.push("saves");
        path
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Directory holding this slot's map files
    pub fn slot_dir(&self) -> PathBuf {
        self.root.join(format!("file{}", self.slot)).join("file")
    }

    pub fn map_path(&self, map_id: u32) -> PathBuf {
        self.slot_dir().join(format!("Map{map_id:03}.json"))
    }

    pub fn exists(&self, map_id: u32) -> bool {
        self.map_path(map_id).exists()
    }

    /// Write a map, creating the slot directory when missing
    pub fn save_map(&self, map_id: u32, map: &GeneratedMap) -> Result<PathBuf, SaveError> {
        std::fs::create_dir_all(self.slot_dir())?;
        let path = self.map_path(map_id);

        let save_file = MapFile {
            header: SaveHeader::new(map_id),
            map: map.clone(),
        };
        let file = File::create(&path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, &save_file)?;
        tracing::debug!("Saved map {} to {}", map_id, path.display());
        Ok(path)
    }

    /// Read a map back, checking its header and grid sizes
    pub fn load_map(&self, map_id: u32) -> Result<GeneratedMap, SaveError> {
        let save_file: MapFile = read_json(&self.map_path(map_id))?;
        save_file.header.validate()?;
        if save_file.header.map_id != map_id {
            return Err(SaveError::WrongMap {
                expected: map_id,
                found: save_file.header.map_id,
            });
        }
        if !save_file.map.is_well_formed() {
            tracing::warn!("Map {} in slot {} has mismatched grid sizes", map_id, self.slot);
            return Err(SaveError::Corrupted(map_id));
        }
        tracing::debug!("Loaded map {} from slot {}", map_id, self.slot);
        Ok(save_file.map)
    }

    /// Load only the header of a map file
    pub fn load_header(&self, map_id: u32) -> Result<SaveHeader, SaveError> {
        let header_only: HeaderOnly = read_json(&self.map_path(map_id))?;
        header_only.header.validate()?;
        Ok(header_only.header)
    }

    /// Delete a map file
    pub fn remove_map(&self, map_id: u32) -> Result<(), SaveError> {
        match std::fs::remove_file(self.map_path(map_id)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SaveError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete every map file of the slot
    pub fn clear_slot(&self) -> Result<(), SaveError> {
        let dir = self.slot_dir();
        if dir.exists() {
            std::fs::remove_dir_all(&dir)?;
        }
        Ok(())
    }

    /// Ids and headers of every readable map file, by map id
    pub fn list_maps(&self) -> Result<Vec<(u32, SaveHeader)>, SaveError> {
        let dir = self.slot_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut maps = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let Some(map_id) = parse_map_id(&entry.path()) else {
                continue;
            };
            if let Ok(header) = self.load_header(map_id) {
                maps.push((map_id, header));
            }
        }
        maps.sort_by_key(|(id, _)| *id);
        Ok(maps)
    }
}

/// Map id from a `MapNNN.json` file name
fn parse_map_id(path: &Path) -> Option<u32> {
    if path.extension().is_none_or(|e| e != "json") {
        return None;
    }
    path.file_stem()?.to_str()?.strip_prefix("Map")?.parse().ok()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SaveError> {
    let file = File::open(path).map_err(|_| SaveError::NotFound)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
