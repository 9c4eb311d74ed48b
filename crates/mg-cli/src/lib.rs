//! mg-cli: helpers behind the `mapgen` binary

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use strum::IntoEnumIterator;

use mg_core::{GeneratedMap, ResourceMap, TileRole};

/// Read a resource map from a JSON file
pub fn load_resource(path: impl AsRef<Path>) -> Result<ResourceMap> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let resource: ResourceMap = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(resource)
}

/// One-line description of a generated map
pub fn summary(map: &GeneratedMap) -> String {
    let open = map.roles.iter().filter(|(_, _, r)| !r.is_wall()).count();
    format!(
        "{} map {}x{} (seed {}): {} open cells, {} markers, entrance {},{} exit {},{}",
        map.flavor,
        map.width(),
        map.height(),
        map.seed,
        open,
        map.markers.len(),
        map.entrance.entrance.x,
        map.entrance.entrance.y,
        map.entrance.exit.x,
        map.entrance.exit.y,
    )
}

/// Cell count of every role present on the map
pub fn role_counts(map: &GeneratedMap) -> Vec<(TileRole, usize)> {
    TileRole::iter()
        .map(|role| (role, map.roles.count(role)))
        .filter(|&(_, n)| n > 0)
        .collect()
}
