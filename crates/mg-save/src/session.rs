//! In-memory map cache for a running game

use std::collections::{BTreeSet, HashMap};

use mg_core::{Direction, GeneratedMap, ResourceMap};

use crate::{MapStore, SaveError};

/// Maps of the current game, keyed by map id
///
/// A map left for another scene stays cached until it is entered again.
/// Every map entered since the last reset counts as explored and is written
/// on save.
#[derive(Debug)]
pub struct MapSession {
    store: MapStore,
    active: Option<(u32, GeneratedMap)>,
    cache: HashMap<u32, GeneratedMap>,
    explored: BTreeSet<u32>,
}

impl MapSession {
    pub fn new(store: MapStore) -> Self {
        Self {
            store,
            active: None,
            cache: HashMap::new(),
            explored: BTreeSet::new(),
        }
    }

    pub fn store(&self) -> &MapStore {
        &self.store
    }

    pub fn active(&self) -> Option<&GeneratedMap> {
        self.active.as_ref().map(|(_, map)| map)
    }

    pub fn active_mut(&mut self) -> Option<&mut GeneratedMap> {
        self.active.as_mut().map(|(_, map)| map)
    }

    pub fn active_id(&self) -> Option<u32> {
        self.active.as_ref().map(|(id, _)| *id)
    }

    pub fn is_cached(&self, map_id: u32) -> bool {
        self.cache.contains_key(&map_id)
    }

    pub fn is_explored(&self, map_id: u32) -> bool {
        self.explored.contains(&map_id)
    }

    /// Enter a map, making it the active one
    ///
    /// A cached map is restored, unless its resource asks for regeneration
    /// and this is a real transfer rather than a return from a pushed scene.
    /// Without a cached copy the slot's file is loaded, and without a file a
    /// fresh map is generated.
    pub fn enter(
        &mut self,
        map_id: u32,
        resource: &ResourceMap,
        pushing: bool,
    ) -> Result<&mut GeneratedMap, SaveError> {
        self.leave();

        let map = match self.cache.remove(&map_id) {
            Some(_) if resource.meta.regenerate && !pushing => {
                tracing::debug!("Regenerating map {}", map_id);
                mg_core::generate(resource)?
            }
            Some(cached) => cached,
            None if self.store.exists(map_id) => self.store.load_map(map_id)?,
            None => {
                tracing::debug!("Generating map {} for the first time", map_id);
                mg_core::generate(resource)?
            }
        };

        self.explored.insert(map_id);
        let (_, map) = self.active.insert((map_id, map));
        Ok(map)
    }

    /// Cache the active map, returning its id
    pub fn leave(&mut self) -> Option<u32> {
        let (map_id, map) = self.active.take()?;
        self.cache.insert(map_id, map);
        Some(map_id)
    }

    /// Record the player position as the entrance, then write every explored map
    ///
    /// The entrance side is the reverse of the player's facing so that a
    /// reload puts the player back where they stood. Returns the number of
    /// maps written.
    pub fn before_save(&mut self, x: i32, y: i32, facing: Direction) -> Result<usize, SaveError> {
        if let Some(map) = self.active_mut() {
            map.refresh_entrance(x, y, facing.reverse());
        }

        let mut written = 0;
        for &map_id in &self.explored {
            let map = match &self.active {
                Some((id, map)) if *id == map_id => Some(map),
                _ => self.cache.get(&map_id),
            };
            if let Some(map) = map {
                self.store.save_map(map_id, map)?;
                written += 1;
            }
        }
        tracing::debug!("Wrote {} explored maps to slot {}", written, self.store.slot());
        Ok(written)
    }

    /// Forget every map, as after a game over
    pub fn reset(&mut self) {
        self.active = None;
        self.cache.clear();
        self.explored.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_core::{Flavor, MapMeta};

    fn session(name: &str) -> MapSession {
        let root = std::env::temp_dir().join(format!("mg_save_session_{name}"));
        std::fs::remove_dir_all(&root).ok();
        MapSession::new(MapStore::new(root, 1))
    }

    fn resource(seed: Option<u64>, regenerate: bool) -> ResourceMap {
        let mut meta = MapMeta::for_flavor(Flavor::Dungeon);
        meta.seed = seed;
        meta.regenerate = regenerate;
        ResourceMap::new(40, 30, meta)
    }

    #[test]
    fn test_cached_map_restored() {
        let mut s = session("cached");
        let res = resource(None, false);
        let first = s.enter(1, &res, false).unwrap().clone();
        s.enter(2, &res, false).unwrap();
        assert!(s.is_cached(1));

        let again = s.enter(1, &res, false).unwrap().clone();
        assert_eq!(again, first);
        assert!(!s.is_cached(1));
        assert!(s.is_cached(2));
    }

    #[test]
    fn test_regenerate_unless_pushing() {
        let mut s = session("regenerate");
        let res = resource(None, true);
        let first = s.enter(1, &res, false).unwrap().clone();
        s.leave();
        let pushed = s.enter(1, &res, true).unwrap().clone();
        assert_eq!(pushed, first);

        s.leave();
        let fresh = s.enter(1, &res, false).unwrap();
        assert_ne!(fresh.seed, first.seed);
    }

    #[test]
    fn test_save_and_reload_from_store() {
        let mut s = session("reload");
        let res = resource(Some(5), false);
        s.enter(3, &res, false).unwrap();
        s.enter(4, &res, false).unwrap();
        assert_eq!(s.before_save(6, 7, Direction::Up).unwrap(), 2);

        let saved = s.active().unwrap().clone();
        assert_eq!(saved.entrance.entrance.x, 6);
        assert_eq!(saved.entrance.entrance.y, 7);
        assert_eq!(saved.entrance.entrance_side, Direction::Down);

        s.reset();
        assert!(!s.is_explored(4));
        let loaded = s.enter(4, &res, false).unwrap().clone();
        assert_eq!(loaded, saved);
        s.store().clear_slot().unwrap();
    }
}
