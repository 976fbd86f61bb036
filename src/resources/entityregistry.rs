//! Entity factory registry.
//!
//! Maps stable factory keys to spawn functions. Levels name entities by
//! sprite name; a modpaths file maps each sprite name to a factory key, and
//! the registry resolves the key to a function that spawns the entity into
//! the world. Keys referenced by a level but absent from the registry are a
//! load error, caught before any entity is spawned.

use bevy_ecs::prelude::{Entity, Resource};
use bevy_ecs::world::World;
use glam::Vec2;
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::MapError;

/// Spawns one entity of some kind at a world position.
pub type EntityFactory = fn(&mut World, Vec2) -> Entity;

/// Registry of `factory key -> spawn function`.
#[derive(Resource, Default)]
pub struct EntityRegistry {
    factories: FxHashMap<String, EntityFactory>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `key`. Re-registering a key replaces the
    /// previous factory.
    pub fn register(&mut self, key: impl Into<String>, factory: EntityFactory) {
        let key = key.into();
        debug!("registered entity factory {:?}", key);
        self.factories.insert(key, factory);
    }

    pub fn resolve(&self, key: &str) -> Option<EntityFactory> {
        self.factories.get(key).copied()
    }
}

/// Parse a modpaths file: one `sprite_name = factory_key` per line, with
/// blank lines and `#` comments allowed.
pub fn parse_modpaths(text: &str) -> Result<FxHashMap<String, String>, MapError> {
    let mut map = FxHashMap::default();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, key)) = line.split_once('=') else {
            return Err(MapError::Parse(format!(
                "modpaths line {}: expected 'name = key', got {:?}",
                lineno + 1,
                raw
            )));
        };
        map.insert(name.trim().to_string(), key.trim().to_string());
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_factory(world: &mut World, _pos: Vec2) -> Entity {
        world.spawn_empty().id()
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = EntityRegistry::new();
        registry.register("game::entities::star", dummy_factory);
        assert!(registry.resolve("game::entities::star").is_some());
        assert!(registry.resolve("game::entities::ghost").is_none());
    }

    #[test]
    fn test_parse_modpaths() {
        let map = parse_modpaths(
            "# entity bindings\n\nstar = game::entities::star\nrobot=game::entities::robot\n",
        )
        .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["star"], "game::entities::star");
        assert_eq!(map["robot"], "game::entities::robot");
    }

    #[test]
    fn test_parse_modpaths_rejects_malformed_lines() {
        assert!(parse_modpaths("star game::entities::star\n").is_err());
    }
}
