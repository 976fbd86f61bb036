//! Sprite extent registry.
//!
//! The resource loader (an external collaborator) decodes images; the engine
//! only needs their extents to derive item bounding boxes and sprite-origin
//! compensation. The loader registers each logical asset name here before a
//! level referencing it is parsed. An unregistered name is a fatal load
//! error, matching the loader's own failure policy.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

/// Registry of `logical asset name -> (width, height)`.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpriteStore {
    extents: FxHashMap<String, (f32, f32)>,
    fallback: Option<(f32, f32)>,
}

impl SpriteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that answers every lookup with `(width, height)`. Used by the
    /// map checker, which validates structure without loading assets.
    pub fn with_fallback(width: f32, height: f32) -> Self {
        Self {
            extents: FxHashMap::default(),
            fallback: Some((width, height)),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, width: f32, height: f32) {
        self.extents.insert(name.into(), (width, height));
    }

    pub fn extents(&self, name: &str) -> Option<(f32, f32)> {
        self.extents.get(name).copied().or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_registered_sprite() {
        let mut store = SpriteStore::new();
        store.insert("star", 40.0, 40.0);
        assert_eq!(store.extents("star"), Some((40.0, 40.0)));
    }

    #[test]
    fn test_unregistered_sprite_is_none() {
        let store = SpriteStore::new();
        assert_eq!(store.extents("ghost"), None);
    }

    #[test]
    fn test_fallback_answers_everything() {
        let store = SpriteStore::with_fallback(1.0, 1.0);
        assert_eq!(store.extents("anything"), Some((1.0, 1.0)));
    }
}
