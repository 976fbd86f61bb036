//! Physics body ownership component.

use bevy_ecs::prelude::Component;
use smallvec::SmallVec;

use crate::physics::{BodyId, ShapeId};

/// Handles to the physics body and collision shapes an actor owns.
///
/// The entity is the exclusive owner of the body's identity; the space only
/// simulates it. [`crate::game::clear_level`] removes the body (and with it
/// the shapes) from the space when the actor leaves the scene.
#[derive(Component, Clone, Debug)]
pub struct PhysicsBodyRef {
    pub body: BodyId,
    pub shapes: SmallVec<[ShapeId; 4]>,
}

impl PhysicsBodyRef {
    pub fn new(body: BodyId) -> Self {
        Self {
            body,
            shapes: SmallVec::new(),
        }
    }

    pub fn with_shapes(body: BodyId, shapes: impl IntoIterator<Item = ShapeId>) -> Self {
        Self {
            body,
            shapes: shapes.into_iter().collect(),
        }
    }
}
