//! ECS wrapper around the physics [`Space`].

use bevy_ecs::prelude::Resource;

use crate::physics::Space;

/// The world's single simulation space as an ECS resource.
#[derive(Resource, Default)]
pub struct PhysicsSpace(pub Space);
