//! Physics stepping system.
//!
//! Advances the simulation by exactly one fixed step per logic tick. The
//! step length is [`PHYSICS_DT`] regardless of the real elapsed time; the
//! tick driver is expected to run at the physics rate.
use bevy_ecs::prelude::*;

use crate::physics::PHYSICS_DT;
use crate::resources::physicsspace::PhysicsSpace;

/// Step the space once.
pub fn physics_step(mut space: ResMut<PhysicsSpace>) {
    space.0.step(PHYSICS_DT);
}
