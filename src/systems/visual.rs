//! Render-side bookkeeping systems.
//!
//! `sync_bodies` copies simulated body state back onto the render
//! components after the physics step; `screen_positions` turns world
//! positions into focus-relative screen positions for everything that
//! follows the camera.

use bevy_ecs::prelude::*;

use crate::components::focusfollow::FocusFollow;
use crate::components::mapposition::MapPosition;
use crate::components::physicsbody::PhysicsBodyRef;
use crate::components::rotation::Rotation;
use crate::components::screenposition::ScreenPosition;
use crate::resources::physicsspace::PhysicsSpace;
use crate::resources::scenegraph::SceneGraph;

/// Copy body position (and angle, where a [`Rotation`] is present) onto the
/// render components.
pub fn sync_bodies(
    space: Res<PhysicsSpace>,
    mut query: Query<(&PhysicsBodyRef, &mut MapPosition, Option<&mut Rotation>)>,
) {
    for (body_ref, mut position, rotation) in query.iter_mut() {
        if let Some(body) = space.0.body(body_ref.body) {
            position.pos = body.position;
            if let Some(mut rotation) = rotation {
                rotation.degrees = body.angle.to_degrees();
            }
        }
    }
}

/// Screen position = world position + sprite-origin compensation + focus.
pub fn screen_positions(
    graph: Res<SceneGraph>,
    mut query: Query<(&MapPosition, &FocusFollow, &mut ScreenPosition)>,
) {
    let focus = graph.focus();
    for (position, follow, mut screen) in query.iter_mut() {
        screen.pos = position.pos + follow.offset + focus;
    }
}
