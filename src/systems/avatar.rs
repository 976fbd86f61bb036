//! Avatar movement controller.
//!
//! Runs once per logic tick, after input latching and before the physics
//! step. The grounded state is recomputed from the previous step's contacts
//! every tick rather than stored, so a platform vanishing under the avatar
//! is noticed immediately.
//!
//! Ground movement works through the feet shape: its surface velocity acts
//! as a conveyor carrying the body toward the target speed, and its friction
//! caps the resulting acceleration. Because the friction value is derived
//! from the ground acceleration divided by gravity, it doubles as the
//! steepest walkable slope.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::avatar::AvatarController;
use crate::components::physicsbody::PhysicsBodyRef;
use crate::components::visualstates::{ActorState, Facing, VisualStates};
use crate::resources::input::InputState;
use crate::resources::physicsspace::PhysicsSpace;

/// Airborne horizontal impulses are the target velocity over this divisor,
/// deliberately weaker than ground control.
const AIR_CONTROL_DIVISOR: f32 = 6.0;

/// Slopes with a smaller |nx| count as level for sliding purposes.
const LEVEL_EPSILON: f32 = 1e-3;

/// Contacts where the body moves away from the platform faster than this
/// do not count as standing on it. Contacts lag the step they were found
/// in, so without this the tick right after a jump would still look
/// grounded and hand the jump counter back.
const SEPARATION_THRESHOLD: f32 = 10.0;

/// True when `normal` is an upward contact normal whose steepness is inside
/// `limit`, expressed as |nx / ny| < `limit`. Equality is not inside.
pub fn slope_within(normal: Vec2, limit: f32) -> bool {
    normal.y > 0.0 && (normal.x / normal.y).abs() < limit
}

/// Per-tick avatar state machine: grounding, horizontal control, slide,
/// jump, friction and the terminal fall clamp, in that order.
pub fn avatar_controller(
    mut space: ResMut<PhysicsSpace>,
    input: Res<InputState>,
    mut query: Query<(&mut AvatarController, &PhysicsBodyRef, &mut VisualStates)>,
) {
    let space = &mut space.0;
    for (mut ctrl, body_ref, mut visuals) in query.iter_mut() {
        // Grounding: scan the contacts from the last step. Normals are
        // flipped to point from the other body toward the avatar; the last
        // upward one wins.
        ctrl.platform_normal = Vec2::ZERO;
        ctrl.platform_body = None;
        let body_velocity = space
            .body(body_ref.body)
            .map(|b| b.velocity)
            .unwrap_or(Vec2::ZERO);
        for arb in space.arbiters_for(body_ref.body) {
            let n = -arb.normal;
            if n.y <= 0.0 {
                continue;
            }
            let other_velocity = space
                .body(arb.bodies[1])
                .map(|b| b.velocity)
                .unwrap_or(Vec2::ZERO);
            if (body_velocity - other_velocity).dot(n) > SEPARATION_THRESHOLD {
                continue;
            }
            ctrl.platform_normal = n;
            ctrl.platform_body = Some(arb.bodies[1]);
        }

        // The slope limit is the feet friction as currently stored on the
        // shape, which this system wrote on an earlier tick.
        let feet_friction = space.shape(ctrl.feet).map(|s| s.friction).unwrap_or(0.0);
        ctrl.grounded =
            ctrl.platform_body.is_some() && slope_within(ctrl.platform_normal, feet_friction);
        if ctrl.grounded {
            ctrl.remaining_jumps = ctrl.jump_times;
        }

        // Horizontal control and the walk/stand visual. Left takes priority
        // when both directions are held.
        let target_vx;
        if input.left.active {
            target_vx = -ctrl.velocity;
            visuals.set_facing(Facing::Left);
            visuals.set_state(ActorState::WALK);
        } else if input.right.active {
            target_vx = ctrl.velocity;
            visuals.set_facing(Facing::Right);
            visuals.set_state(ActorState::WALK);
        } else {
            target_vx = 0.0;
            visuals.set_state(ActorState::STAND);
        }

        ctrl.slide = input.down.active;
        let sloped = ctrl.platform_normal.x.abs() > LEVEL_EPSILON;

        let gravity_y = space.gravity().y.abs();

        // Jump: consume the latch whether or not the jump fires.
        if ctrl.jump_requested {
            if ctrl.grounded || ctrl.remaining_jumps > 0 {
                let launch = (2.0 * ctrl.jump_height * gravity_y).sqrt();
                let ground_vy = ctrl
                    .platform_body
                    .and_then(|b| space.body(b))
                    .map(|b| b.velocity.y)
                    .unwrap_or(0.0);
                if let Some(body) = space.body_mut(body_ref.body) {
                    body.velocity.y = ground_vy + launch;
                }
                ctrl.remaining_jumps = ctrl.remaining_jumps.saturating_sub(1);
                trace!("jump, {} remaining", ctrl.remaining_jumps);
            }
            ctrl.jump_requested = false;
        }

        // Friction and drive. On a platform the feet conveyor carries the
        // body; in the air a weak direct impulse is all the control there is.
        if ctrl.platform_body.is_some() {
            let ground_friction = if ctrl.slide && sloped {
                0.0
            } else if gravity_y > 0.0 {
                ctrl.ground_accel / gravity_y
            } else {
                0.0
            };
            if let Some(feet) = space.shape_mut(ctrl.feet) {
                feet.friction = ground_friction;
                feet.surface_velocity = Vec2::new(target_vx, 0.0);
            }
            if let Some(head) = space.shape_mut(ctrl.head) {
                head.friction = ctrl.head_friction;
            }
        } else {
            if let Some(feet) = space.shape_mut(ctrl.feet) {
                feet.friction = 0.0;
                feet.surface_velocity = Vec2::ZERO;
            }
            if let Some(head) = space.shape_mut(ctrl.head) {
                head.friction = 0.0;
            }
            if target_vx != 0.0
                && let Some(body) = space.body_mut(body_ref.body)
            {
                body.apply_impulse(Vec2::new(target_vx / AIR_CONTROL_DIVISOR, 0.0));
            }
        }

        // Terminal velocity.
        if let Some(body) = space.body_mut(body_ref.body)
            && body.velocity.y < -ctrl.fall_velocity
        {
            body.velocity.y = -ctrl.fall_velocity;
        }
    }
}
