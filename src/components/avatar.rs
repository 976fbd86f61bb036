//! Avatar control component.
//!
//! Holds the player-character tunables and the per-tick state consumed by
//! [`avatar_controller`](crate::systems::avatar::avatar_controller). The
//! grounded flag and platform contact are derived from physics contacts every
//! tick and never carried across ticks, so they cannot go stale.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::physics::{BodyId, ShapeId};

/// Target horizontal speed while walking, world units per second.
pub const PLAYER_VELOCITY: f32 = 200.0;
/// Time to reach full walking speed on the ground.
pub const PLAYER_GROUND_ACCEL_TIME: f32 = 0.05;
/// Ground acceleration. Divided by |gravity| this doubles as the feet
/// friction coefficient, and therefore as the max-walkable-slope threshold.
pub const PLAYER_GROUND_ACCEL: f32 = PLAYER_VELOCITY / PLAYER_GROUND_ACCEL_TIME;
/// Desired jump apex height above the launch point.
pub const JUMP_HEIGHT: f32 = 48.0;
/// Terminal fall speed.
pub const FALL_VELOCITY: f32 = 500.0;
/// Constant friction on the head shape while on a platform.
pub const HEAD_FRICTION: f32 = 0.7;
/// Jumps available before touching ground again (2 = double jump).
pub const JUMP_TIMES: u32 = 2;

/// Player movement tunables plus transient per-tick control state.
#[derive(Component, Clone, Debug)]
pub struct AvatarController {
    // Tunables.
    pub velocity: f32,
    pub ground_accel: f32,
    pub jump_height: f32,
    pub fall_velocity: f32,
    pub head_friction: f32,
    pub jump_times: u32,
    // Shapes the controller writes friction / surface velocity to.
    pub feet: ShapeId,
    pub head: ShapeId,
    // Per-tick derived state.
    pub grounded: bool,
    pub platform_normal: Vec2,
    /// Body currently stood on. A handle, never an owning reference: the
    /// platform's lifetime is independent of the avatar.
    pub platform_body: Option<BodyId>,
    pub remaining_jumps: u32,
    /// One-shot jump latch, set on key press and consumed by the controller.
    pub jump_requested: bool,
    pub slide: bool,
}

impl AvatarController {
    /// Controller with the default tunables for the given feet/head shapes.
    pub fn new(feet: ShapeId, head: ShapeId) -> Self {
        Self {
            velocity: PLAYER_VELOCITY,
            ground_accel: PLAYER_GROUND_ACCEL,
            jump_height: JUMP_HEIGHT,
            fall_velocity: FALL_VELOCITY,
            head_friction: HEAD_FRICTION,
            jump_times: JUMP_TIMES,
            feet,
            head,
            grounded: false,
            platform_normal: Vec2::ZERO,
            platform_body: None,
            remaining_jumps: 0,
            jump_requested: false,
            slide: false,
        }
    }
}
