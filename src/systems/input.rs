//! Input latching system.
//!
//! Converts the edge-triggered jump press into the one-shot request flag on
//! the avatar controller. The flag stays set until the controller consumes
//! it, so a jump pressed this tick still fires even if the controller runs
//! on a later tick.
use bevy_ecs::prelude::*;

use crate::components::avatar::AvatarController;
use crate::resources::input::InputState;

/// Latch a jump request on every avatar when the jump intent was just
/// pressed.
pub fn latch_jump_requests(
    input: Res<InputState>,
    mut query: Query<&mut AvatarController>,
) {
    if !input.jump.just_pressed {
        return;
    }
    for mut ctrl in query.iter_mut() {
        ctrl.jump_requested = true;
    }
}
