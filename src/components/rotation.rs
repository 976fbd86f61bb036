use bevy_ecs::prelude::Component;

/// Render rotation in degrees, mirrored from the physics body angle.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Rotation {
    pub degrees: f32,
}
