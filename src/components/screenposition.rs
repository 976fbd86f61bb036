//! Screen-space position component.
//!
//! The [`ScreenPosition`] component stores where an entity lands on screen
//! this tick. For focus-following actors it is recomputed every tick from the
//! physics body position, the sprite-origin compensation and the camera focus
//! offset; the render collaborator reads it and never writes it.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// On-screen position (pixels) for an entity.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ScreenPosition {
    pub pos: Vec2,
}

impl ScreenPosition {
    /// Create a ScreenPosition from x and y.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}
