//! Camera behavior resource.
//!
//! Selects how the scene focus follows the avatar each tick. The actual
//! focus update is done by [`camera_system`](crate::systems::camera), which
//! reads this resource; the scene graph clamps whatever it requests.

use bevy_ecs::prelude::Resource;

/// Horizontal dead zone of the oriented camera, world units from the
/// viewport's left edge.
pub const ORIENTED_X_THRESHOLD: f32 = 800.0;
/// Vertical dead zone of the oriented camera.
pub const ORIENTED_Y_THRESHOLD: f32 = 300.0;

/// Camera behavior.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub enum Camera {
    /// The focus never moves on its own.
    Fixed,
    /// Keeps the tracked actor at a fixed offset from the viewport edge
    /// once it passes the threshold, axis by axis.
    Oriented { x_threshold: f32, y_threshold: f32 },
    /// Scrolls by a constant focus delta every tick, ignoring the actor.
    Continuous { dx: f32, dy: f32 },
}

impl Default for Camera {
    fn default() -> Self {
        Camera::Oriented {
            x_threshold: ORIENTED_X_THRESHOLD,
            y_threshold: ORIENTED_Y_THRESHOLD,
        }
    }
}

impl Camera {
    /// Auto-scrolling camera moving the visible window by `(dx, dy)` world
    /// units per tick. Focus deltas are the negated window movement.
    pub fn continuous(dx: f32, dy: f32) -> Self {
        Camera::Continuous { dx: -dx, dy: -dy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuous_negates_window_movement() {
        // Scrolling the window right means moving the focus left.
        assert_eq!(
            Camera::continuous(2.0, 0.0),
            Camera::Continuous { dx: -2.0, dy: 0.0 }
        );
    }
}
