//! Focus-relative placement marker.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Marks an entity whose on-screen position follows the camera focus.
///
/// `offset` compensates for the difference between the physics body origin
/// and the sprite anchor. On-screen position = world position + `offset`
/// + focus offset.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct FocusFollow {
    pub offset: Vec2,
}

impl FocusFollow {
    pub fn new(offset_x: f32, offset_y: f32) -> Self {
        Self {
            offset: Vec2::new(offset_x, offset_y),
        }
    }

    /// Compensation for a sprite of the given extents: the screen position
    /// sits a quarter extent up and right of the body origin, bridging the
    /// bottom-left sprite anchor and the body's center-bottom origin.
    pub fn for_sprite(width: f32, height: f32) -> Self {
        Self::new(width / 4.0, height / 4.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_offset_is_a_positive_quarter_extent() {
        let follow = FocusFollow::for_sprite(80.0, 190.0);
        assert_eq!(follow.offset, Vec2::new(20.0, 47.5));
    }
}
