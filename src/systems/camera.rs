//! Camera focus update system.
//!
//! Moves the scene focus according to the active [`Camera`] behavior. Focus
//! requests go through [`SceneGraph::set_focus`], so the usual clamping and
//! change detection apply; a [`FocusChanged`] event fires only when the
//! focus actually moved.
//!
//! [`SceneGraph::set_focus`]: crate::resources::scenegraph::SceneGraph::set_focus

use bevy_ecs::prelude::*;

use crate::components::avatar::AvatarController;
use crate::components::mapposition::MapPosition;
use crate::events::focus::FocusChanged;
use crate::resources::camera::Camera;
use crate::resources::scenegraph::SceneGraph;

/// Recompute the focus for this tick.
///
/// The oriented camera keeps the tracked avatar a fixed threshold from the
/// viewport edge, axis by axis, with a dead band near the world edges where
/// the focus stops following. The continuous camera scrolls by a constant
/// delta regardless of the avatar.
pub fn camera_system(
    camera: Res<Camera>,
    mut graph: ResMut<SceneGraph>,
    mut commands: Commands,
    query: Query<&MapPosition, With<AvatarController>>,
) {
    let moved = match *camera {
        Camera::Fixed => false,
        Camera::Oriented {
            x_threshold,
            y_threshold,
        } => {
            let Ok(position) = query.single() else {
                return;
            };
            let (width, height) = graph.size();
            let (viewport_w, viewport_h) = graph.viewport();
            let focus = graph.focus();
            let pos = position.pos;
            let mut fx = focus.x;
            let mut fy = focus.y;
            if pos.x >= x_threshold && pos.x <= width - viewport_w + x_threshold {
                fx = -(pos.x - x_threshold);
            }
            if pos.y >= y_threshold && pos.y <= height - viewport_h + y_threshold {
                fy = -(pos.y - y_threshold);
            }
            graph.set_focus(fx, fy)
        }
        Camera::Continuous { dx, dy } => graph.move_focus(dx, dy),
    };
    if moved {
        let focus = graph.focus();
        commands.trigger(FocusChanged {
            x: focus.x,
            y: focus.y,
        });
    }
}
