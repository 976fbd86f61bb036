//! Per-frame input intent resource.
//!
//! The engine is windowing-agnostic, so this resource holds logical movement
//! intents rather than key codes. The host (or a test) feeds edges in with
//! [`InputState::press`] / [`InputState::release`]; systems read the
//! resulting state, and [`InputState::begin_frame`] clears the one-frame
//! edge flags at the start of the next frame.

use bevy_ecs::prelude::*;

/// Boolean intent state with press/release edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolState {
    /// Whether the intent is currently held.
    pub active: bool,
    /// Whether it was activated this frame.
    pub just_pressed: bool,
    /// Whether it was released this frame.
    pub just_released: bool,
}

impl BoolState {
    fn press(&mut self) {
        if !self.active {
            self.just_pressed = true;
        }
        self.active = true;
    }

    fn release(&mut self) {
        if self.active {
            self.just_released = true;
        }
        self.active = false;
    }

    fn begin_frame(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Logical movement intents for the avatar.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: BoolState,
    pub right: BoolState,
    pub down: BoolState,
    pub jump: BoolState,
}

/// Which intent a press/release refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Left,
    Right,
    Down,
    Jump,
}

impl InputState {
    fn state_mut(&mut self, intent: Intent) -> &mut BoolState {
        match intent {
            Intent::Left => &mut self.left,
            Intent::Right => &mut self.right,
            Intent::Down => &mut self.down,
            Intent::Jump => &mut self.jump,
        }
    }

    /// Record a press edge. Repeated presses while held do not re-trigger
    /// `just_pressed`.
    pub fn press(&mut self, intent: Intent) {
        self.state_mut(intent).press();
    }

    /// Record a release edge.
    pub fn release(&mut self, intent: Intent) {
        self.state_mut(intent).release();
    }

    /// Clear the one-frame edge flags. Call once at the top of every frame,
    /// before feeding this frame's edges.
    pub fn begin_frame(&mut self) {
        self.left.begin_frame();
        self.right.begin_frame();
        self.down.begin_frame();
        self.jump.begin_frame();
    }
}
