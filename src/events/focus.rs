//! Focus change event and a logging observer.
//!
//! The camera system emits [`FocusChanged`] whenever the scene focus
//! actually moves (clamped no-ops do not fire). Observers can subscribe to
//! react in a decoupled manner (parallax layers, audio panning, etc.).
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

/// Event fired when the scene focus changes. Carries the new (already
/// clamped) focus offset.
#[derive(Event, Debug, Clone, Copy)]
pub struct FocusChanged {
    pub x: f32,
    pub y: f32,
}

/// Global observer that logs focus movement at debug level.
pub fn observe_focus_changed(trigger: On<FocusChanged>) {
    let event = trigger.event();
    debug!("focus moved to ({}, {})", event.x, event.y);
}
