//! Per-state, per-facing visual representation table.
//!
//! Actors declare one [`StateVisual`] per logical state (stand, walk, and any
//! game-defined extras). Each state supplies at least a left-facing
//! representation; the right-facing one defaults to the left when omitted, so
//! no independent right-side asset is ever assumed.
//!
//! [`VisualStates::set_state`] and [`VisualStates::set_facing`] are
//! idempotent: the active visual only swaps when the requested state or
//! facing actually differs, which keeps redundant per-tick calls from
//! churning the render handle.

use bevy_ecs::prelude::Component;
use log::warn;
use rustc_hash::FxHashMap;

/// Logical actor state key. Games extend the built-in set with their own
/// values (the sample star entity uses `ActorState(10)`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActorState(pub u32);

impl ActorState {
    pub const STAND: ActorState = ActorState(1);
    pub const WALK: ActorState = ActorState(2);
}

/// Horizontal facing of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Reference to a drawable asset. Decoding is the resource loader's concern;
/// the engine only tracks which asset is active.
#[derive(Clone, Debug, PartialEq)]
pub enum VisualRef {
    /// A static image by logical asset name.
    Image(String),
    /// A looping or one-shot animation cut from a sprite sheet.
    Animation {
        sheet: String,
        rows: u32,
        columns: u32,
        frame_time: f32,
        looped: bool,
    },
}

/// Visual representation of one actor state, per facing.
#[derive(Clone, Debug)]
pub struct StateVisual {
    left: VisualRef,
    right: VisualRef,
}

impl StateVisual {
    /// Build a state visual. A missing `right` reuses `left`.
    pub fn new(left: VisualRef, right: Option<VisualRef>) -> Self {
        let right = right.unwrap_or_else(|| left.clone());
        Self { left, right }
    }

    pub fn facing(&self, facing: Facing) -> &VisualRef {
        match facing {
            Facing::Left => &self.left,
            Facing::Right => &self.right,
        }
    }
}

/// State table component: current state, facing and the declared visuals.
#[derive(Component, Clone, Debug)]
pub struct VisualStates {
    states: FxHashMap<ActorState, StateVisual>,
    current: ActorState,
    facing: Facing,
    /// Number of times the active visual actually changed.
    swaps: u64,
}

impl VisualStates {
    pub fn new(states: FxHashMap<ActorState, StateVisual>, start: ActorState) -> Self {
        debug_assert!(states.contains_key(&start), "start state not declared");
        Self {
            states,
            current: start,
            facing: Facing::Right,
            swaps: 0,
        }
    }

    pub fn state(&self) -> ActorState {
        self.current
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// The active drawable, if the current state is declared.
    pub fn current_visual(&self) -> Option<&VisualRef> {
        self.states.get(&self.current).map(|s| s.facing(self.facing))
    }

    /// How many times the active visual changed. Redundant `set_state` /
    /// `set_facing` calls leave this untouched.
    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    /// Switch to `state`. No-op when already in it; a warning when the state
    /// was never declared.
    pub fn set_state(&mut self, state: ActorState) {
        if state == self.current {
            return;
        }
        if !self.states.contains_key(&state) {
            warn!("set_state: undeclared actor state {:?}", state);
            return;
        }
        self.current = state;
        self.swaps += 1;
    }

    /// Switch facing. No-op when already facing that way.
    pub fn set_facing(&mut self, facing: Facing) {
        if facing == self.facing {
            return;
        }
        self.facing = facing;
        self.swaps += 1;
    }
}
