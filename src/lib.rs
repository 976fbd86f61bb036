//! Strata2D engine library.
//!
//! This module exposes the engine's ECS components, resources, systems,
//! events and the physics space for use in integration tests and as a
//! reusable library.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod physics;
pub mod resources;
pub mod systems;
