//! Engine systems.
//!
//! This module groups all ECS systems that advance simulation, input, and
//! camera state. The tick driver runs them in a fixed order: input latching,
//! avatar control, physics step, body sync, camera, screen positions.
//!
//! Submodules overview
//! - [`avatar`] – the per-tick avatar movement state machine
//! - [`camera`] – move the scene focus per the active camera behavior
//! - [`input`] – latch edge-triggered intents onto controllers
//! - [`physics`] – advance the simulation by one fixed step
//! - [`time`] – update simulation time and delta
//! - [`visual`] – sync body state to render components, compute screen positions

pub mod avatar;
pub mod camera;
pub mod input;
pub mod physics;
pub mod time;
pub mod visual;
