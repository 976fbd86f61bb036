//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: the scene graph, the physics space,
//! input state, timing, configuration and registries. Each submodule
//! documents the semantics and intended usage of its resource(s).
//!
//! Overview
//! - `camera` – camera behavior selection for the focus-follow system
//! - `entityregistry` – entity factory functions keyed by stable names
//! - `gameconfig` – engine settings loaded from an INI file
//! - `input` – per-frame logical movement intents
//! - `mapdoc` – serde document structs mirroring the map file format
//! - `physicsspace` – the simulation space as an ECS resource
//! - `scenegraph` – layered scene with the focusable camera window
//! - `spritestore` – sprite extents keyed by logical asset name
//! - `worldtime` – simulation time and delta
pub mod camera;
pub mod entityregistry;
pub mod gameconfig;
pub mod input;
pub mod mapdoc;
pub mod physicsspace;
pub mod scenegraph;
pub mod spritestore;
pub mod worldtime;
