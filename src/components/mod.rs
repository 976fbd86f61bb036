//! ECS components for actors.
//!
//! There is no actor base type: each capability (visual, physical,
//! focus-following, player-controlled) is a component, and an actor is
//! whatever combination of them an entity carries.
//!
//! Submodules overview:
//! - [`avatar`] – player-control tunables and per-tick movement state
//! - [`focusfollow`] – sprite-origin compensation for focus-relative placement
//! - [`mapposition`] – world-space position mirrored from the physics body
//! - [`physicsbody`] – handles to the body and shapes owned in the space
//! - [`rotation`] – render rotation in degrees, synced from the body angle
//! - [`screenposition`] – computed on-screen position for the render pass
//! - [`visualstates`] – per-state, per-facing visual representation table

pub mod avatar;
pub mod focusfollow;
pub mod mapposition;
pub mod physicsbody;
pub mod rotation;
pub mod screenposition;
pub mod visualstates;
