//! Event types and observers used by the engine.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them. Events provide a decoupled
//! way for systems to communicate without tight coupling or direct
//! dependencies.
//!
//! Submodules:
//! - [`focus`] – camera focus movement notifications
//!
//! See each submodule for concrete event data, semantics, and example usage.
pub mod focus;
