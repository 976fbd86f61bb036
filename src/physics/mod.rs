//! Fixed-timestep rigid body simulation.
//!
//! A small impulse solver: bodies carry mass and velocity, shapes (circles
//! and line segments) carry friction, elasticity and a surface velocity,
//! and every step leaves behind the set of [`Arbiter`](arbiter::Arbiter)
//! contacts so gameplay code can inspect what it is standing on.
//!
//! The tick driver calls [`Space::step`](space::Space::step) with
//! [`PHYSICS_DT`] exactly once per logic tick. The step rate is not adapted
//! to wall-clock time; the simulation assumes the logic rate equals the
//! physics rate.

pub mod arbiter;
pub mod body;
pub mod collide;
pub mod shape;
pub mod space;

pub use arbiter::Arbiter;
pub use body::{Body, BodyId};
pub use shape::{Shape, ShapeId, ShapeKind};
pub use space::Space;

/// Fixed physics step, one per logic tick.
pub const PHYSICS_DT: f32 = 1.0 / 60.0;
