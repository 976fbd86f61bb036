//! Collision shapes.

use glam::Vec2;

use super::body::BodyId;

/// Handle to a [`Shape`] owned by a [`Space`](super::space::Space).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) u32);

/// Geometry of a collision shape, in body-local coordinates.
#[derive(Clone, Copy, Debug)]
pub enum ShapeKind {
    Circle { radius: f32, offset: Vec2 },
    Segment { a: Vec2, b: Vec2, radius: f32 },
}

/// A collision shape attached to a body.
///
/// `friction` and `elasticity` combine multiplicatively between the two
/// shapes of a contact. `surface_velocity` is the tangential velocity the
/// shape's surface tries to reach relative to whatever it touches: a body
/// whose shape carries `surface_velocity = (v, 0)` is dragged by friction
/// until its own velocity along the contact tangent approaches `v`
/// (conveyor-style walking without overwriting the body velocity).
#[derive(Clone, Copy, Debug)]
pub struct Shape {
    pub body: BodyId,
    pub kind: ShapeKind,
    pub friction: f32,
    pub elasticity: f32,
    pub surface_velocity: Vec2,
    /// Shapes sharing a nonzero group never collide with each other.
    pub group: u32,
    /// Free-form tag for gameplay logic; the solver ignores it.
    pub collision_type: u32,
}

impl Shape {
    /// Circle of `radius` centered at `offset` in body coordinates.
    pub fn circle(body: BodyId, radius: f32, offset: Vec2) -> Self {
        Self {
            body,
            kind: ShapeKind::Circle { radius, offset },
            friction: 0.0,
            elasticity: 0.0,
            surface_velocity: Vec2::ZERO,
            group: 0,
            collision_type: 0,
        }
    }

    /// Line segment from `a` to `b` with a collision thickness of `radius`.
    pub fn segment(body: BodyId, a: Vec2, b: Vec2, radius: f32) -> Self {
        Self {
            body,
            kind: ShapeKind::Segment { a, b, radius },
            friction: 0.0,
            elasticity: 0.0,
            surface_velocity: Vec2::ZERO,
            group: 0,
            collision_type: 0,
        }
    }
}
