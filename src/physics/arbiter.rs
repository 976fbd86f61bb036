//! Contact records left behind by each simulation step.

use glam::Vec2;

use super::body::BodyId;
use super::shape::ShapeId;

/// One touching shape pair from the most recent step.
///
/// `normal` points from `shapes[0]` toward `shapes[1]`. Arbiters yielded by
/// [`Space::arbiters_for`](super::space::Space::arbiters_for) are oriented so
/// that `shapes[0]`/`bodies[0]` belong to the queried body; gameplay code
/// negates the normal to get "from the other body toward mine".
#[derive(Clone, Copy, Debug)]
pub struct Arbiter {
    pub shapes: [ShapeId; 2],
    pub bodies: [BodyId; 2],
    pub normal: Vec2,
    pub penetration: f32,
    /// Contact point in world coordinates.
    pub point: Vec2,
}

impl Arbiter {
    /// The same contact seen from the other side.
    pub fn flipped(&self) -> Arbiter {
        Arbiter {
            shapes: [self.shapes[1], self.shapes[0]],
            bodies: [self.bodies[1], self.bodies[0]],
            normal: -self.normal,
            penetration: self.penetration,
            point: self.point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn test_flipped_swaps_and_negates() {
        let arb = Arbiter {
            shapes: [ShapeId(1), ShapeId(2)],
            bodies: [BodyId(3), BodyId(4)],
            normal: vec2(0.0, 1.0),
            penetration: 0.5,
            point: vec2(10.0, 20.0),
        };
        let flip = arb.flipped();
        assert_eq!(flip.shapes[0], ShapeId(2));
        assert_eq!(flip.bodies[0], BodyId(4));
        assert_eq!(flip.normal, vec2(0.0, -1.0));
        assert_eq!(flip.penetration, 0.5);
    }
}
