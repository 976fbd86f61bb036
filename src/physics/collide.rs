//! Narrow-phase contact generation.
//!
//! Supports circle/circle and circle/segment pairs. Segment/segment pairs
//! never collide (all segments are static terrain).

use glam::Vec2;

use super::body::Body;
use super::shape::{Shape, ShapeKind};

/// Degenerate-distance guard; below this the contact normal defaults to up.
const MIN_DISTANCE: f32 = 1e-6;

/// A single contact point between two shapes.
///
/// `normal` points from the first shape toward the second.
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    pub normal: Vec2,
    pub penetration: f32,
    pub point: Vec2,
}

fn to_world(body: &Body, local: Vec2) -> Vec2 {
    body.position + Vec2::from_angle(body.angle).rotate(local)
}

/// Test two shapes for overlap, returning a contact oriented a → b.
pub fn collide(shape_a: &Shape, body_a: &Body, shape_b: &Shape, body_b: &Body) -> Option<Contact> {
    match (&shape_a.kind, &shape_b.kind) {
        (
            ShapeKind::Circle {
                radius: ra,
                offset: oa,
            },
            ShapeKind::Circle {
                radius: rb,
                offset: ob,
            },
        ) => circle_circle(to_world(body_a, *oa), *ra, to_world(body_b, *ob), *rb),
        (
            ShapeKind::Circle { radius, offset },
            ShapeKind::Segment { a, b, radius: rs },
        ) => circle_segment(
            to_world(body_a, *offset),
            *radius,
            to_world(body_b, *a),
            to_world(body_b, *b),
            *rs,
        )
        // circle_segment orients segment → circle; flip to a → b.
        .map(|c| Contact {
            normal: -c.normal,
            ..c
        }),
        (
            ShapeKind::Segment { a, b, radius: rs },
            ShapeKind::Circle { radius, offset },
        ) => circle_segment(
            to_world(body_b, *offset),
            *radius,
            to_world(body_a, *a),
            to_world(body_a, *b),
            *rs,
        ),
        (ShapeKind::Segment { .. }, ShapeKind::Segment { .. }) => None,
    }
}

fn circle_circle(ca: Vec2, ra: f32, cb: Vec2, rb: f32) -> Option<Contact> {
    let delta = cb - ca;
    let dist = delta.length();
    let overlap = ra + rb - dist;
    if overlap <= 0.0 {
        return None;
    }
    let normal = if dist > MIN_DISTANCE {
        delta / dist
    } else {
        Vec2::Y
    };
    Some(Contact {
        normal,
        penetration: overlap,
        point: ca + normal * (ra - overlap * 0.5),
    })
}

/// Contact between a circle and a thick segment, normal oriented from the
/// segment toward the circle.
fn circle_segment(center: Vec2, rc: f32, a: Vec2, b: Vec2, rs: f32) -> Option<Contact> {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > MIN_DISTANCE {
        ((center - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = a + ab * t;
    let delta = center - closest;
    let dist = delta.length();
    let overlap = rc + rs - dist;
    if overlap <= 0.0 {
        return None;
    }
    let normal = if dist > MIN_DISTANCE {
        delta / dist
    } else {
        Vec2::Y
    };
    Some(Contact {
        normal,
        penetration: overlap,
        point: closest + normal * rs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::body::BodyId;
    use glam::vec2;

    const EPSILON: f32 = 1e-4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn body_at(pos: Vec2) -> Body {
        let mut body = Body::new(5.0, f32::INFINITY);
        body.position = pos;
        body
    }

    #[test]
    fn test_circle_circle_overlap() {
        let contact = circle_circle(vec2(0.0, 0.0), 10.0, vec2(15.0, 0.0), 10.0).unwrap();
        assert!(approx_eq(contact.normal.x, 1.0));
        assert!(approx_eq(contact.penetration, 5.0));
    }

    #[test]
    fn test_circle_circle_apart() {
        assert!(circle_circle(vec2(0.0, 0.0), 10.0, vec2(25.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_circle_above_segment_normal_points_up() {
        // Circle resting on a horizontal floor: normal from segment to circle is +y.
        let contact =
            circle_segment(vec2(50.0, 22.0), 20.0, vec2(0.0, 0.0), vec2(100.0, 0.0), 5.0).unwrap();
        assert!(approx_eq(contact.normal.x, 0.0));
        assert!(approx_eq(contact.normal.y, 1.0));
        assert!(approx_eq(contact.penetration, 3.0));
    }

    #[test]
    fn test_circle_past_segment_endpoint() {
        // Circle off the end of the segment clamps to the endpoint.
        let contact =
            circle_segment(vec2(110.0, 0.0), 20.0, vec2(0.0, 0.0), vec2(100.0, 0.0), 5.0).unwrap();
        assert!(approx_eq(contact.normal.x, 1.0));
        assert!(approx_eq(contact.normal.y, 0.0));
    }

    #[test]
    fn test_collide_orients_a_to_b() {
        let ground = body_at(Vec2::ZERO);
        let faller = body_at(vec2(50.0, 22.0));
        let seg = Shape::segment(BodyId(0), vec2(0.0, 0.0), vec2(100.0, 0.0), 5.0);
        let circ = Shape::circle(BodyId(1), 20.0, Vec2::ZERO);

        // segment first: normal points up toward the circle
        let c = collide(&seg, &ground, &circ, &faller).unwrap();
        assert!(c.normal.y > 0.99);

        // circle first: normal points down toward the segment
        let c = collide(&circ, &faller, &seg, &ground).unwrap();
        assert!(c.normal.y < -0.99);
    }

    #[test]
    fn test_segment_segment_never_collides() {
        let body = Body::new_static();
        let s1 = Shape::segment(BodyId(0), vec2(0.0, 0.0), vec2(100.0, 0.0), 5.0);
        let s2 = Shape::segment(BodyId(1), vec2(50.0, -1.0), vec2(50.0, 1.0), 5.0);
        assert!(collide(&s1, &body, &s2, &body).is_none());
    }
}
