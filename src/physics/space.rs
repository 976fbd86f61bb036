//! The simulation space: body/shape registry plus the fixed-step solver.

use glam::Vec2;
use rustc_hash::FxHashMap;

use super::arbiter::Arbiter;
use super::body::{Body, BodyId};
use super::collide::collide;
use super::shape::{Shape, ShapeId};

/// Velocity solver passes per step.
const SOLVER_ITERATIONS: usize = 8;
/// Overlap tolerated at rest. Keeping a little penetration means resting
/// contacts reappear every step, which grounding detection relies on.
const PENETRATION_SLOP: f32 = 0.1;
/// Fraction of the remaining overlap corrected per step.
const CORRECTION_FACTOR: f32 = 0.8;

/// Per-contact solver state, rebuilt every step.
struct ContactState {
    shape_a: ShapeId,
    shape_b: ShapeId,
    body_a: BodyId,
    body_b: BodyId,
    normal: Vec2,
    tangent: Vec2,
    penetration: f32,
    point: Vec2,
    /// Combined inverse mass along the contact.
    inv_mass_sum: f32,
    /// Post-solve target for the relative normal velocity (restitution).
    target_vn: f32,
    /// Target relative tangential velocity from surface velocities.
    goal_vt: f32,
    /// Combined friction coefficient.
    mu: f32,
    jn_acc: f32,
    jt_acc: f32,
}

/// Owns every body and shape and steps the simulation.
///
/// Bodies and shapes are addressed by handle; removing a body also removes
/// its shapes. A built-in infinite-mass [`static_body`](Space::static_body)
/// anchors terrain segments.
pub struct Space {
    gravity: Vec2,
    bodies: FxHashMap<BodyId, Body>,
    shapes: FxHashMap<ShapeId, Shape>,
    body_order: Vec<BodyId>,
    shape_order: Vec<ShapeId>,
    next_body: u32,
    next_shape: u32,
    static_body: BodyId,
    arbiters: Vec<Arbiter>,
}

impl Default for Space {
    fn default() -> Self {
        Self::new()
    }
}

impl Space {
    /// Create an empty space with zero gravity and the built-in static body.
    pub fn new() -> Self {
        let mut space = Self {
            gravity: Vec2::ZERO,
            bodies: FxHashMap::default(),
            shapes: FxHashMap::default(),
            body_order: Vec::new(),
            shape_order: Vec::new(),
            next_body: 0,
            next_shape: 0,
            static_body: BodyId(0),
            arbiters: Vec::new(),
        };
        space.static_body = space.add_body(Body::new_static());
        space
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// The shared infinite-mass body terrain segments attach to.
    pub fn static_body(&self) -> BodyId {
        self.static_body
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.next_body);
        self.next_body += 1;
        self.bodies.insert(id, body);
        self.body_order.push(id);
        id
    }

    /// Remove a body, its shapes and any arbiters touching it.
    pub fn remove_body(&mut self, id: BodyId) {
        self.bodies.remove(&id);
        self.body_order.retain(|b| *b != id);
        self.shape_order
            .retain(|s| self.shapes.get(s).map(|sh| sh.body != id).unwrap_or(false));
        self.shapes.retain(|_, sh| sh.body != id);
        self.arbiters
            .retain(|arb| arb.bodies[0] != id && arb.bodies[1] != id);
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_shape);
        self.next_shape += 1;
        self.shapes.insert(id, shape);
        self.shape_order.push(id);
        id
    }

    pub fn remove_shape(&mut self, id: ShapeId) {
        self.shapes.remove(&id);
        self.shape_order.retain(|s| *s != id);
        self.arbiters
            .retain(|arb| arb.shapes[0] != id && arb.shapes[1] != id);
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Number of registered shapes.
    pub fn shape_count(&self) -> usize {
        self.shape_order.len()
    }

    /// Iterate shapes in insertion order.
    pub fn iter_shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shape_order
            .iter()
            .filter_map(|id| self.shapes.get(id).map(|s| (*id, s)))
    }

    /// Contacts from the most recent step, unoriented.
    pub fn arbiters(&self) -> &[Arbiter] {
        &self.arbiters
    }

    /// Contacts from the most recent step touching `body`, each oriented so
    /// that the first shape/body is the queried one.
    pub fn arbiters_for(&self, body: BodyId) -> impl Iterator<Item = Arbiter> + '_ {
        self.arbiters.iter().filter_map(move |arb| {
            if arb.bodies[0] == body {
                Some(*arb)
            } else if arb.bodies[1] == body {
                Some(arb.flipped())
            } else {
                None
            }
        })
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Order: gravity integration, contact generation, iterative impulse
    /// solve, position integration, positional correction. The step's
    /// contacts stay queryable via [`arbiters_for`](Space::arbiters_for)
    /// until the next step.
    pub fn step(&mut self, dt: f32) {
        for id in &self.body_order {
            if let Some(body) = self.bodies.get_mut(id)
                && body.is_dynamic()
            {
                body.velocity += self.gravity * dt;
            }
        }

        let mut contacts = self.find_contacts();
        for _ in 0..SOLVER_ITERATIONS {
            for contact in &mut contacts {
                self.solve_contact(contact);
            }
        }

        for id in &self.body_order {
            if let Some(body) = self.bodies.get_mut(id)
                && body.is_dynamic()
            {
                body.position += body.velocity * dt;
                body.angle += body.angular_velocity * dt;
            }
        }

        for contact in &contacts {
            self.correct_positions(contact);
        }

        self.arbiters = contacts
            .iter()
            .map(|c| Arbiter {
                shapes: [c.shape_a, c.shape_b],
                bodies: [c.body_a, c.body_b],
                normal: c.normal,
                penetration: c.penetration,
                point: c.point,
            })
            .collect();
    }

    fn find_contacts(&self) -> Vec<ContactState> {
        let mut contacts = Vec::new();
        for (i, sid_a) in self.shape_order.iter().enumerate() {
            for sid_b in &self.shape_order[i + 1..] {
                let (Some(sa), Some(sb)) = (self.shapes.get(sid_a), self.shapes.get(sid_b))
                else {
                    continue;
                };
                if sa.body == sb.body {
                    continue;
                }
                if sa.group != 0 && sa.group == sb.group {
                    continue;
                }
                let (Some(ba), Some(bb)) = (self.bodies.get(&sa.body), self.bodies.get(&sb.body))
                else {
                    continue;
                };
                let inv_mass_sum = ba.inv_mass() + bb.inv_mass();
                if inv_mass_sum == 0.0 {
                    continue;
                }
                let Some(contact) = collide(sa, ba, sb, bb) else {
                    continue;
                };

                let tangent = contact.normal.perp();
                let vn0 = (bb.velocity - ba.velocity).dot(contact.normal);
                let elasticity = sa.elasticity * sb.elasticity;
                let target_vn = if vn0 < 0.0 { -elasticity * vn0 } else { 0.0 };
                contacts.push(ContactState {
                    shape_a: *sid_a,
                    shape_b: *sid_b,
                    body_a: sa.body,
                    body_b: sb.body,
                    normal: contact.normal,
                    tangent,
                    penetration: contact.penetration,
                    point: contact.point,
                    inv_mass_sum,
                    target_vn,
                    goal_vt: (sb.surface_velocity - sa.surface_velocity).dot(tangent),
                    mu: sa.friction * sb.friction,
                    jn_acc: 0.0,
                    jt_acc: 0.0,
                });
            }
        }
        contacts
    }

    fn solve_contact(&mut self, contact: &mut ContactState) {
        let (Some(a), Some(b)) = (
            self.bodies.get(&contact.body_a).copied(),
            self.bodies.get(&contact.body_b).copied(),
        ) else {
            return;
        };
        let (inv_a, inv_b) = (a.inv_mass(), b.inv_mass());
        let mut va = a.velocity;
        let mut vb = b.velocity;

        // Normal impulse, accumulated and clamped non-negative.
        let vn = (vb - va).dot(contact.normal);
        let jn = (contact.target_vn - vn) / contact.inv_mass_sum;
        let jn_new = (contact.jn_acc + jn).max(0.0);
        let jn = jn_new - contact.jn_acc;
        contact.jn_acc = jn_new;
        va -= contact.normal * jn * inv_a;
        vb += contact.normal * jn * inv_b;

        // Friction impulse, driven toward the surface-velocity goal and
        // limited by the accumulated normal impulse.
        let vt = (vb - va).dot(contact.tangent);
        let jt = (contact.goal_vt - vt) / contact.inv_mass_sum;
        let max_friction = contact.mu * contact.jn_acc;
        let jt_new = (contact.jt_acc + jt).clamp(-max_friction, max_friction);
        let jt = jt_new - contact.jt_acc;
        contact.jt_acc = jt_new;
        va -= contact.tangent * jt * inv_a;
        vb += contact.tangent * jt * inv_b;

        if let Some(body) = self.bodies.get_mut(&contact.body_a) {
            body.velocity = va;
        }
        if let Some(body) = self.bodies.get_mut(&contact.body_b) {
            body.velocity = vb;
        }
    }

    fn correct_positions(&mut self, contact: &ContactState) {
        let total = (contact.penetration - PENETRATION_SLOP).max(0.0) * CORRECTION_FACTOR;
        if total <= 0.0 {
            return;
        }
        let (Some(a), Some(b)) = (
            self.bodies.get(&contact.body_a),
            self.bodies.get(&contact.body_b),
        ) else {
            return;
        };
        let share_a = a.inv_mass() / contact.inv_mass_sum;
        let share_b = b.inv_mass() / contact.inv_mass_sum;
        if share_a > 0.0
            && let Some(body) = self.bodies.get_mut(&contact.body_a)
        {
            body.position -= contact.normal * total * share_a;
        }
        if share_b > 0.0
            && let Some(body) = self.bodies.get_mut(&contact.body_b)
        {
            body.position += contact.normal * total * share_b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PHYSICS_DT;
    use glam::vec2;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn space_with_floor() -> (Space, ShapeId) {
        let mut space = Space::new();
        space.set_gravity(vec2(0.0, -1000.0));
        let mut floor = Shape::segment(
            space.static_body(),
            vec2(-1000.0, 0.0),
            vec2(1000.0, 0.0),
            5.0,
        );
        floor.friction = 1.0;
        let floor = space.add_shape(floor);
        (space, floor)
    }

    fn drop_circle(space: &mut Space, pos: Vec2) -> (BodyId, ShapeId) {
        let mut body = Body::new(5.0, f32::INFINITY);
        body.position = pos;
        let body = space.add_body(body);
        let shape = space.add_shape(Shape::circle(body, 20.0, Vec2::ZERO));
        (body, shape)
    }

    #[test]
    fn test_gravity_integration() {
        let mut space = Space::new();
        space.set_gravity(vec2(0.0, -1000.0));
        let body = space.add_body(Body::new(5.0, f32::INFINITY));
        space.step(PHYSICS_DT);
        let body = space.body(body).unwrap();
        assert!(approx_eq(body.velocity.y, -1000.0 * PHYSICS_DT));
    }

    #[test]
    fn test_static_body_never_moves() {
        let mut space = Space::new();
        space.set_gravity(vec2(0.0, -1000.0));
        space.step(PHYSICS_DT);
        let body = space.body(space.static_body()).unwrap();
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.position, Vec2::ZERO);
    }

    #[test]
    fn test_circle_comes_to_rest_on_floor() {
        let (mut space, _) = space_with_floor();
        let (body, _) = drop_circle(&mut space, vec2(0.0, 60.0));
        for _ in 0..180 {
            space.step(PHYSICS_DT);
        }
        let body = space.body(body).unwrap();
        // Feet radius 20 + segment radius 5, minus the resting slop.
        assert!(body.position.y > 23.5 && body.position.y < 25.5);
        assert!(body.velocity.y.abs() < 1.0);
    }

    #[test]
    fn test_resting_contact_persists_between_steps() {
        let (mut space, _) = space_with_floor();
        let (body, _) = drop_circle(&mut space, vec2(0.0, 30.0));
        for _ in 0..120 {
            space.step(PHYSICS_DT);
        }
        // Every subsequent step must still report the floor contact.
        for _ in 0..5 {
            space.step(PHYSICS_DT);
            assert_eq!(space.arbiters_for(body).count(), 1);
        }
    }

    #[test]
    fn test_arbiters_for_orients_normal_away_from_queried_body() {
        let (mut space, _) = space_with_floor();
        let (body, _) = drop_circle(&mut space, vec2(0.0, 24.0));
        space.step(PHYSICS_DT);
        let arbiter = space.arbiters_for(body).next().unwrap();
        assert_eq!(arbiter.bodies[0], body);
        // Normal from the circle toward the floor points down, so the
        // negated normal points up.
        assert!((-arbiter.normal).y > 0.9);
    }

    #[test]
    fn test_surface_velocity_carries_body() {
        let (mut space, _) = space_with_floor();
        let (body, shape) = drop_circle(&mut space, vec2(0.0, 24.0));
        {
            let shape = space.shape_mut(shape).unwrap();
            shape.friction = 4.0;
            shape.surface_velocity = vec2(200.0, 0.0);
        }
        for _ in 0..10 {
            space.step(PHYSICS_DT);
        }
        let body = space.body(body).unwrap();
        assert!((body.velocity.x - 200.0).abs() < 1.0);
    }

    #[test]
    fn test_friction_limits_acceleration_per_step() {
        let (mut space, _) = space_with_floor();
        let (body, shape) = drop_circle(&mut space, vec2(0.0, 24.0));
        {
            let shape = space.shape_mut(shape).unwrap();
            shape.friction = 4.0;
            shape.surface_velocity = vec2(200.0, 0.0);
        }
        // Settle one step so the normal impulse carries the weight, then a
        // single step may add at most friction * weight-impulse of velocity:
        // 4 * (5 * 1000 / 60) / 5 = 66.67.
        space.step(PHYSICS_DT);
        let vx_before = space.body(body).unwrap().velocity.x;
        space.step(PHYSICS_DT);
        let vx_after = space.body(body).unwrap().velocity.x;
        assert!(vx_after - vx_before < 68.0);
    }

    #[test]
    fn test_elastic_bounce() {
        let (mut space, floor) = space_with_floor();
        space.shape_mut(floor).unwrap().elasticity = 1.0;
        let (body, shape) = drop_circle(&mut space, vec2(0.0, 24.0));
        space.shape_mut(shape).unwrap().elasticity = 1.0;
        space.body_mut(body).unwrap().velocity = vec2(0.0, -100.0);
        space.step(PHYSICS_DT);
        let body = space.body(body).unwrap();
        // Approach speed after gravity is 100 + 1000/60; full restitution
        // reflects it.
        assert!(approx_eq(body.velocity.y, 100.0 + 1000.0 * PHYSICS_DT));
    }

    #[test]
    fn test_same_group_shapes_do_not_collide() {
        let mut space = Space::new();
        let (body_a, shape_a) = drop_circle(&mut space, vec2(0.0, 0.0));
        let (_, shape_b) = drop_circle(&mut space, vec2(10.0, 0.0));
        space.shape_mut(shape_a).unwrap().group = 1;
        space.shape_mut(shape_b).unwrap().group = 1;
        space.step(PHYSICS_DT);
        assert_eq!(space.arbiters_for(body_a).count(), 0);
    }

    #[test]
    fn test_shapes_on_same_body_do_not_collide() {
        let mut space = Space::new();
        let body = space.add_body(Body::new(5.0, f32::INFINITY));
        space.add_shape(Shape::circle(body, 20.0, Vec2::ZERO));
        space.add_shape(Shape::circle(body, 20.0, vec2(0.0, 10.0)));
        space.step(PHYSICS_DT);
        assert_eq!(space.arbiters_for(body).count(), 0);
    }

    #[test]
    fn test_remove_body_drops_shapes_and_arbiters() {
        let (mut space, _) = space_with_floor();
        let (body, _) = drop_circle(&mut space, vec2(0.0, 24.0));
        space.step(PHYSICS_DT);
        assert_eq!(space.arbiters_for(body).count(), 1);
        let shapes_before = space.shape_count();
        space.remove_body(body);
        assert_eq!(space.shape_count(), shapes_before - 1);
        assert!(space.body(body).is_none());
        assert_eq!(space.arbiters().len(), 0);
    }
}
