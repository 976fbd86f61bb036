//! Rigid bodies.

use glam::Vec2;

/// Handle to a [`Body`] owned by a [`Space`](super::space::Space).
///
/// Handles stay valid until the body is removed; operations on a removed
/// body's handle are ignored by the space (misuse is a programmer error, not
/// a recoverable condition).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) u32);

/// A rigid body: mass, moment of inertia, position, velocity and angle.
///
/// A body with infinite mass never moves under the solver (terrain). A body
/// with infinite moment never rotates; every actor in the engine uses an
/// infinite moment so sprites stay upright.
#[derive(Clone, Copy, Debug)]
pub struct Body {
    pub mass: f32,
    pub moment: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Orientation in radians. Stays fixed for infinite-moment bodies but is
    /// still mirrored into the render rotation each tick.
    pub angle: f32,
    pub angular_velocity: f32,
}

impl Body {
    /// Create a body at the origin with the given mass and moment.
    pub fn new(mass: f32, moment: f32) -> Self {
        Self {
            mass,
            moment,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
        }
    }

    /// Infinite-mass body for static geometry.
    pub fn new_static() -> Self {
        Self::new(f32::INFINITY, f32::INFINITY)
    }

    /// Inverse mass; zero for static bodies.
    pub fn inv_mass(&self) -> f32 {
        if self.mass.is_finite() {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    /// Whether the solver may move this body.
    pub fn is_dynamic(&self) -> bool {
        self.mass.is_finite()
    }

    /// Apply an instantaneous impulse at the center of mass.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse * self.inv_mass();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn test_static_body_has_zero_inv_mass() {
        let body = Body::new_static();
        assert_eq!(body.inv_mass(), 0.0);
        assert!(!body.is_dynamic());
    }

    #[test]
    fn test_dynamic_body_inv_mass() {
        let body = Body::new(5.0, f32::INFINITY);
        assert!((body.inv_mass() - 0.2).abs() < 1e-6);
        assert!(body.is_dynamic());
    }

    #[test]
    fn test_apply_impulse_scales_by_mass() {
        let mut body = Body::new(5.0, f32::INFINITY);
        body.apply_impulse(vec2(10.0, 0.0));
        assert!((body.velocity.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_apply_impulse_on_static_is_noop() {
        let mut body = Body::new_static();
        body.apply_impulse(vec2(100.0, 100.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }
}
