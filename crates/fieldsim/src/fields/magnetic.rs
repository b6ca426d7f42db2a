//! Uniform out-of-plane magnetic field

use nalgebra::Vector2;

use crate::body::Body;
use crate::error::Result;
use crate::fields::ForceLaw;
use crate::registry::Registry;

/// A uniform magnetic field perpendicular to the simulation plane
///
/// Positive strength points out of the plane (towards the viewer),
/// negative into it. The force is the magnetic part of the Lorentz force,
/// `F = q (v × B)`, which in the plane reduces to
/// `Fx = q vy B`, `Fy = -q vx B`.
///
/// # Examples
///
/// ```
/// use fieldsim::body::BodyParams;
/// use fieldsim::fields::{ForceLaw, MagneticField};
/// use fieldsim::registry::Registry;
/// use nalgebra::Vector2;
///
/// let mut registry = Registry::new();
/// let id = registry
///     .insert_body(
///         BodyParams::new("ion", 1.0)
///             .with_charge(2.0)
///             .with_velocity(Vector2::new(3.0, 0.0)),
///     )
///     .unwrap();
///
/// let field = MagneticField::new(0.5);
/// let force = field.force_on(registry.body(id).unwrap(), &registry).unwrap();
///
/// assert_eq!(force, Vector2::new(0.0, -3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticField {
    /// Out-of-plane flux density in T
    pub strength: f64,
}

impl MagneticField {
    pub fn new(strength: f64) -> Self {
        Self { strength }
    }
}

impl ForceLaw for MagneticField {
    fn force_on(&self, body: &Body, _registry: &Registry) -> Result<Vector2<f64>> {
        let v = body.velocity();
        let qb = body.charge() * self.strength;
        Ok(Vector2::new(v.y * qb, -v.x * qb))
    }
}
