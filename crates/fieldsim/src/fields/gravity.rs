//! Newtonian point-source gravity generated by a body

use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};
use crate::constants::G;
use crate::error::{Result, SimError};
use crate::fields::ForceLaw;
use crate::registry::Registry;

/// The gravity field a body generates
///
/// The field holds its source body's id, not a copy of its position:
/// every evaluation reads the source's current position from the
/// registry. The source mass is a mirror that the registry updates
/// whenever the body's mass changes.
///
/// # Examples
///
/// ```
/// use fieldsim::body::BodyParams;
/// use fieldsim::fields::ForceLaw;
/// use fieldsim::registry::Registry;
/// use nalgebra::Point2;
///
/// let mut registry = Registry::new();
/// let sun = registry.insert_body(BodyParams::new("sun", 1.0e10)).unwrap();
/// let probe = registry
///     .insert_body(BodyParams::new("probe", 1.0).with_position(Point2::new(10.0, 0.0)))
///     .unwrap();
///
/// let field = registry.field(registry.body(sun).unwrap().gravity_field()).unwrap();
/// let force = field.force_on(registry.body(probe).unwrap(), &registry).unwrap();
///
/// // Attractive: points back toward the sun
/// assert!(force.x < 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GravityField {
    source: BodyId,
    source_mass: f64,
}

impl GravityField {
    pub(crate) fn new(source: BodyId, source_mass: f64) -> Self {
        Self {
            source,
            source_mass,
        }
    }

    /// The body generating this field
    pub fn source(&self) -> BodyId {
        self.source
    }

    /// Source mass in kg, kept equal to the source body's mass
    pub fn source_mass(&self) -> f64 {
        self.source_mass
    }

    pub(crate) fn set_source_mass(&mut self, mass: f64) {
        self.source_mass = mass;
    }

    /// Current center of the field, i.e. the source body's position
    pub fn center(&self, registry: &Registry) -> Option<Point2<f64>> {
        registry.body(self.source).map(Body::position)
    }

    /// Potential energy of `body` in this field in J.
    ///
    /// Zero for the source itself and for coincident positions.
    pub fn potential_energy(&self, body: &Body, registry: &Registry) -> f64 {
        match self.center(registry) {
            Some(center) if body.id() != self.source => {
                let r = (body.position() - center).magnitude();
                if r > 0.0 {
                    -G * self.source_mass * body.mass() / r
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }
}

impl ForceLaw for GravityField {
    fn force_on(&self, body: &Body, registry: &Registry) -> Result<Vector2<f64>> {
        if body.id() == self.source {
            return Ok(Vector2::zeros());
        }
        let Some(center) = self.center(registry) else {
            return Ok(Vector2::zeros());
        };

        let d = body.position() - center;
        let r2 = d.magnitude_squared();
        if r2 == 0.0 {
            return Err(SimError::DegenerateGeometry {
                body: body.id(),
                emitter: self.source,
            });
        }
        let r = r2.sqrt();

        // F = G M m / r², directed along -d/r
        Ok(-d * (G * self.source_mass * body.mass() / (r2 * r)))
    }
}
