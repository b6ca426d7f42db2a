use nalgebra::{Point2, Vector2};

use crate::error::{Result, SimError};
use crate::fields::{Field, FieldId};
use crate::shape::Shape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u32);

/// Checks that a mass is usable: finite and non-negative.
///
/// A mass of exactly zero is allowed; such bodies are carried by the
/// simulation but never accelerated.
pub(crate) fn validate_mass(mass: f64) -> Result<f64> {
    if !mass.is_finite() || mass < 0.0 {
        return Err(SimError::InvalidMass(mass));
    }
    Ok(mass)
}

/// Remaining lifetimes within this fraction of a step count as used up,
/// so `n` steps of `duration / n` expire a force even when `dt` is not
/// exactly representable.
const EXPIRY_TOLERANCE: f64 = 1e-9;

/// An externally applied force, distinct from field forces.
///
/// Attached forces are summed into a body's force total every step.
/// A timed force counts down by `dt` after each step and is dropped once
/// its remaining time is used up; a force without a duration stays until
/// removed.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedForce {
    pub name: String,
    /// Force vector in N
    pub magnitude: Vector2<f64>,
    /// Remaining lifetime in s, `None` for a persistent force
    pub remaining: Option<f64>,
}

impl AttachedForce {
    /// A force that stays attached until explicitly removed
    pub fn constant(name: impl Into<String>, magnitude: Vector2<f64>) -> Self {
        Self {
            name: name.into(),
            magnitude,
            remaining: None,
        }
    }

    /// A force that acts for `duration` seconds of simulated time.
    ///
    /// A NaN, zero or negative duration is clamped to zero: the force acts
    /// for exactly one step and is then dropped. An infinite duration never
    /// expires.
    pub fn timed(name: impl Into<String>, magnitude: Vector2<f64>, duration: f64) -> Self {
        let duration = if duration > 0.0 { duration } else { 0.0 };
        Self {
            name: name.into(),
            magnitude,
            remaining: Some(duration),
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self.remaining, Some(t) if t <= 0.0)
    }
}

/// Construction parameters for a body
///
/// Only the name and mass are required; everything else defaults to zero,
/// the origin, or nothing.
///
/// # Examples
///
/// ```
/// use fieldsim::body::BodyParams;
/// use nalgebra::{Point2, Vector2};
///
/// let params = BodyParams::new("probe", 10.0)
///     .with_charge(1.0e-6)
///     .with_position(Point2::new(1.0, 2.0))
///     .with_velocity(Vector2::new(0.0, 3.0));
///
/// assert_eq!(params.mass, 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct BodyParams {
    pub name: String,
    pub description: String,
    /// Mass in kg
    pub mass: f64,
    /// Charge in C
    pub charge: f64,
    /// Position in m
    pub position: Point2<f64>,
    /// Velocity in m/s
    pub velocity: Vector2<f64>,
    pub shape: Option<Shape>,
}

impl BodyParams {
    pub fn new(name: impl Into<String>, mass: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            mass,
            charge: 0.0,
            position: Point2::origin(),
            velocity: Vector2::zeros(),
            shape: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_position(mut self, position: Point2<f64>) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vector2<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Gives the body a circular footprint of `radius`, centred on the body
    pub fn round(self, radius: f64) -> Result<Self> {
        let shape = Shape::circle(Point2::origin(), radius)?;
        Ok(self.with_shape(shape))
    }
}

/// A point mass and charge carrier tracked by the simulation
///
/// Every body owns one gravity field, registered alongside it, whose source
/// mass mirrors the body's mass and whose center is the body's live
/// position. Mass changes therefore go through the registry so the mirror
/// is updated in the same call.
#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    name: String,
    description: String,
    mass: f64,
    charge: f64,
    position: Point2<f64>,
    velocity: Vector2<f64>,
    acceleration: Vector2<f64>,
    attached_forces: Vec<AttachedForce>,
    shape: Option<Shape>,
    gravity_field: FieldId,
}

impl Body {
    pub(crate) fn new(id: BodyId, gravity_field: FieldId, params: BodyParams) -> Self {
        Self {
            id,
            name: params.name,
            description: params.description,
            mass: params.mass,
            charge: params.charge,
            position: params.position,
            velocity: params.velocity,
            acceleration: Vector2::zeros(),
            attached_forces: Vec::new(),
            shape: params.shape,
            gravity_field,
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Mass in kg
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Only the registry may call this: it also updates the gravity mirror.
    pub(crate) fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }

    /// Charge in C
    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn set_charge(&mut self, charge: f64) {
        self.charge = charge;
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn set_position(&mut self, position: Point2<f64>) {
        self.position = position;
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector2<f64>) {
        self.velocity = velocity;
    }

    /// Acceleration computed during the most recent step
    pub fn acceleration(&self) -> Vector2<f64> {
        self.acceleration
    }

    pub(crate) fn reset_acceleration(&mut self) {
        self.acceleration = Vector2::zeros();
    }

    pub(crate) fn add_acceleration(&mut self, acceleration: Vector2<f64>) {
        self.acceleration += acceleration;
    }

    /// Semi-implicit Euler update: velocity first, then position from the
    /// new velocity.
    pub(crate) fn advance(&mut self, dt: f64) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Explicit Euler update: position from the old velocity.
    pub(crate) fn advance_explicit(&mut self, dt: f64) {
        self.position += self.velocity * dt;
        self.velocity += self.acceleration * dt;
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    pub fn set_shape(&mut self, shape: Option<Shape>) {
        self.shape = shape;
    }

    /// Id of the gravity field this body generates
    pub fn gravity_field(&self) -> FieldId {
        self.gravity_field
    }

    pub fn attached_forces(&self) -> &[AttachedForce] {
        &self.attached_forces
    }

    pub fn add_attached_force(&mut self, force: AttachedForce) {
        self.attached_forces.push(force);
    }

    /// Removes the first attached force with the given name
    pub fn remove_attached_force(&mut self, name: &str) -> Option<AttachedForce> {
        self.attached_forces
            .iter()
            .position(|f| f.name == name)
            .map(|idx| self.attached_forces.remove(idx))
    }

    /// Sum of all attached forces
    pub fn attached_force_total(&self) -> Vector2<f64> {
        self.attached_forces
            .iter()
            .fold(Vector2::zeros(), |acc, f| acc + f.magnitude)
    }

    /// Counts timed forces down by `dt` and drops the expired ones
    pub(crate) fn age_attached_forces(&mut self, dt: f64) {
        for force in self.attached_forces.iter_mut() {
            if let Some(remaining) = force.remaining.as_mut() {
                *remaining -= dt;
                if *remaining <= dt.abs() * EXPIRY_TOLERANCE {
                    *remaining = 0.0;
                }
            }
        }
        self.attached_forces.retain(|f| !f.is_expired());
    }

    /// True if `field` acts at this body's current position
    pub fn is_affected_by(&self, field: &Field) -> bool {
        field.applies_at(&self.position)
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }
}
