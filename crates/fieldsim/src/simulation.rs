use log::debug;
use nalgebra::{Point2, Vector2, Vector3};

use crate::body::{Body, BodyId, BodyParams};
use crate::error::Result;
use crate::fields::{Field, FieldId, FieldSpec, Region};
use crate::integrator::{Integrator, SemiImplicitEuler};
use crate::registry::Registry;

/// A simulation context: one registry plus the integrator that advances it
///
/// This is the whole surface a scheduler or renderer needs: create and
/// remove bodies and fields, call [`Simulation::step`] once per sub-step,
/// and read body state back between steps.
///
/// # Examples
///
/// ```
/// use fieldsim::body::BodyParams;
/// use fieldsim::simulation::Simulation;
/// use nalgebra::{Point2, Vector3};
///
/// let mut sim = Simulation::new();
/// let ion = sim
///     .create_body(BodyParams::new("ion", 1.0).with_charge(1.0))
///     .unwrap();
/// sim.create_field("electric", "plate", Vector3::new(2.0, 0.0, 0.0), None)
///     .unwrap();
///
/// sim.step(1.0);
///
/// assert_eq!(sim.position(ion), Some(Point2::new(2.0, 0.0)));
/// assert_eq!(sim.time(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<I: Integrator = SemiImplicitEuler> {
    registry: Registry,
    integrator: I,
    time: f64,
}

impl Simulation<SemiImplicitEuler> {
    pub fn new() -> Self {
        Self::with_integrator(SemiImplicitEuler)
    }
}

impl Default for Simulation<SemiImplicitEuler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Integrator> Simulation<I> {
    pub fn with_integrator(integrator: I) -> Self {
        Self {
            registry: Registry::new(),
            integrator,
            time: 0.0,
        }
    }

    /// Creates and registers a body, along with the gravity field it generates
    pub fn create_body(&mut self, params: BodyParams) -> Result<BodyId> {
        self.registry.insert_body(params)
    }

    /// Removes a body and its gravity field; false if it was not registered
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        self.registry.remove_body(id).is_some()
    }

    /// Removes the first body with the given name
    pub fn remove_body_by_name(&mut self, name: &str) -> bool {
        match self.registry.body_by_name(name).map(Body::id) {
            Some(id) => self.remove_body(id),
            None => false,
        }
    }

    /// Creates a field from a kind tag
    ///
    /// # Arguments
    ///
    /// * `kind` - `"electric"` or `"magnetic"`
    /// * `name` - Field name
    /// * `magnitude` - (x, y, out-of-plane); electric fields use x and y,
    ///   magnetic fields use the out-of-plane component
    /// * `region` - Region of effect, or `None` to act everywhere
    ///
    /// # Returns
    ///
    /// The new field's id, or [`SimError::UnknownFieldKind`](crate::error::SimError)
    /// for any other tag
    pub fn create_field(
        &mut self,
        kind: &str,
        name: impl Into<String>,
        magnitude: Vector3<f64>,
        region: Option<Region>,
    ) -> Result<FieldId> {
        let spec = FieldSpec::from_tag(kind, magnitude)?;
        Ok(self.add_field(name, spec, region))
    }

    /// Registers a field from an already-typed spec
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        spec: FieldSpec,
        region: Option<Region>,
    ) -> FieldId {
        self.registry.insert_field(name, spec, region)
    }

    /// Removes a field; false if it was not registered or is a gravity
    /// field still owned by a body
    pub fn remove_field(&mut self, id: FieldId) -> bool {
        self.registry.remove_field(id).is_some()
    }

    /// Removes the first field with the given name that is not a live
    /// body's gravity field
    pub fn remove_field_by_name(&mut self, name: &str) -> bool {
        match self.registry.removable_field_by_name(name).map(Field::id) {
            Some(id) => self.remove_field(id),
            None => false,
        }
    }

    /// Advances the simulation by `dt` seconds
    ///
    /// Never fails: zero-mass bodies and coincident gravity pairs are
    /// skipped rather than aborting the step.
    pub fn step(&mut self, dt: f64) {
        self.integrator.step(&mut self.registry, dt);
        self.time += dt;
    }

    /// Total simulated time in s
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable registry access for setters; never call this from inside a step
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn integrator(&self) -> &I {
        &self.integrator
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.registry.body(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.registry.body_mut(id)
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.registry.field(id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.registry.field_mut(id)
    }

    /// Sets a body's mass, keeping its gravity field in step
    pub fn set_mass(&mut self, id: BodyId, mass: f64) -> Result<()> {
        self.registry.set_mass(id, mass)?;
        debug!("body {:?} mass set to {mass}", id);
        Ok(())
    }

    pub fn position(&self, id: BodyId) -> Option<Point2<f64>> {
        self.body(id).map(Body::position)
    }

    pub fn velocity(&self, id: BodyId) -> Option<Vector2<f64>> {
        self.body(id).map(Body::velocity)
    }

    pub fn acceleration(&self, id: BodyId) -> Option<Vector2<f64>> {
        self.body(id).map(Body::acceleration)
    }

    pub fn mass(&self, id: BodyId) -> Option<f64> {
        self.body(id).map(Body::mass)
    }

    pub fn charge(&self, id: BodyId) -> Option<f64> {
        self.body(id).map(Body::charge)
    }
}
