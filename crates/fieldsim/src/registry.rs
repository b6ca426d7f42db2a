use std::collections::BTreeMap;

use log::{debug, warn};
use nalgebra::Vector2;

use crate::body::{validate_mass, Body, BodyId, BodyParams};
use crate::constants::G;
use crate::error::{Result, SimError};
use crate::fields::{Field, FieldId, FieldKind, FieldSpec, GravityField, Region};

/// Canonical collection of bodies and fields
///
/// Ids come from two independent monotonic counters and are never reused,
/// even after removal. Both maps are ordered by id, which fixes the order
/// in which forces are summed.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    bodies: BTreeMap<BodyId, Body>,
    fields: BTreeMap<FieldId, Field>,
    next_body_id: u32,
    next_field_id: u32,
}

impl Registry {
    /// Creates an empty registry
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldsim::registry::Registry;
    ///
    /// let registry = Registry::new();
    /// assert_eq!(registry.body_count(), 0);
    /// assert_eq!(registry.field_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_body_id);
        self.next_body_id += 1;
        id
    }

    fn allocate_field_id(&mut self) -> FieldId {
        let id = FieldId(self.next_field_id);
        self.next_field_id += 1;
        id
    }

    /// Registers a new body together with the gravity field it generates
    ///
    /// # Arguments
    ///
    /// * `params` - Construction parameters; the mass must be finite and
    ///   non-negative
    ///
    /// # Returns
    ///
    /// The new body's id, or [`SimError::InvalidMass`]
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldsim::body::BodyParams;
    /// use fieldsim::registry::Registry;
    ///
    /// let mut registry = Registry::new();
    /// let id = registry.insert_body(BodyParams::new("earth", 5.97e24)).unwrap();
    ///
    /// assert_eq!(registry.body_count(), 1);
    /// // The body's gravity field is registered alongside it
    /// assert_eq!(registry.field_count(), 1);
    ///
    /// assert!(registry.insert_body(BodyParams::new("bad", -1.0)).is_err());
    /// ```
    pub fn insert_body(&mut self, params: BodyParams) -> Result<BodyId> {
        let mass = validate_mass(params.mass)?;

        let id = self.allocate_body_id();
        let field_id = self.allocate_field_id();
        let gravity = Field::new(
            field_id,
            params.name.clone(),
            FieldKind::Gravity(GravityField::new(id, mass)),
            None,
        );

        debug!(
            "registered body {:?} '{}' (mass {mass}) with gravity field {:?}",
            id, params.name, field_id
        );
        self.fields.insert(field_id, gravity);
        self.bodies.insert(id, Body::new(id, field_id, params));

        Ok(id)
    }

    /// Removes a body and the gravity field it generates
    ///
    /// The id is retired; the next body still gets a fresh one.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let body = self.bodies.remove(&id)?;
        self.fields.remove(&body.gravity_field());
        debug!("removed body {:?} '{}'", id, body.name());
        Some(body)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    /// First body, in id order, with the given name
    pub fn body_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.values().find(|b| b.name() == name)
    }

    /// All bodies in id order
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    pub(crate) fn bodies_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.values_mut()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Changes a body's mass and its gravity field's source mass together
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldsim::body::BodyParams;
    /// use fieldsim::fields::FieldKind;
    /// use fieldsim::registry::Registry;
    ///
    /// let mut registry = Registry::new();
    /// let id = registry.insert_body(BodyParams::new("rock", 1.0)).unwrap();
    /// registry.set_mass(id, 4.0).unwrap();
    ///
    /// let body = registry.body(id).unwrap();
    /// assert_eq!(body.mass(), 4.0);
    /// match registry.field(body.gravity_field()).unwrap().kind() {
    ///     FieldKind::Gravity(g) => assert_eq!(g.source_mass(), 4.0),
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn set_mass(&mut self, id: BodyId, mass: f64) -> Result<()> {
        let mass = validate_mass(mass)?;
        let body = self.bodies.get_mut(&id).ok_or(SimError::BodyNotFound(id))?;
        body.set_mass(mass);

        if let Some(FieldKind::Gravity(gravity)) = self
            .fields
            .get_mut(&body.gravity_field())
            .map(Field::kind_mut)
        {
            gravity.set_source_mass(mass);
        }

        Ok(())
    }

    /// Registers a standalone field
    ///
    /// A field without a region applies everywhere.
    pub fn insert_field(
        &mut self,
        name: impl Into<String>,
        spec: FieldSpec,
        region: Option<Region>,
    ) -> FieldId {
        let id = self.allocate_field_id();
        let field = Field::new(id, name, spec.into(), region);
        debug!(
            "registered {} field {:?} '{}' (scoped: {})",
            field.tag(),
            id,
            field.name(),
            field.is_scoped()
        );
        self.fields.insert(id, field);
        id
    }

    /// Removes a field by id
    ///
    /// A gravity field belongs to its body and goes away with it; asking to
    /// remove one while its body is still registered returns `None` and
    /// leaves it in place.
    pub fn remove_field(&mut self, id: FieldId) -> Option<Field> {
        if let Some(owner) = self.fields.get(&id).and_then(|f| self.owner_of(f)) {
            warn!(
                "refusing to remove gravity field {:?}: owned by body {:?}",
                id, owner
            );
            return None;
        }

        let field = self.fields.remove(&id)?;
        debug!("removed field {:?} '{}'", id, field.name());
        Some(field)
    }

    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(&id)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.get_mut(&id)
    }

    /// First field, in id order, with the given name
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.values().find(|f| f.name() == name)
    }

    /// First field named `name` that `remove_field` would accept, skipping
    /// gravity fields of live bodies
    pub fn removable_field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields
            .values()
            .find(|f| f.name() == name && self.owner_of(f).is_none())
    }

    /// The live body generating `field`, if it is a body's gravity field
    fn owner_of(&self, field: &Field) -> Option<BodyId> {
        match field.kind() {
            FieldKind::Gravity(gravity) if self.bodies.contains_key(&gravity.source()) => {
                Some(gravity.source())
            }
            _ => None,
        }
    }

    /// All fields in id order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Total momentum of all bodies in kg m/s
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies()
            .map(Body::momentum)
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    /// Total kinetic energy of all bodies in J
    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies().map(Body::kinetic_energy).sum()
    }

    /// Gravitational potential energy of the system in J
    ///
    /// Each pair is counted once; coincident pairs contribute nothing.
    pub fn gravitational_potential_energy(&self) -> f64 {
        let bodies: Vec<&Body> = self.bodies().collect();
        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                bodies[i + 1..].iter().map(move |b| {
                    let r = a.distance_to(b);
                    if r > 0.0 {
                        -G * a.mass() * b.mass() / r
                    } else {
                        0.0
                    }
                })
            })
            .sum()
    }
}
