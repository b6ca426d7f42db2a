//! Force fields acting on bodies
//!
//! A [`Field`] pairs an identity and an optional region of effect with one
//! of the closed set of [`FieldKind`]s. Each kind implements [`ForceLaw`];
//! `Field` itself also implements it, adding the region gate in front of
//! the kind's law.

use std::fmt;
use std::str::FromStr;

use nalgebra::{Point2, Vector2, Vector3};

use crate::body::Body;
use crate::error::{Result, SimError};
use crate::registry::Registry;
use crate::shape::Shape;

pub mod electric;
pub mod gravity;
pub mod magnetic;

#[cfg(test)]
mod magnetic_test;

pub use electric::ElectricField;
pub use gravity::GravityField;
pub use magnetic::MagneticField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(pub u32);

/// A force law: the force a field exerts on one body
///
/// Implementations are pure functions of the body and the registry
/// contents; they never mutate either.
pub trait ForceLaw {
    /// Force on `body` in N.
    ///
    /// Returns the zero vector when the law does not apply to the body.
    fn force_on(&self, body: &Body, registry: &Registry) -> Result<Vector2<f64>>;
}

/// The region a scoped field acts in: a shape template placed at an anchor
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub shape: Shape,
    pub anchor: Point2<f64>,
}

impl Region {
    pub fn new(shape: Shape, anchor: Point2<f64>) -> Self {
        Self { shape, anchor }
    }

    /// Region with the shape left at the origin
    pub fn at_origin(shape: Shape) -> Self {
        Self::new(shape, Point2::origin())
    }

    pub fn contains(&self, point: &Point2<f64>) -> bool {
        self.shape.contains(point, &self.anchor)
    }
}

/// Whether a field acts everywhere or only inside a region
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    Unscoped,
    Scoped(Region),
}

impl Scope {
    fn from_region(region: Option<Region>) -> Self {
        region.map_or(Scope::Unscoped, Scope::Scoped)
    }
}

/// Tag naming a field kind, parsed from `"gravity"`, `"electric"` or
/// `"magnetic"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTag {
    Gravity,
    Electric,
    Magnetic,
}

impl FromStr for FieldTag {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gravity" => Ok(FieldTag::Gravity),
            "electric" => Ok(FieldTag::Electric),
            "magnetic" => Ok(FieldTag::Magnetic),
            _ => Err(SimError::UnknownFieldKind(s.to_string())),
        }
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldTag::Gravity => "gravity",
            FieldTag::Electric => "electric",
            FieldTag::Magnetic => "magnetic",
        };
        f.write_str(name)
    }
}

/// The field variants, each carrying its own parameters
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Gravity(GravityField),
    Electric(ElectricField),
    Magnetic(MagneticField),
}

impl FieldKind {
    pub fn tag(&self) -> FieldTag {
        match self {
            FieldKind::Gravity(_) => FieldTag::Gravity,
            FieldKind::Electric(_) => FieldTag::Electric,
            FieldKind::Magnetic(_) => FieldTag::Magnetic,
        }
    }
}

/// A field that can be created on its own.
///
/// Gravity fields are absent: each body generates its own.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    Electric(ElectricField),
    Magnetic(MagneticField),
}

impl FieldSpec {
    /// Builds a spec from a kind tag and a three-component magnitude.
    ///
    /// Electric fields read the x and y components; magnetic fields read
    /// the out-of-plane z component. Any other tag, including `"gravity"`,
    /// is rejected with [`SimError::UnknownFieldKind`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldsim::fields::FieldSpec;
    /// use nalgebra::Vector3;
    ///
    /// let spec = FieldSpec::from_tag("electric", Vector3::new(100.0, 0.0, 0.0)).unwrap();
    /// assert!(matches!(spec, FieldSpec::Electric(_)));
    ///
    /// assert!(FieldSpec::from_tag("gravity", Vector3::zeros()).is_err());
    /// assert!(FieldSpec::from_tag("strong-nuclear", Vector3::zeros()).is_err());
    /// ```
    pub fn from_tag(tag: &str, magnitude: Vector3<f64>) -> Result<Self> {
        match tag.parse::<FieldTag>()? {
            FieldTag::Electric => Ok(FieldSpec::Electric(ElectricField::new(magnitude.xy()))),
            FieldTag::Magnetic => Ok(FieldSpec::Magnetic(MagneticField::new(magnitude.z))),
            FieldTag::Gravity => Err(SimError::UnknownFieldKind(format!(
                "{tag} (gravity fields are generated by bodies)"
            ))),
        }
    }
}

impl From<FieldSpec> for FieldKind {
    fn from(spec: FieldSpec) -> Self {
        match spec {
            FieldSpec::Electric(e) => FieldKind::Electric(e),
            FieldSpec::Magnetic(m) => FieldKind::Magnetic(m),
        }
    }
}

/// A registered source of force
///
/// The id and kind are fixed for the field's lifetime; magnitude and
/// region can be changed freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    id: FieldId,
    name: String,
    scope: Scope,
    kind: FieldKind,
}

impl Field {
    pub(crate) fn new(
        id: FieldId,
        name: impl Into<String>,
        kind: FieldKind,
        region: Option<Region>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            scope: Scope::from_region(region),
            kind,
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut FieldKind {
        &mut self.kind
    }

    pub fn tag(&self) -> FieldTag {
        self.kind.tag()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn is_scoped(&self) -> bool {
        matches!(self.scope, Scope::Scoped(_))
    }

    pub fn region(&self) -> Option<&Region> {
        match &self.scope {
            Scope::Scoped(region) => Some(region),
            Scope::Unscoped => None,
        }
    }

    /// Scopes the field to `region`, or lifts the scope with `None`.
    ///
    /// Gravity fields are always unscoped; the call is ignored for them.
    pub fn set_region(&mut self, region: Option<Region>) {
        if let FieldKind::Gravity(_) = self.kind {
            return;
        }
        self.scope = Scope::from_region(region);
    }

    /// Moves the region's anchor; no effect on an unscoped field
    pub fn set_anchor(&mut self, anchor: Point2<f64>) {
        if let Scope::Scoped(region) = &mut self.scope {
            region.anchor = anchor;
        }
    }

    /// Field magnitude as (x, y, out-of-plane).
    ///
    /// Gravity fields have no intrinsic magnitude and report zero.
    pub fn magnitude(&self) -> Vector3<f64> {
        match &self.kind {
            FieldKind::Gravity(_) => Vector3::zeros(),
            FieldKind::Electric(e) => Vector3::new(e.strength.x, e.strength.y, 0.0),
            FieldKind::Magnetic(m) => Vector3::new(0.0, 0.0, m.strength),
        }
    }

    /// Replaces the magnitude, reading the components the kind uses.
    ///
    /// Ignored for gravity fields, whose strength follows the source mass.
    pub fn set_magnitude(&mut self, magnitude: Vector3<f64>) {
        match &mut self.kind {
            FieldKind::Gravity(_) => {}
            FieldKind::Electric(e) => e.strength = magnitude.xy(),
            FieldKind::Magnetic(m) => m.strength = magnitude.z,
        }
    }

    /// True if the field acts at `point`
    pub fn applies_at(&self, point: &Point2<f64>) -> bool {
        match &self.scope {
            Scope::Unscoped => true,
            Scope::Scoped(region) => region.contains(point),
        }
    }
}

impl ForceLaw for Field {
    fn force_on(&self, body: &Body, registry: &Registry) -> Result<Vector2<f64>> {
        if !body.is_affected_by(self) {
            return Ok(Vector2::zeros());
        }

        match &self.kind {
            FieldKind::Gravity(g) => g.force_on(body, registry),
            FieldKind::Electric(e) => e.force_on(body, registry),
            FieldKind::Magnetic(m) => m.force_on(body, registry),
        }
    }
}
