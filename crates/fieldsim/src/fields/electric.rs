//! Uniform electric field

use nalgebra::Vector2;

use crate::body::Body;
use crate::error::Result;
use crate::fields::ForceLaw;
use crate::registry::Registry;

/// A uniform electric field
///
/// The force on a body is the field vector scaled by the body's charge,
/// `F = q E`. Region gating is done by the owning [`Field`](super::Field).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectricField {
    /// Field vector in N/C
    pub strength: Vector2<f64>,
}

impl ElectricField {
    pub fn new(strength: Vector2<f64>) -> Self {
        Self { strength }
    }
}

impl ForceLaw for ElectricField {
    fn force_on(&self, body: &Body, _registry: &Registry) -> Result<Vector2<f64>> {
        Ok(self.strength * body.charge())
    }
}
