//! Error types for fieldsim.

use thiserror::Error;

use crate::body::BodyId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid mass: {0} (mass must be finite and non-negative)")]
    InvalidMass(f64),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unknown field kind: {0}")]
    UnknownFieldKind(String),

    #[error("Degenerate geometry: body {body:?} sits on the gravity source of body {emitter:?}")]
    DegenerateGeometry { body: BodyId, emitter: BodyId },

    #[error("Body not found: {0:?}")]
    BodyNotFound(BodyId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
