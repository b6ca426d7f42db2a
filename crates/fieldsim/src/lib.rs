//! Discrete-time 2D particle simulation under superposable force fields.
//!
//! Bodies carry mass and charge and live in a [`Registry`] together with
//! the fields acting on them: every body generates a point-source gravity
//! field, and uniform electric and magnetic fields can be added, optionally
//! limited to a [`Shape`] region. A [`Simulation`] advances everything with
//! a semi-implicit Euler step.
//!
//! ```
//! use fieldsim::body::BodyParams;
//! use fieldsim::simulation::Simulation;
//! use nalgebra::Point2;
//!
//! let mut sim = Simulation::new();
//! let a = sim.create_body(BodyParams::new("a", 1.0e10)).unwrap();
//! let b = sim
//!     .create_body(BodyParams::new("b", 1.0e10).with_position(Point2::new(10.0, 0.0)))
//!     .unwrap();
//!
//! sim.step(1.0);
//!
//! // The pair attracts
//! assert!(sim.velocity(a).unwrap().x > 0.0);
//! assert!(sim.velocity(b).unwrap().x < 0.0);
//! ```

pub mod body;
pub mod constants;
pub mod driver;
pub mod error;
pub mod fields;
pub mod integrator;
pub mod registry;
pub mod shape;
pub mod simulation;

#[cfg(test)]
mod driver_test;
#[cfg(test)]
mod registry_test;

pub use body::{AttachedForce, Body, BodyId, BodyParams};
pub use error::{Result, SimError};
pub use fields::{Field, FieldId, FieldKind, FieldSpec, FieldTag, ForceLaw, Region, Scope};
pub use registry::Registry;
pub use shape::Shape;
pub use simulation::Simulation;
