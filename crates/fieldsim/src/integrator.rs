//! Time integration for field simulations
//!
//! One step runs in two phases, always in this order:
//!
//! 1. **Accumulate**: every body's acceleration is reset to zero, then the
//!    forces of every field that acts on the body, plus its attached
//!    forces, are summed and divided by its mass.
//! 2. **Integrate**: velocities and positions are advanced by `dt`.
//!
//! The primary integrator is [`SemiImplicitEuler`], which updates velocity
//! before using it to move the body.

use log::{trace, warn};
use nalgebra::Vector2;

use crate::body::{Body, BodyId};
use crate::fields::ForceLaw;
use crate::registry::Registry;

/// A time integrator for field simulations
///
/// Integrators only ever advance by the `dt` they are given. Callers that
/// want sub-stepping call `step(dt / n)` `n` times.
pub trait Integrator: Send + Sync {
    /// Advance every body in the registry by one timestep
    ///
    /// # Arguments
    ///
    /// * `registry` - Bodies and fields (bodies modified in place)
    /// * `dt` - Timestep in s
    fn step(&self, registry: &mut Registry, dt: f64);
}

/// Net force on `body` from every field acting on it and its attached forces
///
/// A field whose law cannot be evaluated for this body (a gravity source
/// sitting exactly on the body) is skipped.
pub fn net_force(body: &Body, registry: &Registry) -> Vector2<f64> {
    registry
        .fields()
        .filter(|field| body.is_affected_by(field))
        .fold(body.attached_force_total(), |acc, field| {
            match field.force_on(body, registry) {
                Ok(force) => acc + force,
                Err(err) => {
                    warn!("skipping field {:?} on body {:?}: {err}", field.id(), body.id());
                    acc
                }
            }
        })
}

/// Accumulation phase: recompute every body's acceleration from scratch
///
/// Bodies with zero mass keep a zero acceleration.
pub fn accumulate(registry: &mut Registry) {
    // Forces are computed against the unmodified state, then applied
    let forces: Vec<(BodyId, Vector2<f64>)> = registry
        .bodies()
        .filter(|body| body.mass() > 0.0)
        .map(|body| (body.id(), net_force(body, registry)))
        .collect();

    registry
        .bodies_mut()
        .for_each(|body| body.reset_acceleration());

    for (id, force) in forces {
        if let Some(body) = registry.body_mut(id) {
            let mass = body.mass();
            body.add_acceleration(force / mass);
        }
    }
}

/// Semi-implicit (symplectic) Euler integrator
///
/// ```text
/// v(t + dt) = v(t) + a(t) dt
/// x(t + dt) = x(t) + v(t + dt) dt
/// ```
///
/// Using the updated velocity for the position keeps energy bounded over
/// long runs, unlike explicit Euler. Timed attached forces are counted down
/// by `dt` after the bodies move.
///
/// # Examples
///
/// ```
/// use fieldsim::body::{AttachedForce, BodyParams};
/// use fieldsim::integrator::{Integrator, SemiImplicitEuler};
/// use fieldsim::registry::Registry;
/// use nalgebra::{Point2, Vector2};
///
/// let mut registry = Registry::new();
/// let id = registry.insert_body(BodyParams::new("puck", 1.0)).unwrap();
/// registry
///     .body_mut(id)
///     .unwrap()
///     .add_attached_force(AttachedForce::constant("push", Vector2::new(0.0, 10.0)));
///
/// SemiImplicitEuler.step(&mut registry, 1.0);
///
/// let puck = registry.body(id).unwrap();
/// assert_eq!(puck.velocity(), Vector2::new(0.0, 10.0));
/// assert_eq!(puck.position(), Point2::new(0.0, 10.0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(&self, registry: &mut Registry, dt: f64) {
        trace!(
            "step dt={dt}: {} bodies, {} fields",
            registry.body_count(),
            registry.field_count()
        );

        accumulate(registry);

        registry.bodies_mut().for_each(|body| {
            body.advance(dt);
            body.age_attached_forces(dt);
        });
    }
}

/// Simple explicit Euler integrator (1st order, for comparison only)
///
/// Moves each body with its old velocity before updating the velocity.
/// It drifts in energy and is kept only to contrast with
/// [`SemiImplicitEuler`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn step(&self, registry: &mut Registry, dt: f64) {
        accumulate(registry);

        registry.bodies_mut().for_each(|body| {
            body.advance_explicit(dt);
            body.age_attached_forces(dt);
        });
    }
}
