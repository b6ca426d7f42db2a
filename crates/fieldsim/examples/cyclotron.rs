//! Charged particle in a scoped magnetic field
//!
//! An ion crosses a circular region of uniform out-of-plane magnetic
//! field. Inside, it follows a circular arc; outside, it travels straight.
//!
//! Run with: cargo run --package fieldsim --example cyclotron

use fieldsim::body::BodyParams;
use fieldsim::fields::Region;
use fieldsim::shape::Shape;
use fieldsim::simulation::Simulation;
use nalgebra::{Point2, Vector2, Vector3};

fn main() -> fieldsim::Result<()> {
    let mut sim = Simulation::new();

    let ion = sim.create_body(
        BodyParams::new("ion", 1.0)
            .with_charge(1.0)
            .with_position(Point2::new(-20.0, 0.0))
            .with_velocity(Vector2::new(2.0, 0.0)),
    )?;

    let region = Region::new(Shape::circle(Point2::origin(), 10.0)?, Point2::origin());
    sim.create_field("magnetic", "coil", Vector3::new(0.0, 0.0, 0.5), Some(region))?;

    // Gyroradius r = m v / (q B)
    println!("Expected gyroradius: {:.2}", 1.0 * 2.0 / (1.0 * 0.5));

    let dt = 0.01;
    for step in 0..4_000 {
        sim.step(dt);

        if step % 250 == 0 {
            if let (Some(p), Some(v)) = (sim.position(ion), sim.velocity(ion)) {
                println!(
                    "t={:>5.2}: x={:>8.3}, y={:>8.3}, |v|={:.4}",
                    sim.time(),
                    p.x,
                    p.y,
                    v.magnitude()
                );
            }
        }
    }

    Ok(())
}
