//! Simple orbital integration example
//!
//! A satellite in a circular low orbit around an Earth-mass body,
//! advanced by the tick driver with sub-stepping. Prints the orbital
//! radius and energy drift once per orbit.
//!
//! Run with: cargo run --package fieldsim --example simple_orbit

use fieldsim::body::BodyParams;
use fieldsim::constants::G;
use fieldsim::driver::{Driver, DriverConfig};
use fieldsim::simulation::Simulation;
use nalgebra::{Point2, Vector2};

fn main() -> fieldsim::Result<()> {
    println!("Field simulator: satellite orbit\n");
    println!("{}", "=".repeat(60));

    let earth_mass = 5.972e24; // kg
    let r = 7.0e6; // m
    let v_circular = (G * earth_mass / r).sqrt();
    let period = 2.0 * std::f64::consts::PI * r / v_circular;

    let mut sim = Simulation::new();
    let earth = sim.create_body(BodyParams::new("earth", earth_mass).round(6.371e6)?)?;
    let satellite = sim.create_body(
        BodyParams::new("satellite", 1_000.0)
            .with_position(Point2::new(r, 0.0))
            .with_velocity(Vector2::new(0.0, v_circular)),
    )?;

    println!("  Orbital radius: {:.0} m", r);
    println!("  Circular velocity: {:.1} m/s", v_circular);
    println!("  Period: {:.1} s", period);

    let energy = |sim: &Simulation| {
        let registry = sim.registry();
        registry.total_kinetic_energy() + registry.gravitational_potential_energy()
    };
    let initial_energy = energy(&sim);

    // 60 frames per simulated minute, 10 sub-steps per frame
    let config = DriverConfig {
        substeps: 10,
        speed: 60.0,
    };
    let mut driver = Driver::new(sim, config)?;
    let frame_dt = 1.0 / 60.0;

    let n_orbits = 3;
    let mut next_orbit_time = period;
    while driver.simulation().time() < n_orbits as f64 * period {
        driver.tick(frame_dt);

        let sim = driver.simulation();
        if sim.time() >= next_orbit_time {
            next_orbit_time += period;

            let (Some(sat), Some(center)) = (sim.position(satellite), sim.position(earth)) else {
                break;
            };
            let r_current = (sat - center).magnitude();
            let energy_error = ((energy(sim) - initial_energy) / initial_energy).abs();

            println!(
                "t={:>8.1} s: r={:.1} m, Δr={:.2e}, ΔE={:.2e}",
                sim.time(),
                r_current,
                ((r_current - r) / r).abs(),
                energy_error
            );
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Ticks: {}", driver.ticks());
    Ok(())
}
