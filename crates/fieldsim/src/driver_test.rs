use nalgebra::{Point2, Vector2};

use crate::body::{AttachedForce, BodyId, BodyParams};
use crate::driver::{Driver, DriverConfig, RunStatus};
use crate::error::SimError;
use crate::simulation::Simulation;

fn pushed_simulation() -> (Simulation, BodyId) {
    let mut sim = Simulation::new();
    let id = sim.create_body(BodyParams::new("puck", 1.0)).unwrap();
    sim.body_mut(id)
        .unwrap()
        .add_attached_force(AttachedForce::constant("push", Vector2::new(1.0, 0.0)));
    (sim, id)
}

#[test]
fn test_default_config() {
    let config = DriverConfig::default();

    assert_eq!(config.substeps, 1);
    assert_eq!(config.speed, 1.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_rejects_zero_substeps() {
    let config = DriverConfig {
        substeps: 0,
        speed: 1.0,
    };
    assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    assert!(Driver::new(Simulation::new(), config).is_err());
}

#[test]
fn test_config_rejects_bad_speed() {
    for speed in [-1.0, f64::NAN, f64::INFINITY] {
        let config = DriverConfig { substeps: 1, speed };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: DriverConfig = serde_json::from_str(r#"{ "speed": 0.5 }"#).unwrap();
    assert_eq!(
        config,
        DriverConfig {
            substeps: 1,
            speed: 0.5,
        }
    );

    let config: DriverConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, DriverConfig::default());
}

#[test]
fn test_config_serializes_camel_case() {
    let config = DriverConfig {
        substeps: 8,
        speed: 2.0,
    };
    let json = serde_json::to_value(config).unwrap();

    assert_eq!(json["substeps"], 8);
    assert_eq!(json["speed"], 2.0);
}

#[test]
fn test_tick_splits_frame_into_substeps() {
    let (sim, id) = pushed_simulation();
    let config = DriverConfig {
        substeps: 4,
        speed: 1.0,
    };
    let mut driver = Driver::new(sim, config).unwrap();

    assert_eq!(driver.tick(1.0), 4);
    assert_eq!(driver.ticks(), 1);

    let sim = driver.simulation();
    assert_eq!(sim.time(), 1.0);
    assert_eq!(sim.velocity(id), Some(Vector2::new(1.0, 0.0)));
    // 0.25² * (1 + 2 + 3 + 4)
    assert_eq!(sim.position(id), Some(Point2::new(0.625, 0.0)));
}

#[test]
fn test_speed_scales_simulated_time() {
    let config = DriverConfig {
        substeps: 2,
        speed: 3.0,
    };
    let mut driver = Driver::new(Simulation::new(), config).unwrap();

    driver.tick(0.5);
    driver.tick(0.5);

    assert_eq!(driver.simulation().time(), 3.0);
}

#[test]
fn test_pause_and_resume() {
    let mut driver = Driver::new(Simulation::new(), DriverConfig::default()).unwrap();
    assert_eq!(driver.status(), RunStatus::Running);

    driver.pause();
    assert_eq!(driver.status(), RunStatus::Paused);
    assert_eq!(driver.tick(1.0), 0);
    assert_eq!(driver.simulation().time(), 0.0);

    driver.resume();
    assert_eq!(driver.status(), RunStatus::Running);
    assert_eq!(driver.tick(1.0), 1);
    assert_eq!(driver.simulation().time(), 1.0);
    assert_eq!(driver.ticks(), 1);
}

#[test]
fn test_stop_is_terminal() {
    let mut driver = Driver::new(Simulation::new(), DriverConfig::default()).unwrap();

    driver.stop();
    driver.resume();

    assert_eq!(driver.status(), RunStatus::Stopped);
    assert_eq!(driver.tick(1.0), 0);
    assert_eq!(driver.simulation().time(), 0.0);
}

#[test]
fn test_invalid_frame_time_is_ignored() {
    let mut driver = Driver::new(Simulation::new(), DriverConfig::default()).unwrap();

    assert_eq!(driver.tick(-1.0), 0);
    assert_eq!(driver.tick(f64::NAN), 0);
    assert_eq!(driver.ticks(), 0);
    assert_eq!(driver.simulation().time(), 0.0);
}

#[test]
fn test_set_config_keeps_old_on_error() {
    let mut driver = Driver::new(Simulation::new(), DriverConfig::default()).unwrap();

    let bad = DriverConfig {
        substeps: 0,
        speed: 1.0,
    };
    assert!(driver.set_config(bad).is_err());
    assert_eq!(driver.config(), DriverConfig::default());

    let good = DriverConfig {
        substeps: 10,
        speed: 1.0,
    };
    driver.set_config(good).unwrap();
    assert_eq!(driver.tick(0.1), 10);
}

#[test]
fn test_into_simulation_returns_state() {
    let (sim, id) = pushed_simulation();
    let mut driver = Driver::new(sim, DriverConfig::default()).unwrap();
    driver.tick(1.0);

    let sim = driver.into_simulation();
    assert_eq!(sim.position(id), Some(Point2::new(1.0, 0.0)));
}
