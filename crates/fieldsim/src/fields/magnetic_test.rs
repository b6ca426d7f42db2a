use nalgebra::{Point2, Vector2, Vector3};

use crate::body::BodyParams;
use crate::fields::{FieldSpec, ForceLaw, MagneticField, Region};
use crate::registry::Registry;
use crate::shape::Shape;

#[test]
fn test_body_at_rest_feels_nothing() {
    let mut registry = Registry::new();
    let id = registry
        .insert_body(BodyParams::new("ion", 1.0).with_charge(1.0))
        .unwrap();

    let field = MagneticField::new(10.0);
    let force = field.force_on(registry.body(id).unwrap(), &registry).unwrap();

    assert_eq!(force.magnitude(), 0.0);
}

#[test]
fn test_lorentz_direction() {
    let mut registry = Registry::new();
    let id = registry
        .insert_body(
            BodyParams::new("ion", 1.0)
                .with_charge(1.0)
                .with_velocity(Vector2::new(0.0, 2.0)),
        )
        .unwrap();

    // v = +y, B = +z: v × B = +x
    let field = MagneticField::new(3.0);
    let force = field.force_on(registry.body(id).unwrap(), &registry).unwrap();

    assert_eq!(force, Vector2::new(6.0, 0.0));
}

#[test]
fn test_force_is_perpendicular_to_velocity() {
    let mut registry = Registry::new();
    let velocity = Vector2::new(3.0, -4.0);
    let id = registry
        .insert_body(
            BodyParams::new("ion", 1.0)
                .with_charge(-2.5)
                .with_velocity(velocity),
        )
        .unwrap();

    let field = MagneticField::new(0.7);
    let force = field.force_on(registry.body(id).unwrap(), &registry).unwrap();

    assert!(force.dot(&velocity).abs() < 1e-12);
    assert!((force.magnitude() - 2.5 * 0.7 * 5.0).abs() < 1e-12);
}

#[test]
fn test_field_reads_out_of_plane_component() {
    let mut registry = Registry::new();
    let id = registry
        .insert_body(
            BodyParams::new("ion", 1.0)
                .with_charge(1.0)
                .with_velocity(Vector2::new(1.0, 0.0)),
        )
        .unwrap();

    // x and y components are ignored for magnetic fields
    let field_id = registry.insert_field(
        "coil",
        FieldSpec::from_tag("magnetic", Vector3::new(9.0, 9.0, 2.0)).unwrap(),
        None,
    );

    let field = registry.field(field_id).unwrap();
    let force = field.force_on(registry.body(id).unwrap(), &registry).unwrap();
    assert_eq!(force, Vector2::new(0.0, -2.0));
}

#[test]
fn test_scoped_magnetic_field_gates_force() {
    let mut registry = Registry::new();
    let id = registry
        .insert_body(
            BodyParams::new("ion", 1.0)
                .with_charge(1.0)
                .with_velocity(Vector2::new(1.0, 0.0))
                .with_position(Point2::new(5.0, 0.0)),
        )
        .unwrap();

    let field_id = registry.insert_field(
        "coil",
        FieldSpec::from_tag("magnetic", Vector3::new(0.0, 0.0, 1.0)).unwrap(),
        Some(Region::at_origin(
            Shape::circle(Point2::origin(), 1.0).unwrap(),
        )),
    );

    let field = registry.field(field_id).unwrap();
    let force = field.force_on(registry.body(id).unwrap(), &registry).unwrap();
    assert_eq!(force, Vector2::zeros());
}
