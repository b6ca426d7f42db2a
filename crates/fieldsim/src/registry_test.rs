use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2, Vector3};

use crate::body::{BodyId, BodyParams};
use crate::constants::G;
use crate::error::SimError;
use crate::fields::{FieldId, FieldKind, FieldSpec};
use crate::registry::Registry;

fn electric(x: f64, y: f64) -> FieldSpec {
    FieldSpec::from_tag("electric", Vector3::new(x, y, 0.0)).unwrap()
}

#[test]
fn test_new_registry_is_empty() {
    let registry = Registry::new();

    assert_eq!(registry.body_count(), 0);
    assert_eq!(registry.field_count(), 0);
    assert_eq!(registry.bodies().count(), 0);
}

#[test]
fn test_body_ids_are_sequential() {
    let mut registry = Registry::new();

    let a = registry.insert_body(BodyParams::new("a", 1.0)).unwrap();
    let b = registry.insert_body(BodyParams::new("b", 1.0)).unwrap();

    assert_eq!(a, BodyId(0));
    assert_eq!(b, BodyId(1));
}

#[test]
fn test_body_and_field_ids_are_separate_namespaces() {
    let mut registry = Registry::new();

    let e = registry.insert_field("e", electric(1.0, 0.0), None);
    let a = registry.insert_body(BodyParams::new("a", 1.0)).unwrap();

    assert_eq!(e, FieldId(0));
    assert_eq!(a, BodyId(0));
    // The body's gravity field takes the next field id
    assert_eq!(registry.body(a).unwrap().gravity_field(), FieldId(1));
}

#[test]
fn test_ids_are_never_reused() {
    let mut registry = Registry::new();

    let a = registry.insert_body(BodyParams::new("a", 1.0)).unwrap();
    registry.remove_body(a).unwrap();
    let b = registry.insert_body(BodyParams::new("b", 1.0)).unwrap();

    assert_ne!(a, b);
    assert_eq!(b, BodyId(1));
    assert!(registry.body(a).is_none());

    let e = registry.insert_field("e", electric(1.0, 0.0), None);
    registry.remove_field(e).unwrap();
    let f = registry.insert_field("f", electric(1.0, 0.0), None);
    assert_ne!(e, f);
}

#[test]
fn test_insert_body_registers_gravity_field() {
    let mut registry = Registry::new();
    let id = registry.insert_body(BodyParams::new("sun", 2.0e30)).unwrap();

    let field_id = registry.body(id).unwrap().gravity_field();
    let field = registry.field(field_id).unwrap();

    assert_eq!(field.name(), "sun");
    assert!(!field.is_scoped());
    match field.kind() {
        FieldKind::Gravity(g) => {
            assert_eq!(g.source(), id);
            assert_eq!(g.source_mass(), 2.0e30);
        }
        _ => panic!("expected gravity field"),
    }
}

#[test]
fn test_insert_body_rejects_negative_mass() {
    let mut registry = Registry::new();

    let result = registry.insert_body(BodyParams::new("bad", -1.0));

    assert_eq!(result, Err(SimError::InvalidMass(-1.0)));
    assert_eq!(registry.body_count(), 0);
    assert_eq!(registry.field_count(), 0);
}

#[test]
fn test_insert_body_rejects_nan_mass() {
    let mut registry = Registry::new();
    assert!(matches!(
        registry.insert_body(BodyParams::new("bad", f64::NAN)),
        Err(SimError::InvalidMass(_))
    ));
}

#[test]
fn test_zero_mass_is_allowed() {
    let mut registry = Registry::new();
    assert!(registry.insert_body(BodyParams::new("ghost", 0.0)).is_ok());
}

#[test]
fn test_remove_body_removes_its_gravity_field() {
    let mut registry = Registry::new();
    let id = registry.insert_body(BodyParams::new("a", 1.0)).unwrap();
    let field_id = registry.body(id).unwrap().gravity_field();

    let removed = registry.remove_body(id).unwrap();

    assert_eq!(removed.id(), id);
    assert_eq!(registry.body_count(), 0);
    assert!(registry.field(field_id).is_none());
}

#[test]
fn test_remove_nonexistent_body() {
    let mut registry = Registry::new();
    assert!(registry.remove_body(BodyId(999)).is_none());
}

#[test]
fn test_remove_field_refuses_owned_gravity_field() {
    let mut registry = Registry::new();
    let id = registry.insert_body(BodyParams::new("a", 1.0)).unwrap();
    let field_id = registry.body(id).unwrap().gravity_field();

    assert!(registry.remove_field(field_id).is_none());
    assert!(registry.field(field_id).is_some());
}

#[test]
fn test_remove_standalone_field() {
    let mut registry = Registry::new();
    let id = registry.insert_field("e", electric(1.0, 0.0), None);

    let removed = registry.remove_field(id).unwrap();

    assert_eq!(removed.id(), id);
    assert_eq!(registry.field_count(), 0);
    assert!(registry.remove_field(id).is_none());
}

#[test]
fn test_lookup_by_name_returns_first_match() {
    let mut registry = Registry::new();
    let first = registry.insert_body(BodyParams::new("twin", 1.0)).unwrap();
    registry.insert_body(BodyParams::new("twin", 2.0)).unwrap();
    registry.insert_field("plate", electric(1.0, 0.0), None);

    assert_eq!(registry.body_by_name("twin").unwrap().id(), first);
    assert!(registry.body_by_name("nobody").is_none());
    assert_eq!(registry.field_by_name("plate").unwrap().name(), "plate");
    assert!(registry.field_by_name("nothing").is_none());
}

#[test]
fn test_set_mass_updates_body_and_mirror() {
    let mut registry = Registry::new();
    let id = registry.insert_body(BodyParams::new("a", 1.0)).unwrap();

    registry.set_mass(id, 42.0).unwrap();

    let body = registry.body(id).unwrap();
    assert_eq!(body.mass(), 42.0);
    match registry.field(body.gravity_field()).unwrap().kind() {
        FieldKind::Gravity(g) => assert_eq!(g.source_mass(), 42.0),
        _ => panic!("expected gravity field"),
    }
}

#[test]
fn test_set_mass_rejects_negative_and_keeps_old_value() {
    let mut registry = Registry::new();
    let id = registry.insert_body(BodyParams::new("a", 1.0)).unwrap();

    assert_eq!(registry.set_mass(id, -3.0), Err(SimError::InvalidMass(-3.0)));
    assert_eq!(registry.body(id).unwrap().mass(), 1.0);
}

#[test]
fn test_set_mass_on_missing_body() {
    let mut registry = Registry::new();
    assert_eq!(
        registry.set_mass(BodyId(7), 1.0),
        Err(SimError::BodyNotFound(BodyId(7)))
    );
}

#[test]
fn test_bodies_iterate_in_id_order() {
    let mut registry = Registry::new();
    for name in ["c", "a", "b"] {
        registry.insert_body(BodyParams::new(name, 1.0)).unwrap();
    }

    let ids: Vec<BodyId> = registry.bodies().map(|b| b.id()).collect();
    assert_eq!(ids, vec![BodyId(0), BodyId(1), BodyId(2)]);
}

#[test]
fn test_total_momentum() {
    let mut registry = Registry::new();
    registry
        .insert_body(BodyParams::new("a", 1.0).with_velocity(Vector2::new(1.0, 0.0)))
        .unwrap();
    registry
        .insert_body(BodyParams::new("b", 2.0).with_velocity(Vector2::new(0.0, 3.0)))
        .unwrap();

    assert_eq!(registry.total_momentum(), Vector2::new(1.0, 6.0));
}

#[test]
fn test_total_kinetic_energy() {
    let mut registry = Registry::new();
    registry
        .insert_body(BodyParams::new("a", 2.0).with_velocity(Vector2::new(1.0, 0.0)))
        .unwrap();
    registry
        .insert_body(BodyParams::new("b", 1.0).with_velocity(Vector2::new(0.0, 2.0)))
        .unwrap();

    // 0.5 * 2 * 1 + 0.5 * 1 * 4
    assert_eq!(registry.total_kinetic_energy(), 3.0);
}

#[test]
fn test_potential_energy_counts_each_pair_once() {
    let mut registry = Registry::new();
    registry.insert_body(BodyParams::new("a", 1.0e10)).unwrap();
    registry
        .insert_body(BodyParams::new("b", 2.0e10).with_position(Point2::new(10.0, 0.0)))
        .unwrap();

    let expected = -G * 1.0e10 * 2.0e10 / 10.0;
    assert_relative_eq!(
        registry.gravitational_potential_energy(),
        expected,
        max_relative = 1e-12
    );
}
