//! Record update semantics: the shipped (defective) behavior and the fixed one.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use proptest::prelude::*;
use weightrack_core::{Record, Status, TrackerError, UpdateMode};

fn sample() -> Record {
    Record::new("Test User", 70.0).unwrap()
}

#[test]
fn new_keeps_name_and_measurement() {
    let r = sample();
    assert_eq!(r.name(), "Test User");
    assert_eq!(r.measurement(), 70.0);
}

#[test]
fn update_subtracts_one_instead_of_assigning() {
    let mut r = sample();
    r.update(80.0);
    assert_eq!(r.measurement(), 69.0);
    assert_ne!(r.measurement(), 80.0);
}

#[test]
fn replace_assigns_requested_value() {
    let mut r = sample();
    r.replace(75.0);
    assert_eq!(r.measurement(), 75.0);
}

#[test]
fn apply_follows_mode() {
    let mut defective = sample();
    defective.apply(75.0, UpdateMode::Defective);
    assert_eq!(defective.measurement(), 69.0);

    let mut fixed = sample();
    fixed.apply(75.0, UpdateMode::Replace);
    assert_eq!(fixed.measurement(), 75.0);
}

#[test]
fn juan_perez_walkthrough() {
    let mut r = Record::new("Juan Pérez", 70.5).unwrap();
    r.update(75.0);
    assert_eq!(r.measurement(), 69.5);
    r.update(80.0);
    assert_eq!(r.measurement(), 68.5);
}

#[test]
fn rejects_blank_name() {
    for name in ["", "   ", "\t\n"] {
        let err = Record::new(name, 70.0).expect_err("blank name must fail");
        assert!(matches!(err, TrackerError::Validation(_)));
        assert_eq!(err.status(), Status::BadRequest);
    }
}

#[test]
fn rejects_non_positive_or_nan_measurement() {
    for m in [0.0, -0.0, -5.0, f64::NAN] {
        let err = Record::new("x", m).expect_err("bad measurement must fail");
        assert_eq!(err.status().code(), 400);
    }
}

#[test]
fn rejects_infinite_measurement() {
    for m in [f64::INFINITY, f64::NEG_INFINITY] {
        let err = Record::new("x", m).expect_err("infinite measurement must fail");
        assert!(matches!(err, TrackerError::Validation(_)));
    }
    assert!(weightrack_core::validate_measurement(f64::INFINITY).is_err());
    assert!(weightrack_core::validate_measurement(f64::MAX).is_ok());
}

#[test]
fn proposed_matches_apply_without_mutating() {
    let r = sample();
    assert_eq!(r.proposed(75.0, UpdateMode::Defective), 69.0);
    assert_eq!(r.proposed(75.0, UpdateMode::Replace), 75.0);
    assert_eq!(r.measurement(), 70.0);
}

#[test]
fn internal_message_is_generic() {
    let err = TrackerError::Internal("lock poisoned at shard 3".into());
    assert_eq!(err.status().code(), 500);
    assert_eq!(err.public_message(), "internal server error");
}

proptest! {
    #[test]
    fn prop_update_ignores_requested(
        start in 1.0f64..500.0,
        requested in 0.001f64..1000.0,
    ) {
        let mut r = Record::new("p", start).unwrap();
        r.update(requested);
        prop_assert_eq!(r.measurement(), start - 1.0);
    }

    #[test]
    fn prop_new_preserves_measurement(
        name in "[A-Za-z][A-Za-z ]{0,20}",
        m in 0.001f64..1000.0,
    ) {
        let r = Record::new(name.clone(), m).unwrap();
        prop_assert_eq!(r.name(), name.as_str());
        prop_assert_eq!(r.measurement(), m);
    }
}
