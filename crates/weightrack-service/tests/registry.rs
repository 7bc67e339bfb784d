#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use proptest::prelude::*;
use weightrack_core::{TrackerError, UpdateMode};
use weightrack_service::registry::Registry;

#[test]
fn ids_are_prefix_plus_counter() {
    let reg = Registry::default();
    let (a, _) = reg.create("a", 1.0).unwrap();
    let (b, _) = reg.create("b", 2.0).unwrap();
    assert_eq!(a, "user_1");
    assert_eq!(b, "user_2");
    assert_eq!(reg.id_for(3), "user_3");
}

#[test]
fn rejected_create_does_not_store() {
    let reg = Registry::default();
    assert!(reg.create("", 70.0).is_err());
    assert!(reg.create("x", 0.0).is_err());
    assert!(reg.is_empty());
}

#[test]
fn update_reports_not_found_before_validation() {
    let reg = Registry::default();
    let err = reg.update("user_99", -1.0).unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(_)));
}

#[test]
fn update_rejects_non_positive_request() {
    let reg = Registry::default();
    let (id, _) = reg.create("x", 70.0).unwrap();
    let err = reg.update(&id, 0.0).unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    assert_eq!(reg.get(&id).unwrap().measurement, 70.0);
}

#[test]
fn infinite_measurements_are_rejected_and_leave_records_alone() {
    let reg = Registry::new("user_", UpdateMode::Replace);
    let err = reg.create("inf", f64::INFINITY).unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    assert!(reg.is_empty());

    let (id, _) = reg.create("x", 70.0).unwrap();
    let err = reg.update(&id, f64::INFINITY).unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    assert_eq!(reg.get(&id).unwrap().measurement, 70.0);

    let defective = Registry::default();
    let (id, _) = defective.create("big", f64::MAX).unwrap();
    let out = defective.update(&id, 75.0).unwrap();
    assert!(out.current.is_finite());
    assert_eq!(out.current, f64::MAX - 1.0);
}

#[test]
fn defective_and_replace_modes_differ() {
    let defective = Registry::new("user_", UpdateMode::Defective);
    let (id, _) = defective.create("Juan Pérez", 70.5).unwrap();
    let out = defective.update(&id, 75.0).unwrap();
    assert_eq!(out.previous, 70.5);
    assert_eq!(out.current, 69.5);
    assert_eq!(out.requested, 75.0);

    let fixed = Registry::new("user_", UpdateMode::Replace);
    let (id, _) = fixed.create("Juan Pérez", 70.5).unwrap();
    let out = fixed.update(&id, 75.0).unwrap();
    assert_eq!(out.current, 75.0);
    assert_eq!(fixed.get(&id).unwrap().measurement, 75.0);
}

#[test]
fn concurrent_creates_get_unique_ids() {
    let reg = Arc::new(Registry::default());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let reg = Arc::clone(&reg);
            std::thread::spawn(move || {
                (0..50)
                    .map(|i| reg.create(&format!("t{t}-{i}"), 60.0).unwrap().0)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut ids: Vec<String> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 400);
    assert_eq!(reg.len(), 400);
}

proptest! {
    #[test]
    fn prop_count_matches_creates(n in 0usize..64) {
        let reg = Registry::default();
        for i in 0..n {
            reg.create(&format!("u{i}"), 50.0 + i as f64).unwrap();
        }
        prop_assert_eq!(reg.len(), n);
    }

    #[test]
    fn prop_defective_update_is_independent_of_request(
        start in 2.0f64..300.0,
        requested in 0.01f64..300.0,
    ) {
        let reg = Registry::default();
        let (id, snap) = reg.create("p", start).unwrap();
        prop_assert_eq!(snap.measurement, start);
        let out = reg.update(&id, requested).unwrap();
        prop_assert_eq!(out.current, start - 1.0);
    }
}
