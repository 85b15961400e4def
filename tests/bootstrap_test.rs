// ABOUTME: Integration tests for seeding progression state from existing day routines
// ABOUTME: Checks stage detection per tier, first-day-wins keys, and manual input fallbacks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::collections::BTreeMap;

use gzclp_sync::models::{
    Day, MainLift, ProgressionKey, Routine, RoutineExercise, RoutineSet, SetType, Stage, Tier,
};
use gzclp_sync::progression::bootstrap_from_routines;
use helpers::{
    key, prescribed, program, routine, BENCH_TPL, DEADLIFT_TPL, LAT_TPL, OHP_TPL, SQUAT_TPL,
};

fn routines() -> BTreeMap<Day, Routine> {
    let mut routines = BTreeMap::new();
    routines.insert(
        Day::A1,
        routine(
            "r-a1",
            "A1",
            vec![
                prescribed(SQUAT_TPL, 100.0, 5, 3),
                prescribed(BENCH_TPL, 45.0, 3, 10),
                prescribed(LAT_TPL, 40.0, 3, 15),
            ],
        ),
    );
    routines.insert(
        Day::B1,
        routine(
            "r-b1",
            "B1",
            vec![
                prescribed(OHP_TPL, 40.0, 6, 2),
                prescribed(DEADLIFT_TPL, 85.0, 3, 8),
            ],
        ),
    );
    routines.insert(
        Day::A2,
        routine(
            "r-a2",
            "A2",
            vec![
                prescribed(BENCH_TPL, 60.0, 4, 4),
                prescribed(SQUAT_TPL, 70.0, 3, 6),
                prescribed(LAT_TPL, 42.5, 3, 15),
            ],
        ),
    );
    routines
}

#[test]
fn test_detects_stage_and_weight_per_tier() {
    let report = bootstrap_from_routines(&program(), &routines());

    let squat_t1 = &report.store[&key(MainLift::Squat, Tier::T1)];
    assert_eq!(squat_t1.stage, Stage::First);
    assert!((squat_t1.current_weight - 100.0).abs() < f64::EPSILON);
    assert!((squat_t1.base_weight - 100.0).abs() < f64::EPSILON);

    assert_eq!(report.store[&key(MainLift::Ohp, Tier::T1)].stage, Stage::Second);
    assert_eq!(
        report.store[&key(MainLift::Deadlift, Tier::T2)].stage,
        Stage::Second
    );
    assert_eq!(report.store[&key(MainLift::Squat, Tier::T2)].stage, Stage::Third);
}

#[test]
fn test_first_day_wins_for_shared_accessory() {
    let report = bootstrap_from_routines(&program(), &routines());
    let lat = &report.store[&ProgressionKey::accessory("lat-pulldown")];
    assert!((lat.current_weight - 40.0).abs() < f64::EPSILON);
}

#[test]
fn test_unrecognised_pattern_requires_manual_input() {
    let mut report = bootstrap_from_routines(&program(), &routines());

    assert!(!report.is_complete());
    assert_eq!(report.manual_required.len(), 1);
    let manual = &report.manual_required[0];
    assert_eq!(manual.progression_key, key(MainLift::Bench, Tier::T1));
    assert_eq!(manual.day, Day::A2);
    assert_eq!(manual.detected_weight, Some(60.0));
    assert!(!report.store.contains_key(&key(MainLift::Bench, Tier::T1)));

    report.resolve(&key(MainLift::Bench, Tier::T1), Stage::Second, 57.5);
    assert!(report.is_complete());
    let bench = &report.store[&key(MainLift::Bench, Tier::T1)];
    assert_eq!(bench.stage, Stage::Second);
    assert!((bench.current_weight - 57.5).abs() < f64::EPSILON);
}

#[test]
fn test_missing_day_leaves_its_keys_unseeded() {
    let report = bootstrap_from_routines(&program(), &routines());
    assert!(!report.store.contains_key(&key(MainLift::Deadlift, Tier::T1)));
    assert!(!report.store.contains_key(&key(MainLift::Ohp, Tier::T2)));
    assert!(report
        .manual_required
        .iter()
        .all(|m| m.day != Day::B2));
}

#[test]
fn test_routine_without_weights_reports_no_detected_weight() {
    let unweighted = RoutineExercise {
        exercise_template_id: SQUAT_TPL.to_owned(),
        title: None,
        rest_seconds: None,
        notes: None,
        sets: (0..5)
            .map(|_| RoutineSet {
                set_type: SetType::Normal,
                weight_kg: None,
                reps: Some(3),
            })
            .collect(),
    };
    let mut routines = BTreeMap::new();
    routines.insert(Day::A1, routine("r-a1", "A1", vec![unweighted]));

    let report = bootstrap_from_routines(&program(), &routines);
    assert!(report.store.is_empty());
    assert_eq!(report.manual_required.len(), 1);
    assert_eq!(report.manual_required[0].detected_weight, None);
}

#[test]
fn test_resolving_unknown_key_is_ignored() {
    let mut report = bootstrap_from_routines(&program(), &routines());
    let before = report.store.len();
    report.resolve(&ProgressionKey::accessory("face-pull"), Stage::First, 10.0);
    assert_eq!(report.store.len(), before);
    assert_eq!(report.manual_required.len(), 1);
}
