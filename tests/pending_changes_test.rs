// ABOUTME: Integration tests for pending change generation, application, and history recording
// ABOUTME: Exercises the analyse -> review -> apply workflow across chained workouts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::collections::BTreeMap;
use std::slice;

use gzclp_sync::config::environment::ServerConfig;
use gzclp_sync::intelligence::WorkoutAnalyzer;
use gzclp_sync::models::{
    ChangeType, Day, HistoryBook, MainLift, ProgressionKey, Stage, Tier, WeightUnit,
};
use gzclp_sync::progression::{
    apply_all_pending_changes, apply_pending_change, generate_pending_changes,
    pending_changes_for_workouts, record_history, WorkoutProvenance,
};
use helpers::{at, key, logged, program, store, workout, BENCH_TPL, LAT_TPL, SQUAT_TPL};

fn a1_ids() -> BTreeMap<Day, String> {
    let mut ids = BTreeMap::new();
    ids.insert(Day::A1, "r-a1".to_owned());
    ids
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_successful_a1_session_produces_progress_and_stage_change() {
    let session = workout(
        "w1",
        Some("r-a1"),
        0,
        vec![
            logged(SQUAT_TPL, 100.0, &[3, 3, 3, 3, 8]),
            logged(BENCH_TPL, 45.0, &[10, 10, 7]),
            logged(LAT_TPL, 40.0, &[15, 15, 18]),
        ],
    );

    let changes = pending_changes_for_workouts(&[session], &program(), &store(), &a1_ids());
    assert_eq!(changes.len(), 2, "T3 repeat produces no change");

    let squat = &changes[0];
    assert_eq!(squat.progression_key, key(MainLift::Squat, Tier::T1));
    assert_eq!(squat.change_type, ChangeType::Progress);
    assert!(approx(squat.current_weight, 100.0));
    assert!(approx(squat.new_weight, 105.0));
    assert_eq!(squat.amrap_reps, Some(8));
    assert_eq!(squat.exercise_name, "T1 Squat");
    assert_eq!(squat.workout_id, "w1");

    let bench = &changes[1];
    assert_eq!(bench.change_type, ChangeType::StageChange);
    assert!(approx(bench.new_weight, 45.0));
    assert_eq!(bench.current_stage, Stage::First);
    assert_eq!(bench.new_stage, Stage::Second);
    assert_eq!(bench.new_scheme.to_string(), "3x8");
    assert!(!bench.success);
}

#[test]
fn test_t3_success_progresses_accessory() {
    let session = workout(
        "w1",
        Some("r-a1"),
        0,
        vec![logged(LAT_TPL, 40.0, &[15, 15, 25])],
    );
    let changes = pending_changes_for_workouts(&[session], &program(), &store(), &a1_ids());
    assert_eq!(changes.len(), 1);
    assert_eq!(
        changes[0].progression_key,
        ProgressionKey::accessory("lat-pulldown")
    );
    assert_eq!(changes[0].exercise_name, "Lat Pulldown");
    assert!(approx(changes[0].new_weight, 42.5));
    assert_eq!(changes[0].amrap_reps, Some(25));
}

#[test]
fn test_consecutive_workouts_chain_through_projected_state() {
    let first = workout(
        "w1",
        Some("r-a1"),
        0,
        vec![logged(SQUAT_TPL, 100.0, &[3, 3, 3, 3, 5])],
    );
    let second = workout(
        "w2",
        Some("r-a1"),
        7,
        vec![logged(SQUAT_TPL, 105.0, &[3, 3, 3, 3, 4])],
    );

    // Newest first, as the remote service lists them
    let changes =
        pending_changes_for_workouts(&[second, first], &program(), &store(), &a1_ids());
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].workout_id, "w1");
    assert!(approx(changes[0].new_weight, 105.0));
    assert_eq!(changes[1].workout_id, "w2");
    assert!(approx(changes[1].current_weight, 105.0));
    assert!(approx(changes[1].new_weight, 110.0));
    assert!(changes[1].discrepancy.is_none());

    let applied = apply_all_pending_changes(&store(), &changes);
    let squat = &applied[&key(MainLift::Squat, Tier::T1)];
    assert!(approx(squat.current_weight, 110.0));
    assert_eq!(squat.last_workout_id.as_deref(), Some("w2"));
    assert_eq!(squat.amrap_record, 5);
    assert_eq!(squat.amrap_record_workout_id.as_deref(), Some("w1"));
}

#[test]
fn test_already_processed_workouts_are_ignored() {
    let session = workout(
        "w1",
        Some("r-a1"),
        0,
        vec![logged(SQUAT_TPL, 100.0, &[3, 3, 3, 3, 5])],
    );
    let first_pass = pending_changes_for_workouts(
        slice::from_ref(&session),
        &program(),
        &store(),
        &a1_ids(),
    );
    let applied = apply_all_pending_changes(&store(), &first_pass);

    let second_pass = pending_changes_for_workouts(&[session], &program(), &applied, &a1_ids());
    assert!(second_pass.is_empty());

    let older = workout(
        "w0",
        Some("r-a1"),
        -7,
        vec![logged(SQUAT_TPL, 95.0, &[3, 3, 3, 3, 5])],
    );
    assert!(pending_changes_for_workouts(&[older], &program(), &applied, &a1_ids()).is_empty());
}

#[test]
fn test_discrepancy_calculates_from_observed_weight() {
    let session = workout(
        "w1",
        None,
        0,
        vec![logged(SQUAT_TPL, 102.5, &[3, 3, 3, 3, 3])],
    );
    let program = program();
    let store = store();
    let analyses = WorkoutAnalyzer::analyze(&session, &program, &store, Some(Day::A1));
    let changes = generate_pending_changes(
        &analyses,
        &program,
        &store,
        &WorkoutProvenance::from(&session),
    );

    let change = &changes[0];
    assert!(approx(change.current_weight, 100.0));
    assert!(approx(change.new_weight, 107.5));
    assert!(approx(change.attempted_weight(), 102.5));
    assert!(change.discrepancy.is_some());
}

#[test]
fn test_final_stage_failure_deloads_and_resets_base() {
    let mut state = store();
    {
        let squat = state.get_mut(&key(MainLift::Squat, Tier::T1)).unwrap();
        squat.stage = Stage::Third;
    }
    let session = workout(
        "w1",
        Some("r-a1"),
        0,
        vec![logged(SQUAT_TPL, 100.0, &[1, 1, 1, 1, 1, 1, 0])],
    );
    let changes = pending_changes_for_workouts(&[session], &program(), &state, &a1_ids());
    let change = &changes[0];
    assert_eq!(change.change_type, ChangeType::Deload);
    assert!(approx(change.new_weight, 85.0));
    assert_eq!(change.new_base_weight, Some(85.0));
    assert_eq!(change.new_stage, Stage::First);

    let applied = apply_pending_change(&state, change);
    let squat = &applied[&key(MainLift::Squat, Tier::T1)];
    assert!(approx(squat.base_weight, 85.0));
    assert_eq!(squat.stage, Stage::First);
}

#[test]
fn test_missing_state_skips_exercise() {
    let mut state = store();
    state.remove(&key(MainLift::Bench, Tier::T2));
    let session = workout(
        "w1",
        Some("r-a1"),
        0,
        vec![
            logged(SQUAT_TPL, 100.0, &[3, 3, 3, 3, 3]),
            logged(BENCH_TPL, 45.0, &[10, 10, 10]),
        ],
    );
    let changes = pending_changes_for_workouts(&[session], &program(), &state, &a1_ids());
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].progression_key, key(MainLift::Squat, Tier::T1));
}

#[test]
fn test_weight_override_keeps_deload_base_in_step() {
    let mut state = store();
    state
        .get_mut(&key(MainLift::Squat, Tier::T1))
        .unwrap()
        .stage = Stage::Third;
    let session = workout(
        "w1",
        Some("r-a1"),
        0,
        vec![logged(SQUAT_TPL, 100.0, &[0])],
    );
    let changes = pending_changes_for_workouts(&[session], &program(), &state, &a1_ids());
    let edited = changes[0].with_new_weight(80.0);
    assert!(approx(edited.new_weight, 80.0));
    assert_eq!(edited.new_base_weight, Some(80.0));
    assert_eq!(edited.id, changes[0].id);
}

#[test]
fn test_history_records_attempt_once_per_workout() {
    let sessions = vec![
        workout(
            "w1",
            Some("r-a1"),
            0,
            vec![logged(SQUAT_TPL, 100.0, &[3, 3, 3, 3, 6])],
        ),
        workout(
            "w2",
            Some("r-a1"),
            7,
            vec![logged(SQUAT_TPL, 105.0, &[3, 3, 3, 2, 2])],
        ),
    ];
    let changes = pending_changes_for_workouts(&sessions, &program(), &store(), &a1_ids());
    let book = record_history(&HistoryBook::new(), &changes);
    let book = record_history(&book, &changes);

    let history = &book[&key(MainLift::Squat, Tier::T1)];
    assert_eq!(history.len(), 2);
    let entries = history.entries();
    assert_eq!(entries[0].date, at(0));
    assert!(entries[0].success);
    assert_eq!(entries[0].amrap_reps, Some(6));
    assert!(approx(entries[1].weight, 105.0));
    assert_eq!(entries[1].change_type, ChangeType::StageChange);
    assert_eq!(entries[1].stage, Stage::First);
}

#[test]
fn test_configured_unit_drives_calculator_increments() {
    let config = ServerConfig {
        weight_unit: Some(WeightUnit::Lbs),
        ..ServerConfig::default()
    };
    let resolved = config.resolve_program_unit(program());
    assert_eq!(resolved.unit, WeightUnit::Lbs);

    let session = workout(
        "w1",
        Some("r-a1"),
        0,
        vec![logged(SQUAT_TPL, 100.0, &[3, 3, 3, 3, 5])],
    );
    let changes = pending_changes_for_workouts(&[session], &resolved, &store(), &a1_ids());
    let squat = &changes[0];
    // 10 lb lower-body increment, not 5 kg
    assert!(approx(squat.new_weight, 100.0 + 10.0 * 0.453_592_37));

    let unconfigured = ServerConfig::default().resolve_program_unit(program());
    assert_eq!(unconfigured.unit, WeightUnit::Kg);
}
