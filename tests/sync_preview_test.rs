// ABOUTME: Integration tests for the push preview against an in-memory routine service
// ABOUTME: Verifies per-day diffs, missing routines, default selections, and read failures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use gzclp_sync::errors::ErrorCode;
use gzclp_sync::models::{Day, MainLift, ProgressionKey, Tier};
use gzclp_sync::providers::SyntheticProvider;
use gzclp_sync::sync::{build_push_preview, SyncAction, SyncSelection};
use helpers::{a1_routine_in_sync, key, program, store};

fn provider_with_a1() -> SyntheticProvider {
    SyntheticProvider::with_routines(vec![a1_routine_in_sync("r-a1")])
}

#[tokio::test]
async fn test_in_sync_day_reports_no_changes() {
    let mut program = program();
    program.routine_ids.insert(Day::A1, "r-a1".to_owned());

    let preview = build_push_preview(&provider_with_a1(), &program, &store())
        .await
        .unwrap();

    assert_eq!(preview.days.len(), 4);
    let a1 = &preview.days[0];
    assert_eq!(a1.day, Day::A1);
    assert!(a1.has_remote());
    assert!(!a1.has_changes());
    assert_eq!(a1.routine_title.as_deref(), Some("My A1"));
    assert_eq!(a1.exercises.len(), 3);
    assert_eq!(a1.exercises[0].exercise_name, "T1 Squat");
    assert_eq!(a1.exercises[1].exercise_name, "T2 Bench Press");
    assert_eq!(a1.exercises[2].exercise_name, "Lat Pulldown");
}

#[tokio::test]
async fn test_days_without_routine_are_all_changed() {
    let mut program = program();
    program.routine_ids.insert(Day::A1, "r-a1".to_owned());

    let preview = build_push_preview(&provider_with_a1(), &program, &store())
        .await
        .unwrap();

    let b1 = &preview.days[1];
    assert_eq!(b1.day, Day::B1);
    assert!(!b1.has_remote());
    assert!(b1.exercises.iter().all(|e| e.changed && e.remote_weight.is_none()));
    assert_eq!(
        b1.exercises
            .iter()
            .map(|e| e.progression_key.clone())
            .collect::<Vec<_>>(),
        vec![key(MainLift::Ohp, Tier::T1), key(MainLift::Deadlift, Tier::T2)]
    );

    // B1 2 + A2 3 + B2 2
    assert_eq!(preview.changed_count(), 7);
}

#[tokio::test]
async fn test_local_weight_change_marks_exercise() {
    let mut program = program();
    program.routine_ids.insert(Day::A1, "r-a1".to_owned());
    let mut store = store();
    store
        .get_mut(&key(MainLift::Squat, Tier::T1))
        .unwrap()
        .current_weight = 105.0;

    let preview = build_push_preview(&provider_with_a1(), &program, &store)
        .await
        .unwrap();
    let squat = &preview.days[0].exercises[0];
    assert!(squat.changed);
    assert_eq!(squat.remote_weight, Some(100.0));
    assert!((squat.local_weight - 105.0).abs() < f64::EPSILON);
    assert!(!preview.days[0].exercises[1].changed);
}

#[tokio::test]
async fn test_deleted_routine_previews_as_absent() {
    let mut program = program();
    program.routine_ids.insert(Day::A1, "gone".to_owned());

    let preview = build_push_preview(&provider_with_a1(), &program, &store())
        .await
        .unwrap();
    assert!(!preview.days[0].has_remote());
    assert!(preview.days[0].has_changes());
}

#[tokio::test]
async fn test_exercise_without_state_is_left_out() {
    let mut store = store();
    store.remove(&ProgressionKey::accessory("lat-pulldown"));

    let preview = build_push_preview(&SyntheticProvider::new(), &program(), &store)
        .await
        .unwrap();
    assert_eq!(preview.days[0].exercises.len(), 2);
    assert_eq!(preview.days[2].exercises.len(), 2);
}

#[tokio::test]
async fn test_read_failure_fails_the_preview() {
    let mut program = program();
    program.routine_ids.insert(Day::A1, "r-a1".to_owned());
    let provider = provider_with_a1();
    provider.fail_reads_for("r-a1").unwrap();

    let error = build_push_preview(&provider, &program, &store())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_default_selection_pushes_only_changes() {
    let mut program = program();
    program.routine_ids.insert(Day::A1, "r-a1".to_owned());
    let preview = build_push_preview(&provider_with_a1(), &program, &store())
        .await
        .unwrap();

    let mut selection = SyncSelection::default_for(&preview);
    let squat_t1 = key(MainLift::Squat, Tier::T1);
    let lat = ProgressionKey::accessory("lat-pulldown");
    assert_eq!(selection.action(Day::A1, &squat_t1), SyncAction::Skip);
    assert_eq!(selection.action(Day::A2, &lat), SyncAction::Push);
    assert_eq!(
        selection.action(Day::B1, &squat_t1),
        SyncAction::Skip,
        "keys not on a day fall back to skip"
    );

    selection.set_all_for_key(&lat, SyncAction::Pull);
    assert_eq!(selection.action(Day::A1, &lat), SyncAction::Pull);
    assert_eq!(selection.action(Day::A2, &lat), SyncAction::Pull);

    selection.set(Day::A1, squat_t1.clone(), SyncAction::Push);
    assert_eq!(selection.action(Day::A1, &squat_t1), SyncAction::Push);
}
