// ABOUTME: Tests for the in-memory synthetic routine provider and paging helpers
// ABOUTME: Covers write logging, failure injection, cancellation tripwire, and page walking
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{Duration, TimeZone, Utc};
use gzclp_providers::models::{Routine, RoutinePayload, Workout};
use gzclp_providers::{
    fetch_all_routines, fetch_recent_workouts, find_routine, ProviderError, RoutineProvider,
    SyntheticProvider, WriteOperation,
};
use tokio_util::sync::CancellationToken;

fn routine(id: &str, title: &str) -> Routine {
    Routine {
        id: id.to_owned(),
        title: title.to_owned(),
        folder_id: None,
        updated_at: None,
        exercises: Vec::new(),
    }
}

fn workout(n: i64) -> Workout {
    Workout {
        id: format!("w-{n}"),
        title: format!("Session {n}"),
        routine_id: None,
        start_time: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap() + Duration::days(n),
        exercises: Vec::new(),
    }
}

fn payload(title: &str) -> RoutinePayload {
    RoutinePayload {
        title: title.to_owned(),
        folder_id: None,
        notes: None,
        exercises: Vec::new(),
    }
}

#[tokio::test]
async fn test_create_and_update_are_logged() {
    let provider = SyntheticProvider::with_routines(vec![routine("r-1", "My Day")]);

    let created = provider.create_routine(&payload("GZCLP Day B1")).await.unwrap();
    assert!(created.id.starts_with("synthetic-routine-"));
    provider
        .update_routine("r-1", &payload("Renamed"))
        .await
        .unwrap();

    let writes = provider.writes().unwrap();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].operation, WriteOperation::Create);
    assert_eq!(writes[1].operation, WriteOperation::Update);
    assert_eq!(writes[1].routine_id, "r-1");
    assert_eq!(provider.routine("r-1").unwrap().unwrap().title, "Renamed");
}

#[tokio::test]
async fn test_update_of_unknown_routine_is_not_found() {
    let provider = SyntheticProvider::new();
    let error = provider
        .update_routine("missing", &payload("x"))
        .await
        .unwrap_err();
    assert!(error.is_not_found());
    assert!(provider.writes().unwrap().is_empty());
}

#[tokio::test]
async fn test_injected_failures() {
    let provider = SyntheticProvider::with_routines(vec![routine("r-1", "A")]);
    provider.fail_writes_for("r-1").unwrap();
    provider.fail_reads_for("r-1").unwrap();

    let write = provider.update_routine("r-1", &payload("A")).await.unwrap_err();
    assert!(matches!(write, ProviderError::ApiError { status_code: 500, .. }));

    let read = find_routine(&provider, "r-1").await.unwrap_err();
    assert!(!read.is_not_found());
    assert_eq!(find_routine(&provider, "other").await.unwrap(), None);
}

#[tokio::test]
async fn test_cancel_tripwire_fires_after_writes() {
    let cancel = CancellationToken::new();
    let provider = SyntheticProvider::new().with_cancellation(cancel.clone());
    provider.cancel_after_writes(cancel.clone(), 1).unwrap();

    provider.create_routine(&payload("first")).await.unwrap();
    assert!(cancel.is_cancelled());
    let error = provider.create_routine(&payload("second")).await.unwrap_err();
    assert!(error.is_cancelled());
    assert_eq!(provider.writes().unwrap().len(), 1);
}

#[tokio::test]
async fn test_paging_helpers_walk_every_page() {
    let routines = (0..7).map(|i| routine(&format!("r-{i}"), "R")).collect();
    let provider = SyntheticProvider::with_routines(routines)
        .with_workouts((0..12).map(workout).collect());

    let all = fetch_all_routines(&provider, 3).await.unwrap();
    assert_eq!(all.len(), 7);

    let recent = fetch_recent_workouts(&provider, 5, 2).await.unwrap();
    let ids: Vec<_> = recent.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, ["w-11", "w-10", "w-9", "w-8", "w-7"]);

    let empty = SyntheticProvider::new();
    assert!(fetch_recent_workouts(&empty, 5, 2).await.unwrap().is_empty());
}
