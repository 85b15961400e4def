// ABOUTME: Shared fixtures for integration tests
// ABOUTME: A four-lift programme with one T3, its progression store, and workout/routine builders
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use gzclp_sync::models::{
    Day, ExerciseConfig, MainLift, MuscleGroup, ProgramConfig, ProgressionKey, ProgressionState,
    ProgressionStore, Role, Routine, RoutineExercise, RoutineSet, SetType, Tier, WeightUnit,
    Workout, WorkoutExercise, WorkoutSet,
};

pub const SQUAT_TPL: &str = "tpl-squat";
pub const BENCH_TPL: &str = "tpl-bench";
pub const OHP_TPL: &str = "tpl-ohp";
pub const DEADLIFT_TPL: &str = "tpl-deadlift";
pub const LAT_TPL: &str = "tpl-lat";
pub const CURL_TPL: &str = "tpl-curl";

fn exercise(id: &str, name: &str, template: &str, role: Option<Role>) -> ExerciseConfig {
    ExerciseConfig {
        id: id.to_owned(),
        name: name.to_owned(),
        template_id: template.to_owned(),
        role,
        muscle_group: None,
    }
}

/// Four main lifts plus lat pulldown on A1/A2 and an unassigned curl
pub fn program() -> ProgramConfig {
    let mut exercises = BTreeMap::new();
    for config in [
        exercise("squat", "Squat", SQUAT_TPL, Some(Role::Squat)),
        exercise("bench", "Bench Press", BENCH_TPL, Some(Role::Bench)),
        exercise("ohp", "Overhead Press", OHP_TPL, Some(Role::Ohp)),
        exercise("deadlift", "Deadlift", DEADLIFT_TPL, Some(Role::Deadlift)),
        ExerciseConfig {
            muscle_group: Some(MuscleGroup::Upper),
            ..exercise("lat-pulldown", "Lat Pulldown", LAT_TPL, Some(Role::T3))
        },
        exercise("curl", "Curl", CURL_TPL, None),
    ] {
        exercises.insert(config.id.clone(), config);
    }

    let mut t3_schedule = BTreeMap::new();
    t3_schedule.insert(Day::A1, vec!["lat-pulldown".to_owned()]);
    t3_schedule.insert(Day::A2, vec!["lat-pulldown".to_owned()]);

    ProgramConfig {
        exercises,
        t3_schedule,
        routine_ids: BTreeMap::new(),
        unit: WeightUnit::Kg,
    }
}

/// Key shorthand
pub fn key(lift: MainLift, tier: Tier) -> ProgressionKey {
    ProgressionKey::main_lift(lift, tier)
}

/// Stored state for every key of [`program`]
pub fn store() -> ProgressionStore {
    let mut store = ProgressionStore::new();
    for (lift, id, t1, t2) in [
        (MainLift::Squat, "squat", 100.0, 70.0),
        (MainLift::Bench, "bench", 60.0, 45.0),
        (MainLift::Ohp, "ohp", 40.0, 30.0),
        (MainLift::Deadlift, "deadlift", 120.0, 85.0),
    ] {
        store.insert(key(lift, Tier::T1), ProgressionState::new(id, t1));
        store.insert(key(lift, Tier::T2), ProgressionState::new(id, t2));
    }
    store.insert(
        ProgressionKey::accessory("lat-pulldown"),
        ProgressionState::new("lat-pulldown", 40.0),
    );
    store
}

/// Midnight-ish timestamp `days` after a fixed start date
pub fn at(days: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap() + Duration::days(days)
}

/// Logged exercise with one normal set per entry of `reps`
pub fn logged(template: &str, weight: f64, reps: &[u32]) -> WorkoutExercise {
    WorkoutExercise {
        title: template.to_owned(),
        exercise_template_id: template.to_owned(),
        sets: reps.iter().map(|&r| WorkoutSet::normal(weight, r)).collect(),
    }
}

/// Completed workout
pub fn workout(
    id: &str,
    routine_id: Option<&str>,
    days: i64,
    exercises: Vec<WorkoutExercise>,
) -> Workout {
    Workout {
        id: id.to_owned(),
        title: format!("Workout {id}"),
        routine_id: routine_id.map(ToOwned::to_owned),
        start_time: at(days),
        exercises,
    }
}

/// Routine exercise with `sets` normal sets of `reps` at `weight`
pub fn prescribed(template: &str, weight: f64, sets: u32, reps: u32) -> RoutineExercise {
    RoutineExercise {
        exercise_template_id: template.to_owned(),
        title: None,
        rest_seconds: None,
        notes: None,
        sets: (0..sets)
            .map(|_| RoutineSet {
                set_type: SetType::Normal,
                weight_kg: Some(weight),
                reps: Some(reps),
            })
            .collect(),
    }
}

/// Routine with the given exercises
pub fn routine(id: &str, title: &str, exercises: Vec<RoutineExercise>) -> Routine {
    Routine {
        id: id.to_owned(),
        title: title.to_owned(),
        folder_id: None,
        updated_at: None,
        exercises,
    }
}

/// A1 routine that mirrors [`store`] exactly
pub fn a1_routine_in_sync(id: &str) -> Routine {
    routine(
        id,
        "My A1",
        vec![
            prescribed(SQUAT_TPL, 100.0, 5, 3),
            prescribed(BENCH_TPL, 45.0, 3, 10),
            prescribed(LAT_TPL, 40.0, 3, 15),
        ],
    )
}
