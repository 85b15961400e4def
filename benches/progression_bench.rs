// ABOUTME: Criterion benchmarks for progression algorithms and the pending change pipeline
// ABOUTME: Measures the calculator, stage detector, predictor, and batch workout evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for progression algorithms.
//!
//! The calculator and detector run once per exercise per workout; the batch
//! benchmark replays a season of logged workouts through analysis, the
//! calculator and the projected-store fold.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::cast_possible_wrap)]

use std::collections::BTreeMap;

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gzclp_sync::algorithms::{
    PredictionInput, ProgressionCalculator, ProgressionPredictor, StageDetector,
};
use gzclp_sync::config::IntelligenceConfig;
use gzclp_sync::models::{
    ChangeType, Day, ExerciseConfig, HistoryEntry, MainLift, MuscleGroup, ProgramConfig,
    ProgressionKey, ProgressionState, ProgressionStore, Role, RoutineSet, SetType, Stage, Tier,
    WeightUnit, Workout, WorkoutExercise, WorkoutSet,
};
use gzclp_sync::progression::pending_changes_for_workouts;

fn bench_program() -> ProgramConfig {
    let mut program = ProgramConfig::default();
    for lift in MainLift::ALL {
        let id = lift.as_str().to_owned();
        program.exercises.insert(
            id.clone(),
            ExerciseConfig {
                id,
                name: lift.display_name().to_owned(),
                template_id: format!("tpl-{}", lift.as_str()),
                role: Some(Role::from(lift)),
                muscle_group: None,
            },
        );
    }
    for (day, id) in Day::ALL.into_iter().zip(["r-a1", "r-b1", "r-a2", "r-b2"]) {
        program.routine_ids.insert(day, id.to_owned());
    }
    program
}

fn bench_store() -> ProgressionStore {
    let mut store = ProgressionStore::new();
    for lift in MainLift::ALL {
        store.insert(
            ProgressionKey::main_lift(lift, Tier::T1),
            ProgressionState::new(lift.as_str(), 60.0),
        );
        store.insert(
            ProgressionKey::main_lift(lift, Tier::T2),
            ProgressionState::new(lift.as_str(), 40.0),
        );
    }
    store
}

/// `count` workouts cycling A1/B1/A2/B2, every set completed at a flat weight
fn season(count: usize) -> Vec<Workout> {
    let start = Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).single().unwrap_or_default();
    (0..count)
        .map(|index| {
            let day = Day::ALL[index % 4];
            let routine_id = ["r-a1", "r-b1", "r-a2", "r-b2"][index % 4];
            let sets = |reps: u32, n: u32| -> Vec<WorkoutSet> {
                (0..n).map(|_| WorkoutSet::normal(60.0, reps)).collect()
            };
            Workout {
                id: format!("w{index}"),
                title: format!("Day {day}"),
                routine_id: Some(routine_id.to_owned()),
                start_time: start + Duration::days(index as i64 * 2),
                exercises: vec![
                    WorkoutExercise {
                        title: String::new(),
                        exercise_template_id: format!("tpl-{}", day.t1_lift().as_str()),
                        sets: sets(3, 5),
                    },
                    WorkoutExercise {
                        title: String::new(),
                        exercise_template_id: format!("tpl-{}", day.t2_lift().as_str()),
                        sets: sets(10, 3),
                    },
                ],
            }
        })
        .collect()
}

fn history(count: usize) -> Vec<HistoryEntry> {
    let start = Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).single().unwrap_or_default();
    (0..count)
        .map(|index| {
            let success = index % 3 != 0;
            HistoryEntry {
                date: start + Duration::days(index as i64 * 7),
                workout_id: format!("w{index}"),
                weight: 60.0 + index as f64 * 2.5,
                stage: Stage::First,
                tier: Tier::T1,
                success,
                change_type: if success {
                    ChangeType::Progress
                } else {
                    ChangeType::StageChange
                },
                amrap_reps: success.then_some(5),
            }
        })
        .collect()
}

fn bench_calculator(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculator");
    let state = ProgressionState::new("squat", 100.0);
    let cases: [(&str, Tier, Vec<u32>); 3] = [
        ("t1_success", Tier::T1, vec![3, 3, 3, 3, 8]),
        ("t2_failure", Tier::T2, vec![10, 10, 7]),
        ("t3_repeat", Tier::T3, vec![15, 15, 20]),
    ];
    for (name, tier, reps) in &cases {
        group.bench_function(*name, |b| {
            b.iter(|| {
                ProgressionCalculator::calculate(
                    black_box(*tier),
                    black_box(&state),
                    black_box(reps),
                    MuscleGroup::Lower,
                    WeightUnit::Kg,
                )
            });
        });
    }
    group.finish();
}

fn bench_stage_detector(c: &mut Criterion) {
    let sets: Vec<RoutineSet> = (0..6)
        .map(|_| RoutineSet {
            set_type: SetType::Normal,
            weight_kg: Some(80.0),
            reps: Some(2),
        })
        .collect();
    c.bench_function("stage_detector/t1_6x2", |b| {
        b.iter(|| StageDetector::detect(black_box(&sets), Tier::T1));
    });
}

fn bench_predictor(c: &mut Criterion) {
    let mut group = c.benchmark_group("predictor");
    let config = IntelligenceConfig::default().prediction;
    let state = ProgressionState::new("squat", 100.0);
    for size in [0_usize, 20, 200] {
        let entries = history(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("history", size), &entries, |b, entries| {
            let input = PredictionInput {
                tier: Tier::T1,
                state: &state,
                history: entries,
                muscle_group: MuscleGroup::Lower,
                unit: WeightUnit::Kg,
                sessions_per_rotation: 1,
            };
            b.iter(|| ProgressionPredictor::predict(black_box(&input), &config));
        });
    }
    group.finish();
}

fn bench_pending_changes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pending_changes");
    let program = bench_program();
    let store = bench_store();
    let routine_ids: BTreeMap<Day, String> = program.routine_ids.clone();
    for size in [4_usize, 48, 192] {
        let workouts = season(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("workouts", size), &workouts, |b, w| {
            b.iter(|| pending_changes_for_workouts(black_box(w), &program, &store, &routine_ids));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_calculator,
    bench_stage_detector,
    bench_predictor,
    bench_pending_changes
);
criterion_main!(benches);
