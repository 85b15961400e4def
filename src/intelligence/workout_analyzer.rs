// ABOUTME: Turns a logged workout into per-exercise rep logs keyed by progression identity
// ABOUTME: Resolves tiers from role and day, and flags weights that disagree with stored state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Analyzer
//!
//! Bridges a remote workout and the progression calculator. For every logged
//! exercise that maps to a configured, progressed exercise it produces a
//! [`WorkoutAnalysisResult`]: the reps per working set, the weight actually
//! used, the stored stage and, when the lifter loaded something other than
//! what was stored, a [`Discrepancy`].
//!
//! Rules:
//!
//! - exercises are matched by remote template id; unmatched or role-less
//!   exercises are skipped
//! - the tier comes from `(role, day)`; with no known day only T3 work can be
//!   analysed, main lifts are skipped
//! - reps count normal and drop sets, with unrecorded reps counted as zero
//! - the weight is that of the first normal set, falling back to the stored
//!   weight (no discrepancy) when none was recorded

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    derive_tier, weights_differ, Day, ProgramConfig, ProgressionKey, ProgressionStore, Role,
    SetType, Stage, Tier, Workout, WorkoutExercise,
};

/// Stored and observed weight for an exercise that disagree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// Weight held in progression state (kg)
    pub stored_weight: f64,
    /// Weight the lifter actually used (kg)
    pub actual_weight: f64,
}

/// One progressed exercise extracted from a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutAnalysisResult {
    /// Configured exercise id
    pub exercise_id: String,
    /// Configured display name
    pub exercise_name: String,
    /// Tier the exercise was trained at
    pub tier: Tier,
    /// Role of the exercise
    pub role: Role,
    /// Key the outcome is stored under
    pub progression_key: ProgressionKey,
    /// Reps per counted set, in order
    pub reps: Vec<u32>,
    /// Weight used (kg)
    pub weight: f64,
    /// Stage the exercise was trained at
    pub stage: Stage,
    /// Present when the observed weight differs from the stored weight
    pub discrepancy: Option<Discrepancy>,
}

/// Workout analysis entry point
pub struct WorkoutAnalyzer;

impl WorkoutAnalyzer {
    /// Analyse every progressed exercise in `workout`
    ///
    /// `day` is the rotation day the workout was performed as, when known.
    #[must_use]
    pub fn analyze(
        workout: &Workout,
        program: &ProgramConfig,
        store: &ProgressionStore,
        day: Option<Day>,
    ) -> Vec<WorkoutAnalysisResult> {
        workout
            .exercises
            .iter()
            .filter_map(|exercise| Self::analyze_exercise(exercise, program, store, day))
            .collect()
    }

    fn analyze_exercise(
        exercise: &WorkoutExercise,
        program: &ProgramConfig,
        store: &ProgressionStore,
        day: Option<Day>,
    ) -> Option<WorkoutAnalysisResult> {
        let Some(config) = program.find_by_template(&exercise.exercise_template_id) else {
            debug!(
                template_id = %exercise.exercise_template_id,
                "Skipping exercise with no configured counterpart"
            );
            return None;
        };
        let role = config.role?;
        let Some(tier) = Self::tier_for(role, day) else {
            debug!(
                exercise_id = %config.id,
                day = ?day,
                "Skipping exercise with no tier on this day"
            );
            return None;
        };
        let progression_key = ProgressionKey::for_exercise(role, &config.id, tier)?;
        let state = store.get(&progression_key);

        let reps = Self::counted_reps(exercise);
        let observed = exercise
            .sets
            .iter()
            .find(|set| set.set_type == SetType::Normal)
            .and_then(|set| set.weight_kg);

        let discrepancy = match (observed, state) {
            (Some(actual), Some(state)) if weights_differ(state.current_weight, actual) => {
                debug!(
                    progression_key = %progression_key,
                    stored = state.current_weight,
                    actual,
                    "Logged weight differs from stored weight"
                );
                Some(Discrepancy {
                    stored_weight: state.current_weight,
                    actual_weight: actual,
                })
            }
            _ => None,
        };

        let weight = observed
            .or_else(|| state.map(|s| s.current_weight))
            .unwrap_or_default();

        Some(WorkoutAnalysisResult {
            exercise_id: config.id.clone(),
            exercise_name: config.name.clone(),
            tier,
            role,
            progression_key,
            reps,
            weight,
            stage: state.map_or(Stage::First, |s| s.stage),
            discrepancy,
        })
    }

    /// Tier for `role`, with only T3 resolvable when the day is unknown
    fn tier_for(role: Role, day: Option<Day>) -> Option<Tier> {
        match day {
            Some(day) => derive_tier(role, day),
            None => (role == Role::T3).then_some(Tier::T3),
        }
    }

    /// Reps of normal and drop sets; unrecorded reps count as zero
    fn counted_reps(exercise: &WorkoutExercise) -> Vec<u32> {
        exercise
            .sets
            .iter()
            .filter(|set| matches!(set.set_type, SetType::Normal | SetType::Dropset))
            .map(|set| set.reps.unwrap_or(0))
            .collect()
    }
}

/// Rotation day a workout was started from, by its routine id
#[must_use]
pub fn resolve_day(workout: &Workout, routine_ids: &BTreeMap<Day, String>) -> Option<Day> {
    let routine_id = workout.routine_id.as_deref()?;
    routine_ids
        .iter()
        .find_map(|(day, id)| (id == routine_id).then_some(*day))
}
