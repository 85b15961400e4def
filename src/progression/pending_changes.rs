// ABOUTME: Builds reviewable pending changes from analysed workouts via the progression calculator
// ABOUTME: Discards unconfigured, role-less, stateless, and repeat outcomes without failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::algorithms::{ProgressionCalculator, ProgressionResult};
use crate::intelligence::workout_analyzer::{resolve_day, Discrepancy, WorkoutAnalysisResult};
use crate::intelligence::WorkoutAnalyzer;
use crate::models::{
    ChangeType, Day, ExerciseConfig, ProgramConfig, ProgressionKey, ProgressionState,
    ProgressionStore, RepScheme, Stage, Tier, Workout,
};
use crate::progression::applier::apply_all_pending_changes;

/// Workout a change was derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutProvenance {
    /// Remote workout id
    pub workout_id: String,
    /// When the workout started
    pub workout_date: DateTime<Utc>,
}

impl From<&Workout> for WorkoutProvenance {
    fn from(workout: &Workout) -> Self {
        Self {
            workout_id: workout.id.clone(),
            workout_date: workout.start_time,
        }
    }
}

/// A progression update awaiting the lifter's approval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingChange {
    /// Unique id for review tooling
    pub id: Uuid,
    /// Key the change applies to
    pub progression_key: ProgressionKey,
    /// Configured exercise id
    pub exercise_id: String,
    /// Display name, tier-prefixed for main lifts ("T1 Squat")
    pub exercise_name: String,
    /// Tier the workout was performed at
    pub tier: Tier,
    /// Kind of transition
    pub change_type: ChangeType,
    /// Stored weight before the change (kg)
    pub current_weight: f64,
    /// Weight after the change (kg)
    pub new_weight: f64,
    /// Stage before the change
    pub current_stage: Stage,
    /// Stage after the change
    pub new_stage: Stage,
    /// New cycle base weight, deloads only (kg)
    pub new_base_weight: Option<f64>,
    /// Scheme prescribed after the change
    pub new_scheme: RepScheme,
    /// Human-readable explanation
    pub reason: String,
    /// Whether the prescription was met
    pub success: bool,
    /// AMRAP reps achieved, when tracked
    pub amrap_reps: Option<u32>,
    /// Stored vs. observed weight mismatch, when one was detected
    pub discrepancy: Option<Discrepancy>,
    /// Workout the change came from
    pub workout_id: String,
    /// Date of that workout
    pub workout_date: DateTime<Utc>,
    /// When the change was generated
    pub created_at: DateTime<Utc>,
}

impl PendingChange {
    /// Copy of the change with a lifter-edited target weight
    ///
    /// On a deload the edited weight also becomes the new base weight.
    #[must_use]
    pub fn with_new_weight(&self, weight: f64) -> Self {
        Self {
            new_weight: weight,
            new_base_weight: self.new_base_weight.map(|_| weight),
            ..self.clone()
        }
    }

    /// Weight the lifter actually attempted (kg)
    #[must_use]
    pub fn attempted_weight(&self) -> f64 {
        self.discrepancy
            .map_or(self.current_weight, |d| d.actual_weight)
    }
}

/// Display name for an exercise trained at `tier`
fn display_name(config: &ExerciseConfig, key: &ProgressionKey, tier: Tier) -> String {
    match key {
        ProgressionKey::MainLift { .. } => format!("{tier} {}", config.name),
        ProgressionKey::Accessory { .. } => config.name.clone(),
    }
}

/// Assemble a pending change from a calculator result
///
/// `state` is the stored state; its weight is kept as `current_weight` even
/// when the calculator ran on an observed weight.
#[must_use]
pub fn create_pending_change(
    config: &ExerciseConfig,
    key: &ProgressionKey,
    state: &ProgressionState,
    result: &ProgressionResult,
    analysis: &WorkoutAnalysisResult,
    provenance: &WorkoutProvenance,
) -> PendingChange {
    PendingChange {
        id: Uuid::new_v4(),
        progression_key: key.clone(),
        exercise_id: config.id.clone(),
        exercise_name: display_name(config, key, analysis.tier),
        tier: analysis.tier,
        change_type: result.change_type,
        current_weight: state.current_weight,
        new_weight: result.new_weight,
        current_stage: state.stage,
        new_stage: result.new_stage,
        new_base_weight: result.new_base_weight,
        new_scheme: result.new_scheme,
        reason: result.reason.clone(),
        success: result.success,
        amrap_reps: result.amrap_reps,
        discrepancy: analysis.discrepancy,
        workout_id: provenance.workout_id.clone(),
        workout_date: provenance.workout_date,
        created_at: Utc::now(),
    }
}

/// Run the calculator over every analysed exercise of one workout
///
/// Exercises missing from configuration, without a role, or without stored
/// state are skipped (the last with a warning), as are `Repeat` outcomes.
#[must_use]
pub fn generate_pending_changes(
    analyses: &[WorkoutAnalysisResult],
    program: &ProgramConfig,
    store: &ProgressionStore,
    provenance: &WorkoutProvenance,
) -> Vec<PendingChange> {
    let mut changes = Vec::new();
    for analysis in analyses {
        let Some(config) = program.exercises.get(&analysis.exercise_id) else {
            debug!(exercise_id = %analysis.exercise_id, "Exercise no longer configured");
            continue;
        };
        let Some(role) = config.role else {
            debug!(exercise_id = %config.id, "Exercise has no role");
            continue;
        };
        let Some(key) = ProgressionKey::for_exercise(role, &config.id, analysis.tier) else {
            continue;
        };
        let Some(state) = store.get(&key) else {
            warn!(
                progression_key = %key,
                workout_id = %provenance.workout_id,
                "No stored progression state; skipping exercise"
            );
            continue;
        };

        let working_state = analysis.discrepancy.map_or_else(
            || state.clone(),
            |d| ProgressionState {
                current_weight: d.actual_weight,
                ..state.clone()
            },
        );
        let result = ProgressionCalculator::calculate(
            analysis.tier,
            &working_state,
            &analysis.reps,
            config.muscle_group(),
            program.unit,
        );
        if result.change_type == ChangeType::Repeat {
            debug!(progression_key = %key, "Repeat outcome; nothing to change");
            continue;
        }

        changes.push(create_pending_change(
            config, &key, state, &result, analysis, provenance,
        ));
    }
    changes
}

/// Whether `state` already reflects the workout described by `provenance`
fn already_processed(state: &ProgressionState, provenance: &WorkoutProvenance) -> bool {
    state.last_workout_id.as_deref() == Some(provenance.workout_id.as_str())
        || state
            .last_workout_date
            .is_some_and(|date| date >= provenance.workout_date)
}

/// Pending changes for a batch of workouts, evaluated oldest first
///
/// Each workout is analysed against the store as it would look after the
/// previous workouts' changes, so consecutive sessions chain correctly.
/// Workouts a key has already absorbed are ignored for that key.
#[must_use]
pub fn pending_changes_for_workouts(
    workouts: &[Workout],
    program: &ProgramConfig,
    store: &ProgressionStore,
    routine_ids: &BTreeMap<Day, String>,
) -> Vec<PendingChange> {
    let mut ordered: Vec<&Workout> = workouts.iter().collect();
    ordered.sort_by_key(|w| w.start_time);

    let mut projected = store.clone();
    let mut all = Vec::new();
    for workout in ordered {
        let provenance = WorkoutProvenance::from(workout);
        let day = resolve_day(workout, routine_ids);
        let analyses: Vec<WorkoutAnalysisResult> =
            WorkoutAnalyzer::analyze(workout, program, &projected, day)
                .into_iter()
                .filter(|a| {
                    projected
                        .get(&a.progression_key)
                        .is_none_or(|state| !already_processed(state, &provenance))
                })
                .collect();
        let changes = generate_pending_changes(&analyses, program, &projected, &provenance);
        projected = apply_all_pending_changes(&projected, &changes);
        all.extend(changes);
    }
    all
}
