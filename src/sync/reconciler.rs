// ABOUTME: Selective sync: writes chosen local weights to remote day routines
// ABOUTME: Creates missing routines, updates routines with pushes, and reports pulls and per-day errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Selective Sync Reconciler
//!
//! Days are reconciled one at a time in rotation order:
//!
//! | Remote routine | Any `Push`? | Result                                  |
//! |----------------|-------------|-----------------------------------------|
//! | absent         | either      | routine created as `GZCLP Day <day>`    |
//! | present        | yes         | routine updated, remote title preserved |
//! | present        | no          | untouched                               |
//!
//! Exercises marked `Skip` or `Pull` are written with the weight observed
//! remotely (local weight when nothing was observed). `Pull` selections are
//! returned as [`PullUpdate`]s; local state is never modified here.
//!
//! A failing day is recorded and the next day proceeds. Cancellation stops
//! before the next day; writes already made stay in place and are reported.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::constants::sync::ROUTINE_TITLE_PREFIX;
use crate::logging::AppLogger;
use crate::models::{weights_differ, Day, ProgramConfig, ProgressionKey, ProgressionStore};
use crate::providers::{run_cancellable, ProviderError, ProviderResult, RoutineProvider};
use crate::sync::preview::{DayDiff, PushPreview, SyncAction, SyncSelection};
use crate::sync::routine_builder::{build_routine_payload, PlannedExercise};

/// Remote weight to adopt locally
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullUpdate {
    /// Key to update
    pub progression_key: ProgressionKey,
    /// Weight observed remotely (kg)
    pub weight: f64,
}

/// A day that could not be reconciled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySyncError {
    /// Day that failed
    pub day: Day,
    /// Remote failure
    #[serde(serialize_with = "serialize_error")]
    pub error: ProviderError,
}

fn serialize_error<S: Serializer>(error: &ProviderError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

/// Outcome of a sync run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncResult {
    /// Routines created, by day; the caller persists these ids
    pub created_routine_ids: BTreeMap<Day, String>,
    /// Days whose existing routine was rewritten
    pub updated: Vec<Day>,
    /// Days left untouched
    pub unchanged: Vec<Day>,
    /// Days that failed
    pub errors: Vec<DaySyncError>,
    /// Remote weights selected for adoption
    pub pulls: Vec<PullUpdate>,
    /// Whether the run stopped early on cancellation
    pub cancelled: bool,
}

impl SyncResult {
    /// Whether every visited day succeeded and the run was not cancelled
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && !self.cancelled
    }
}

/// Title of a routine created for `day`
#[must_use]
pub fn routine_title(day: Day) -> String {
    format!("{ROUTINE_TITLE_PREFIX} {day}")
}

/// Routine contents and pull requests for one day
struct DayPlan {
    exercises: Vec<PlannedExercise>,
    pulls: Vec<PullUpdate>,
    has_push: bool,
}

/// Resolve every exercise of `diff` against the selection and current state
///
/// Exercises no longer configured are dropped. Stage and local weight come
/// from `store` so changes applied after the preview was built are honoured.
fn plan_day(
    diff: &DayDiff,
    selection: &SyncSelection,
    program: &ProgramConfig,
    store: &ProgressionStore,
) -> DayPlan {
    let mut plan = DayPlan {
        exercises: Vec::with_capacity(diff.exercises.len()),
        pulls: Vec::new(),
        has_push: false,
    };

    for exercise in &diff.exercises {
        if !program.exercises.contains_key(&exercise.exercise_id) {
            debug!(
                day = %diff.day,
                exercise_id = %exercise.exercise_id,
                "Exercise no longer configured; dropped from routine"
            );
            continue;
        }
        let state = store.get(&exercise.progression_key);
        let local_weight = state.map_or(exercise.local_weight, |s| s.current_weight);
        let stage = state.map_or(exercise.stage, |s| s.stage);

        let action = selection.action(diff.day, &exercise.progression_key);
        let weight = match action {
            SyncAction::Push => {
                plan.has_push = true;
                local_weight
            }
            SyncAction::Skip | SyncAction::Pull => exercise.remote_weight.unwrap_or(local_weight),
        };

        if action == SyncAction::Pull {
            match exercise.remote_weight {
                Some(remote) if weights_differ(remote, local_weight) => {
                    plan.pulls.push(PullUpdate {
                        progression_key: exercise.progression_key.clone(),
                        weight: remote,
                    });
                }
                Some(_) => {}
                None => debug!(
                    progression_key = %exercise.progression_key,
                    "Pull requested but no remote weight observed"
                ),
            }
        }

        plan.exercises.push(PlannedExercise {
            template_id: exercise.template_id.clone(),
            name: exercise.exercise_name.clone(),
            tier: exercise.tier,
            stage,
            weight,
        });
    }
    plan
}

enum DayOutcome {
    Created(String),
    Updated,
    Unchanged,
}

async fn write_day(
    provider: &dyn RoutineProvider,
    diff: &DayDiff,
    plan: &DayPlan,
    cancel: &CancellationToken,
) -> ProviderResult<DayOutcome> {
    match (&diff.routine_id, &diff.routine_title) {
        (None, _) => {
            let payload = build_routine_payload(&routine_title(diff.day), &plan.exercises);
            let created = run_cancellable(
                cancel,
                provider.name(),
                provider.create_routine(&payload),
            )
            .await?;
            Ok(DayOutcome::Created(created.id))
        }
        (Some(routine_id), title) if plan.has_push => {
            let title = title.clone().unwrap_or_else(|| routine_title(diff.day));
            let payload = build_routine_payload(&title, &plan.exercises);
            run_cancellable(
                cancel,
                provider.name(),
                provider.update_routine(routine_id, &payload),
            )
            .await?;
            Ok(DayOutcome::Updated)
        }
        (Some(_), _) => Ok(DayOutcome::Unchanged),
    }
}

/// Reconcile every day of `preview` according to `selection`
///
/// Never fails as a whole: remote errors are collected per day in
/// [`SyncResult::errors`].
pub async fn sync_with_selection(
    provider: &dyn RoutineProvider,
    preview: &PushPreview,
    selection: &SyncSelection,
    program: &ProgramConfig,
    store: &ProgressionStore,
    cancel: &CancellationToken,
) -> SyncResult {
    let mut result = SyncResult::default();

    for diff in &preview.days {
        if cancel.is_cancelled() {
            info!(day = %diff.day, "Sync cancelled before day");
            result.cancelled = true;
            break;
        }

        let plan = plan_day(diff, selection, program, store);
        result.pulls.extend(plan.pulls.iter().cloned());

        match write_day(provider, diff, &plan, cancel).await {
            Ok(DayOutcome::Created(routine_id)) => {
                AppLogger::log_sync_day(diff.day, "created", Some(&routine_id), true);
                result.created_routine_ids.insert(diff.day, routine_id);
            }
            Ok(DayOutcome::Updated) => {
                AppLogger::log_sync_day(diff.day, "updated", diff.routine_id.as_deref(), true);
                result.updated.push(diff.day);
            }
            Ok(DayOutcome::Unchanged) => {
                AppLogger::log_sync_day(diff.day, "unchanged", diff.routine_id.as_deref(), true);
                result.unchanged.push(diff.day);
            }
            Err(error) if error.is_cancelled() => {
                warn!(day = %diff.day, "Sync cancelled during day write");
                result.cancelled = true;
                break;
            }
            Err(error) => {
                AppLogger::log_sync_day(diff.day, "failed", diff.routine_id.as_deref(), false);
                warn!(day = %diff.day, error = %error, "Day routine write failed");
                result.errors.push(DaySyncError {
                    day: diff.day,
                    error,
                });
            }
        }
    }

    result
}

/// Store with every pulled weight adopted
///
/// Only `current_weight` changes; stage and provenance are left alone.
#[must_use]
pub fn apply_pull_updates(store: &ProgressionStore, pulls: &[PullUpdate]) -> ProgressionStore {
    let mut next = store.clone();
    for pull in pulls {
        if let Some(state) = next.get_mut(&pull.progression_key) {
            state.current_weight = pull.weight;
        }
    }
    next
}

/// Program with routines created by `result` recorded against their days
#[must_use]
pub fn apply_created_routine_ids(program: &ProgramConfig, result: &SyncResult) -> ProgramConfig {
    let mut next = program.clone();
    next.routine_ids.extend(
        result
            .created_routine_ids
            .iter()
            .map(|(day, id)| (*day, id.clone())),
    );
    next
}
