// ABOUTME: Push preview: local progression weights paired with the remote day routines
// ABOUTME: Also holds the per-exercise push/pull/skip selection and its defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::algorithms::StageDetector;
use crate::errors::AppResult;
use crate::models::{
    weights_differ, Day, ProgramConfig, ProgressionKey, ProgressionStore, Routine, Stage, Tier,
};
use crate::providers::{find_routine, ProviderResult, RoutineProvider};

/// What to do with one exercise during sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncAction {
    /// Write the local weight to the remote routine
    Push,
    /// Adopt the remote weight locally
    Pull,
    /// Leave both sides as they are
    Skip,
}

/// Local vs. remote weight for one exercise of a day routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDiff {
    /// Local state key
    pub progression_key: ProgressionKey,
    /// Configured exercise id
    pub exercise_id: String,
    /// Display name
    pub exercise_name: String,
    /// Remote exercise template id
    pub template_id: String,
    /// Tier held on this day
    pub tier: Tier,
    /// Local stage
    pub stage: Stage,
    /// Local weight (kg)
    pub local_weight: f64,
    /// Weight in the remote routine, when present (kg)
    pub remote_weight: Option<f64>,
    /// Whether the two sides disagree
    pub changed: bool,
}

/// Diff for one day routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayDiff {
    /// Rotation day
    pub day: Day,
    /// Remote routine id, when the routine exists remotely
    pub routine_id: Option<String>,
    /// Remote routine title, when the routine exists remotely
    pub routine_title: Option<String>,
    /// Exercises in T1, T2, T3 order
    pub exercises: Vec<ExerciseDiff>,
}

impl DayDiff {
    /// Whether the remote routine exists
    #[must_use]
    pub const fn has_remote(&self) -> bool {
        self.routine_id.is_some()
    }

    /// Whether any exercise differs
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.exercises.iter().any(|e| e.changed)
    }
}

/// Diff for every day of the rotation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushPreview {
    /// Days in rotation order
    pub days: Vec<DayDiff>,
}

impl PushPreview {
    /// Number of exercises that differ across all days
    #[must_use]
    pub fn changed_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|d| &d.exercises)
            .filter(|e| e.changed)
            .count()
    }
}

/// Chosen action per `(day, key)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSelection {
    actions: BTreeMap<(Day, ProgressionKey), SyncAction>,
}

impl SyncSelection {
    /// `Push` for every changed exercise, `Skip` otherwise
    #[must_use]
    pub fn default_for(preview: &PushPreview) -> Self {
        let actions = preview
            .days
            .iter()
            .flat_map(|day| {
                day.exercises.iter().map(move |e| {
                    let action = if e.changed {
                        SyncAction::Push
                    } else {
                        SyncAction::Skip
                    };
                    ((day.day, e.progression_key.clone()), action)
                })
            })
            .collect();
        Self { actions }
    }

    /// Override one exercise on one day
    pub fn set(&mut self, day: Day, key: ProgressionKey, action: SyncAction) {
        self.actions.insert((day, key), action);
    }

    /// Override `key` on every day it appears
    pub fn set_all_for_key(&mut self, key: &ProgressionKey, action: SyncAction) {
        for ((_, k), value) in &mut self.actions {
            if k == key {
                *value = action;
            }
        }
    }

    /// Action for an exercise; unselected exercises are skipped
    #[must_use]
    pub fn action(&self, day: Day, key: &ProgressionKey) -> SyncAction {
        self.actions
            .get(&(day, key.clone()))
            .copied()
            .unwrap_or(SyncAction::Skip)
    }
}

async fn fetch_day_routine(
    provider: &dyn RoutineProvider,
    day: Day,
    routine_id: Option<&str>,
) -> ProviderResult<Option<Routine>> {
    match routine_id {
        Some(id) => find_routine(provider, id).await,
        None => {
            debug!(day = %day, "No routine id recorded for day");
            Ok(None)
        }
    }
}

fn diff_day(
    day: Day,
    program: &ProgramConfig,
    store: &ProgressionStore,
    routine: Option<&Routine>,
) -> DayDiff {
    let mut exercises = Vec::new();
    for (config, tier) in program.day_exercises(day) {
        let Some(key) = config
            .role
            .and_then(|role| ProgressionKey::for_exercise(role, &config.id, tier))
        else {
            continue;
        };
        let Some(state) = store.get(&key) else {
            warn!(
                day = %day,
                progression_key = %key,
                "No local progression state; exercise left out of preview"
            );
            continue;
        };
        let remote_weight = routine
            .and_then(|r| r.exercise(&config.template_id))
            .and_then(|e| StageDetector::extract_weight(&e.sets));
        let changed =
            remote_weight.is_none_or(|remote| weights_differ(state.current_weight, remote));
        let exercise_name = match key {
            ProgressionKey::MainLift { .. } => format!("{tier} {}", config.name),
            ProgressionKey::Accessory { .. } => config.name.clone(),
        };
        exercises.push(ExerciseDiff {
            progression_key: key,
            exercise_id: config.id.clone(),
            exercise_name,
            template_id: config.template_id.clone(),
            tier,
            stage: state.stage,
            local_weight: state.current_weight,
            remote_weight,
            changed,
        });
    }

    DayDiff {
        day,
        routine_id: routine.map(|r| r.id.clone()),
        routine_title: routine.map(|r| r.title.clone()),
        exercises,
    }
}

/// Compare local state with every day routine
///
/// The four remote reads run concurrently. A day with no recorded routine id,
/// or whose routine no longer exists, is previewed as absent remotely.
///
/// # Errors
///
/// Returns the first remote read failure other than not-found
pub async fn build_push_preview(
    provider: &dyn RoutineProvider,
    program: &ProgramConfig,
    store: &ProgressionStore,
) -> AppResult<PushPreview> {
    let fetches = Day::ALL
        .into_iter()
        .map(|day| fetch_day_routine(provider, day, program.routine_id(day)));
    let routines = join_all(fetches).await;

    let mut days = Vec::with_capacity(Day::ALL.len());
    for (day, routine) in Day::ALL.into_iter().zip(routines) {
        let routine = routine?;
        days.push(diff_day(day, program, store, routine.as_ref()));
    }
    Ok(PushPreview { days })
}
