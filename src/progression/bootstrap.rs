// ABOUTME: Seeds the progression store from day routines that already exist remotely
// ABOUTME: Detects stage and weight per exercise and reports what needs the lifter's input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # State Bootstrap
//!
//! A lifter who already runs GZCLP routines should not have to type every
//! weight in. Each configured exercise of each day routine is passed to the
//! stage detector; detected stages and working weights seed the store, and
//! anything the detector cannot read is reported instead of guessed.
//!
//! Days are visited in rotation order and the first routine that yields a
//! main-lift key wins, so `squat-T1` comes from A1 even though A2 also has it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::algorithms::{StageDetection, StageDetector};
use crate::models::{
    Day, ProgramConfig, ProgressionKey, ProgressionState, ProgressionStore, Routine, Stage, Tier,
};

/// An exercise whose stage or weight could not be read from its routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualInputRequired {
    /// Key to seed
    pub progression_key: ProgressionKey,
    /// Configured exercise id
    pub exercise_id: String,
    /// Tier the exercise holds on `day`
    pub tier: Tier,
    /// Day routine that was inspected
    pub day: Day,
    /// Working weight, when it could be read (kg)
    pub detected_weight: Option<f64>,
}

/// Outcome of a bootstrap run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BootstrapReport {
    /// Detected state
    pub store: ProgressionStore,
    /// Exercises awaiting manual stage or weight input
    pub manual_required: Vec<ManualInputRequired>,
}

impl BootstrapReport {
    /// Whether every configured exercise was seeded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.manual_required.is_empty()
    }

    /// Seed `key` from lifter input and drop it from the manual list
    pub fn resolve(&mut self, key: &ProgressionKey, stage: Stage, weight: f64) {
        let Some(index) = self
            .manual_required
            .iter()
            .position(|m| &m.progression_key == key)
        else {
            return;
        };
        let pending = self.manual_required.remove(index);
        let detection = StageDetection::manual(stage, pending.tier);
        self.store.insert(
            pending.progression_key,
            ProgressionState::at_stage(pending.exercise_id, weight, detection.stage),
        );
    }
}

/// Build progression state from existing day routines
///
/// Days without a routine in `routines` are ignored; the caller decides
/// whether that is acceptable.
#[must_use]
pub fn bootstrap_from_routines(
    program: &ProgramConfig,
    routines: &BTreeMap<Day, Routine>,
) -> BootstrapReport {
    let mut report = BootstrapReport::default();
    let mut seen: BTreeSet<ProgressionKey> = BTreeSet::new();

    for day in Day::ALL {
        let Some(routine) = routines.get(&day) else {
            debug!(day = %day, "No routine to import for day");
            continue;
        };
        for (config, tier) in program.day_exercises(day) {
            let Some(role) = config.role else {
                continue;
            };
            let Some(key) = ProgressionKey::for_exercise(role, &config.id, tier) else {
                continue;
            };
            if seen.contains(&key) {
                continue;
            }
            let Some(exercise) = routine.exercise(&config.template_id) else {
                debug!(
                    day = %day,
                    exercise_id = %config.id,
                    "Configured exercise missing from routine"
                );
                continue;
            };
            seen.insert(key.clone());

            let weight = StageDetector::extract_weight(&exercise.sets);
            match (StageDetector::detect(&exercise.sets, tier), weight) {
                (Some(detection), Some(weight)) => {
                    debug!(
                        progression_key = %key,
                        stage = %detection.stage,
                        weight,
                        "Detected progression state"
                    );
                    report.store.insert(
                        key,
                        ProgressionState::at_stage(config.id.clone(), weight, detection.stage),
                    );
                }
                _ => report.manual_required.push(ManualInputRequired {
                    progression_key: key,
                    exercise_id: config.id.clone(),
                    tier,
                    day,
                    detected_weight: weight,
                }),
            }
        }
    }

    info!(
        seeded = report.store.len(),
        manual = report.manual_required.len(),
        "Bootstrap finished"
    );
    report
}
