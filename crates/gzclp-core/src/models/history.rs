// ABOUTME: Append-only exercise history consumed by the progression predictor
// ABOUTME: Entries stay in chronological order regardless of insertion order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ChangeType, ProgressionKey, Stage, Tier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one workout for one progression key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Workout date
    pub date: DateTime<Utc>,
    /// Remote workout id
    pub workout_id: String,
    /// Weight attempted (kg)
    pub weight: f64,
    /// Stage attempted
    pub stage: Stage,
    /// Tier attempted
    pub tier: Tier,
    /// Whether the prescription was met
    pub success: bool,
    /// Transition the workout produced
    pub change_type: ChangeType,
    /// Final-set reps for AMRAP tiers
    #[serde(default)]
    pub amrap_reps: Option<u32>,
}

/// Chronological history for one progression key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseHistory {
    entries: Vec<HistoryEntry>,
}

impl ExerciseHistory {
    /// Empty history
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an entry, keeping the sequence ordered by date
    ///
    /// Entries dated equal to an existing one land after it. Nothing is ever
    /// removed or rewritten.
    pub fn append(&mut self, entry: HistoryEntry) {
        let position = self.entries.partition_point(|e| e.date <= entry.date);
        self.entries.insert(position, entry);
    }

    /// Entries oldest first
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no workouts were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a workout was already recorded (re-applying is idempotent)
    #[must_use]
    pub fn contains_workout(&self, workout_id: &str) -> bool {
        self.entries.iter().any(|e| e.workout_id == workout_id)
    }
}

impl FromIterator<HistoryEntry> for ExerciseHistory {
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        let mut history = Self::new();
        for entry in iter {
            history.append(entry);
        }
        history
    }
}

/// History for every progression key
pub type HistoryBook = BTreeMap<ProgressionKey, ExerciseHistory>;
