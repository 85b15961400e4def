// ABOUTME: Logged workout models as returned by the remote routine service
// ABOUTME: Workouts, exercises, typed sets, and the LoggedSet view shared with routines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of set as recorded by the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetType {
    /// Warm-up set, ignored by progression
    Warmup,
    /// Working set
    #[default]
    Normal,
    /// Set taken to failure, ignored by progression
    Failure,
    /// Drop set, counted towards reps
    Dropset,
}

/// Read-only view over a set, implemented by logged and prescribed sets
pub trait LoggedSet {
    /// Kind of set
    fn set_type(&self) -> SetType;
    /// Load in kilograms, when recorded
    fn weight_kg(&self) -> Option<f64>;
    /// Repetitions, when recorded
    fn reps(&self) -> Option<u32>;
}

/// One set in a completed workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Kind of set
    #[serde(rename = "type", default)]
    pub set_type: SetType,
    /// Load (kg)
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Repetitions performed
    #[serde(default)]
    pub reps: Option<u32>,
}

impl WorkoutSet {
    /// Working set with weight and reps
    #[must_use]
    pub const fn normal(weight_kg: f64, reps: u32) -> Self {
        Self {
            set_type: SetType::Normal,
            weight_kg: Some(weight_kg),
            reps: Some(reps),
        }
    }
}

impl LoggedSet for WorkoutSet {
    fn set_type(&self) -> SetType {
        self.set_type
    }

    fn weight_kg(&self) -> Option<f64> {
        self.weight_kg
    }

    fn reps(&self) -> Option<u32> {
        self.reps
    }
}

/// Exercise entry inside a completed workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Remote exercise title
    #[serde(default)]
    pub title: String,
    /// Remote exercise template identifier
    pub exercise_template_id: String,
    /// Sets in the order they were performed
    #[serde(default)]
    pub sets: Vec<WorkoutSet>,
}

/// Completed workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Remote workout id
    pub id: String,
    /// Workout title
    #[serde(default)]
    pub title: String,
    /// Routine the workout was started from, if any
    #[serde(default)]
    pub routine_id: Option<String>,
    /// When the workout started
    pub start_time: DateTime<Utc>,
    /// Exercises in the order they were performed
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}
