// ABOUTME: Remote routine models and the create/update payload
// ABOUTME: A routine is the prescribed day template the lifter starts workouts from
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{LoggedSet, SetType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prescribed set in a routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineSet {
    /// Kind of set
    #[serde(rename = "type", default)]
    pub set_type: SetType,
    /// Prescribed load (kg)
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Prescribed reps
    #[serde(default)]
    pub reps: Option<u32>,
}

impl LoggedSet for RoutineSet {
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

/// Exercise entry inside a routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExercise {
    /// Remote exercise template identifier
    pub exercise_template_id: String,
    /// Remote exercise title (read-only on the remote side)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Rest between sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
    /// Free-text notes shown to the lifter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Prescribed sets
    #[serde(default)]
    pub sets: Vec<RoutineSet>,
}

/// Routine stored on the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    /// Remote routine id
    pub id: String,
    /// Display name chosen by the lifter or by us on creation
    pub title: String,
    /// Folder the routine lives in
    #[serde(default)]
    pub folder_id: Option<u64>,
    /// Last remote modification
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Exercises in routine order
    #[serde(default)]
    pub exercises: Vec<RoutineExercise>,
}

impl Routine {
    /// Entry for a remote exercise template
    #[must_use]
    pub fn exercise(&self, template_id: &str) -> Option<&RoutineExercise> {
        self.exercises
            .iter()
            .find(|e| e.exercise_template_id == template_id)
    }
}

/// Body sent when creating or replacing a routine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutinePayload {
    /// Routine title
    pub title: String,
    /// Target folder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
    /// Routine notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Exercises in routine order
    pub exercises: Vec<RoutineExercise>,
}
