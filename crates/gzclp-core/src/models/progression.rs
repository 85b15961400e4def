// ABOUTME: Progression identity and state models for per-tier GZCLP progress
// ABOUTME: Tagged progression keys, stages, rep schemes, change types, and stored state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{MainLift, Role, Tier};
use crate::constants::progression::{
    T2_REQUIRED_SETS, T3_REQUIRED_SETS, T3_TARGET_REPS, WEIGHT_EPSILON,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Whether two kilogram weights differ by more than the shared epsilon
#[must_use]
pub fn weights_differ(a: f64, b: f64) -> bool {
    (a - b).abs() > WEIGHT_EPSILON
}

/// Identity under which a tier's numeric state is stored
///
/// Main lifts are addressed by `(lift, tier)` because the same exercise carries
/// separate T1 and T2 progress; accessories by their exercise id. The persisted
/// form is `"squat-T1"` for main lifts and the raw id for accessories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProgressionKey {
    /// T1 or T2 slot of a main lift
    MainLift {
        /// Lift occupying the slot
        lift: MainLift,
        /// `Tier::T1` or `Tier::T2`
        tier: Tier,
    },
    /// Accessory progressed under T3 rules
    Accessory {
        /// Configured exercise id
        exercise_id: String,
    },
}

impl ProgressionKey {
    /// Build the key for an exercise trained at `tier`
    ///
    /// Returns `None` for roles that are never progressed and for tier/role
    /// combinations that cannot occur (a main lift at T3, an accessory at T1).
    #[must_use]
    pub fn for_exercise(role: Role, exercise_id: &str, tier: Tier) -> Option<Self> {
        match (role.main_lift(), tier) {
            (Some(lift), Tier::T1 | Tier::T2) => Some(Self::MainLift { lift, tier }),
            (None, Tier::T3) if role == Role::T3 => Some(Self::Accessory {
                exercise_id: exercise_id.to_owned(),
            }),
            _ => None,
        }
    }

    /// Shorthand for a main-lift key
    #[must_use]
    pub const fn main_lift(lift: MainLift, tier: Tier) -> Self {
        Self::MainLift { lift, tier }
    }

    /// Shorthand for an accessory key
    #[must_use]
    pub fn accessory(exercise_id: impl Into<String>) -> Self {
        Self::Accessory {
            exercise_id: exercise_id.into(),
        }
    }

    /// Tier implied by the key
    #[must_use]
    pub const fn tier(&self) -> Tier {
        match self {
            Self::MainLift { tier, .. } => *tier,
            Self::Accessory { .. } => Tier::T3,
        }
    }
}

impl fmt::Display for ProgressionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainLift { lift, tier } => write!(f, "{}-{}", lift.as_str(), tier.as_str()),
            Self::Accessory { exercise_id } => f.write_str(exercise_id),
        }
    }
}

impl FromStr for ProgressionKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let main = s.rsplit_once('-').and_then(|(lift, tier)| {
            let lift = MainLift::from_key_str(lift)?;
            let tier = match tier {
                "T1" => Tier::T1,
                "T2" => Tier::T2,
                _ => return None,
            };
            Some(Self::MainLift { lift, tier })
        });
        Ok(main.unwrap_or_else(|| Self::accessory(s)))
    }
}

impl From<String> for ProgressionKey {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(key) => key,
            Err(never) => match never {},
        }
    }
}

impl From<ProgressionKey> for String {
    fn from(key: ProgressionKey) -> Self {
        key.to_string()
    }
}

/// Difficulty stage within a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stage {
    /// Stage 0 (T1 5x3+, T2 3x10, T3 3x15+)
    #[default]
    First,
    /// Stage 1 (T1 6x2+, T2 3x8)
    Second,
    /// Stage 2 (T1 10x1+, T2 3x6)
    Third,
}

impl Stage {
    /// Numeric stage (0-2)
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }

    /// Stage entered after a failure, `None` at the last stage
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::First => Some(Self::Second),
            Self::Second => Some(Self::Third),
            Self::Third => None,
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::First),
            1 => Ok(Self::Second),
            2 => Ok(Self::Third),
            other => Err(format!("stage must be 0, 1 or 2, got {other}")),
        }
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.index()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Prescribed sets x reps for a tier at a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepScheme {
    /// Sets that must be logged
    pub sets: u32,
    /// Rep target for each required set
    pub reps: u32,
    /// Whether the final set is taken to failure
    pub amrap: bool,
}

impl RepScheme {
    /// Scheme for `tier` at `stage`; T3 has a single scheme
    #[must_use]
    pub const fn for_stage(tier: Tier, stage: Stage) -> Self {
        match (tier, stage) {
            (Tier::T1, Stage::First) => Self::new(5, 3, true),
            (Tier::T1, Stage::Second) => Self::new(6, 2, true),
            (Tier::T1, Stage::Third) => Self::new(10, 1, true),
            (Tier::T2, Stage::First) => Self::new(T2_REQUIRED_SETS, 10, false),
            (Tier::T2, Stage::Second) => Self::new(T2_REQUIRED_SETS, 8, false),
            (Tier::T2, Stage::Third) => Self::new(T2_REQUIRED_SETS, 6, false),
            (Tier::T3, _) => Self::new(T3_REQUIRED_SETS, T3_TARGET_REPS, true),
        }
    }

    const fn new(sets: u32, reps: u32, amrap: bool) -> Self {
        Self { sets, reps, amrap }
    }
}

impl fmt::Display for RepScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.sets, self.reps)?;
        if self.amrap {
            f.write_str("+")?;
        }
        Ok(())
    }
}

/// Kind of transition a workout produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// Weight goes up, stage unchanged
    Progress,
    /// Weight unchanged, next stage
    StageChange,
    /// Weight reduced, back to stage 0
    Deload,
    /// Nothing changes (T3 miss)
    Repeat,
}

/// Stored numeric state for one progression key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// Exercise the state belongs to
    pub exercise_id: String,
    /// Working weight (kg)
    pub current_weight: f64,
    /// Current stage
    #[serde(default)]
    pub stage: Stage,
    /// Weight the current cycle started from; changes only on deload (kg)
    pub base_weight: f64,
    /// Last workout that moved this state
    #[serde(default)]
    pub last_workout_id: Option<String>,
    /// Date of that workout
    #[serde(default)]
    pub last_workout_date: Option<DateTime<Utc>>,
    /// Best AMRAP reps recorded
    #[serde(default)]
    pub amrap_record: u32,
    /// When the AMRAP record was set
    #[serde(default)]
    pub amrap_record_date: Option<DateTime<Utc>>,
    /// Workout that set the AMRAP record
    #[serde(default)]
    pub amrap_record_workout_id: Option<String>,
}

impl ProgressionState {
    /// Fresh state at `weight`, stage 0
    #[must_use]
    pub fn new(exercise_id: impl Into<String>, weight: f64) -> Self {
        Self::at_stage(exercise_id, weight, Stage::First)
    }

    /// Fresh state at `weight` and `stage` (used when importing)
    #[must_use]
    pub fn at_stage(exercise_id: impl Into<String>, weight: f64, stage: Stage) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            current_weight: weight,
            stage,
            base_weight: weight,
            last_workout_id: None,
            last_workout_date: None,
            amrap_record: 0,
            amrap_record_date: None,
            amrap_record_workout_id: None,
        }
    }
}

/// All stored progression state
pub type ProgressionStore = BTreeMap<ProgressionKey, ProgressionState>;
