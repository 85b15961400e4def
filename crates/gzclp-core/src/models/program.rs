// ABOUTME: Programme layout models for the GZCLP four-day rotation
// ABOUTME: Roles, days, tiers, the role/day tier table, and per-exercise configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ProgressionKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The four main barbell lifts, each owning one T1 and one T2 slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainLift {
    /// Back squat
    Squat,
    /// Bench press
    Bench,
    /// Overhead press
    Ohp,
    /// Conventional deadlift
    Deadlift,
}

impl MainLift {
    /// All main lifts in display order
    pub const ALL: [Self; 4] = [Self::Squat, Self::Bench, Self::Ohp, Self::Deadlift];

    /// Identifier used in persisted progression keys
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::Bench => "bench",
            Self::Ohp => "ohp",
            Self::Deadlift => "deadlift",
        }
    }

    /// Human-readable lift name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Squat => "Squat",
            Self::Bench => "Bench Press",
            Self::Ohp => "Overhead Press",
            Self::Deadlift => "Deadlift",
        }
    }

    /// Which increment family the lift uses
    #[must_use]
    pub const fn muscle_group(self) -> MuscleGroup {
        match self {
            Self::Squat | Self::Deadlift => MuscleGroup::Lower,
            Self::Bench | Self::Ohp => MuscleGroup::Upper,
        }
    }

    /// Parse the persisted identifier
    #[must_use]
    pub fn from_key_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lift| lift.as_str() == value)
    }
}

impl fmt::Display for MainLift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Role assigned to a configured exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Squat main-lift slot
    Squat,
    /// Bench main-lift slot
    Bench,
    /// Overhead press main-lift slot
    Ohp,
    /// Deadlift main-lift slot
    Deadlift,
    /// Accessory work progressed under T3 rules
    T3,
    /// Warm-up movement, never progressed
    Warmup,
    /// Cool-down movement, never progressed
    Cooldown,
}

impl Role {
    /// Main lift this role occupies, if any
    #[must_use]
    pub const fn main_lift(self) -> Option<MainLift> {
        match self {
            Self::Squat => Some(MainLift::Squat),
            Self::Bench => Some(MainLift::Bench),
            Self::Ohp => Some(MainLift::Ohp),
            Self::Deadlift => Some(MainLift::Deadlift),
            Self::T3 | Self::Warmup | Self::Cooldown => None,
        }
    }

    /// Whether the role is one of the four exclusive main-lift roles
    #[must_use]
    pub const fn is_main_lift(self) -> bool {
        self.main_lift().is_some()
    }
}

impl From<MainLift> for Role {
    fn from(lift: MainLift) -> Self {
        match lift {
            MainLift::Squat => Self::Squat,
            MainLift::Bench => Self::Bench,
            MainLift::Ohp => Self::Ohp,
            MainLift::Deadlift => Self::Deadlift,
        }
    }
}

/// Progression tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// Heavy, AMRAP-terminated main work
    T1,
    /// Moderate-volume main work
    T2,
    /// High-rep accessory work
    T3,
}

impl Tier {
    /// Short label ("T1")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::T1 => "T1",
            Self::T2 => "T2",
            Self::T3 => "T3",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Increment family for weight progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    /// Pressing and pulling movements (small increments)
    #[default]
    Upper,
    /// Squats, hinges and leg work (large increments)
    Lower,
}

/// Training day in the A1/B1/A2/B2 rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    /// Day A1: T1 squat, T2 bench
    A1,
    /// Day B1: T1 overhead press, T2 deadlift
    B1,
    /// Day A2: T1 bench, T2 squat
    A2,
    /// Day B2: T1 deadlift, T2 overhead press
    B2,
}

/// T1 and T2 main lift for each day, in rotation order
const DAY_LAYOUT: [(Day, MainLift, MainLift); 4] = [
    (Day::A1, MainLift::Squat, MainLift::Bench),
    (Day::B1, MainLift::Ohp, MainLift::Deadlift),
    (Day::A2, MainLift::Bench, MainLift::Squat),
    (Day::B2, MainLift::Deadlift, MainLift::Ohp),
];

impl Day {
    /// All days in rotation order
    pub const ALL: [Self; 4] = [Self::A1, Self::B1, Self::A2, Self::B2];

    /// Short label ("A1")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::B1 => "B1",
            Self::A2 => "A2",
            Self::B2 => "B2",
        }
    }

    /// Main lift performed as T1 on this day
    #[must_use]
    pub fn t1_lift(self) -> MainLift {
        Self::layout(self).1
    }

    /// Main lift performed as T2 on this day
    #[must_use]
    pub fn t2_lift(self) -> MainLift {
        Self::layout(self).2
    }

    fn layout(day: Self) -> (Self, MainLift, MainLift) {
        DAY_LAYOUT[day as usize]
    }

    /// Parse a day label, case-insensitive
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier an exercise with `role` is trained at on `day`
///
/// Total over every `(role, day)` pair: `None` means the role is never
/// progressed (warm-up, cool-down) or the main lift is not scheduled that day.
#[must_use]
pub fn derive_tier(role: Role, day: Day) -> Option<Tier> {
    match role.main_lift() {
        Some(lift) if day.t1_lift() == lift => Some(Tier::T1),
        Some(lift) if day.t2_lift() == lift => Some(Tier::T2),
        Some(_) => None,
        None if role == Role::T3 => Some(Tier::T3),
        None => None,
    }
}

/// A configured exercise linked to a remote exercise template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    /// Local exercise id (also the accessory progression key)
    pub id: String,
    /// Display name
    pub name: String,
    /// Remote exercise template identifier
    pub template_id: String,
    /// Assigned role; unassigned exercises are ignored by progression
    #[serde(default)]
    pub role: Option<Role>,
    /// Increment family override for T3 work
    #[serde(default)]
    pub muscle_group: Option<MuscleGroup>,
}

impl ExerciseConfig {
    /// Increment family: fixed for main lifts, configured (default upper) otherwise
    #[must_use]
    pub fn muscle_group(&self) -> MuscleGroup {
        self.role
            .and_then(Role::main_lift)
            .map_or_else(|| self.muscle_group.unwrap_or_default(), MainLift::muscle_group)
    }
}

/// Programme configuration: exercises, T3 schedule, remote routine ids, unit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// Configured exercises keyed by exercise id
    #[serde(default)]
    pub exercises: BTreeMap<String, ExerciseConfig>,
    /// T3 exercise ids performed on each day
    #[serde(default)]
    pub t3_schedule: BTreeMap<Day, Vec<String>>,
    /// Remote routine id currently backing each day
    #[serde(default)]
    pub routine_ids: BTreeMap<Day, String>,
    /// Display unit used for increments and rounding
    #[serde(default)]
    pub unit: super::WeightUnit,
}

impl ProgramConfig {
    /// Exercise occupying a main-lift role (roles are exclusive)
    #[must_use]
    pub fn main_lift_exercise(&self, lift: MainLift) -> Option<&ExerciseConfig> {
        let role = Role::from(lift);
        self.exercises.values().find(|e| e.role == Some(role))
    }

    /// Exercise linked to a remote template id
    #[must_use]
    pub fn find_by_template(&self, template_id: &str) -> Option<&ExerciseConfig> {
        self.exercises
            .values()
            .find(|e| e.template_id == template_id)
    }

    /// Exercises performed on `day` with their tier, ordered T1, T2, then T3s
    #[must_use]
    pub fn day_exercises(&self, day: Day) -> Vec<(&ExerciseConfig, Tier)> {
        let mut out = Vec::new();
        if let Some(t1) = self.main_lift_exercise(day.t1_lift()) {
            out.push((t1, Tier::T1));
        }
        if let Some(t2) = self.main_lift_exercise(day.t2_lift()) {
            out.push((t2, Tier::T2));
        }
        for id in self.t3_schedule.get(&day).into_iter().flatten() {
            if let Some(config) = self.exercises.get(id) {
                if config.role == Some(Role::T3) {
                    out.push((config, Tier::T3));
                }
            }
        }
        out
    }

    /// Exercise ids shaped like a main-lift key (`squat-T1`)
    ///
    /// Accessory state is stored under the exercise id, so such an id would
    /// read back as the main-lift key it resembles.
    #[must_use]
    pub fn ambiguous_exercise_ids(&self) -> Vec<&str> {
        self.exercises
            .iter()
            .flat_map(|(key, config)| [key.as_str(), config.id.as_str()])
            .filter(|id| {
                matches!(
                    id.parse::<ProgressionKey>(),
                    Ok(ProgressionKey::MainLift { .. })
                )
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Remote routine id for `day`, if one has been created
    #[must_use]
    pub fn routine_id(&self, day: Day) -> Option<&str> {
        self.routine_ids.get(&day).map(String::as_str)
    }

    /// Number of sessions per rotation in which `key` is trained
    ///
    /// Main-lift keys appear exactly once per rotation; accessory keys once for
    /// every day their exercise is scheduled.
    #[must_use]
    pub fn sessions_per_rotation(&self, key: &ProgressionKey) -> u32 {
        match key {
            ProgressionKey::MainLift { .. } => 1,
            ProgressionKey::Accessory { exercise_id } => {
                let count = self
                    .t3_schedule
                    .values()
                    .filter(|ids| ids.iter().any(|id| id == exercise_id))
                    .count();
                u32::try_from(count).unwrap_or(u32::MAX)
            }
        }
    }
}
