// ABOUTME: Core data models and types for GZCLP progression tracking
// ABOUTME: Re-exports programme layout, progression state, workouts, routines, and history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! ## Design Principles
//!
//! - **Derived tiers**: a tier is never stored, it is a function of `(role, day)`
//! - **Typed identity**: progression keys are a tagged union, serialized to the
//!   legacy string form only at the persistence boundary
//! - **Kilograms inside**: every stored weight is kg; display units are applied
//!   by the calculator only
//!
//! ## Core Models
//!
//! - `Role`, `Day`, `Tier`, `ProgramConfig`: the fixed A1/B1/A2/B2 layout
//! - `ProgressionKey`, `ProgressionState`, `ProgressionStore`: stored progress
//! - `Workout`, `Routine`: remote service documents
//! - `HistoryEntry`, `ExerciseHistory`: append-only outcomes for prediction

mod history;
mod program;
mod progression;
mod routine;
mod units;
mod workout;

pub use history::{ExerciseHistory, HistoryBook, HistoryEntry};
pub use program::{
    derive_tier, Day, ExerciseConfig, MainLift, MuscleGroup, ProgramConfig, Role, Tier,
};
pub use progression::{
    weights_differ, ChangeType, ProgressionKey, ProgressionState, ProgressionStore, RepScheme,
    Stage,
};
pub use routine::{Routine, RoutineExercise, RoutinePayload, RoutineSet};
pub use units::WeightUnit;
pub use workout::{LoggedSet, SetType, Workout, WorkoutExercise, WorkoutSet};
