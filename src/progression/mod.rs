// ABOUTME: Progression workflow: pending-change generation, application, history, and import
// ABOUTME: Everything here is a pure function from inputs to new values; nothing mutates in place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Progression Workflow
//!
//! 1. A workout is analysed into per-exercise rep logs
//!    ([`crate::intelligence::workout_analyzer`])
//! 2. [`pending_changes`] runs the calculator over each log and produces
//!    reviewable [`PendingChange`]s
//! 3. [`applier`] folds accepted changes into a new progression store
//! 4. [`history`] records each applied change for the predictor
//!
//! [`bootstrap`] seeds the store from routines that already exist remotely.

/// Pending-change application
pub mod applier;
/// State import from existing routines
pub mod bootstrap;
/// Exercise history recording
pub mod history;
/// Pending-change generation
pub mod pending_changes;

pub use applier::{apply_all_pending_changes, apply_pending_change};
pub use bootstrap::{bootstrap_from_routines, BootstrapReport, ManualInputRequired};
pub use history::{history_entry_for, record_history};
pub use pending_changes::{
    create_pending_change, generate_pending_changes, pending_changes_for_workouts, PendingChange,
    WorkoutProvenance,
};
