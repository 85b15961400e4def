// ABOUTME: Push preview and selective sync between local progression and remote day routines
// ABOUTME: Preview reads run concurrently; reconciliation writes run one day at a time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Local/remote diff and selection
pub mod preview;
/// Selective sync
pub mod reconciler;
/// Routine payload construction
pub mod routine_builder;

pub use preview::{
    build_push_preview, DayDiff, ExerciseDiff, PushPreview, SyncAction, SyncSelection,
};
pub use reconciler::{
    apply_created_routine_ids, apply_pull_updates, routine_title, sync_with_selection,
    DaySyncError, PullUpdate, SyncResult,
};
pub use routine_builder::{build_routine_payload, PlannedExercise};
