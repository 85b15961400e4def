// ABOUTME: Records applied progression changes as exercise history entries
// ABOUTME: Recording is idempotent per workout so re-applying a batch never duplicates entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{HistoryBook, HistoryEntry};
use crate::progression::pending_changes::PendingChange;

/// History entry describing the session that produced `change`
///
/// The entry records what was lifted, so the weight is the observed weight
/// when it differed from the stored one.
#[must_use]
pub fn history_entry_for(change: &PendingChange) -> HistoryEntry {
    HistoryEntry {
        date: change.workout_date,
        workout_id: change.workout_id.clone(),
        weight: change.attempted_weight(),
        stage: change.current_stage,
        tier: change.tier,
        success: change.success,
        change_type: change.change_type,
        amrap_reps: change.amrap_reps,
    }
}

/// History with an entry appended for each change not yet recorded
#[must_use]
pub fn record_history(book: &HistoryBook, changes: &[PendingChange]) -> HistoryBook {
    let mut next = book.clone();
    for change in changes {
        let history = next.entry(change.progression_key.clone()).or_default();
        if history.contains_workout(&change.workout_id) {
            continue;
        }
        history.append(history_entry_for(change));
    }
    next
}
