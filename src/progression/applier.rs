// ABOUTME: Applies accepted pending changes to the progression store
// ABOUTME: Returns a new store; weight, stage, provenance and AMRAP records are updated together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use tracing::debug;

use crate::algorithms::ProgressionCalculator;
use crate::models::{ChangeType, ProgressionStore};
use crate::progression::pending_changes::PendingChange;

fn apply_in_place(store: &mut ProgressionStore, change: &PendingChange) {
    let Some(state) = store.get_mut(&change.progression_key) else {
        debug!(
            progression_key = %change.progression_key,
            "No state for pending change; ignoring"
        );
        return;
    };

    let from_weight = state.current_weight;
    state.current_weight = change.new_weight;
    state.stage = change.new_stage;
    state.last_workout_id = Some(change.workout_id.clone());
    state.last_workout_date = Some(change.workout_date);

    if change.change_type == ChangeType::Deload {
        if let Some(base) = change.new_base_weight {
            state.base_weight = base;
        }
    }

    let record = ProgressionCalculator::updated_amrap_record(state.amrap_record, change.amrap_reps);
    if record > state.amrap_record {
        state.amrap_record = record;
        state.amrap_record_date = Some(change.workout_date);
        state.amrap_record_workout_id = Some(change.workout_id.clone());
    }

    debug!(
        progression_key = %change.progression_key,
        change_type = ?change.change_type,
        from_weight,
        to_weight = change.new_weight,
        "Pending change folded into store"
    );
}

/// Store with `change` applied
///
/// A change whose key has no state leaves the store untouched.
#[must_use]
pub fn apply_pending_change(store: &ProgressionStore, change: &PendingChange) -> ProgressionStore {
    let mut next = store.clone();
    apply_in_place(&mut next, change);
    next
}

/// Store with every change applied in order
#[must_use]
pub fn apply_all_pending_changes(
    store: &ProgressionStore,
    changes: &[PendingChange],
) -> ProgressionStore {
    let mut next = store.clone();
    for change in changes {
        apply_in_place(&mut next, change);
    }
    next
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Utc};
    use tracing::Level;
    use uuid::Uuid;

    use super::*;
    use crate::models::{MainLift, ProgressionKey, ProgressionState, RepScheme, Stage, Tier};

    fn change(key: ProgressionKey, change_type: ChangeType, amrap: Option<u32>) -> PendingChange {
        PendingChange {
            id: Uuid::new_v4(),
            progression_key: key,
            exercise_id: "squat".to_owned(),
            exercise_name: "T1 Squat".to_owned(),
            tier: Tier::T1,
            change_type,
            current_weight: 100.0,
            new_weight: 85.0,
            current_stage: Stage::Third,
            new_stage: Stage::First,
            new_base_weight: Some(85.0),
            new_scheme: RepScheme::for_stage(Tier::T1, Stage::First),
            reason: "deload".to_owned(),
            success: false,
            amrap_reps: amrap,
            discrepancy: None,
            workout_id: "w-1".to_owned(),
            workout_date: DateTime::from_timestamp(1_709_546_400, 0).unwrap_or_default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_deload_resets_base_weight_and_stage() {
        let key = ProgressionKey::main_lift(MainLift::Squat, Tier::T1);
        let mut store = ProgressionStore::new();
        store.insert(
            key.clone(),
            ProgressionState::at_stage("squat", 100.0, Stage::Third),
        );

        let next = apply_pending_change(&store, &change(key.clone(), ChangeType::Deload, Some(0)));
        let state = &next[&key];
        assert!((state.current_weight - 85.0).abs() < f64::EPSILON);
        assert!((state.base_weight - 85.0).abs() < f64::EPSILON);
        assert_eq!(state.stage, Stage::First);
        assert_eq!(state.last_workout_id.as_deref(), Some("w-1"));
        // input untouched
        assert!((store[&key].current_weight - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_amrap_record_only_moves_up() {
        let key = ProgressionKey::main_lift(MainLift::Squat, Tier::T1);
        let mut state = ProgressionState::new("squat", 100.0);
        state.amrap_record = 8;
        let mut store = ProgressionStore::new();
        store.insert(key.clone(), state);

        let lower = apply_pending_change(&store, &change(key.clone(), ChangeType::Progress, Some(5)));
        assert_eq!(lower[&key].amrap_record, 8);
        assert!(lower[&key].amrap_record_workout_id.is_none());

        let higher = apply_pending_change(&store, &change(key.clone(), ChangeType::Progress, Some(11)));
        assert_eq!(higher[&key].amrap_record, 11);
        assert_eq!(higher[&key].amrap_record_workout_id.as_deref(), Some("w-1"));
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if let Ok(mut inner) = self.0.lock() {
                inner.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_folding_logs_nothing_at_info() {
        let key = ProgressionKey::main_lift(MainLift::Squat, Tier::T1);
        let mut store = ProgressionStore::new();
        store.insert(key.clone(), ProgressionState::new("squat", 100.0));

        let captured = CapturedLog::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _ = apply_all_pending_changes(
                &store,
                &[change(key.clone(), ChangeType::Progress, Some(5))],
            );
        });

        let output = captured.0.lock().unwrap();
        assert!(output.is_empty(), "{}", String::from_utf8_lossy(&output));
    }

    #[test]
    fn test_unknown_key_is_a_no_op() {
        let store = ProgressionStore::new();
        let next = apply_pending_change(
            &store,
            &change(ProgressionKey::accessory("lat-pulldown"), ChangeType::Progress, None),
        );
        assert!(next.is_empty());
    }
}
