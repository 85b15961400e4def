// ABOUTME: Builds routine create/update payloads from chosen weights and stage schemes
// ABOUTME: Emits normal working sets per exercise in T1, T2, T3 order with tier rest times
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::sync::{MAIN_LIFT_REST_SECONDS, T3_REST_SECONDS};
use crate::models::{
    RepScheme, RoutineExercise, RoutinePayload, RoutineSet, SetType, Stage, Tier,
};

/// One exercise as it should appear in a day routine
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedExercise {
    /// Remote exercise template id
    pub template_id: String,
    /// Display name
    pub name: String,
    /// Tier held on this day
    pub tier: Tier,
    /// Stage whose scheme is prescribed
    pub stage: Stage,
    /// Working weight (kg)
    pub weight: f64,
}

impl PlannedExercise {
    /// Scheme prescribed for this exercise
    #[must_use]
    pub const fn scheme(&self) -> RepScheme {
        RepScheme::for_stage(self.tier, self.stage)
    }

    fn to_routine_exercise(&self) -> RoutineExercise {
        let scheme = self.scheme();
        let rest = match self.tier {
            Tier::T1 | Tier::T2 => MAIN_LIFT_REST_SECONDS,
            Tier::T3 => T3_REST_SECONDS,
        };
        RoutineExercise {
            exercise_template_id: self.template_id.clone(),
            title: Some(self.name.clone()),
            rest_seconds: Some(rest),
            notes: Some(format!("{} {scheme}", self.tier)),
            sets: (0..scheme.sets)
                .map(|_| RoutineSet {
                    set_type: SetType::Normal,
                    weight_kg: Some(self.weight),
                    reps: Some(scheme.reps),
                })
                .collect(),
        }
    }
}

/// Payload for a day routine titled `title`
#[must_use]
pub fn build_routine_payload(title: &str, exercises: &[PlannedExercise]) -> RoutinePayload {
    let mut ordered: Vec<&PlannedExercise> = exercises.iter().collect();
    ordered.sort_by_key(|e| e.tier);
    RoutinePayload {
        title: title.to_owned(),
        folder_id: None,
        notes: None,
        exercises: ordered
            .into_iter()
            .map(PlannedExercise::to_routine_exercise)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned(tier: Tier, stage: Stage, weight: f64) -> PlannedExercise {
        PlannedExercise {
            template_id: format!("tpl-{tier}"),
            name: format!("{tier} lift"),
            tier,
            stage,
            weight,
        }
    }

    #[test]
    fn test_payload_orders_by_tier_and_uses_stage_scheme() {
        let payload = build_routine_payload(
            "GZCLP Day A1",
            &[
                planned(Tier::T3, Stage::First, 40.0),
                planned(Tier::T1, Stage::Second, 100.0),
                planned(Tier::T2, Stage::Third, 60.0),
            ],
        );

        let tiers: Vec<&str> = payload
            .exercises
            .iter()
            .filter_map(|e| e.notes.as_deref())
            .collect();
        assert_eq!(tiers, vec!["T1 6x2+", "T2 3x6", "T3 3x15+"]);

        let t1 = &payload.exercises[0];
        assert_eq!(t1.sets.len(), 6);
        assert!(t1.sets.iter().all(|s| s.reps == Some(2)));
        assert_eq!(t1.rest_seconds, Some(MAIN_LIFT_REST_SECONDS));
        assert_eq!(payload.exercises[2].sets.len(), 3);
        assert_eq!(payload.exercises[2].rest_seconds, Some(T3_REST_SECONDS));
    }
}
