// ABOUTME: GZCLP per-tier progression state machine
// ABOUTME: Computes next weight, stage, and change type from logged reps for T1, T2, and T3
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Progression Calculator
//!
//! Pure state machine over `(tier, stage, logged reps)`:
//!
//! | Tier | Success | Failure (stage 0/1) | Failure (stage 2) |
//! |------|---------|---------------------|-------------------|
//! | T1   | +increment, AMRAP tracked | next stage | deload to 85%, stage 0 |
//! | T2   | +increment | next stage | deload to 85%, stage 0 |
//! | T3   | +increment when final set >= 25 | repeat | repeat |
//!
//! Stored weights are kilograms. The display unit is applied on entry so that
//! increments and rounding happen in the plates the lifter actually loads, and
//! results are converted back to kilograms on exit.

use crate::constants::progression::{DELOAD_FACTOR, T3_AMRAP_TARGET};
use crate::models::{
    ChangeType, MuscleGroup, ProgressionState, RepScheme, Stage, Tier, WeightUnit,
};
use serde::{Deserialize, Serialize};

/// Outcome of one workout for one progression key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionResult {
    /// Kind of transition
    pub change_type: ChangeType,
    /// Next working weight (kg)
    pub new_weight: f64,
    /// Next stage
    pub new_stage: Stage,
    /// Scheme prescribed at the next stage
    pub new_scheme: RepScheme,
    /// New cycle base weight, set only on deload (kg)
    pub new_base_weight: Option<f64>,
    /// Human-readable explanation
    pub reason: String,
    /// Whether the prescription was met
    pub success: bool,
    /// Final required-set reps (T1) or final-set reps (T3)
    pub amrap_reps: Option<u32>,
}

/// GZCLP progression rules
pub struct ProgressionCalculator;

impl ProgressionCalculator {
    /// Compute the transition produced by `reps_per_set` for `state` at `tier`
    ///
    /// Missing or short logs are failures, never errors.
    #[must_use]
    pub fn calculate(
        tier: Tier,
        state: &ProgressionState,
        reps_per_set: &[u32],
        muscle_group: MuscleGroup,
        unit: WeightUnit,
    ) -> ProgressionResult {
        match tier {
            Tier::T1 | Tier::T2 => {
                Self::calculate_main(tier, state, reps_per_set, muscle_group, unit)
            }
            Tier::T3 => Self::calculate_t3(state, reps_per_set, muscle_group, unit),
        }
    }

    /// Whether the logged reps satisfy a T1/T2 scheme
    ///
    /// Extra sets beyond the required count are ignored.
    #[must_use]
    pub fn meets_scheme(reps_per_set: &[u32], scheme: RepScheme) -> bool {
        let required = scheme.sets as usize;
        reps_per_set.len() >= required
            && reps_per_set[..required]
                .iter()
                .all(|&reps| reps >= scheme.reps)
    }

    /// Whether the logged reps satisfy the T3 prescription
    #[must_use]
    pub fn meets_t3(reps_per_set: &[u32]) -> bool {
        let scheme = RepScheme::for_stage(Tier::T3, Stage::First);
        reps_per_set.len() >= scheme.sets as usize
            && reps_per_set
                .last()
                .is_some_and(|&reps| reps >= T3_AMRAP_TARGET)
    }

    /// Round `value` to the nearest multiple of `increment`
    #[must_use]
    pub fn round_to_increment(value: f64, increment: f64) -> f64 {
        if increment <= 0.0 {
            return value;
        }
        (value / increment).round() * increment
    }

    /// Deload target in display units: 85% rounded to the increment, never below the bar
    #[must_use]
    pub fn deload_weight(display_weight: f64, increment: f64, unit: WeightUnit) -> f64 {
        Self::round_to_increment(display_weight * DELOAD_FACTOR, increment).max(unit.deload_floor())
    }

    /// Best AMRAP reps after recording `new_reps`
    #[must_use]
    pub fn updated_amrap_record(existing: u32, new_reps: Option<u32>) -> u32 {
        new_reps.map_or(existing, |reps| existing.max(reps))
    }

    fn calculate_main(
        tier: Tier,
        state: &ProgressionState,
        reps_per_set: &[u32],
        muscle_group: MuscleGroup,
        unit: WeightUnit,
    ) -> ProgressionResult {
        let scheme = RepScheme::for_stage(tier, state.stage);
        let increment = unit.increment(muscle_group);
        let display_weight = unit.from_kg(state.current_weight);

        if Self::meets_scheme(reps_per_set, scheme) {
            let amrap_reps = (tier == Tier::T1)
                .then(|| reps_per_set.get(scheme.sets as usize - 1).copied())
                .flatten();
            let new_display = display_weight + increment;
            let reason = amrap_reps.map_or_else(
                || {
                    format!(
                        "Completed {scheme}; adding {} {unit}",
                        format_weight(increment)
                    )
                },
                |reps| {
                    format!(
                        "Completed {scheme} with {reps} reps on the last set; adding {} {unit}",
                        format_weight(increment)
                    )
                },
            );
            return ProgressionResult {
                change_type: ChangeType::Progress,
                new_weight: unit.to_kg(new_display),
                new_stage: state.stage,
                new_scheme: scheme,
                new_base_weight: None,
                reason,
                success: true,
                amrap_reps,
            };
        }

        let logged = reps_per_set.len();
        if let Some(next_stage) = state.stage.next() {
            let next_scheme = RepScheme::for_stage(tier, next_stage);
            return ProgressionResult {
                change_type: ChangeType::StageChange,
                new_weight: state.current_weight,
                new_stage: next_stage,
                new_scheme: next_scheme,
                new_base_weight: None,
                reason: format!(
                    "Missed {scheme} ({logged} sets logged); moving to {next_scheme} at the same weight"
                ),
                success: false,
                amrap_reps: None,
            };
        }

        let deload_display = Self::deload_weight(display_weight, increment, unit);
        let new_weight = unit.to_kg(deload_display);
        let first_scheme = RepScheme::for_stage(tier, Stage::First);
        ProgressionResult {
            change_type: ChangeType::Deload,
            new_weight,
            new_stage: Stage::First,
            new_scheme: first_scheme,
            new_base_weight: Some(new_weight),
            reason: format!(
                "Missed {scheme} at the final stage; deloading to {} {unit} and restarting at {first_scheme}",
                format_weight(deload_display)
            ),
            success: false,
            amrap_reps: None,
        }
    }

    fn calculate_t3(
        state: &ProgressionState,
        reps_per_set: &[u32],
        muscle_group: MuscleGroup,
        unit: WeightUnit,
    ) -> ProgressionResult {
        let scheme = RepScheme::for_stage(Tier::T3, Stage::First);
        let final_reps = reps_per_set.last().copied();

        if Self::meets_t3(reps_per_set) {
            let increment = unit.increment(muscle_group);
            let new_display = unit.from_kg(state.current_weight) + increment;
            return ProgressionResult {
                change_type: ChangeType::Progress,
                new_weight: unit.to_kg(new_display),
                new_stage: Stage::First,
                new_scheme: scheme,
                new_base_weight: None,
                reason: format!(
                    "Hit {} reps on the final set (target {T3_AMRAP_TARGET}); adding {} {unit}",
                    final_reps.unwrap_or_default(),
                    format_weight(increment)
                ),
                success: true,
                amrap_reps: final_reps,
            };
        }

        let reason = if reps_per_set.len() < scheme.sets as usize {
            format!(
                "Only {} of {} sets logged; repeating the same weight",
                reps_per_set.len(),
                scheme.sets
            )
        } else {
            format!(
                "Final set reached {} reps (target {T3_AMRAP_TARGET}); repeating the same weight",
                final_reps.unwrap_or_default()
            )
        };
        ProgressionResult {
            change_type: ChangeType::Repeat,
            new_weight: state.current_weight,
            new_stage: state.stage,
            new_scheme: scheme,
            new_base_weight: None,
            reason,
            success: false,
            amrap_reps: final_reps,
        }
    }
}

/// Format a weight without trailing zeros ("102.5", "105")
#[must_use]
pub fn format_weight(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}
