// ABOUTME: Deterministic forward simulation of GZCLP progression from historical failure rates
// ABOUTME: Feeds simulated outcomes through the tier state machine; reproducible, never random
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Progression Predictor
//!
//! Estimates where a progression key is heading by replaying its observed
//! failure rate forward. Failures are placed on a fixed cadence
//! (`(i + 1) mod round(1 / rate) == 0`), so two runs over the same input always
//! agree, and each simulated workout goes through the same calculator used for
//! real workouts.

use crate::config::intelligence::PredictionConfig;
use crate::constants::prediction::{
    DEFAULT_FAILURE_RATE, DEFAULT_WORKOUTS_PER_STAGE, MAX_ADJUSTED_FAILURE_RATE,
    MAX_TRAINING_DAYS_PER_WEEK, MAX_WEEKS_AHEAD, ROTATION_LENGTH, STAGE_FAILURE_MULTIPLIERS,
};
use crate::constants::progression::T3_AMRAP_TARGET;
use crate::models::{
    ChangeType, HistoryEntry, MuscleGroup, ProgressionState, RepScheme, Stage, Tier, WeightUnit,
};
use crate::progression_calculator::ProgressionCalculator;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Confidence buckets by history length: `(sample size below, confidence)`
const CONFIDENCE_BUCKETS: [(usize, f64); 3] = [(5, 0.3), (15, 0.5), (30, 0.7)];

/// Confidence once 30 or more workouts are on record
const MAX_BASE_CONFIDENCE: f64 = 0.85;

/// What to forecast
#[derive(Debug, Clone)]
pub struct PredictionInput<'a> {
    /// Tier of the progression key
    pub tier: Tier,
    /// Current stored state
    pub state: &'a ProgressionState,
    /// Chronological history for the key
    pub history: &'a [HistoryEntry],
    /// Increment family
    pub muscle_group: MuscleGroup,
    /// Display unit
    pub unit: WeightUnit,
    /// Sessions per four-day rotation in which the key is trained
    pub sessions_per_rotation: u32,
}

/// Aggregate statistics derived from history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryStatistics {
    /// Share of workouts that missed the prescription
    pub failure_rate: f64,
    /// Average workouts spent in a stage before it changed
    pub avg_workouts_per_stage: f64,
    /// Deloads per workout
    pub deload_frequency: f64,
    /// Number of history entries considered
    pub sample_size: usize,
}

/// One simulated workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedWorkout {
    /// 1-based simulated workout number
    pub workout_index: u32,
    /// 1-based week the workout falls in
    pub week: u32,
    /// Weight attempted (kg)
    pub weight: f64,
    /// Stage attempted
    pub stage: Stage,
    /// Whether the simulation expects the prescription to be met
    pub expected_success: bool,
    /// Transition the workout produces
    pub change_type: ChangeType,
    /// Confidence in this step
    pub confidence: f64,
}

/// Forecast for one progression key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionForecast {
    /// Simulated workouts in order
    pub predictions: Vec<PredictedWorkout>,
    /// Mean confidence over all steps
    pub overall_confidence: f64,
    /// Week of the first simulated deload, if any
    pub weeks_to_deload: Option<u32>,
    /// Statistics the simulation was driven by
    pub statistics: HistoryStatistics,
}

/// Deterministic progression forecaster
pub struct ProgressionPredictor;

impl ProgressionPredictor {
    /// Simulate the next `config.weeks_ahead` weeks for one key
    ///
    /// The horizon is capped at `MAX_WEEKS_AHEAD` and the training frequency
    /// at seven sessions a week.
    #[must_use]
    pub fn predict(input: &PredictionInput<'_>, config: &PredictionConfig) -> ProgressionForecast {
        let statistics = Self::statistics(input.history);
        let base_confidence = Self::base_confidence(input.history.len());
        let workouts_per_week = Self::workouts_per_week(input.sessions_per_rotation, config);
        let total = Self::workout_count(
            workouts_per_week,
            config.weeks_ahead.min(MAX_WEEKS_AHEAD),
        );

        let mut state = input.state.clone();
        let mut predictions = Vec::with_capacity(total as usize);
        let mut weeks_to_deload = None;

        for index in 0..total {
            let adjusted = Self::adjusted_failure_rate(statistics.failure_rate, state.stage);
            let success = !Self::fails_at(index, adjusted);
            let reps = Self::simulated_reps(input.tier, state.stage, success);
            let result = ProgressionCalculator::calculate(
                input.tier,
                &state,
                &reps,
                input.muscle_group,
                input.unit,
            );

            let week = Self::week_of(index, workouts_per_week);
            if result.change_type == ChangeType::Deload && weeks_to_deload.is_none() {
                weeks_to_deload = Some(week);
            }
            predictions.push(PredictedWorkout {
                workout_index: index + 1,
                week,
                weight: state.current_weight,
                stage: state.stage,
                expected_success: result.success,
                change_type: result.change_type,
                confidence: Self::step_confidence(base_confidence, index, config),
            });

            state.current_weight = result.new_weight;
            state.stage = result.new_stage;
            if let Some(base) = result.new_base_weight {
                state.base_weight = base;
            }
        }

        let overall_confidence = if predictions.is_empty() {
            base_confidence
        } else {
            predictions.iter().map(|p| p.confidence).sum::<f64>() / predictions.len() as f64
        };

        debug!(
            exercise_id = %input.state.exercise_id,
            tier = %input.tier,
            workouts = predictions.len(),
            failure_rate = statistics.failure_rate,
            ?weeks_to_deload,
            "Progression forecast computed"
        );

        ProgressionForecast {
            predictions,
            overall_confidence,
            weeks_to_deload,
            statistics,
        }
    }

    /// Failure rate, workouts per stage and deload frequency from history
    #[must_use]
    pub fn statistics(history: &[HistoryEntry]) -> HistoryStatistics {
        if history.is_empty() {
            return HistoryStatistics {
                failure_rate: DEFAULT_FAILURE_RATE,
                avg_workouts_per_stage: DEFAULT_WORKOUTS_PER_STAGE,
                deload_frequency: 0.0,
                sample_size: 0,
            };
        }

        let total = history.len() as f64;
        let failures = history.iter().filter(|e| !e.success).count() as f64;
        let deloads = history
            .iter()
            .filter(|e| e.change_type == ChangeType::Deload)
            .count() as f64;
        let stage_runs = 1 + history
            .windows(2)
            .filter(|pair| pair[0].stage != pair[1].stage)
            .count();

        HistoryStatistics {
            failure_rate: failures / total,
            avg_workouts_per_stage: total / stage_runs as f64,
            deload_frequency: deloads / total,
            sample_size: history.len(),
        }
    }

    /// Starting confidence for a history of `samples` workouts
    #[must_use]
    pub fn base_confidence(samples: usize) -> f64 {
        CONFIDENCE_BUCKETS
            .iter()
            .find(|(below, _)| samples < *below)
            .map_or(MAX_BASE_CONFIDENCE, |(_, confidence)| *confidence)
    }

    /// Failure rate scaled by stage, capped at 0.8
    #[must_use]
    pub fn adjusted_failure_rate(failure_rate: f64, stage: Stage) -> f64 {
        let multiplier = STAGE_FAILURE_MULTIPLIERS[usize::from(stage.index())];
        (failure_rate * multiplier).min(MAX_ADJUSTED_FAILURE_RATE)
    }

    /// Whether zero-based simulated workout `index` fails
    #[must_use]
    pub fn fails_at(index: u32, adjusted_failure_rate: f64) -> bool {
        if adjusted_failure_rate <= 0.0 {
            return false;
        }
        let period = (1.0 / adjusted_failure_rate).round().max(1.0) as u64;
        (u64::from(index) + 1) % period == 0
    }

    fn step_confidence(base: f64, index: u32, config: &PredictionConfig) -> f64 {
        let exponent = i32::try_from(index).unwrap_or(i32::MAX);
        (base * config.confidence_decay.powi(exponent)).max(config.min_confidence)
    }

    fn workouts_per_week(sessions_per_rotation: u32, config: &PredictionConfig) -> f64 {
        let sessions = f64::from(sessions_per_rotation.clamp(1, ROTATION_LENGTH));
        config.training_days_per_week.clamp(0.0, MAX_TRAINING_DAYS_PER_WEEK) * sessions
            / f64::from(ROTATION_LENGTH)
    }

    fn workout_count(workouts_per_week: f64, weeks: u32) -> u32 {
        (workouts_per_week * f64::from(weeks)).ceil().max(0.0) as u32
    }

    fn week_of(index: u32, workouts_per_week: f64) -> u32 {
        (f64::from(index) / workouts_per_week).floor() as u32 + 1
    }

    /// Rep log standing in for a simulated outcome
    fn simulated_reps(tier: Tier, stage: Stage, success: bool) -> Vec<u32> {
        let scheme = RepScheme::for_stage(tier, stage);
        let mut reps = vec![scheme.reps; scheme.sets as usize];
        if tier == Tier::T3 {
            if let Some(last) = reps.last_mut() {
                *last = T3_AMRAP_TARGET;
            }
        }
        if !success {
            reps.pop();
        }
        reps
    }
}
