// ABOUTME: Tests for the deterministic progression forecaster
// ABOUTME: Covers failure cadence, deload timing, confidence decay, and history statistics
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{Duration, TimeZone, Utc};
use gzclp_intelligence::config::intelligence::{ConfigError, PredictionConfig};
use gzclp_intelligence::constants::prediction::MAX_WEEKS_AHEAD;
use gzclp_intelligence::models::{
    ChangeType, HistoryEntry, MuscleGroup, ProgressionState, Stage, Tier, WeightUnit,
};
use gzclp_intelligence::{PredictionInput, ProgressionPredictor};

fn history(outcomes: &[(Stage, bool, ChangeType)]) -> Vec<HistoryEntry> {
    let start = Utc.with_ymd_and_hms(2025, 1, 6, 18, 0, 0).unwrap();
    outcomes
        .iter()
        .enumerate()
        .map(|(i, &(stage, success, change_type))| HistoryEntry {
            date: start + Duration::days(i as i64 * 2),
            workout_id: format!("w{i}"),
            weight: 100.0,
            stage,
            tier: Tier::T1,
            success,
            change_type,
            amrap_reps: None,
        })
        .collect()
}

fn input<'a>(
    tier: Tier,
    state: &'a ProgressionState,
    history: &'a [HistoryEntry],
) -> PredictionInput<'a> {
    PredictionInput {
        tier,
        state,
        history,
        muscle_group: MuscleGroup::Lower,
        unit: WeightUnit::Kg,
        sessions_per_rotation: 1,
    }
}

#[test]
fn test_empty_history_uses_default_failure_cadence() {
    let state = ProgressionState::new("squat", 100.0);
    let forecast =
        ProgressionPredictor::predict(&input(Tier::T1, &state, &[]), &PredictionConfig::default());

    // 3 days/week over a 4-day rotation: 0.75 sessions/week, 9 over 12 weeks
    assert_eq!(forecast.predictions.len(), 9);
    let changes: Vec<_> = forecast.predictions.iter().map(|p| p.change_type).collect();
    assert_eq!(
        &changes[..6],
        &[
            ChangeType::Progress,
            ChangeType::Progress,
            ChangeType::StageChange,
            ChangeType::StageChange,
            ChangeType::Progress,
            ChangeType::Deload,
        ]
    );
    assert_eq!(forecast.weeks_to_deload, Some(7));
    assert!((forecast.predictions[5].weight - 115.0).abs() < 1e-6);
    assert!((forecast.predictions[6].weight - 100.0).abs() < 1e-6);
    assert_eq!(forecast.predictions[6].stage, Stage::First);
    assert!((forecast.statistics.failure_rate - 0.3).abs() < 1e-9);
}

#[test]
fn test_forecast_is_reproducible() {
    let state = ProgressionState::at_stage("bench", 62.5, Stage::Second);
    let past = history(&[
        (Stage::First, true, ChangeType::Progress),
        (Stage::First, false, ChangeType::StageChange),
        (Stage::Second, true, ChangeType::Progress),
    ]);
    let config = PredictionConfig::default();
    let first = ProgressionPredictor::predict(&input(Tier::T2, &state, &past), &config);
    let second = ProgressionPredictor::predict(&input(Tier::T2, &state, &past), &config);
    assert_eq!(first, second);
}

#[test]
fn test_flawless_history_never_fails() {
    let state = ProgressionState::new("deadlift", 140.0);
    let past = history(&[(Stage::First, true, ChangeType::Progress); 6]);
    let forecast =
        ProgressionPredictor::predict(&input(Tier::T1, &state, &past), &PredictionConfig::default());

    assert!(forecast.predictions.iter().all(|p| p.expected_success));
    assert_eq!(forecast.weeks_to_deload, None);
    let last = forecast.predictions.last().unwrap();
    assert!((last.weight - (140.0 + 5.0 * (forecast.predictions.len() - 1) as f64)).abs() < 1e-6);
}

#[test]
fn test_t3_simulation_repeats_on_failure() {
    let state = ProgressionState::new("lat-pulldown", 40.0);
    let forecast =
        ProgressionPredictor::predict(&input(Tier::T3, &state, &[]), &PredictionConfig::default());
    assert_eq!(forecast.predictions[2].change_type, ChangeType::Repeat);
    assert!(forecast
        .predictions
        .iter()
        .all(|p| p.change_type != ChangeType::Deload));
    assert_eq!(forecast.weeks_to_deload, None);
}

#[test]
fn test_accessory_trained_every_session_gets_more_workouts() {
    let state = ProgressionState::new("row", 50.0);
    let mut scheduled = input(Tier::T3, &state, &[]);
    scheduled.sessions_per_rotation = 4;
    let forecast = ProgressionPredictor::predict(&scheduled, &PredictionConfig::default());
    assert_eq!(forecast.predictions.len(), 36);
    assert_eq!(forecast.predictions[2].week, 1);
    assert_eq!(forecast.predictions[3].week, 2);
}

#[test]
fn test_horizon_is_capped() {
    let state = ProgressionState::new("squat", 100.0);
    let config = PredictionConfig {
        weeks_ahead: 4_000_000_000,
        ..PredictionConfig::default()
    };
    let forecast = ProgressionPredictor::predict(&input(Tier::T1, &state, &[]), &config);
    // 104 weeks at three of four sessions a week
    assert_eq!(forecast.predictions.len(), 78);
    assert!(forecast.predictions.last().unwrap().week <= MAX_WEEKS_AHEAD);

    assert_eq!(
        config.validate(),
        Err(ConfigError::InvalidRange("weeks_ahead must be at most 104"))
    );
    let longest = PredictionConfig {
        weeks_ahead: MAX_WEEKS_AHEAD,
        ..PredictionConfig::default()
    };
    assert!(longest.validate().is_ok());
}

#[test]
fn test_confidence_decays_to_the_floor() {
    let state = ProgressionState::new("ohp", 40.0);
    let config = PredictionConfig {
        weeks_ahead: 52,
        confidence_decay: 0.8,
        min_confidence: 0.1,
        ..PredictionConfig::default()
    };
    let forecast = ProgressionPredictor::predict(&input(Tier::T2, &state, &[]), &config);

    assert!((forecast.predictions[0].confidence - 0.3).abs() < 1e-9);
    assert!(forecast
        .predictions
        .windows(2)
        .all(|pair| pair[1].confidence <= pair[0].confidence));
    let last = forecast.predictions.last().unwrap();
    assert!((last.confidence - 0.1).abs() < 1e-9);
    assert!(forecast.overall_confidence < 0.3);
}

#[test]
fn test_base_confidence_grows_with_history() {
    assert!((ProgressionPredictor::base_confidence(0) - 0.3).abs() < 1e-9);
    assert!((ProgressionPredictor::base_confidence(5) - 0.5).abs() < 1e-9);
    assert!((ProgressionPredictor::base_confidence(29) - 0.7).abs() < 1e-9);
    assert!((ProgressionPredictor::base_confidence(30) - 0.85).abs() < 1e-9);
}

#[test]
fn test_statistics_from_history() {
    let past = history(&[
        (Stage::First, true, ChangeType::Progress),
        (Stage::First, false, ChangeType::StageChange),
        (Stage::Second, false, ChangeType::StageChange),
        (Stage::Third, false, ChangeType::Deload),
    ]);
    let stats = ProgressionPredictor::statistics(&past);
    assert!((stats.failure_rate - 0.75).abs() < 1e-9);
    assert!((stats.avg_workouts_per_stage - 4.0 / 3.0).abs() < 1e-9);
    assert!((stats.deload_frequency - 0.25).abs() < 1e-9);
    assert_eq!(stats.sample_size, 4);
}

#[test]
fn test_adjusted_failure_rate_is_capped() {
    assert!((ProgressionPredictor::adjusted_failure_rate(0.2, Stage::Second) - 0.3).abs() < 1e-9);
    assert!((ProgressionPredictor::adjusted_failure_rate(0.6, Stage::Third) - 0.8).abs() < 1e-9);
    assert!(!ProgressionPredictor::fails_at(0, 0.0));
    assert!(ProgressionPredictor::fails_at(0, 0.8));
    assert!(ProgressionPredictor::fails_at(3, 0.25));
    assert!(!ProgressionPredictor::fails_at(2, 0.25));
}
