// ABOUTME: GZCLP progression algorithms: tier state machine, stage detection, forecasting
// ABOUTME: Pure functions over core models; no I/O and no shared mutable state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! Progression intelligence for GZCLP.
//!
//! Every algorithm here is a pure function of its inputs, so the sync layer can
//! call them freely from concurrent tasks and tests can drive them directly.

// Re-export gzclp-core modules so algorithms can keep `use crate::models::*` etc.
pub use gzclp_core::constants;
pub use gzclp_core::models;

/// Algorithm configuration (prediction tuning)
pub mod config;
/// Deterministic forward simulation of a progression key
pub mod performance_prediction;
/// Per-tier weight/stage state machine
pub mod progression_calculator;
/// Stage inference from prescribed or logged sets
pub mod stage_detector;

pub use config::IntelligenceConfig;
pub use performance_prediction::{
    HistoryStatistics, PredictedWorkout, PredictionInput, ProgressionForecast,
    ProgressionPredictor,
};
pub use progression_calculator::{ProgressionCalculator, ProgressionResult};
pub use stage_detector::{DetectionConfidence, StageDetection, StageDetector};
