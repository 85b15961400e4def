// ABOUTME: Progression predictor configuration
// ABOUTME: Horizon, training frequency, confidence decay and floor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigError;
use crate::constants::prediction::{MAX_TRAINING_DAYS_PER_WEEK, MAX_WEEKS_AHEAD};
use serde::{Deserialize, Serialize};

/// Tuning for `ProgressionPredictor`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// How many weeks to simulate
    pub weeks_ahead: u32,
    /// Training sessions per week across the whole rotation
    pub training_days_per_week: f64,
    /// Multiplicative confidence decay per simulated workout
    pub confidence_decay: f64,
    /// Confidence never drops below this value
    pub min_confidence: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            weeks_ahead: 12,
            training_days_per_week: 3.0,
            confidence_decay: 0.97,
            min_confidence: 0.1,
        }
    }
}

impl PredictionConfig {
    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRange` for a horizon outside
    /// `1..=MAX_WEEKS_AHEAD`, a frequency outside `(0, 7]`, or a decay or floor
    /// outside `0..=1`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weeks_ahead == 0 {
            return Err(ConfigError::InvalidRange("weeks_ahead must be at least 1"));
        }
        if self.weeks_ahead > MAX_WEEKS_AHEAD {
            return Err(ConfigError::InvalidRange("weeks_ahead must be at most 104"));
        }
        if !(self.training_days_per_week > 0.0
            && self.training_days_per_week <= MAX_TRAINING_DAYS_PER_WEEK)
        {
            return Err(ConfigError::InvalidRange(
                "training_days_per_week must be in (0, 7]",
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_decay) {
            return Err(ConfigError::InvalidRange(
                "confidence_decay must be between 0 and 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::InvalidRange(
                "min_confidence must be between 0 and 1",
            ));
        }
        Ok(())
    }
}
