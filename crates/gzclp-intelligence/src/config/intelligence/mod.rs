// ABOUTME: Intelligence configuration root aggregating per-algorithm settings
// ABOUTME: Defaults match the published GZCLP forecasting assumptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Configuration error types
pub mod error;
/// Progression predictor tuning
pub mod prediction;

pub use error::ConfigError;
pub use prediction::PredictionConfig;

use serde::{Deserialize, Serialize};

/// Root configuration for all intelligence algorithms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Progression predictor settings
    #[serde(default)]
    pub prediction: PredictionConfig,
}

impl IntelligenceConfig {
    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found in any section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prediction.validate()
    }
}
