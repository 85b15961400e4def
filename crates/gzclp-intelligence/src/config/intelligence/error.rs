// ABOUTME: Validation error for predictor tuning values
// ABOUTME: Raised when a configured horizon, cadence, or confidence bound is out of range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Invalid algorithm configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Value outside its accepted range (e.g. a confidence above 1)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),
}
