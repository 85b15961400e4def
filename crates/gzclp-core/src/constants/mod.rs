// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for GZCLP progression rules, units, sync, and persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Unit conversion and weight increment constants
pub mod units;

/// Progression rule constants shared by the calculator, detector and predictor
pub mod progression {
    /// Weight multiplier applied on deload (T1/T2 stage 2 failure)
    pub const DELOAD_FACTOR: f64 = 0.85;
    /// Reps the final T3 set must reach for the weight to go up
    pub const T3_AMRAP_TARGET: u32 = 25;
    /// Number of sets prescribed for T3 work
    pub const T3_REQUIRED_SETS: u32 = 3;
    /// Rep target for the non-AMRAP T3 sets
    pub const T3_TARGET_REPS: u32 = 15;
    /// Number of sets prescribed for every T2 stage
    pub const T2_REQUIRED_SETS: u32 = 3;
    /// Tolerance used for every weight equality check (kg)
    pub const WEIGHT_EPSILON: f64 = 0.01;
}

/// Prediction defaults used when no history is available
pub mod prediction {
    /// Failure rate assumed with an empty history
    pub const DEFAULT_FAILURE_RATE: f64 = 0.3;
    /// Workouts per stage assumed with an empty history
    pub const DEFAULT_WORKOUTS_PER_STAGE: f64 = 8.0;
    /// Upper bound on the stage-adjusted failure rate
    pub const MAX_ADJUSTED_FAILURE_RATE: f64 = 0.8;
    /// Failure-rate multipliers for stage 0, 1 and 2
    pub const STAGE_FAILURE_MULTIPLIERS: [f64; 3] = [1.0, 1.5, 2.0];
    /// Length of the A1/B1/A2/B2 rotation in sessions
    pub const ROTATION_LENGTH: u32 = 4;
    /// Longest forecast horizon in weeks
    pub const MAX_WEEKS_AHEAD: u32 = 104;
    /// Most training sessions a week can hold
    pub const MAX_TRAINING_DAYS_PER_WEEK: f64 = 7.0;
}

/// Remote routine sync constants
pub mod sync {
    /// Title prefix used when creating a routine for a day
    pub const ROUTINE_TITLE_PREFIX: &str = "GZCLP Day";
    /// Default rest between sets for main lifts (seconds)
    pub const MAIN_LIFT_REST_SECONDS: u32 = 180;
    /// Default rest between sets for T3 work (seconds)
    pub const T3_REST_SECONDS: u32 = 90;
    /// Page size used when listing routines and workouts
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
}

/// Persisted state document constants
pub mod persistence {
    /// Current schema version written by the repositories
    pub const CURRENT_SCHEMA_VERSION: u32 = 2;
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// API key for the remote routine service
    pub const HEVY_API_KEY: &str = "HEVY_API_KEY";
    /// Base URL override for the remote routine service
    pub const HEVY_API_BASE_URL: &str = "HEVY_API_BASE_URL";
    /// Path of the JSON state document
    pub const STATE_PATH: &str = "GZCLP_STATE_PATH";
    /// Display unit (`kg` or `lbs`)
    pub const WEIGHT_UNIT: &str = "GZCLP_WEIGHT_UNIT";
    /// Total HTTP request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "GZCLP_HTTP_TIMEOUT_SECS";
    /// HTTP connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "GZCLP_HTTP_CONNECT_TIMEOUT_SECS";
    /// Maximum retry attempts for retryable remote failures
    pub const RETRY_MAX_ATTEMPTS: &str = "GZCLP_RETRY_MAX_ATTEMPTS";
    /// Base retry delay in milliseconds
    pub const RETRY_BASE_DELAY_MS: &str = "GZCLP_RETRY_BASE_DELAY_MS";
}

/// Provider identifiers
pub mod providers {
    /// Hevy routine service
    pub const HEVY: &str = "hevy";
    /// In-memory synthetic routine service
    pub const SYNTHETIC: &str = "synthetic";
    /// Default Hevy API base URL
    pub const HEVY_DEFAULT_BASE_URL: &str = "https://api.hevyapp.com";
}

/// Service identifiers used in logs
pub mod service_names {
    /// Name reported by the CLI and library logs
    pub const GZCLP_SYNC: &str = "gzclp-sync";
}
