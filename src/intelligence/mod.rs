// ABOUTME: Intelligence module re-exports from gzclp-intelligence plus local workout analysis
// ABOUTME: Keeps algorithm import paths stable while hosting analysis that needs programme state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Re-exports the pure algorithms from `gzclp-intelligence` and adds the
//! workout analyzer, which joins a logged workout with programme configuration
//! and stored progression state.

// Re-export all public items from gzclp-intelligence
pub use gzclp_intelligence::*;

/// Logged-workout analysis against stored progression state
pub mod workout_analyzer;

pub use workout_analyzer::{resolve_day, Discrepancy, WorkoutAnalysisResult, WorkoutAnalyzer};
