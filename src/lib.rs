// ABOUTME: Main library entry point for the GZCLP progression and routine sync engine
// ABOUTME: Workout analysis, pending changes, push preview, selective sync, and persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # GZCLP Sync
//!
//! Tracks strength progression under the GZCLP programme and keeps it in step
//! with routines stored on a remote training log.
//!
//! ## Features
//!
//! - **Workout analysis**: turn a logged workout into per-tier rep logs, flagging
//!   weight discrepancies against stored state
//! - **Pending changes**: review-before-commit progression updates, applied as a
//!   pure fold over the progression store
//! - **Selective sync**: per-exercise push/pull/skip reconciliation of the four
//!   day routines, with per-day error isolation and cancellation
//! - **Import**: bootstrap progression state from existing remote routines
//! - **Persistence**: JSON state document with schema migration
//!
//! ## Architecture
//!
//! - **`gzclp-core`**: models, constants, provider errors
//! - **`gzclp-intelligence`**: calculator, stage detector, predictor
//! - **`gzclp-providers`**: remote routine service clients
//! - **this crate**: orchestration, storage, configuration and the CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use gzclp_sync::config::environment::ServerConfig;
//! use gzclp_sync::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("State document: {}", config.state_path.display());
//!     Ok(())
//! }
//! ```

// Re-export the foundation crates under stable paths
pub use gzclp_core::{constants, models};
pub use gzclp_intelligence as algorithms;
pub use gzclp_providers as providers;

/// Environment configuration
pub mod config;

/// Progression state storage backends and schema migration
pub mod database_plugins;

/// Application error type and error codes
pub mod errors;

/// Workout analysis against stored progression state
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Pending changes, applier, history recording and state import
pub mod progression;

/// Push preview and selective routine reconciliation
pub mod sync;
