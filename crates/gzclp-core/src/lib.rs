// ABOUTME: Core types and constants for the GZCLP progression engine
// ABOUTME: Foundation crate with programme models, progression keys, units, and error types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # GZCLP Core
//!
//! Foundation crate providing shared types and constants for GZCLP progression
//! tracking. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Structured errors raised by the fitness-service client
//! - **constants**: Programme constants (increments, floors, epsilon, schema version)
//! - **models**: Roles, days, tiers, progression keys and state, workouts, routines, history

/// Error types shared across the workspace
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (programme layout, progression state, external workouts and routines)
pub mod models;
