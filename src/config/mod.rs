// ABOUTME: Configuration management module for runtime settings
// ABOUTME: Environment-driven service, storage, HTTP, retry, and algorithm configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: service credentials, state path, display unit, HTTP and
//!   retry tuning read from environment variables
//! - **Intelligence**: predictor tuning re-exported from `gzclp-intelligence`

/// Environment configuration
pub mod environment;

pub use environment::ServerConfig;
pub use gzclp_intelligence::config::intelligence::{ConfigError, IntelligenceConfig};
