// ABOUTME: Routine service provider implementations for Hevy and an in-memory synthetic service
// ABOUTME: Core provider trait, circuit breaker, retry utilities, and shared HTTP client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Routine service providers and core abstractions.
//!
//! The sync engine only ever talks to a [`RoutineProvider`]; the Hevy client
//! and the synthetic provider are interchangeable behind it.

// Re-export gzclp-core modules so provider files can keep `use crate::errors::*` etc.
pub use gzclp_core::constants;
pub use gzclp_core::errors;
pub use gzclp_core::models;

/// Circuit breaker pattern for provider resilience
pub mod circuit_breaker;
/// Core provider trait and paging helpers
pub mod core;
/// Hevy REST API client
pub mod hevy_provider;
/// Shared HTTP client for provider API calls
pub mod http_client;
/// In-memory provider for tests and dry runs
pub mod synthetic_provider;
/// Provider utility functions (retry, cancellation)
pub mod utils;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use core::{
    fetch_all_routines, fetch_recent_workouts, find_routine, Page, RoutineProvider,
};
pub use gzclp_core::errors::provider::{ProviderError, ProviderResult};
pub use hevy_provider::{HevyConfig, HevyProvider};
pub use http_client::{initialize_shared_client, shared_client, HttpClientConfig};
pub use synthetic_provider::{SyntheticProvider, WriteOperation, WriteRecord};
pub use utils::{
    run_cancellable, sleep_cancellable, with_retry, with_retry_if, RetryBackoffConfig,
};
