// ABOUTME: Shared utilities for routine provider implementations
// ABOUTME: Exponential backoff retry honoring Retry-After, and cancellation-aware waiting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::constants::env_config;
use crate::errors::provider::{ProviderError, ProviderResult};

/// Backoff policy for retryable provider errors
#[derive(Debug, Clone, PartialEq)]
pub struct RetryBackoffConfig {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds
    pub base_delay_ms: u64,
    /// Upper bound on any single delay in milliseconds
    pub max_delay_ms: u64,
    /// Random extra delay as a fraction of the computed delay (0.0 disables)
    pub jitter_factor: f64,
}

impl Default for RetryBackoffConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
            jitter_factor: 0.1,
        }
    }
}

impl RetryBackoffConfig {
    /// Defaults overridden by `GZCLP_RETRY_MAX_ATTEMPTS` and `GZCLP_RETRY_BASE_DELAY_MS`
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: env_or(env_config::RETRY_MAX_ATTEMPTS, defaults.max_attempts).max(1),
            base_delay_ms: env_or(env_config::RETRY_BASE_DELAY_MS, defaults.base_delay_ms),
            ..defaults
        }
    }

    /// Single attempt, no retries
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based)
    ///
    /// A server-provided `Retry-After` wins over the exponential schedule; both
    /// are capped at `max_delay_ms`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32, retry_after_secs: Option<u64>) -> Duration {
        let cap = Duration::from_millis(self.max_delay_ms);
        if let Some(secs) = retry_after_secs {
            return Duration::from_secs(secs).min(cap);
        }

        let exponent = attempt.saturating_sub(1).min(16);
        let base = self.base_delay_ms.saturating_mul(1_u64 << exponent);
        let jitter = if self.jitter_factor > 0.0 {
            let max_jitter = base as f64 * self.jitter_factor;
            rand::thread_rng().gen_range(0.0..=max_jitter) as u64
        } else {
            0
        };
        Duration::from_millis(base.saturating_add(jitter)).min(cap)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "Ignoring unparseable retry setting");
            default
        }),
        Err(_) => default,
    }
}

/// Run `operation` until it succeeds, fails permanently, or attempts run out
///
/// Only errors with `is_retryable()` are retried. Waiting between attempts is
/// interrupted by `cancel`, which yields `ProviderError::Cancelled`.
///
/// # Errors
///
/// Returns the last error from `operation`, or `Cancelled` if `cancel` fires
/// while waiting.
pub async fn with_retry<T, F, Fut>(
    config: &RetryBackoffConfig,
    cancel: &CancellationToken,
    operation_name: &str,
    operation: F,
) -> ProviderResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ProviderResult<T>>,
{
    with_retry_if(
        config,
        cancel,
        operation_name,
        ProviderError::is_retryable,
        operation,
    )
    .await
}

/// Like [`with_retry`], but only errors accepted by `should_retry` are retried
///
/// Non-idempotent requests pass a narrower predicate so that a request the
/// server may already have processed is never sent twice.
///
/// # Errors
///
/// Returns the last error from `operation`, or `Cancelled` if `cancel` fires
/// while waiting.
pub async fn with_retry_if<T, F, Fut>(
    config: &RetryBackoffConfig,
    cancel: &CancellationToken,
    operation_name: &str,
    should_retry: fn(&ProviderError) -> bool,
    mut operation: F,
) -> ProviderResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ProviderResult<T>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if should_retry(&error) && attempt < config.max_attempts => {
                let delay = config.delay_for(attempt, error.retry_after_secs());
                warn!(
                    provider = error.provider(),
                    operation = operation_name,
                    attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "Retrying provider request"
                );
                sleep_cancellable(cancel, delay, error.provider()).await?;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Sleep for `duration` unless `cancel` fires first
///
/// # Errors
///
/// Returns `ProviderError::Cancelled` for `provider` when cancelled.
pub async fn sleep_cancellable(
    cancel: &CancellationToken,
    duration: Duration,
    provider: &str,
) -> ProviderResult<()> {
    tokio::select! {
        () = cancel.cancelled() => Err(ProviderError::cancelled(provider)),
        () = sleep(duration) => Ok(()),
    }
}

/// Drive `future` to completion unless `cancel` fires first
///
/// # Errors
///
/// Returns `ProviderError::Cancelled` for `provider` when cancelled, otherwise
/// whatever `future` returns.
pub async fn run_cancellable<T, Fut>(
    cancel: &CancellationToken,
    provider: &str,
    future: Fut,
) -> ProviderResult<T>
where
    Fut: Future<Output = ProviderResult<T>>,
{
    if cancel.is_cancelled() {
        return Err(ProviderError::cancelled(provider));
    }
    tokio::select! {
        () = cancel.cancelled() => Err(ProviderError::cancelled(provider)),
        result = future => result,
    }
}
