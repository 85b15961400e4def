// ABOUTME: Circuit breaker guarding remote routine service calls
// ABOUTME: Fails fast with CircuitBreakerOpen after repeated retryable failures, probes after a cooldown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicU32, AtomicU64, AtomicU8, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::errors::provider::{ProviderError, ProviderResult};

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Requests pass through; retryable failures are counted
    Closed,
    /// Requests fail immediately until the cooldown elapses
    Open,
    /// A single probe request is in flight
    HalfOpen,
}

impl CircuitState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Closed,
            1 => Self::Open,
            _ => Self::HalfOpen,
        }
    }

    const fn as_u8(self) -> u8 {
        match self {
            Self::Closed => 0,
            Self::Open => 1,
            Self::HalfOpen => 2,
        }
    }
}

/// Thresholds and cooldown for a circuit breaker
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive retryable failures that open the circuit
    pub failure_threshold: u32,
    /// Time the circuit stays open before a probe is allowed
    pub recovery_timeout: Duration,
    /// Probe successes needed to close the circuit again
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(30),
            success_threshold: 1,
        }
    }
}

/// Lock-free circuit breaker shared by every call a provider makes
///
/// Only retryable errors (timeouts, network failures, 429 and 5xx responses)
/// count towards opening the circuit. A 404 or an authentication failure says
/// nothing about the health of the service.
pub struct CircuitBreaker {
    provider_name: String,
    state: AtomicU8,
    failure_count: AtomicU32,
    success_count: AtomicU32,
    /// Milliseconds since `created` at which the circuit last opened
    opened_at_ms: AtomicU64,
    config: CircuitBreakerConfig,
    created: Instant,
}

impl CircuitBreaker {
    /// Circuit breaker with default thresholds
    #[must_use]
    pub fn new(provider_name: &str) -> Self {
        Self::with_config(provider_name, CircuitBreakerConfig::default())
    }

    /// Circuit breaker with custom thresholds
    #[must_use]
    pub fn with_config(provider_name: &str, config: CircuitBreakerConfig) -> Self {
        Self {
            provider_name: provider_name.to_owned(),
            state: AtomicU8::new(CircuitState::Closed.as_u8()),
            failure_count: AtomicU32::new(0),
            success_count: AtomicU32::new(0),
            opened_at_ms: AtomicU64::new(0),
            config,
            created: Instant::now(),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> CircuitState {
        CircuitState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Consecutive retryable failures seen while closed
    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.failure_count.load(Ordering::SeqCst)
    }

    /// Admit a request or fail fast
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::CircuitBreakerOpen` while the circuit is open and
    /// the cooldown has not elapsed, or while a probe is already in flight.
    pub fn check(&self) -> ProviderResult<()> {
        match self.state() {
            CircuitState::Closed => Ok(()),
            CircuitState::Open if self.try_half_open() => Ok(()),
            CircuitState::Open | CircuitState::HalfOpen => Err(ProviderError::CircuitBreakerOpen {
                provider: self.provider_name.clone(),
                retry_after_secs: self.secs_until_probe(),
            }),
        }
    }

    /// Feed the outcome of an admitted request back into the breaker
    pub fn record<T>(&self, outcome: &ProviderResult<T>) {
        match outcome {
            Ok(_) => self.record_success(),
            Err(error) if error.is_retryable() => self.record_failure(),
            Err(_) => {}
        }
    }

    /// Force the circuit closed
    pub fn reset(&self) {
        self.state
            .store(CircuitState::Closed.as_u8(), Ordering::SeqCst);
        self.failure_count.store(0, Ordering::SeqCst);
        self.success_count.store(0, Ordering::SeqCst);
        info!(provider = %self.provider_name, "Circuit breaker reset");
    }

    fn record_success(&self) {
        match self.state() {
            CircuitState::Closed => self.failure_count.store(0, Ordering::SeqCst),
            CircuitState::HalfOpen => {
                let successes = self.success_count.fetch_add(1, Ordering::SeqCst) + 1;
                if successes >= self.config.success_threshold {
                    self.state
                        .store(CircuitState::Closed.as_u8(), Ordering::SeqCst);
                    self.failure_count.store(0, Ordering::SeqCst);
                    self.success_count.store(0, Ordering::SeqCst);
                    info!(provider = %self.provider_name, "Circuit breaker closed, service recovered");
                }
            }
            CircuitState::Open => {}
        }
    }

    fn record_failure(&self) {
        match self.state() {
            CircuitState::Closed => {
                let failures = self.failure_count.fetch_add(1, Ordering::SeqCst) + 1;
                if failures >= self.config.failure_threshold {
                    self.open();
                    warn!(
                        provider = %self.provider_name,
                        failures,
                        recovery_timeout_secs = self.config.recovery_timeout.as_secs(),
                        "Circuit breaker opened"
                    );
                }
            }
            CircuitState::HalfOpen => {
                self.success_count.store(0, Ordering::SeqCst);
                self.open();
                warn!(provider = %self.provider_name, "Circuit breaker re-opened, probe failed");
            }
            CircuitState::Open => self.opened_at_ms.store(self.now_ms(), Ordering::SeqCst),
        }
    }

    fn open(&self) {
        self.opened_at_ms.store(self.now_ms(), Ordering::SeqCst);
        self.state.store(CircuitState::Open.as_u8(), Ordering::SeqCst);
    }

    fn try_half_open(&self) -> bool {
        if self.ms_until_probe() > 0 {
            return false;
        }
        self.state
            .compare_exchange(
                CircuitState::Open.as_u8(),
                CircuitState::HalfOpen.as_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok()
    }

    fn ms_until_probe(&self) -> u64 {
        let recovery_ms = self.config.recovery_timeout.as_millis() as u64;
        let open_for = self
            .now_ms()
            .saturating_sub(self.opened_at_ms.load(Ordering::SeqCst));
        recovery_ms.saturating_sub(open_for)
    }

    fn secs_until_probe(&self) -> u64 {
        self.ms_until_probe().div_ceil(1000)
    }

    fn now_ms(&self) -> u64 {
        self.created.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeout() -> ProviderResult<()> {
        Err(ProviderError::Timeout {
            provider: "test".to_owned(),
            timeout_secs: 1,
        })
    }

    #[test]
    fn test_opens_after_threshold_and_ignores_non_retryable() {
        let breaker = CircuitBreaker::with_config(
            "test",
            CircuitBreakerConfig {
                failure_threshold: 2,
                recovery_timeout: Duration::from_secs(60),
                success_threshold: 1,
            },
        );
        breaker.record::<()>(&Err(ProviderError::not_found("test", "routine", "r1")));
        assert_eq!(breaker.failure_count(), 0);

        breaker.record(&timeout());
        breaker.record(&timeout());
        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(matches!(
            breaker.check(),
            Err(ProviderError::CircuitBreakerOpen { .. })
        ));
    }

    #[test]
    fn test_probe_success_closes_circuit() {
        let breaker = CircuitBreaker::with_config(
            "test",
            CircuitBreakerConfig {
                failure_threshold: 1,
                recovery_timeout: Duration::ZERO,
                success_threshold: 1,
            },
        );
        breaker.record(&timeout());
        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(breaker.check().is_ok());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);
        breaker.record(&Ok(()));
        assert_eq!(breaker.state(), CircuitState::Closed);
    }
}
