// ABOUTME: Structured error types for remote routine service operations
// ABOUTME: Auth, rate limit, not-found, HTTP, cancellation, and timeout failures with retry hints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Provider Error Types
//!
//! Every call into the remote routine service surfaces one of these variants.
//! Cancellation is deliberately separate from `Timeout` and `NetworkError` so
//! callers can tell "the user stopped this" apart from "the remote is unwell".

use thiserror::Error;

/// Errors raised by a routine provider
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Credentials were rejected
    #[error("{provider} authentication failed: {reason}")]
    AuthenticationFailed {
        /// Provider name
        provider: String,
        /// Reason reported by the remote or the client
        reason: String,
    },

    /// Remote rate limit hit
    #[error("{provider} {limit_type} exceeded, retry after {retry_after_secs}s")]
    RateLimitExceeded {
        /// Provider name
        provider: String,
        /// Seconds to wait before retrying (from `Retry-After` when present)
        retry_after_secs: u64,
        /// Which limit was hit
        limit_type: String,
    },

    /// Requested resource does not exist
    #[error("{provider} {resource_type} not found: {resource_id}")]
    NotFound {
        /// Provider name
        provider: String,
        /// Kind of resource (routine, workout)
        resource_type: String,
        /// Identifier that was looked up
        resource_id: String,
    },

    /// Non-success HTTP status not covered by a more specific variant
    #[error("{provider} API error ({status_code}): {message}")]
    ApiError {
        /// Provider name
        provider: String,
        /// HTTP status code
        status_code: u16,
        /// Error body or summary
        message: String,
        /// Whether a retry may succeed
        retryable: bool,
    },

    /// The caller cancelled the operation
    #[error("{provider} request cancelled")]
    Cancelled {
        /// Provider name
        provider: String,
    },

    /// The request did not complete in time
    #[error("{provider} request timed out after {timeout_secs}s")]
    Timeout {
        /// Provider name
        provider: String,
        /// Configured timeout
        timeout_secs: u64,
    },

    /// Connection-level failure
    #[error("{provider} network error: {message}")]
    NetworkError {
        /// Provider name
        provider: String,
        /// Underlying error message
        message: String,
    },

    /// Response body could not be decoded
    #[error("{provider} response parse error: {message}")]
    ParseError {
        /// Provider name
        provider: String,
        /// Decoder message
        message: String,
    },

    /// Circuit breaker is rejecting calls
    #[error("{provider} circuit breaker open, retry after {retry_after_secs}s")]
    CircuitBreakerOpen {
        /// Provider name
        provider: String,
        /// Seconds until the breaker allows a probe request
        retry_after_secs: u64,
    },

    /// Client misconfiguration (missing API key, poisoned lock, bad URL)
    #[error("{provider} configuration error: {details}")]
    ConfigurationError {
        /// Provider name
        provider: String,
        /// What is wrong
        details: String,
    },
}

impl ProviderError {
    /// Create a cancellation error
    #[must_use]
    pub fn cancelled(provider: impl Into<String>) -> Self {
        Self::Cancelled {
            provider: provider.into(),
        }
    }

    /// Create a not-found error
    #[must_use]
    pub fn not_found(
        provider: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self::NotFound {
            provider: provider.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
        }
    }

    /// Name of the provider that raised the error
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::AuthenticationFailed { provider, .. }
            | Self::RateLimitExceeded { provider, .. }
            | Self::NotFound { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::Cancelled { provider }
            | Self::Timeout { provider, .. }
            | Self::NetworkError { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::CircuitBreakerOpen { provider, .. }
            | Self::ConfigurationError { provider, .. } => provider,
        }
    }

    /// Whether retrying the same request may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimitExceeded { .. } | Self::Timeout { .. } | Self::NetworkError { .. } => {
                true
            }
            Self::ApiError { retryable, .. } => *retryable,
            Self::AuthenticationFailed { .. }
            | Self::NotFound { .. }
            | Self::Cancelled { .. }
            | Self::ParseError { .. }
            | Self::CircuitBreakerOpen { .. }
            | Self::ConfigurationError { .. } => false,
        }
    }

    /// Whether the remote refused the request without acting on it
    ///
    /// Only these failures may be resent for non-idempotent writes such as
    /// routine creation; a timeout or 5xx may follow a completed write.
    #[must_use]
    pub const fn is_safe_to_resend(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// Server-requested delay before the next attempt, if any
    #[must_use]
    pub const fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimitExceeded {
                retry_after_secs, ..
            }
            | Self::CircuitBreakerOpen {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// Whether this is a user-initiated cancellation
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Whether the remote reported the resource missing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;
