// ABOUTME: Unified application error type with stable error codes
// ABOUTME: Maps provider, storage, and serialization failures onto codes and CLI exit statuses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the sync engine returns [`AppResult`]. Errors
//! carry a stable [`ErrorCode`] so the CLI can pick an exit status and logs can
//! be grouped, plus a human-readable message and an optional source for
//! chaining.

use std::error::Error as StdError;
use std::fmt;
use std::io;

use gzclp_core::errors::ProviderError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    /// Input rejected by validation
    InvalidInput = 3000,
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    /// A required value was not supplied
    MissingRequiredField = 3001,

    // Resource Management (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    /// Local or remote resource missing
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    /// Remote service returned an error
    ExternalServiceError = 5000,
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    /// Remote service unreachable, timing out, or short-circuited
    ExternalServiceUnavailable = 5001,
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    /// Remote service rejected our credentials
    ExternalAuthFailed = 5002,
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    /// Remote service rate limit exceeded
    ExternalRateLimited = 5003,
    #[serde(rename = "OPERATION_CANCELLED")]
    /// The user cancelled the operation
    OperationCancelled = 5004,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    /// Generic configuration problem
    ConfigError = 6000,
    #[serde(rename = "CONFIG_MISSING")]
    /// Required configuration is absent
    ConfigMissing = 6001,
    #[serde(rename = "CONFIG_INVALID")]
    /// Configuration value could not be used
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    /// Unexpected internal failure
    InternalError = 9000,
    #[serde(rename = "STORAGE_ERROR")]
    /// State document could not be read or written
    StorageError = 9002,
    #[serde(rename = "SERIALIZATION_ERROR")]
    /// JSON encoding or decoding failed
    SerializationError = 9003,
}

impl ErrorCode {
    /// Process exit status for this error (BSD `sysexits` values)
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            // EX_USAGE
            Self::InvalidInput | Self::MissingRequiredField => 64,

            // EX_DATAERR
            Self::SerializationError => 65,

            // EX_NOINPUT
            Self::ResourceNotFound => 66,

            // EX_UNAVAILABLE
            Self::ExternalServiceError
            | Self::ExternalServiceUnavailable
            | Self::ExternalAuthFailed => 69,

            // EX_SOFTWARE
            Self::InternalError => 70,

            // EX_IOERR
            Self::StorageError => 74,

            // EX_TEMPFAIL
            Self::ExternalRateLimited => 75,

            // EX_CONFIG
            Self::ConfigError | Self::ConfigMissing | Self::ConfigInvalid => 78,

            // 128 + SIGINT
            Self::OperationCancelled => 130,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required value is missing",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "The routine service returned an error",
            Self::ExternalServiceUnavailable => "The routine service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with the routine service failed",
            Self::ExternalRateLimited => "The routine service rate limit was exceeded",
            Self::OperationCancelled => "The operation was cancelled",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Progression state storage failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Process exit status for this error
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.code.exit_code()
    }

    /// Whether the error stems from a user cancellation
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.code == ErrorCode::OperationCancelled
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Required configuration is missing
    pub fn config_missing(name: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("{} is not set", name.into()),
        )
    }

    /// Configuration value is unusable
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        let code = match &error {
            ProviderError::AuthenticationFailed { .. } => ErrorCode::ExternalAuthFailed,
            ProviderError::RateLimitExceeded { .. } => ErrorCode::ExternalRateLimited,
            ProviderError::NotFound { .. } => ErrorCode::ResourceNotFound,
            ProviderError::ApiError { .. } => ErrorCode::ExternalServiceError,
            ProviderError::Cancelled { .. } => ErrorCode::OperationCancelled,
            ProviderError::Timeout { .. }
            | ProviderError::NetworkError { .. }
            | ProviderError::CircuitBreakerOpen { .. } => ErrorCode::ExternalServiceUnavailable,
            ProviderError::ParseError { .. } => ErrorCode::SerializationError,
            ProviderError::ConfigurationError { .. } => ErrorCode::ConfigInvalid,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::new(ErrorCode::StorageError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_exit_status() {
        assert_eq!(ErrorCode::InvalidInput.exit_code(), 64);
        assert_eq!(ErrorCode::ExternalRateLimited.exit_code(), 75);
        assert_eq!(ErrorCode::ConfigMissing.exit_code(), 78);
        assert_eq!(ErrorCode::OperationCancelled.exit_code(), 130);
    }

    #[test]
    fn test_provider_error_conversion() {
        let error = AppError::from(ProviderError::cancelled("hevy"));
        assert!(error.is_cancelled());
        assert!(error.source.is_some());

        let error = AppError::from(ProviderError::not_found("hevy", "routine", "r-1"));
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert!(error.message.contains("r-1"));

        let error = AppError::from(ProviderError::Timeout {
            provider: "hevy".to_owned(),
            timeout_secs: 30,
        });
        assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::ExternalAuthFailed).unwrap();
        assert_eq!(json, "\"EXTERNAL_AUTH_FAILED\"");
    }
}
