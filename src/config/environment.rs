// ABOUTME: Environment configuration management for the sync engine and CLI
// ABOUTME: Reads service credentials, state location, display unit, and HTTP/retry tuning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use gzclp_intelligence::IntelligenceConfig;
use gzclp_providers::{HevyConfig, HttpClientConfig, RetryBackoffConfig};
use tracing::{info, warn};

use crate::constants::env_config;
use crate::constants::providers::HEVY_DEFAULT_BASE_URL;
use crate::errors::{AppError, AppResult};
use crate::models::{ProgramConfig, WeightUnit};

/// Default location of the JSON state document
pub const DEFAULT_STATE_PATH: &str = "./gzclp-state.json";

/// Runtime configuration assembled from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Remote routine service API key (`HEVY_API_KEY`)
    pub hevy_api_key: Option<String>,
    /// Remote routine service root (`HEVY_API_BASE_URL`)
    pub hevy_base_url: String,
    /// JSON state document (`GZCLP_STATE_PATH`)
    pub state_path: PathBuf,
    /// Display unit override (`GZCLP_WEIGHT_UNIT`); the stored programme unit wins when unset
    pub weight_unit: Option<WeightUnit>,
    /// Shared HTTP client timeouts
    pub http: HttpClientConfig,
    /// Backoff for retryable remote failures
    pub retry: RetryBackoffConfig,
    /// Algorithm tuning
    pub intelligence: IntelligenceConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hevy_api_key: None,
            hevy_base_url: HEVY_DEFAULT_BASE_URL.to_owned(),
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            weight_unit: None,
            http: HttpClientConfig::default(),
            retry: RetryBackoffConfig::default(),
            intelligence: IntelligenceConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a numeric timeout or the weight unit cannot
    /// be parsed, or when the assembled configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        let defaults = Self::default();

        let weight_unit = match non_empty_var(env_config::WEIGHT_UNIT) {
            Some(raw) => Some(raw.parse::<WeightUnit>().map_err(|e| {
                AppError::config_invalid(format!("{}: {e}", env_config::WEIGHT_UNIT))
            })?),
            None => None,
        };

        let config = Self {
            hevy_api_key: non_empty_var(env_config::HEVY_API_KEY),
            hevy_base_url: non_empty_var(env_config::HEVY_API_BASE_URL)
                .unwrap_or(defaults.hevy_base_url),
            state_path: non_empty_var(env_config::STATE_PATH)
                .map_or(defaults.state_path, PathBuf::from),
            weight_unit,
            http: HttpClientConfig {
                timeout_secs: env_parse(env_config::HTTP_TIMEOUT_SECS, defaults.http.timeout_secs)?,
                connect_timeout_secs: env_parse(
                    env_config::HTTP_CONNECT_TIMEOUT_SECS,
                    defaults.http.connect_timeout_secs,
                )?,
            },
            retry: RetryBackoffConfig::from_env(),
            intelligence: defaults.intelligence,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for zero timeouts, a connect timeout longer than
    /// the request timeout, or invalid algorithm tuning
    pub fn validate(&self) -> AppResult<()> {
        if self.http.timeout_secs == 0 || self.http.connect_timeout_secs == 0 {
            return Err(AppError::config_invalid(
                "HTTP timeouts must be at least 1 second",
            ));
        }
        if self.http.connect_timeout_secs > self.http.timeout_secs {
            return Err(AppError::config_invalid(format!(
                "{} ({}) exceeds {} ({})",
                env_config::HTTP_CONNECT_TIMEOUT_SECS,
                self.http.connect_timeout_secs,
                env_config::HTTP_TIMEOUT_SECS,
                self.http.timeout_secs
            )));
        }
        if !self.hevy_base_url.starts_with("http://")
            && !self.hevy_base_url.starts_with("https://")
        {
            return Err(AppError::config_invalid(format!(
                "{} must be an http(s) URL",
                env_config::HEVY_API_BASE_URL
            )));
        }
        if self.hevy_api_key.is_none() {
            warn!("{} is not set; remote commands will fail", env_config::HEVY_API_KEY);
        }
        self.intelligence
            .validate()
            .map_err(|e| AppError::config_invalid(e.to_string()).with_source(e))
    }

    /// `program` with the configured weight unit applied
    ///
    /// The result is the single unit used for display, input parsing, and
    /// the calculator's increments and rounding.
    #[must_use]
    pub fn resolve_program_unit(&self, mut program: ProgramConfig) -> ProgramConfig {
        if let Some(unit) = self.weight_unit {
            program.unit = unit;
        }
        program
    }

    /// Connection settings for the Hevy provider
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no API key is configured
    pub fn hevy_config(&self) -> AppResult<HevyConfig> {
        let api_key = self
            .hevy_api_key
            .clone()
            .ok_or_else(|| AppError::config_missing(env_config::HEVY_API_KEY))?;
        Ok(HevyConfig::new(api_key)
            .with_base_url(self.hevy_base_url.clone())
            .with_retry(self.retry.clone()))
    }

    /// One-paragraph summary for `--verbose` output; never includes the API key
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "GZCLP Sync Configuration:\n\
             - Routine service: {}\n\
             - API key: {}\n\
             - State document: {}\n\
             - Weight unit: {}\n\
             - HTTP timeout: {}s (connect {}s)\n\
             - Retry: {} attempts, base delay {}ms",
            self.hevy_base_url,
            if self.hevy_api_key.is_some() {
                "configured"
            } else {
                "missing"
            },
            self.state_path.display(),
            self.weight_unit
                .map_or_else(|| "from state".to_owned(), |unit| unit.to_string()),
            self.http.timeout_secs,
            self.http.connect_timeout_secs,
            self.retry.max_attempts,
            self.retry.base_delay_ms,
        )
    }
}

/// Trimmed value of `key`, treating empty strings as unset
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Parse `key` when set; unparseable values are an error
fn env_parse<T: FromStr>(key: &str, default: T) -> AppResult<T>
where
    T::Err: Display,
{
    non_empty_var(key).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}")))
    })
}
