// ABOUTME: Hevy REST API client implementing the routine provider contract
// ABOUTME: api-key auth, paged listings, routine envelopes, retry, circuit breaking, cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use crate::constants::providers::{HEVY, HEVY_DEFAULT_BASE_URL};
use crate::core::{Page, RoutineProvider};
use crate::errors::provider::{ProviderError, ProviderResult};
use crate::http_client::{configured_timeout_secs, shared_client};
use crate::models::{Routine, RoutinePayload, Workout};
use crate::utils::{run_cancellable, with_retry_if, RetryBackoffConfig};

/// Header carrying the Hevy API key
const API_KEY_HEADER: &str = "api-key";

/// Delay assumed when a 429 carries no usable `Retry-After`
const DEFAULT_RATE_LIMIT_RETRY_SECS: u64 = 60;

/// Longest error body echoed into an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Connection settings for the Hevy API
#[derive(Debug, Clone)]
pub struct HevyConfig {
    /// Personal API key
    pub api_key: String,
    /// API root, without a trailing `/v1`
    pub base_url: String,
    /// Backoff for retryable failures
    pub retry: RetryBackoffConfig,
    /// Circuit breaker thresholds
    pub circuit_breaker: CircuitBreakerConfig,
}

impl HevyConfig {
    /// Production API root with default retry and breaker settings
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: HEVY_DEFAULT_BASE_URL.to_owned(),
            retry: RetryBackoffConfig::default(),
            circuit_breaker: CircuitBreakerConfig::default(),
        }
    }

    /// Point the client at another API root (mock servers, proxies)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the retry policy
    #[must_use]
    pub fn with_retry(mut self, retry: RetryBackoffConfig) -> Self {
        self.retry = retry;
        self
    }
}

/// What a request addresses, for `NotFound` reporting
#[derive(Debug, Clone, Copy)]
struct Resource<'a> {
    kind: &'static str,
    id: &'a str,
}

#[derive(Deserialize)]
struct WorkoutsPage {
    page: u32,
    page_count: u32,
    #[serde(default)]
    workouts: Vec<Workout>,
}

#[derive(Deserialize)]
struct RoutinesPage {
    page: u32,
    page_count: u32,
    #[serde(default)]
    routines: Vec<Routine>,
}

/// Single-routine responses come back either as an object or a one-element array
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_first(self) -> Option<T> {
        match self {
            Self::One(item) => Some(item),
            Self::Many(items) => items.into_iter().next(),
        }
    }
}

#[derive(Deserialize)]
struct RoutineEnvelope {
    routine: OneOrMany<Routine>,
}

#[derive(Serialize)]
struct RoutineBody<'a> {
    routine: &'a RoutinePayload,
}

/// Hevy API client
pub struct HevyProvider {
    config: HevyConfig,
    client: Client,
    circuit_breaker: CircuitBreaker,
    cancel: CancellationToken,
}

impl HevyProvider {
    /// Client using the process-wide shared HTTP client
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` when the API key is empty.
    pub fn new(config: HevyConfig) -> ProviderResult<Self> {
        Self::with_client(config, shared_client().clone())
    }

    /// Client using a caller-supplied HTTP client
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` when the API key is empty.
    pub fn with_client(config: HevyConfig, client: Client) -> ProviderResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::ConfigurationError {
                provider: HEVY.to_owned(),
                details: "API key is empty".to_owned(),
            });
        }
        let circuit_breaker = CircuitBreaker::with_config(HEVY, config.circuit_breaker.clone());
        Ok(Self {
            config,
            client,
            circuit_breaker,
            cancel: CancellationToken::new(),
        })
    }

    /// Abort in-flight and future requests when `cancel` fires
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        resource: Resource<'_>,
    ) -> ProviderResult<T> {
        self.circuit_breaker.check()?;
        let operation = format!("{method} {path}");
        // POST creates a new remote object on every delivery
        let should_retry = if method == Method::POST {
            ProviderError::is_safe_to_resend
        } else {
            ProviderError::is_retryable
        };
        let result = with_retry_if(
            &self.config.retry,
            &self.cancel,
            &operation,
            should_retry,
            || self.send_once(method.clone(), path, query, body, resource),
        )
        .await;
        self.circuit_breaker.record(&result);
        result
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        resource: Resource<'_>,
    ) -> ProviderResult<T> {
        let url = self.url(path);
        debug!(%method, %url, "Hevy API request");

        let mut builder = self
            .client
            .request(method, &url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(query);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = run_cancellable(&self.cancel, HEVY, async {
            builder.send().await.map_err(|e| Self::transport_error(&e))
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = retry_after_secs(response.headers());
            let text = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, retry_after, &text, resource));
        }

        let bytes = run_cancellable(&self.cancel, HEVY, async {
            response.bytes().await.map_err(|e| Self::transport_error(&e))
        })
        .await?;

        serde_json::from_slice(&bytes).map_err(|e| ProviderError::ParseError {
            provider: HEVY.to_owned(),
            message: format!("{} {}: {e}", resource.kind, resource.id),
        })
    }

    fn transport_error(error: &reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            return ProviderError::Timeout {
                provider: HEVY.to_owned(),
                timeout_secs: configured_timeout_secs(),
            };
        }
        ProviderError::NetworkError {
            provider: HEVY.to_owned(),
            message: error.to_string(),
        }
    }

    fn status_error(
        status: StatusCode,
        retry_after: Option<u64>,
        text: &str,
        resource: Resource<'_>,
    ) -> ProviderError {
        error!(
            status = status.as_u16(),
            body_length = text.len(),
            resource = resource.kind,
            "Hevy API request failed"
        );

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::AuthenticationFailed {
                    provider: HEVY.to_owned(),
                    reason: "API key rejected".to_owned(),
                }
            }
            StatusCode::NOT_FOUND => ProviderError::not_found(HEVY, resource.kind, resource.id),
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded {
                provider: HEVY.to_owned(),
                retry_after_secs: retry_after.unwrap_or(DEFAULT_RATE_LIMIT_RETRY_SECS),
                limit_type: "API rate limit".to_owned(),
            },
            _ => ProviderError::ApiError {
                provider: HEVY.to_owned(),
                status_code: status.as_u16(),
                message: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
                retryable: status.is_server_error(),
            },
        }
    }

    fn page_query(page: u32, page_size: u32) -> [(&'static str, String); 2] {
        [
            ("page", page.max(1).to_string()),
            ("pageSize", page_size.to_string()),
        ]
    }

    fn routine_body(payload: &RoutinePayload) -> ProviderResult<Value> {
        serde_json::to_value(RoutineBody { routine: payload }).map_err(|e| {
            ProviderError::ParseError {
                provider: HEVY.to_owned(),
                message: format!("routine payload: {e}"),
            }
        })
    }

    fn single_routine(envelope: RoutineEnvelope, id: &str) -> ProviderResult<Routine> {
        envelope
            .routine
            .into_first()
            .ok_or_else(|| ProviderError::ParseError {
                provider: HEVY.to_owned(),
                message: format!("empty routine response for {id}"),
            })
    }
}

/// `Retry-After` in whole seconds; HTTP-date values are not supported
fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[async_trait]
impl RoutineProvider for HevyProvider {
    fn name(&self) -> &'static str {
        HEVY
    }

    async fn list_workouts(&self, page: u32, page_size: u32) -> ProviderResult<Page<Workout>> {
        let query = Self::page_query(page, page_size);
        let body: WorkoutsPage = self
            .request(
                Method::GET,
                "/v1/workouts",
                &query,
                None,
                Resource {
                    kind: "workouts page",
                    id: &query[0].1,
                },
            )
            .await?;
        Ok(Page {
            page: body.page,
            page_count: body.page_count,
            items: body.workouts,
        })
    }

    async fn list_routines(&self, page: u32, page_size: u32) -> ProviderResult<Page<Routine>> {
        let query = Self::page_query(page, page_size);
        let body: RoutinesPage = self
            .request(
                Method::GET,
                "/v1/routines",
                &query,
                None,
                Resource {
                    kind: "routines page",
                    id: &query[0].1,
                },
            )
            .await?;
        Ok(Page {
            page: body.page,
            page_count: body.page_count,
            items: body.routines,
        })
    }

    async fn get_routine(&self, routine_id: &str) -> ProviderResult<Routine> {
        let envelope: RoutineEnvelope = self
            .request(
                Method::GET,
                &format!("/v1/routines/{routine_id}"),
                &[],
                None,
                Resource {
                    kind: "routine",
                    id: routine_id,
                },
            )
            .await?;
        Self::single_routine(envelope, routine_id)
    }

    async fn create_routine(&self, payload: &RoutinePayload) -> ProviderResult<Routine> {
        let body = Self::routine_body(payload)?;
        let envelope: RoutineEnvelope = self
            .request(
                Method::POST,
                "/v1/routines",
                &[],
                Some(&body),
                Resource {
                    kind: "routine",
                    id: &payload.title,
                },
            )
            .await?;
        Self::single_routine(envelope, &payload.title)
    }

    async fn update_routine(
        &self,
        routine_id: &str,
        payload: &RoutinePayload,
    ) -> ProviderResult<Routine> {
        // Folder moves are rejected on update; the remote keeps the routine where it is
        let payload = RoutinePayload {
            folder_id: None,
            ..payload.clone()
        };
        let body = Self::routine_body(&payload)?;
        let envelope: RoutineEnvelope = self
            .request(
                Method::PUT,
                &format!("/v1/routines/{routine_id}"),
                &[],
                Some(&body),
                Resource {
                    kind: "routine",
                    id: routine_id,
                },
            )
            .await?;
        Self::single_routine(envelope, routine_id)
    }
}
