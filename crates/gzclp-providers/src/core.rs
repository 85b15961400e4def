// ABOUTME: Core provider trait for remote routine services
// ABOUTME: Paged workout and routine listing plus routine create/update, with paging helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Routine Provider Contract
//!
//! Everything the sync engine needs from a remote training log:
//!
//! - **Reads**: paged workouts (newest first), paged routines, one routine by id
//! - **Writes**: create a routine, replace a routine's contents
//!
//! All weights crossing this boundary are kilograms. Implementations map their
//! transport failures onto [`ProviderError`] so callers can tell a missing
//! routine (`NotFound`) from a user cancellation (`Cancelled`) from a flaky
//! network (`is_retryable()`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::provider::{ProviderError, ProviderResult};
use crate::models::{Routine, RoutinePayload, Workout};

/// One page of a paged listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// 1-based page number
    pub page: u32,
    /// Total number of pages
    pub page_count: u32,
    /// Items on this page
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Whether a later page exists
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.page < self.page_count
    }
}

/// Remote routine service used by the sync engine
#[async_trait]
pub trait RoutineProvider: Send + Sync {
    /// Provider identifier used in errors and logs
    fn name(&self) -> &'static str;

    /// Completed workouts, newest first
    async fn list_workouts(&self, page: u32, page_size: u32) -> ProviderResult<Page<Workout>>;

    /// Saved routines
    async fn list_routines(&self, page: u32, page_size: u32) -> ProviderResult<Page<Routine>>;

    /// One routine by id; `ProviderError::NotFound` when it does not exist
    async fn get_routine(&self, routine_id: &str) -> ProviderResult<Routine>;

    /// Create a routine and return it with its new id
    async fn create_routine(&self, payload: &RoutinePayload) -> ProviderResult<Routine>;

    /// Replace a routine's title and exercises
    async fn update_routine(
        &self,
        routine_id: &str,
        payload: &RoutinePayload,
    ) -> ProviderResult<Routine>;
}

/// Fetch a routine, mapping `NotFound` to `None`
///
/// # Errors
///
/// Returns every provider error other than `NotFound`.
pub async fn find_routine(
    provider: &dyn RoutineProvider,
    routine_id: &str,
) -> ProviderResult<Option<Routine>> {
    match provider.get_routine(routine_id).await {
        Ok(routine) => Ok(Some(routine)),
        Err(ProviderError::NotFound { .. }) => {
            debug!(provider = provider.name(), routine_id, "Routine not found remotely");
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

/// Walk every routine page
///
/// # Errors
///
/// Returns the first provider error encountered.
pub async fn fetch_all_routines(
    provider: &dyn RoutineProvider,
    page_size: u32,
) -> ProviderResult<Vec<Routine>> {
    let mut routines = Vec::new();
    let mut page_number = 1;
    loop {
        let page = provider.list_routines(page_number, page_size).await?;
        let has_more = page.has_more() && !page.items.is_empty();
        routines.extend(page.items);
        if !has_more {
            return Ok(routines);
        }
        page_number += 1;
    }
}

/// Up to `limit` most recent workouts
///
/// # Errors
///
/// Returns the first provider error encountered.
pub async fn fetch_recent_workouts(
    provider: &dyn RoutineProvider,
    limit: usize,
    page_size: u32,
) -> ProviderResult<Vec<Workout>> {
    let mut workouts = Vec::with_capacity(limit);
    let mut page_number = 1;
    while workouts.len() < limit {
        let page = provider.list_workouts(page_number, page_size).await?;
        let has_more = page.has_more() && !page.items.is_empty();
        let remaining = limit - workouts.len();
        workouts.extend(page.items.into_iter().take(remaining));
        if !has_more {
            break;
        }
        page_number += 1;
    }
    Ok(workouts)
}
