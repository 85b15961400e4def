// ABOUTME: In-memory routine service for development, tests, and dry runs
// ABOUTME: Supports routine and workout injection, write logging, and failure injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock poisoning errors are converted to ProviderError::ConfigurationError
// for proper error propagation through the application

//! # Synthetic Routine Provider
//!
//! Behaves like the remote routine service without a network:
//!
//! - Routines and workouts can be injected up front or at any time
//! - Every create/update is appended to a write log tests can inspect
//! - Reads or writes for chosen routines can be made to fail
//! - A cancellation token can be tripped after a number of writes
//!
//! All state sits behind `RwLock`s so one instance can be shared across tasks.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::constants::providers::SYNTHETIC;
use crate::core::{Page, RoutineProvider};
use crate::errors::provider::{ProviderError, ProviderResult};
use crate::models::{Routine, RoutinePayload, Workout};

/// Kind of write recorded in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOperation {
    /// `create_routine`
    Create,
    /// `update_routine`
    Update,
}

/// One successful write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteRecord {
    /// Create or update
    pub operation: WriteOperation,
    /// Id of the created or updated routine
    pub routine_id: String,
    /// Payload that was written
    pub payload: RoutinePayload,
}

/// Tripwire that cancels a token once enough writes succeeded
struct CancelAfter {
    token: CancellationToken,
    writes: usize,
}

/// In-memory routine service
pub struct SyntheticProvider {
    routines: RwLock<BTreeMap<String, Routine>>,
    workouts: RwLock<Vec<Workout>>,
    writes: RwLock<Vec<WriteRecord>>,
    /// Routine ids (updates) or titles (creates) whose writes fail
    failing_writes: RwLock<HashSet<String>>,
    /// Routine ids whose reads fail with a server error
    failing_reads: RwLock<HashSet<String>>,
    cancel_after: RwLock<Option<CancelAfter>>,
    next_id: AtomicU64,
    cancel: CancellationToken,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticProvider {
    /// Empty service
    #[must_use]
    pub fn new() -> Self {
        Self {
            routines: RwLock::new(BTreeMap::new()),
            workouts: RwLock::new(Vec::new()),
            writes: RwLock::new(Vec::new()),
            failing_writes: RwLock::new(HashSet::new()),
            failing_reads: RwLock::new(HashSet::new()),
            cancel_after: RwLock::new(None),
            next_id: AtomicU64::new(1),
            cancel: CancellationToken::new(),
        }
    }

    /// Service pre-loaded with routines
    #[must_use]
    pub fn with_routines(routines: Vec<Routine>) -> Self {
        let provider = Self::new();
        if let Ok(mut stored) = provider.routines.write() {
            stored.extend(routines.into_iter().map(|r| (r.id.clone(), r)));
        }
        provider
    }

    /// Service pre-loaded with workouts
    #[must_use]
    pub fn with_workouts(self, workouts: Vec<Workout>) -> Self {
        if let Ok(mut stored) = self.workouts.write() {
            stored.extend(workouts);
        }
        self
    }

    /// Fail every call with `Cancelled` once `cancel` fires
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Add or replace a routine
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn add_routine(&self, routine: Routine) -> ProviderResult<()> {
        Self::write_lock(&self.routines, "routines")?
            .insert(routine.id.clone(), routine);
        Ok(())
    }

    /// Add a completed workout
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn add_workout(&self, workout: Workout) -> ProviderResult<()> {
        Self::write_lock(&self.workouts, "workouts")?.push(workout);
        Ok(())
    }

    /// Current copy of a stored routine
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn routine(&self, routine_id: &str) -> ProviderResult<Option<Routine>> {
        Ok(Self::read_lock(&self.routines, "routines")?
            .get(routine_id)
            .cloned())
    }

    /// Every successful write, oldest first
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn writes(&self) -> ProviderResult<Vec<WriteRecord>> {
        Ok(Self::read_lock(&self.writes, "writes")?.clone())
    }

    /// Make writes to a routine id (update) or title (create) fail with a 500
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn fail_writes_for(&self, routine_id_or_title: impl Into<String>) -> ProviderResult<()> {
        Self::write_lock(&self.failing_writes, "failing_writes")?
            .insert(routine_id_or_title.into());
        Ok(())
    }

    /// Make reads of a routine id fail with a 500
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn fail_reads_for(&self, routine_id: impl Into<String>) -> ProviderResult<()> {
        Self::write_lock(&self.failing_reads, "failing_reads")?
            .insert(routine_id.into());
        Ok(())
    }

    /// Cancel `token` as soon as `writes` writes have succeeded
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::ConfigurationError` if the internal `RwLock` is poisoned.
    pub fn cancel_after_writes(
        &self,
        token: CancellationToken,
        writes: usize,
    ) -> ProviderResult<()> {
        *Self::write_lock(&self.cancel_after, "cancel_after")? =
            Some(CancelAfter { token, writes });
        Ok(())
    }

    fn read_lock<'a, T>(
        lock: &'a RwLock<T>,
        name: &str,
    ) -> ProviderResult<RwLockReadGuard<'a, T>> {
        lock.read().map_err(|_| Self::poisoned(name))
    }

    fn write_lock<'a, T>(
        lock: &'a RwLock<T>,
        name: &str,
    ) -> ProviderResult<RwLockWriteGuard<'a, T>> {
        lock.write().map_err(|_| Self::poisoned(name))
    }

    fn poisoned(name: &str) -> ProviderError {
        ProviderError::ConfigurationError {
            provider: SYNTHETIC.to_owned(),
            details: format!("RwLock poisoned: {name} lock"),
        }
    }

    fn ensure_active(&self) -> ProviderResult<()> {
        if self.cancel.is_cancelled() {
            return Err(ProviderError::cancelled(SYNTHETIC));
        }
        Ok(())
    }

    fn injected_failure(key: &str, action: &str) -> ProviderError {
        ProviderError::ApiError {
            provider: SYNTHETIC.to_owned(),
            status_code: 500,
            message: format!("injected {action} failure for {key}"),
            retryable: false,
        }
    }

    fn check_write(&self, key: &str) -> ProviderResult<()> {
        self.ensure_active()?;
        if Self::read_lock(&self.failing_writes, "failing_writes")?
            .contains(key)
        {
            return Err(Self::injected_failure(key, "write"));
        }
        Ok(())
    }

    fn log_write(&self, record: WriteRecord) -> ProviderResult<()> {
        let count = {
            let mut writes = Self::write_lock(&self.writes, "writes")?;
            writes.push(record);
            writes.len()
        };
        if let Some(trip) = Self::read_lock(&self.cancel_after, "cancel_after")?.as_ref() {
            if count >= trip.writes {
                debug!(writes = count, "Synthetic provider tripping cancellation");
                trip.token.cancel();
            }
        }
        Ok(())
    }

    fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> Page<T> {
        let size = page_size.max(1) as usize;
        let page = page.max(1);
        let page_count = items.len().div_ceil(size) as u32;
        let start = (page as usize - 1).saturating_mul(size);
        Page {
            page,
            page_count,
            items: items.iter().skip(start).take(size).cloned().collect(),
        }
    }
}

#[async_trait]
impl RoutineProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        SYNTHETIC
    }

    async fn list_workouts(&self, page: u32, page_size: u32) -> ProviderResult<Page<Workout>> {
        self.ensure_active()?;
        let mut workouts = Self::read_lock(&self.workouts, "workouts")?.clone();
        workouts.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(Self::paginate(&workouts, page, page_size))
    }

    async fn list_routines(&self, page: u32, page_size: u32) -> ProviderResult<Page<Routine>> {
        self.ensure_active()?;
        let routines: Vec<Routine> = Self::read_lock(&self.routines, "routines")?
            .values()
            .cloned()
            .collect();
        Ok(Self::paginate(&routines, page, page_size))
    }

    async fn get_routine(&self, routine_id: &str) -> ProviderResult<Routine> {
        self.ensure_active()?;
        if Self::read_lock(&self.failing_reads, "failing_reads")?
            .contains(routine_id)
        {
            return Err(Self::injected_failure(routine_id, "read"));
        }
        self.routine(routine_id)?
            .ok_or_else(|| ProviderError::not_found(SYNTHETIC, "routine", routine_id))
    }

    async fn create_routine(&self, payload: &RoutinePayload) -> ProviderResult<Routine> {
        self.check_write(&payload.title)?;
        let id = format!(
            "synthetic-routine-{}",
            self.next_id.fetch_add(1, Ordering::SeqCst)
        );
        let routine = Routine {
            id: id.clone(),
            title: payload.title.clone(),
            folder_id: payload.folder_id,
            updated_at: Some(Utc::now()),
            exercises: payload.exercises.clone(),
        };
        self.add_routine(routine.clone())?;
        self.log_write(WriteRecord {
            operation: WriteOperation::Create,
            routine_id: id,
            payload: payload.clone(),
        })?;
        Ok(routine)
    }

    async fn update_routine(
        &self,
        routine_id: &str,
        payload: &RoutinePayload,
    ) -> ProviderResult<Routine> {
        self.check_write(routine_id)?;
        let updated = {
            let mut routines = Self::write_lock(&self.routines, "routines")?;
            let routine = routines
                .get_mut(routine_id)
                .ok_or_else(|| ProviderError::not_found(SYNTHETIC, "routine", routine_id))?;
            routine.title.clone_from(&payload.title);
            routine.exercises.clone_from(&payload.exercises);
            routine.updated_at = Some(Utc::now());
            routine.clone()
        };
        self.log_write(WriteRecord {
            operation: WriteOperation::Update,
            routine_id: routine_id.to_owned(),
            payload: payload.clone(),
        })?;
        Ok(updated)
    }
}
