// ABOUTME: In-memory repository for tests and dry runs
// ABOUTME: Holds a single state document behind an RwLock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::database_plugins::{validate_program, ProgressionRepository, StateDocument};
use crate::errors::{AppError, AppResult};
use crate::models::{HistoryBook, ProgramConfig, ProgressionStore};
use crate::progression::PendingChange;

/// Repository that forgets everything when dropped
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    document: RwLock<StateDocument>,
}

impl InMemoryRepository {
    /// Empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository seeded with `document`
    #[must_use]
    pub fn with_document(document: StateDocument) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }

    /// Copy of the whole document
    ///
    /// # Errors
    ///
    /// Returns a storage error if the lock is poisoned
    pub fn snapshot(&self) -> AppResult<StateDocument> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, StateDocument>> {
        self.document
            .read()
            .map_err(|_| AppError::storage("In-memory state lock poisoned"))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, StateDocument>> {
        self.document
            .write()
            .map_err(|_| AppError::storage("In-memory state lock poisoned"))
    }
}

impl ProgressionRepository for InMemoryRepository {
    fn program(&self) -> AppResult<ProgramConfig> {
        Ok(self.read()?.program.clone())
    }

    fn save_program(&self, program: &ProgramConfig) -> AppResult<()> {
        validate_program(program)?;
        self.write()?.program = program.clone();
        Ok(())
    }

    fn progression(&self) -> AppResult<ProgressionStore> {
        Ok(self.read()?.progression.clone())
    }

    fn save_progression(&self, store: &ProgressionStore) -> AppResult<()> {
        self.write()?.progression = store.clone();
        Ok(())
    }

    fn pending_changes(&self) -> AppResult<Vec<PendingChange>> {
        Ok(self.read()?.pending_changes.clone())
    }

    fn save_pending_changes(&self, changes: &[PendingChange]) -> AppResult<()> {
        self.write()?.pending_changes = changes.to_vec();
        Ok(())
    }

    fn history(&self) -> AppResult<HistoryBook> {
        Ok(self.read()?.history.clone())
    }

    fn save_history(&self, history: &HistoryBook) -> AppResult<()> {
        self.write()?.history = history.clone();
        Ok(())
    }
}
