// ABOUTME: JSON-file repository storing the whole state document in one file
// ABOUTME: Migrates on open and writes atomically through a sibling temp file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::{debug, info};

use crate::database_plugins::migrations::migrate;
use crate::database_plugins::{validate_program, ProgressionRepository, StateDocument};
use crate::errors::{AppError, AppResult};
use crate::models::{HistoryBook, ProgramConfig, ProgressionStore};
use crate::progression::PendingChange;

/// Repository backed by a single JSON document on disk
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    document: RwLock<StateDocument>,
}

impl JsonFileRepository {
    /// Open the document at `path`, starting empty if it does not exist
    ///
    /// Older documents are migrated in memory and written back on the next
    /// save.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// does not match the state schema after migration
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let document = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                AppError::storage(format!("Failed to read {}", path.display())).with_source(e)
            })?;
            let value: Value = serde_json::from_str(&raw)?;
            let outcome = migrate(value)?;
            let document: StateDocument = serde_json::from_value(outcome.document)?;
            info!(
                path = %path.display(),
                schema_version = document.schema_version,
                migrated = outcome.migrated,
                "Loaded state document"
            );
            document
        } else {
            debug!(path = %path.display(), "No state document yet; starting empty");
            StateDocument::default()
        };

        Ok(Self {
            path,
            document: RwLock::new(document),
        })
    }

    /// Location of the document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
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
            .map_err(|_| AppError::storage("State document lock poisoned"))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, StateDocument>> {
        self.document
            .write()
            .map_err(|_| AppError::storage("State document lock poisoned"))
    }

    /// Apply `update` and persist the result
    ///
    /// The served document only changes once the write has reached disk.
    fn update(&self, update: impl FnOnce(&mut StateDocument)) -> AppResult<()> {
        let mut document = self.write()?;
        let mut next = document.clone();
        update(&mut next);
        self.persist(&next)?;
        *document = next;
        Ok(())
    }

    fn persist(&self, document: &StateDocument) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!("Failed to create {}", parent.display())).with_source(e)
            })?;
        }

        let json = serde_json::to_string_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| {
            AppError::storage(format!("Failed to write {}", tmp.display())).with_source(e)
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            AppError::storage(format!("Failed to replace {}", self.path.display())).with_source(e)
        })?;
        debug!(path = %self.path.display(), "State document saved");
        Ok(())
    }
}

impl ProgressionRepository for JsonFileRepository {
    fn program(&self) -> AppResult<ProgramConfig> {
        Ok(self.read()?.program.clone())
    }

    fn save_program(&self, program: &ProgramConfig) -> AppResult<()> {
        validate_program(program)?;
        self.update(|doc| doc.program = program.clone())
    }

    fn progression(&self) -> AppResult<ProgressionStore> {
        Ok(self.read()?.progression.clone())
    }

    fn save_progression(&self, store: &ProgressionStore) -> AppResult<()> {
        self.update(|doc| doc.progression = store.clone())
    }

    fn pending_changes(&self) -> AppResult<Vec<PendingChange>> {
        Ok(self.read()?.pending_changes.clone())
    }

    fn save_pending_changes(&self, changes: &[PendingChange]) -> AppResult<()> {
        self.update(|doc| doc.pending_changes = changes.to_vec())
    }

    fn history(&self) -> AppResult<HistoryBook> {
        Ok(self.read()?.history.clone())
    }

    fn save_history(&self, history: &HistoryBook) -> AppResult<()> {
        self.update(|doc| doc.history = history.clone())
    }
}
