// ABOUTME: Repository factory selecting a storage backend from a location string
// ABOUTME: "memory:" selects the in-memory backend; anything else is a JSON file path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::database_plugins::{InMemoryRepository, JsonFileRepository, ProgressionRepository};
use crate::errors::AppResult;
use crate::models::{Day, HistoryBook, ProgramConfig, ProgressionStore};
use crate::progression::PendingChange;

/// Location prefix selecting the in-memory backend
pub const MEMORY_LOCATION: &str = "memory:";

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Process-local, discarded on exit
    Memory,
    /// JSON document on disk
    JsonFile,
}

/// Repository wrapper that delegates to the selected backend
#[derive(Debug)]
pub enum Repository {
    /// In-memory backend
    Memory(InMemoryRepository),
    /// JSON document backend
    JsonFile(JsonFileRepository),
}

impl Repository {
    /// Open the backend named by `location`
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON document exists but cannot be loaded
    pub fn open(location: &Path) -> AppResult<Self> {
        let repo_type = detect_repository_type(location);
        debug!(location = %location.display(), repo_type = ?repo_type, "Opening repository");
        let repo = match repo_type {
            RepositoryType::Memory => Self::Memory(InMemoryRepository::new()),
            RepositoryType::JsonFile => Self::JsonFile(JsonFileRepository::open(location)?),
        };
        info!("Repository ready: {}", repo.backend_info());
        Ok(repo)
    }

    /// Descriptive string for the backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "in-memory (discarded on exit)",
            Self::JsonFile(_) => "JSON file",
        }
    }

    /// Backend type
    #[must_use]
    pub const fn repository_type(&self) -> RepositoryType {
        match self {
            Self::Memory(_) => RepositoryType::Memory,
            Self::JsonFile(_) => RepositoryType::JsonFile,
        }
    }

    fn inner(&self) -> &dyn ProgressionRepository {
        match self {
            Self::Memory(repo) => repo,
            Self::JsonFile(repo) => repo,
        }
    }
}

/// Backend type for `location`
#[must_use]
pub fn detect_repository_type(location: &Path) -> RepositoryType {
    if location.to_string_lossy().starts_with(MEMORY_LOCATION) {
        RepositoryType::Memory
    } else {
        RepositoryType::JsonFile
    }
}

impl ProgressionRepository for Repository {
    fn program(&self) -> AppResult<ProgramConfig> {
        self.inner().program()
    }

    fn save_program(&self, program: &ProgramConfig) -> AppResult<()> {
        self.inner().save_program(program)
    }

    fn progression(&self) -> AppResult<ProgressionStore> {
        self.inner().progression()
    }

    fn save_progression(&self, store: &ProgressionStore) -> AppResult<()> {
        self.inner().save_progression(store)
    }

    fn pending_changes(&self) -> AppResult<Vec<PendingChange>> {
        self.inner().pending_changes()
    }

    fn save_pending_changes(&self, changes: &[PendingChange]) -> AppResult<()> {
        self.inner().save_pending_changes(changes)
    }

    fn history(&self) -> AppResult<HistoryBook> {
        self.inner().history()
    }

    fn save_history(&self, history: &HistoryBook) -> AppResult<()> {
        self.inner().save_history(history)
    }

    fn routine_ids(&self) -> AppResult<BTreeMap<Day, String>> {
        self.inner().routine_ids()
    }

    fn set_routine_id(&self, day: Day, routine_id: &str) -> AppResult<()> {
        self.inner().set_routine_id(day, routine_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_repository_type() {
        assert_eq!(
            detect_repository_type(Path::new("memory:")),
            RepositoryType::Memory
        );
        assert_eq!(
            detect_repository_type(Path::new("./gzclp-state.json")),
            RepositoryType::JsonFile
        );
    }
}
