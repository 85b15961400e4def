// ABOUTME: Persistence abstraction for programme, progression, pending changes, and history
// ABOUTME: Plugin architecture with in-memory and JSON-file backends behind one trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::persistence::CURRENT_SCHEMA_VERSION;
use crate::errors::{AppError, AppResult};
use crate::models::{Day, HistoryBook, ProgramConfig, ProgressionStore};
use crate::progression::PendingChange;

/// Backend selection by location string
pub mod factory;
/// JSON document backend
pub mod json_file;
/// In-memory backend
pub mod memory;
/// State document schema migrations
pub mod migrations;

pub use factory::Repository;
pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;

/// Everything persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDocument {
    /// Schema the document was written with
    pub schema_version: u32,
    /// Exercise configuration and routine ids
    #[serde(default)]
    pub program: ProgramConfig,
    /// Progression state per key
    #[serde(default)]
    pub progression: ProgressionStore,
    /// Changes awaiting review
    #[serde(default)]
    pub pending_changes: Vec<PendingChange>,
    /// Applied-change history per key
    #[serde(default)]
    pub history: HistoryBook,
}

impl Default for StateDocument {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            program: ProgramConfig::default(),
            progression: ProgressionStore::new(),
            pending_changes: Vec::new(),
            history: HistoryBook::new(),
        }
    }
}

/// Reject programmes whose state could not be stored unambiguously
///
/// # Errors
///
/// Returns `InvalidInput` naming every exercise id that reads back as a
/// main-lift progression key
pub fn validate_program(program: &ProgramConfig) -> AppResult<()> {
    let ambiguous = program.ambiguous_exercise_ids();
    if ambiguous.is_empty() {
        return Ok(());
    }
    Err(AppError::invalid_input(format!(
        "Exercise ids clash with main-lift progression keys: {}",
        ambiguous.join(", ")
    )))
}

/// Core persistence abstraction
///
/// All backends implement this trait so commands stay storage-agnostic.
/// Reads return owned snapshots; writes replace the stored value.
pub trait ProgressionRepository: Send + Sync {
    /// Programme configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn program(&self) -> AppResult<ProgramConfig>;

    /// Replace the programme configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn save_program(&self, program: &ProgramConfig) -> AppResult<()>;

    /// Progression state
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn progression(&self) -> AppResult<ProgressionStore>;

    /// Replace the progression state
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn save_progression(&self, store: &ProgressionStore) -> AppResult<()>;

    /// Changes awaiting review
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn pending_changes(&self) -> AppResult<Vec<PendingChange>>;

    /// Replace the pending changes
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn save_pending_changes(&self, changes: &[PendingChange]) -> AppResult<()>;

    /// Exercise history
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn history(&self) -> AppResult<HistoryBook>;

    /// Replace the exercise history
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn save_history(&self, history: &HistoryBook) -> AppResult<()>;

    /// Remote routine id per day
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn routine_ids(&self) -> AppResult<BTreeMap<Day, String>> {
        Ok(self.program()?.routine_ids)
    }

    /// Record the remote routine backing `day`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written
    fn set_routine_id(&self, day: Day, routine_id: &str) -> AppResult<()> {
        let mut program = self.program()?;
        program.routine_ids.insert(day, routine_id.to_owned());
        self.save_program(&program)
    }
}
