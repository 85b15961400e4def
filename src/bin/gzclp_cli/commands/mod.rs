// ABOUTME: Command modules and shared context for gzclp-cli
// ABOUTME: The context owns configuration, the state repository, and the cancellation token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod analyze;
pub mod apply;
pub mod import;
pub mod predict;
pub mod preview;
pub mod sync;

use gzclp_sync::config::environment::ServerConfig;
use gzclp_sync::database_plugins::{ProgressionRepository, Repository};
use gzclp_sync::errors::{AppError, AppResult};
use gzclp_sync::models::ProgramConfig;
use gzclp_sync::providers::{initialize_shared_client, HevyProvider};
use tokio_util::sync::CancellationToken;

/// Everything a command needs
pub struct CommandContext {
    pub config: ServerConfig,
    pub repo: Repository,
    pub cancel: CancellationToken,
}

impl CommandContext {
    /// Open the state repository and prepare the HTTP client
    pub fn new(config: ServerConfig, cancel: CancellationToken) -> AppResult<Self> {
        initialize_shared_client(config.http);
        let repo = Repository::open(&config.state_path)?;
        Ok(Self {
            config,
            repo,
            cancel,
        })
    }

    /// Remote routine service client bound to the cancellation token
    pub fn provider(&self) -> AppResult<HevyProvider> {
        let provider = HevyProvider::new(self.config.hevy_config()?)?;
        Ok(provider.with_cancellation(self.cancel.clone()))
    }

    /// Stored programme with the configured weight unit applied
    pub fn stored_program(&self) -> AppResult<ProgramConfig> {
        Ok(self.config.resolve_program_unit(self.repo.program()?))
    }

    /// Programme configuration, which must list at least one exercise
    pub fn program(&self) -> AppResult<ProgramConfig> {
        let program = self.stored_program()?;
        if program.exercises.is_empty() {
            return Err(AppError::config_invalid(format!(
                "No exercises configured in {}",
                self.config.state_path.display()
            )));
        }
        Ok(program)
    }
}
