// ABOUTME: GZCLP CLI - analyse workouts, review progression changes, and sync day routines
// ABOUTME: Thin command layer over the gzclp_sync library with a JSON state document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Store the programme and seed progression state from the existing day routines
//! gzclp-cli import --program program.json
//!
//! # Analyse the latest workouts into pending changes
//! gzclp-cli analyze --limit 5
//!
//! # Commit every pending change (or only some of them)
//! gzclp-cli apply
//! gzclp-cli apply --only 0b6c... --weight 0b6c...=102.5
//!
//! # Compare local weights with the day routines, then sync
//! gzclp-cli preview
//! gzclp-cli sync --pull lat-pulldown --skip squat-T2
//!
//! # Forecast a progression key
//! gzclp-cli predict squat-T1 --weeks 8
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gzclp_sync::config::environment::ServerConfig;
use gzclp_sync::errors::AppError;
use gzclp_sync::logging::LoggingConfig;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use commands::CommandContext;

#[derive(Parser)]
#[command(
    name = "gzclp-cli",
    about = "GZCLP progression and routine sync",
    long_about = "Analyse logged workouts into reviewable GZCLP progression changes and keep the four day routines in sync."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// State document override (defaults to GZCLP_STATE_PATH)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Fetch recent workouts and generate pending changes
    Analyze {
        /// Number of recent workouts to inspect
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Discard pending changes from earlier runs
        #[arg(long)]
        replace: bool,
    },

    /// Commit pending changes and record history
    Apply {
        /// Apply only these change ids (all when omitted)
        #[arg(long)]
        only: Vec<String>,

        /// Drop these change ids without applying them
        #[arg(long)]
        reject: Vec<String>,

        /// Override a change's target weight, as ID=WEIGHT in the display unit
        #[arg(long)]
        weight: Vec<String>,
    },

    /// Show local vs. remote weights for every day routine
    Preview {
        /// Print the preview as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reconcile day routines with local progression
    Sync {
        /// Adopt the remote weight for these progression keys
        #[arg(long)]
        pull: Vec<String>,

        /// Leave these progression keys untouched
        #[arg(long)]
        skip: Vec<String>,

        /// Push these progression keys even when unchanged
        #[arg(long)]
        push: Vec<String>,
    },

    /// Forecast upcoming sessions for a progression key
    Predict {
        /// Progression key, e.g. squat-T1 or an accessory id
        key: String,

        /// Weeks to simulate (defaults to the configured horizon)
        #[arg(long)]
        weeks: Option<u32>,
    },

    /// Seed progression state from existing remote routines
    Import {
        /// Programme configuration (JSON) to store before importing
        #[arg(long)]
        program: Option<PathBuf>,

        /// Replace existing progression state
        #[arg(long)]
        force: bool,

        /// Resolve an undetectable exercise, as KEY=STAGE@WEIGHT (stage 0-2)
        #[arg(long)]
        manual: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env().verbose(cli.verbose);
    if let Err(e) = logging.init() {
        eprintln!("Failed to initialise logging: {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<AppError>().map_or(1, AppError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(state) = cli.state {
        config.state_path = state;
    }
    if cli.verbose {
        info!("{}", config.summary());
    }

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; stopping after the current request");
            signal_token.cancel();
        }
    });

    let ctx = CommandContext::new(config, cancel)?;

    match cli.command {
        Command::Analyze { limit, replace } => commands::analyze::run(&ctx, limit, replace).await?,
        Command::Apply {
            only,
            reject,
            weight,
        } => commands::apply::run(&ctx, &only, &reject, &weight)?,
        Command::Preview { json } => commands::preview::run(&ctx, json).await?,
        Command::Sync { pull, skip, push } => {
            commands::sync::run(&ctx, &pull, &skip, &push).await?;
        }
        Command::Predict { key, weeks } => commands::predict::run(&ctx, &key, weeks)?,
        Command::Import {
            program,
            force,
            manual,
        } => commands::import::run(&ctx, program.as_deref(), force, &manual).await?,
    }

    Ok(())
}
