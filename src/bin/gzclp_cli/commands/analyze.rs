// ABOUTME: analyze command - turns recent workouts into pending progression changes
// ABOUTME: Fetches workouts, resolves their day, runs the calculator, and stores the changes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gzclp_sync::constants::sync::DEFAULT_PAGE_SIZE;
use gzclp_sync::database_plugins::ProgressionRepository;
use gzclp_sync::errors::{AppError, AppResult};
use gzclp_sync::progression::pending_changes_for_workouts;
use gzclp_sync::providers::fetch_recent_workouts;
use tracing::info;

use super::CommandContext;
use crate::helpers::display::display_pending_changes;

pub async fn run(ctx: &CommandContext, limit: usize, replace: bool) -> AppResult<()> {
    let program = ctx.program()?;
    let store = ctx.repo.progression()?;
    if store.is_empty() {
        return Err(AppError::invalid_input(
            "No progression state yet; run `gzclp-cli import` first",
        ));
    }

    let provider = ctx.provider()?;
    let workouts = fetch_recent_workouts(&provider, limit, DEFAULT_PAGE_SIZE).await?;
    info!(count = workouts.len(), "Fetched recent workouts");

    let generated = pending_changes_for_workouts(&workouts, &program, &store, &program.routine_ids);

    let mut pending = if replace {
        Vec::new()
    } else {
        ctx.repo.pending_changes()?
    };
    let before = pending.len();
    for change in generated {
        let duplicate = pending.iter().any(|p| {
            p.progression_key == change.progression_key && p.workout_id == change.workout_id
        });
        if !duplicate {
            pending.push(change);
        }
    }
    info!(added = pending.len() - before, total = pending.len(), "Pending changes updated");

    ctx.repo.save_pending_changes(&pending)?;
    display_pending_changes(&pending, program.unit);
    Ok(())
}
