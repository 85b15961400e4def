// ABOUTME: sync command - reconciles the day routines with local progression
// ABOUTME: Default selection pushes changed exercises; --pull/--skip/--push override per key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gzclp_sync::database_plugins::ProgressionRepository;
use gzclp_sync::errors::{AppError, AppResult, ErrorCode};
use gzclp_sync::models::ProgressionKey;
use gzclp_sync::sync::{
    apply_created_routine_ids, apply_pull_updates, build_push_preview, sync_with_selection,
    SyncAction, SyncSelection,
};
use tracing::info;

use super::CommandContext;
use crate::helpers::display::display_sync_result;

pub async fn run(
    ctx: &CommandContext,
    pull: &[String],
    skip: &[String],
    push: &[String],
) -> AppResult<()> {
    let program = ctx.program()?;
    let store = ctx.repo.progression()?;
    let provider = ctx.provider()?;

    let preview = build_push_preview(&provider, &program, &store).await?;
    let mut selection = SyncSelection::default_for(&preview);
    for (keys, action) in [
        (push, SyncAction::Push),
        (skip, SyncAction::Skip),
        (pull, SyncAction::Pull),
    ] {
        for raw in keys {
            selection.set_all_for_key(&ProgressionKey::from(raw.clone()), action);
        }
    }

    let result =
        sync_with_selection(&provider, &preview, &selection, &program, &store, &ctx.cancel).await;

    if !result.created_routine_ids.is_empty() {
        ctx.repo
            .save_program(&apply_created_routine_ids(&program, &result))?;
    }
    if !result.pulls.is_empty() {
        ctx.repo
            .save_progression(&apply_pull_updates(&store, &result.pulls))?;
        info!(count = result.pulls.len(), "Adopted remote weights");
    }
    display_sync_result(&result);

    if result.cancelled {
        return Err(AppError::new(
            ErrorCode::OperationCancelled,
            "Sync cancelled; completed days were kept",
        ));
    }
    if !result.errors.is_empty() {
        return Err(AppError::new(
            ErrorCode::ExternalServiceError,
            format!("{} day routine(s) failed to sync", result.errors.len()),
        ));
    }
    Ok(())
}
