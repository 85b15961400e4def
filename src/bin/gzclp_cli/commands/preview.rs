// ABOUTME: preview command - prints local vs. remote weights for each day routine
// ABOUTME: Read-only; nothing is written locally or remotely
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gzclp_sync::database_plugins::ProgressionRepository;
use gzclp_sync::errors::AppResult;
use gzclp_sync::sync::build_push_preview;

use super::CommandContext;
use crate::helpers::display::display_preview;

pub async fn run(ctx: &CommandContext, json: bool) -> AppResult<()> {
    let program = ctx.program()?;
    let store = ctx.repo.progression()?;
    let provider = ctx.provider()?;

    let preview = build_push_preview(&provider, &program, &store).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        display_preview(&preview, program.unit);
    }
    Ok(())
}
