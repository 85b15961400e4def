// ABOUTME: import command - seeds progression state from existing remote day routines
// ABOUTME: Finds routines by stored id or by "GZCLP Day" title, then runs stage detection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use gzclp_sync::constants::sync::DEFAULT_PAGE_SIZE;
use gzclp_sync::database_plugins::{validate_program, ProgressionRepository};
use gzclp_sync::errors::{AppError, AppResult};
use gzclp_sync::models::{Day, ProgramConfig, Routine};
use gzclp_sync::progression::bootstrap_from_routines;
use gzclp_sync::providers::{fetch_all_routines, find_routine, RoutineProvider};
use gzclp_sync::sync::routine_title;
use tracing::{info, warn};

use super::CommandContext;
use crate::helpers::args::parse_manual_entry;
use crate::helpers::display::display_bootstrap;

/// Day routines by recorded id, falling back to the conventional title
async fn day_routines(
    provider: &dyn RoutineProvider,
    program: &ProgramConfig,
) -> AppResult<BTreeMap<Day, Routine>> {
    let mut found = BTreeMap::new();
    let mut missing = Vec::new();
    for day in Day::ALL {
        let routine = match program.routine_id(day) {
            Some(id) => find_routine(provider, id).await?,
            None => None,
        };
        match routine {
            Some(routine) => {
                found.insert(day, routine);
            }
            None => missing.push(day),
        }
    }

    if !missing.is_empty() {
        let all = fetch_all_routines(provider, DEFAULT_PAGE_SIZE).await?;
        for day in missing {
            let title = routine_title(day);
            match all.iter().find(|r| r.title == title) {
                Some(routine) => {
                    found.insert(day, routine.clone());
                }
                None => warn!(day = %day, title = %title, "No routine found for day"),
            }
        }
    }
    Ok(found)
}

/// Programme from `file` when given, otherwise the stored one
fn load_program(ctx: &CommandContext, file: Option<&Path>) -> AppResult<ProgramConfig> {
    let Some(file) = file else {
        return ctx.program();
    };
    let raw = fs::read_to_string(file).map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}", file.display())).with_source(e)
    })?;
    let program: ProgramConfig = serde_json::from_str(&raw)?;
    if program.exercises.is_empty() {
        return Err(AppError::invalid_input(format!(
            "{} lists no exercises",
            file.display()
        )));
    }
    validate_program(&program)?;
    info!(path = %file.display(), exercises = program.exercises.len(), "Loaded programme");
    Ok(ctx.config.resolve_program_unit(program))
}

pub async fn run(
    ctx: &CommandContext,
    program_file: Option<&Path>,
    force: bool,
    manual: &[String],
) -> AppResult<()> {
    let mut program = load_program(ctx, program_file)?;
    if !force && !ctx.repo.progression()?.is_empty() {
        return Err(AppError::invalid_input(
            "Progression state already exists; pass --force to replace it",
        ));
    }

    let provider = ctx.provider()?;
    let routines = day_routines(&provider, &program).await?;
    if routines.is_empty() {
        return Err(AppError::not_found("GZCLP day routines"));
    }
    for (day, routine) in &routines {
        program.routine_ids.insert(*day, routine.id.clone());
    }

    let unit = program.unit;
    let mut report = bootstrap_from_routines(&program, &routines);
    for raw in manual {
        let (key, stage, weight) = parse_manual_entry(raw)?;
        report.resolve(&key, stage, unit.to_kg(weight));
    }

    ctx.repo.save_program(&program)?;
    ctx.repo.save_progression(&report.store)?;
    info!(
        days = routines.len(),
        seeded = report.store.len(),
        manual = report.manual_required.len(),
        "Import saved"
    );
    display_bootstrap(&report, unit);
    Ok(())
}
