// ABOUTME: apply command - commits reviewed pending changes to progression state
// ABOUTME: Supports selecting, rejecting, and re-weighting changes before they are applied
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, BTreeSet};

use gzclp_sync::database_plugins::ProgressionRepository;
use gzclp_sync::errors::AppResult;
use gzclp_sync::logging::AppLogger;
use gzclp_sync::progression::{apply_all_pending_changes, record_history, PendingChange};
use tracing::info;
use uuid::Uuid;

use super::CommandContext;
use crate::helpers::args::{parse_weight_override, resolve_change_id};
use crate::helpers::display::display_pending_changes;

pub fn run(
    ctx: &CommandContext,
    only: &[String],
    reject: &[String],
    weights: &[String],
) -> AppResult<()> {
    let unit = ctx.stored_program()?.unit;
    let pending = ctx.repo.pending_changes()?;
    if pending.is_empty() {
        println!("No pending changes to apply.");
        return Ok(());
    }

    let known: Vec<Uuid> = pending.iter().map(|c| c.id).collect();
    let only = only
        .iter()
        .map(|raw| resolve_change_id(raw, &known))
        .collect::<AppResult<BTreeSet<_>>>()?;
    let reject = reject
        .iter()
        .map(|raw| resolve_change_id(raw, &known))
        .collect::<AppResult<BTreeSet<_>>>()?;
    let overrides = weights
        .iter()
        .map(|raw| {
            let (id, weight) = parse_weight_override(raw)?;
            Ok((resolve_change_id(id, &known)?, unit.to_kg(weight)))
        })
        .collect::<AppResult<BTreeMap<_, _>>>()?;

    let mut selected: Vec<PendingChange> = Vec::new();
    let mut remaining: Vec<PendingChange> = Vec::new();
    for change in pending {
        if reject.contains(&change.id) {
            continue;
        }
        if only.is_empty() || only.contains(&change.id) {
            let change = match overrides.get(&change.id) {
                Some(weight) => change.with_new_weight(*weight),
                None => change,
            };
            selected.push(change);
        } else {
            remaining.push(change);
        }
    }
    selected.sort_by_key(|c| c.workout_date);

    let store = apply_all_pending_changes(&ctx.repo.progression()?, &selected);
    let history = record_history(&ctx.repo.history()?, &selected);
    ctx.repo.save_progression(&store)?;
    ctx.repo.save_history(&history)?;
    ctx.repo.save_pending_changes(&remaining)?;
    for change in &selected {
        AppLogger::log_progression_change(
            &change.progression_key,
            change.change_type,
            change.current_weight,
            change.new_weight,
        );
    }

    info!(
        applied = selected.len(),
        rejected = reject.len(),
        remaining = remaining.len(),
        "Pending changes applied"
    );
    println!("Applied {} change(s), rejected {}.", selected.len(), reject.len());
    if !remaining.is_empty() {
        display_pending_changes(&remaining, unit);
    }
    Ok(())
}
