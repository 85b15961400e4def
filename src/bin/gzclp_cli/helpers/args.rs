// ABOUTME: Parsers for compound command-line values
// ABOUTME: ID=WEIGHT overrides and KEY=STAGE@WEIGHT manual import entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gzclp_sync::errors::{AppError, AppResult};
use gzclp_sync::models::{ProgressionKey, Stage};
use uuid::Uuid;

/// Parse a change id, accepting any unambiguous prefix of `known`
pub fn resolve_change_id(raw: &str, known: &[Uuid]) -> AppResult<Uuid> {
    if let Ok(id) = Uuid::parse_str(raw) {
        return Ok(id);
    }
    let mut matches = known.iter().filter(|id| id.to_string().starts_with(raw));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(*id),
        (Some(_), Some(_)) => Err(AppError::invalid_input(format!(
            "Change id prefix '{raw}' is ambiguous"
        ))),
        (None, _) => Err(AppError::not_found(format!("Pending change '{raw}'"))),
    }
}

/// Split `ID=WEIGHT`
pub fn parse_weight_override(raw: &str) -> AppResult<(&str, f64)> {
    let (id, weight) = raw.split_once('=').ok_or_else(|| {
        AppError::invalid_input(format!("Expected ID=WEIGHT, got '{raw}'"))
    })?;
    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_input(format!("Invalid weight in '{raw}'")))?;
    if !weight.is_finite() || weight < 0.0 {
        return Err(AppError::invalid_input(format!(
            "Weight must be a non-negative number in '{raw}'"
        )));
    }
    Ok((id.trim(), weight))
}

/// Split `KEY=STAGE@WEIGHT`
pub fn parse_manual_entry(raw: &str) -> AppResult<(ProgressionKey, Stage, f64)> {
    let invalid = || AppError::invalid_input(format!("Expected KEY=STAGE@WEIGHT, got '{raw}'"));
    let (key, rest) = raw.split_once('=').ok_or_else(invalid)?;
    let (stage, weight) = rest.split_once('@').ok_or_else(invalid)?;

    let stage = stage
        .trim()
        .parse::<u8>()
        .map_err(|_| invalid())
        .and_then(|s| Stage::try_from(s).map_err(AppError::invalid_input))?;
    let weight: f64 = weight.trim().parse().map_err(|_| invalid())?;
    let key = key
        .trim()
        .parse::<ProgressionKey>()
        .map_err(|_| invalid())?;
    Ok((key, stage, weight))
}
