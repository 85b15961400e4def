// ABOUTME: Forward migrations for the persisted state document
// ABOUTME: Works on raw JSON so older documents load before typed deserialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # State Migrations
//!
//! | Version | Shape                                                        |
//! |---------|--------------------------------------------------------------|
//! | 1       | no `schema_version`, no `base_weight`, no AMRAP metadata, no history |
//! | 2       | current                                                      |
//!
//! Documents newer than this build are loaded as they are, with a warning.
//! There is no downgrade path.

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::constants::persistence::CURRENT_SCHEMA_VERSION;
use crate::errors::{AppError, AppResult};

/// Result of bringing a document up to date
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    /// Migrated document
    pub document: Value,
    /// Version the document was stored with
    pub from_version: u32,
    /// Whether any migration step ran
    pub migrated: bool,
}

/// Version a document claims; a missing field means version 1
fn schema_version(document: &Map<String, Value>) -> AppResult<u32> {
    match document.get("schema_version") {
        None | Some(Value::Null) => Ok(1),
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| {
                AppError::invalid_input(format!("Invalid schema_version in state document: {value}"))
            }),
    }
}

/// v1 → v2: seed `base_weight` from `current_weight` and add an empty history
fn migrate_v1_to_v2(document: &mut Map<String, Value>) {
    if let Some(Value::Object(progression)) = document.get_mut("progression") {
        for state in progression.values_mut() {
            let Value::Object(state) = state else {
                continue;
            };
            if !state.contains_key("base_weight") {
                let current = state.get("current_weight").cloned().unwrap_or(Value::Null);
                state.insert("base_weight".to_owned(), current);
            }
            state.entry("amrap_record").or_insert_with(|| Value::from(0));
        }
    }
    document
        .entry("history")
        .or_insert_with(|| Value::Object(Map::new()));
    document.insert("schema_version".to_owned(), Value::from(2));
}

/// Bring `document` to the current schema version
///
/// # Errors
///
/// Returns an error when the document is not a JSON object or carries an
/// unreadable `schema_version`
pub fn migrate(document: Value) -> AppResult<MigrationOutcome> {
    let Value::Object(mut object) = document else {
        return Err(AppError::invalid_input(
            "State document must be a JSON object",
        ));
    };

    let from_version = schema_version(&object)?;
    if from_version > CURRENT_SCHEMA_VERSION {
        warn!(
            from_version,
            supported = CURRENT_SCHEMA_VERSION,
            "State document is newer than this build; loading as-is"
        );
        return Ok(MigrationOutcome {
            document: Value::Object(object),
            from_version,
            migrated: false,
        });
    }

    let mut version = from_version;
    if version == 1 {
        migrate_v1_to_v2(&mut object);
        version = 2;
    }

    let migrated = version != from_version;
    if migrated {
        info!(from_version, to_version = version, "Migrated state document");
    }
    Ok(MigrationOutcome {
        document: Value::Object(object),
        from_version,
        migrated,
    })
}
