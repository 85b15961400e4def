// ABOUTME: Output formatting helpers for gzclp-cli
// ABOUTME: Renders pending changes, push previews, sync results, forecasts, and import reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gzclp_sync::algorithms::progression_calculator::format_weight;
use gzclp_sync::algorithms::ProgressionForecast;
use gzclp_sync::models::{ChangeType, ProgressionKey, WeightUnit};
use gzclp_sync::progression::{BootstrapReport, PendingChange};
use gzclp_sync::sync::{PushPreview, SyncResult};

/// Weight in `unit` with its symbol
pub fn weight(kg: f64, unit: WeightUnit) -> String {
    format!("{} {}", format_weight(unit.from_kg(kg)), unit.symbol())
}

const fn change_label(change_type: ChangeType) -> &'static str {
    match change_type {
        ChangeType::Progress => "progress",
        ChangeType::StageChange => "stage change",
        ChangeType::Deload => "deload",
        ChangeType::Repeat => "repeat",
    }
}

/// List pending changes
pub fn display_pending_changes(changes: &[PendingChange], unit: WeightUnit) {
    if changes.is_empty() {
        println!("No pending changes.");
        return;
    }
    println!("\nPending changes ({}):", changes.len());
    println!("{}", "=".repeat(80));
    for change in changes {
        println!(
            "{}  {:<24} {:<12} {} -> {}  stage {} -> {}",
            &change.id.to_string()[..8],
            change.exercise_name,
            change_label(change.change_type),
            weight(change.current_weight, unit),
            weight(change.new_weight, unit),
            change.current_stage,
            change.new_stage,
        );
        println!("          {}", change.reason);
        if let Some(d) = change.discrepancy {
            println!(
                "          logged {} (stored {})",
                weight(d.actual_weight, unit),
                weight(d.stored_weight, unit)
            );
        }
    }
    println!("{}", "=".repeat(80));
}

/// Print the push preview as a per-day table
pub fn display_preview(preview: &PushPreview, unit: WeightUnit) {
    for day in &preview.days {
        let status = day
            .routine_title
            .as_deref()
            .map_or_else(|| "not created".to_owned(), ToOwned::to_owned);
        println!("\nDay {} ({status})", day.day);
        println!("{}", "-".repeat(60));
        for exercise in &day.exercises {
            let remote = exercise
                .remote_weight
                .map_or_else(|| "-".to_owned(), |w| weight(w, unit));
            println!(
                "  {} {:<24} local {:>10}  remote {:>10}",
                if exercise.changed { "*" } else { " " },
                exercise.exercise_name,
                weight(exercise.local_weight, unit),
                remote,
            );
        }
    }
    println!("\n{} exercise(s) differ.", preview.changed_count());
}

/// Summarise a sync run
pub fn display_sync_result(result: &SyncResult) {
    println!("\nSync summary");
    println!("{}", "=".repeat(40));
    for (day, id) in &result.created_routine_ids {
        println!("  created  {day}  ({id})");
    }
    for day in &result.updated {
        println!("  updated  {day}");
    }
    for day in &result.unchanged {
        println!("  unchanged {day}");
    }
    for failure in &result.errors {
        println!("  FAILED   {}: {}", failure.day, failure.error);
    }
    if !result.pulls.is_empty() {
        println!("  pulled {} remote weight(s)", result.pulls.len());
    }
    if result.cancelled {
        println!("  cancelled: remaining days were not synced; run sync again to finish");
    }
}

/// Print a forecast for `key`
pub fn display_forecast(key: &ProgressionKey, forecast: &ProgressionForecast, unit: WeightUnit) {
    println!("\nForecast for {key}");
    println!("{}", "=".repeat(60));
    for p in &forecast.predictions {
        println!(
            "  #{:<3} week {:<3} {:>10}  stage {}  {:<12} {:>4.0}%",
            p.workout_index,
            p.week,
            weight(p.weight, unit),
            p.stage,
            change_label(p.change_type),
            p.confidence * 100.0,
        );
    }
    println!(
        "\nOverall confidence: {:.0}%",
        forecast.overall_confidence * 100.0
    );
    match forecast.weeks_to_deload {
        Some(week) => println!("Next deload expected around week {week}"),
        None => println!("No deload expected in this horizon"),
    }
}

/// Summarise an import
pub fn display_bootstrap(report: &BootstrapReport, unit: WeightUnit) {
    println!("\nImported {} progression key(s)", report.store.len());
    for (key, state) in &report.store {
        println!(
            "  {key:<20} {:>10}  stage {}",
            weight(state.current_weight, unit),
            state.stage
        );
    }
    if !report.manual_required.is_empty() {
        println!("\nNeeds manual input (re-run with --manual KEY=STAGE@WEIGHT):");
        for m in &report.manual_required {
            let detected = m
                .detected_weight
                .map_or_else(|| "no weight".to_owned(), |w| weight(w, unit));
            println!("  {} ({} on {}, {detected})", m.progression_key, m.tier, m.day);
        }
    }
}
