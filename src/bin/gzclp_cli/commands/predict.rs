// ABOUTME: predict command - forecasts upcoming sessions for one progression key
// ABOUTME: Feeds stored state and history into the deterministic progression simulator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gzclp_sync::algorithms::{PredictionInput, ProgressionPredictor};
use gzclp_sync::database_plugins::ProgressionRepository;
use gzclp_sync::errors::{AppError, AppResult};
use gzclp_sync::models::{
    ExerciseConfig, ExerciseHistory, MuscleGroup, ProgramConfig, ProgressionKey,
};

use super::CommandContext;
use crate::helpers::display::display_forecast;

fn muscle_group(program: &ProgramConfig, key: &ProgressionKey) -> MuscleGroup {
    match key {
        ProgressionKey::MainLift { lift, .. } => lift.muscle_group(),
        ProgressionKey::Accessory { exercise_id } => program
            .exercises
            .get(exercise_id)
            .map_or_else(MuscleGroup::default, ExerciseConfig::muscle_group),
    }
}

pub fn run(ctx: &CommandContext, raw_key: &str, weeks: Option<u32>) -> AppResult<()> {
    let program = ctx.program()?;
    let store = ctx.repo.progression()?;
    let history = ctx.repo.history()?;

    let key = ProgressionKey::from(raw_key.to_owned());
    let state = store
        .get(&key)
        .ok_or_else(|| AppError::not_found(format!("Progression key '{key}'")))?;

    let mut config = ctx.config.intelligence.prediction.clone();
    if let Some(weeks) = weeks {
        config.weeks_ahead = weeks;
        config
            .validate()
            .map_err(|e| AppError::invalid_input(format!("--weeks: {e}")).with_source(e))?;
    }

    let input = PredictionInput {
        tier: key.tier(),
        state,
        history: history.get(&key).map_or(&[][..], ExerciseHistory::entries),
        muscle_group: muscle_group(&program, &key),
        unit: program.unit,
        sessions_per_rotation: program.sessions_per_rotation(&key),
    };
    let forecast = ProgressionPredictor::predict(&input, &config);
    display_forecast(&key, &forecast, program.unit);
    Ok(())
}
