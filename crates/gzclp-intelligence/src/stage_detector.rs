// ABOUTME: Stage inference from prescribed or logged sets via fixed set/rep patterns
// ABOUTME: Bootstraps progression state from existing routines; misses fall back to manual input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{LoggedSet, RepScheme, SetType, Stage, Tier};
use serde::{Deserialize, Serialize};

/// T1 `(set count, modal reps)` patterns in match order
const T1_PATTERNS: [(usize, u32, Stage); 3] = [
    (5, 3, Stage::First),
    (6, 2, Stage::Second),
    (10, 1, Stage::Third),
];

/// T2 `(set count, modal reps)` patterns in match order
const T2_PATTERNS: [(usize, u32, Stage); 3] = [
    (3, 10, Stage::First),
    (3, 8, Stage::Second),
    (3, 6, Stage::Third),
];

/// How a stage was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionConfidence {
    /// Matched a known pattern
    High,
    /// Entered by the lifter after a pattern miss
    Manual,
}

/// Detected stage with its scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDetection {
    /// Detected stage
    pub stage: Stage,
    /// How the stage was established
    pub confidence: DetectionConfidence,
    /// Scheme for the stage
    pub rep_scheme: RepScheme,
}

impl StageDetection {
    /// Result for a stage supplied by the lifter
    #[must_use]
    pub const fn manual(stage: Stage, tier: Tier) -> Self {
        Self {
            stage,
            confidence: DetectionConfidence::Manual,
            rep_scheme: RepScheme::for_stage(tier, stage),
        }
    }

    const fn high(stage: Stage, tier: Tier) -> Self {
        Self {
            stage,
            confidence: DetectionConfidence::High,
            rep_scheme: RepScheme::for_stage(tier, stage),
        }
    }
}

/// Pattern-matching stage detector
pub struct StageDetector;

impl StageDetector {
    /// Infer the stage of `tier` from `sets`
    ///
    /// Only normal sets are considered. Returns `None` when the sets match no
    /// known pattern; the caller is expected to ask the lifter.
    #[must_use]
    pub fn detect<S: LoggedSet>(sets: &[S], tier: Tier) -> Option<StageDetection> {
        if tier == Tier::T3 {
            return Some(StageDetection::high(Stage::First, tier));
        }

        let normal: Vec<&S> = sets
            .iter()
            .filter(|s| s.set_type() == SetType::Normal)
            .collect();
        let modal = Self::modal_reps(normal.iter().filter_map(|s| s.reps()))?;
        let patterns = if tier == Tier::T1 {
            &T1_PATTERNS
        } else {
            &T2_PATTERNS
        };

        patterns
            .iter()
            .find(|(count, reps, _)| *count == normal.len() && *reps == modal)
            .map(|(_, _, stage)| StageDetection::high(*stage, tier))
    }

    /// Most frequent rep count; ties go to the value seen first
    #[must_use]
    pub fn modal_reps(reps: impl IntoIterator<Item = u32>) -> Option<u32> {
        let mut counts: Vec<(u32, usize)> = Vec::new();
        for value in reps {
            match counts.iter_mut().find(|(seen, _)| *seen == value) {
                Some((_, count)) => *count += 1,
                None => counts.push((value, 1)),
            }
        }

        let mut best: Option<(u32, usize)> = None;
        for (value, count) in counts {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
    }

    /// Heaviest normal-set weight (kg); unrecorded weights are skipped, not zeroed
    #[must_use]
    pub fn extract_weight<S: LoggedSet>(sets: &[S]) -> Option<f64> {
        sets.iter()
            .filter(|s| s.set_type() == SetType::Normal)
            .filter_map(|s| s.weight_kg())
            .reduce(f64::max)
    }
}
