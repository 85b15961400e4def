// ABOUTME: Unit conversion constants and per-unit weight increments
// ABOUTME: Kilogram/pound factors, GZCLP increments, and empty-bar deload floors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Kilograms per pound (exact by definition)
pub const KG_PER_LB: f64 = 0.453_592_37;

/// Upper-body increment in kilograms
pub const KG_UPPER_INCREMENT: f64 = 2.5;
/// Lower-body increment in kilograms
pub const KG_LOWER_INCREMENT: f64 = 5.0;
/// Upper-body increment in pounds
pub const LB_UPPER_INCREMENT: f64 = 5.0;
/// Lower-body increment in pounds
pub const LB_LOWER_INCREMENT: f64 = 10.0;

/// Deload never goes below an empty barbell (kg)
pub const KG_BAR_FLOOR: f64 = 20.0;
/// Deload never goes below an empty barbell (lbs)
pub const LB_BAR_FLOOR: f64 = 45.0;
