// ABOUTME: Display weight unit with kilogram conversion and per-unit increments
// ABOUTME: Increments and deload floors are defined per unit system, never converted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::MuscleGroup;
use crate::constants::units::{
    KG_BAR_FLOOR, KG_LOWER_INCREMENT, KG_PER_LB, KG_UPPER_INCREMENT, LB_BAR_FLOOR,
    LB_LOWER_INCREMENT, LB_UPPER_INCREMENT,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit the lifter loads the bar in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Kilograms
    #[default]
    Kg,
    /// Pounds
    Lbs,
}

impl WeightUnit {
    /// Convert a stored kilogram value into this unit
    #[must_use]
    pub fn from_kg(self, kg: f64) -> f64 {
        match self {
            Self::Kg => kg,
            Self::Lbs => kg / KG_PER_LB,
        }
    }

    /// Convert a value in this unit into kilograms for storage
    #[must_use]
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            Self::Kg => value,
            Self::Lbs => value * KG_PER_LB,
        }
    }

    /// Progression increment in this unit
    #[must_use]
    pub const fn increment(self, group: MuscleGroup) -> f64 {
        match (self, group) {
            (Self::Kg, MuscleGroup::Upper) => KG_UPPER_INCREMENT,
            (Self::Kg, MuscleGroup::Lower) => KG_LOWER_INCREMENT,
            (Self::Lbs, MuscleGroup::Upper) => LB_UPPER_INCREMENT,
            (Self::Lbs, MuscleGroup::Lower) => LB_LOWER_INCREMENT,
        }
    }

    /// Lowest weight a deload may produce, in this unit
    #[must_use]
    pub const fn deload_floor(self) -> f64 {
        match self {
            Self::Kg => KG_BAR_FLOOR,
            Self::Lbs => LB_BAR_FLOOR,
        }
    }

    /// Unit suffix for messages
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilograms" => Ok(Self::Kg),
            "lb" | "lbs" | "pounds" => Ok(Self::Lbs),
            other => Err(format!("unknown weight unit: {other}")),
        }
    }
}
