//! Core domain types for fitlog.
//!
//! This module defines the two persisted record kinds and the boundary
//! rules that turn loosely-typed stored JSON into them:
//! - Workout and meal records
//! - Closed category sets used when logging new records
//! - Lenient numeric coercion for stored values

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Record Types
// ============================================================================

/// A logged workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutRecord {
    pub id: i64,
    pub date: NaiveDate,
    /// Category label, opaque to the statistics engine
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Minutes
    #[serde(default, deserialize_with = "lenient_u32")]
    pub duration: u32,
    /// Kilocalories expended
    #[serde(default, deserialize_with = "lenient_u32")]
    pub calories: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A logged meal
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealRecord {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Kilocalories consumed
    #[serde(default, deserialize_with = "lenient_u32")]
    pub calories: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Common read-only view over both record kinds
pub trait Record {
    fn id(&self) -> i64;
    fn date(&self) -> NaiveDate;
    fn kind(&self) -> &str;
    fn calories(&self) -> u32;

    /// Minutes; record kinds without a duration report 0
    fn duration(&self) -> u32 {
        0
    }
}

impl Record for WorkoutRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn calories(&self) -> u32 {
        self.calories
    }

    fn duration(&self) -> u32 {
        self.duration
    }
}

impl Record for MealRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn kind(&self) -> &str {
        &self.kind
    }

    fn calories(&self) -> u32 {
        self.calories
    }
}

// ============================================================================
// Category Types
// ============================================================================

/// Workout categories accepted when logging
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Run,
    Gym,
    Bike,
    Swim,
    Other,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 5] = [
        WorkoutType::Run,
        WorkoutType::Gym,
        WorkoutType::Bike,
        WorkoutType::Swim,
        WorkoutType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Run => "run",
            WorkoutType::Gym => "gym",
            WorkoutType::Bike => "bike",
            WorkoutType::Swim => "swim",
            WorkoutType::Other => "other",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "run" | "running" => Ok(WorkoutType::Run),
            "gym" | "fitness" => Ok(WorkoutType::Gym),
            "bike" | "cycling" => Ok(WorkoutType::Bike),
            "swim" | "swimming" => Ok(WorkoutType::Swim),
            "other" => Ok(WorkoutType::Other),
            other => Err(crate::Error::Record(format!(
                "unknown workout type '{}' (expected one of: {})",
                other,
                join_names(WorkoutType::ALL.iter().map(WorkoutType::as_str))
            ))),
        }
    }
}

/// Meal categories accepted when logging
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Snack,
    Lunch,
    Dinner,
    Other,
}

impl MealType {
    pub const ALL: [MealType; 5] = [
        MealType::Breakfast,
        MealType::Snack,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Snack => "snack",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Other => "other",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "snack" => Ok(MealType::Snack),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "other" => Ok(MealType::Other),
            other => Err(crate::Error::Record(format!(
                "unknown meal type '{}' (expected one of: {})",
                other,
                join_names(MealType::ALL.iter().map(MealType::as_str))
            ))),
        }
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

// ============================================================================
// Numeric Coercion
// ============================================================================

/// Coerce a stored JSON value into a non-negative integer.
///
/// Numbers and numeric strings are accepted; fractions truncate toward zero.
/// Anything else (null, negative, non-numeric text, NaN) becomes 0.
pub fn coerce_u32(value: &Value) -> u32 {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) => v.min(u32::MAX as u64) as u32,
            None => n.as_f64().map(clamp_f64).unwrap_or(0),
        },
        Value::String(s) => s.trim().parse::<f64>().map(clamp_f64).unwrap_or(0),
        _ => 0,
    }
}

fn clamp_f64(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.trunc().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

fn lenient_u32<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_u32).unwrap_or(0))
}
