#![forbid(unsafe_code)]

//! Core domain model and statistics engine for fitlog.
//!
//! This crate provides:
//! - Domain types (workout and meal records)
//! - Statistics engine (date bucketing, streaks, aggregation, smoothing, personal bests)
//! - Persistence (key-value store, record journal, CSV export)
//! - Configuration and logging

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod ids;
pub mod dates;
pub mod streak;
pub mod aggregate;
pub mod smoothing;
pub mod superlative;
pub mod dashboard;
pub mod store;
pub mod journal;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, StatsConfig};
pub use dates::{bucket_by_date, date_keys, DateBucket};
pub use streak::{best_streak, compute_streak};
pub use aggregate::{
    aggregate_by_month, aggregate_by_weekday, aggregate_rolling_window, sports_distribution,
    MonthlyStats, RollingWindow, SportsDistribution, WeekdayBreakdown,
};
pub use smoothing::moving_average;
pub use superlative::{find_superlative, DayTotal, Field};
pub use dashboard::{Achievements, Dashboard, HomeSummary};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use journal::{DeletedRecord, Journal, NewMeal, NewWorkout, Removed};
