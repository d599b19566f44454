//! Periodic aggregation over workout and meal records.
//!
//! Four reductions feed the dashboard and calendar:
//! - Rolling window: per-day sums over the last N days
//! - Weekday: Monday-first counts over the whole history
//! - Calendar month: totals for the month containing a reference date
//! - Sports distribution: workout counts per type in first-seen order

use crate::dates::{bucket_by_date, date_keys, same_month, weekday_index};
use crate::superlative::max_first_by;
use crate::{MealRecord, WorkoutRecord};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

// ============================================================================
// Rolling Window
// ============================================================================

/// Per-day series over a rolling window, index-aligned with `dates`
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RollingWindow {
    pub dates: Vec<NaiveDate>,
    pub calories_in: Vec<u64>,
    pub calories_out: Vec<u64>,
    pub net_balance: Vec<i64>,
    pub workout_count: Vec<u32>,
    pub workout_duration: Vec<u64>,
}

impl RollingWindow {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Aggregate the `window` days ending at `today`
pub fn aggregate_rolling_window(
    workouts: &[WorkoutRecord],
    meals: &[MealRecord],
    window: usize,
    today: NaiveDate,
) -> RollingWindow {
    let dates = date_keys(window, today);
    let workout_buckets = bucket_by_date(workouts, &dates);
    let meal_buckets = bucket_by_date(meals, &dates);

    let calories_in: Vec<u64> = meal_buckets
        .iter()
        .map(|b| b.records.iter().map(|m| m.calories as u64).sum())
        .collect();

    let calories_out: Vec<u64> = workout_buckets
        .iter()
        .map(|b| b.records.iter().map(|w| w.calories as u64).sum())
        .collect();

    let net_balance: Vec<i64> = calories_in
        .iter()
        .zip(&calories_out)
        .map(|(&consumed, &expended)| consumed as i64 - expended as i64)
        .collect();

    let workout_count: Vec<u32> = workout_buckets.iter().map(|b| b.len() as u32).collect();

    let workout_duration: Vec<u64> = workout_buckets
        .iter()
        .map(|b| b.records.iter().map(|w| w.duration as u64).sum())
        .collect();

    tracing::debug!(
        "Aggregated {}-day window ending {}",
        dates.len(),
        today
    );

    RollingWindow {
        dates,
        calories_in,
        calories_out,
        net_balance,
        workout_count,
        workout_duration,
    }
}

// ============================================================================
// Weekday Breakdown
// ============================================================================

/// Monday-first weekday labels
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Workout and meal counts per weekday, Monday at index 0
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct WeekdayBreakdown {
    pub labels: Vec<String>,
    pub workout_counts: [u32; 7],
    pub meal_counts: [u32; 7],
}

impl WeekdayBreakdown {
    /// Replace the display labels; ignored unless exactly seven are given
    pub fn with_labels(mut self, labels: &[String]) -> Self {
        if labels.len() == 7 {
            self.labels = labels.to_vec();
        }
        self
    }
}

/// Count every record (not window-limited) by ISO weekday
pub fn aggregate_by_weekday(workouts: &[WorkoutRecord], meals: &[MealRecord]) -> WeekdayBreakdown {
    let mut workout_counts = [0u32; 7];
    let mut meal_counts = [0u32; 7];

    for w in workouts {
        workout_counts[weekday_index(w.date)] += 1;
    }
    for m in meals {
        meal_counts[weekday_index(m.date)] += 1;
    }

    WeekdayBreakdown {
        labels: WEEKDAY_LABELS.iter().map(|l| l.to_string()).collect(),
        workout_counts,
        meal_counts,
    }
}

// ============================================================================
// Calendar Month
// ============================================================================

/// Totals for one calendar month
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MonthlyStats<'a> {
    pub year: i32,
    pub month: u32,
    pub workout_count: usize,
    pub meal_count: usize,
    /// Sum of meal calories
    pub total_calories: u64,
    /// Longest workout by duration; first one wins on ties
    pub longest_workout: Option<&'a WorkoutRecord>,
}

/// Summarize the month containing `reference`
///
/// Returns `None` when the month has neither workouts nor meals.
pub fn aggregate_by_month<'a>(
    workouts: &'a [WorkoutRecord],
    meals: &[MealRecord],
    reference: NaiveDate,
) -> Option<MonthlyStats<'a>> {
    let month_workouts: Vec<&WorkoutRecord> = workouts
        .iter()
        .filter(|w| same_month(w.date, reference))
        .collect();
    let month_meals: Vec<&MealRecord> = meals
        .iter()
        .filter(|m| same_month(m.date, reference))
        .collect();

    if month_workouts.is_empty() && month_meals.is_empty() {
        tracing::debug!("No activity in {}-{:02}", reference.year(), reference.month());
        return None;
    }

    Some(MonthlyStats {
        year: reference.year(),
        month: reference.month(),
        workout_count: month_workouts.len(),
        meal_count: month_meals.len(),
        total_calories: month_meals.iter().map(|m| m.calories as u64).sum(),
        longest_workout: max_first_by(month_workouts, |w| w.duration as u64),
    })
}

// ============================================================================
// Sports Distribution
// ============================================================================

/// Workout count per type, in first-seen order
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct SportsDistribution {
    pub labels: Vec<String>,
    pub counts: Vec<u32>,
}

impl SportsDistribution {
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Share of each type in percent; empty when there are no workouts
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.counts
            .iter()
            .map(|&c| c as f64 * 100.0 / total as f64)
            .collect()
    }
}

pub fn sports_distribution(workouts: &[WorkoutRecord]) -> SportsDistribution {
    let mut distribution = SportsDistribution::default();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for w in workouts {
        match index.get(w.kind.as_str()) {
            Some(&i) => distribution.counts[i] += 1,
            None => {
                index.insert(w.kind.as_str(), distribution.labels.len());
                distribution.labels.push(w.kind.clone());
                distribution.counts.push(1);
            }
        }
    }

    distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::test_support::*;

    #[test]
    fn test_rolling_window_scenario() {
        let workouts = vec![
            workout(1, "2024-07-15", "Run", 45, 530),
            workout(2, "2024-07-16", "Gym", 60, 600),
        ];
        let meals = vec![meal(3, "2024-07-15", "Lunch", 700)];

        let window = aggregate_rolling_window(&workouts, &meals, 2, day("2024-07-16"));

        assert_eq!(window.dates, vec![day("2024-07-15"), day("2024-07-16")]);
        assert_eq!(window.calories_in, vec![700, 0]);
        assert_eq!(window.calories_out, vec![530, 600]);
        assert_eq!(window.net_balance, vec![170, -600]);
        assert_eq!(window.workout_count, vec![1, 1]);
        assert_eq!(window.workout_duration, vec![45, 60]);
    }

    #[test]
    fn test_rolling_window_empty_inputs_are_all_zero() {
        let window = aggregate_rolling_window(&[], &[], 30, day("2024-07-16"));

        assert_eq!(window.len(), 30);
        assert!(window.calories_in.iter().all(|&v| v == 0));
        assert!(window.calories_out.iter().all(|&v| v == 0));
        assert!(window.net_balance.iter().all(|&v| v == 0));
        assert!(window.workout_count.iter().all(|&v| v == 0));
        assert!(window.workout_duration.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_rolling_window_sums_same_day_records() {
        let workouts = vec![
            workout(1, "2024-07-16", "run", 30, 300),
            workout(2, "2024-07-16", "gym", 40, 250),
        ];
        let meals = vec![
            meal(3, "2024-07-16", "breakfast", 400),
            meal(4, "2024-07-16", "dinner", 900),
            meal(5, "2024-06-01", "dinner", 900), // outside window
        ];

        let window = aggregate_rolling_window(&workouts, &meals, 1, day("2024-07-16"));
        assert_eq!(window.calories_in, vec![1300]);
        assert_eq!(window.calories_out, vec![550]);
        assert_eq!(window.net_balance, vec![750]);
        assert_eq!(window.workout_count, vec![2]);
        assert_eq!(window.workout_duration, vec![70]);
    }

    #[test]
    fn test_weekday_breakdown_monday_first() {
        let workouts = vec![
            workout(1, "2024-07-15", "run", 30, 300), // Monday
            workout(2, "2024-07-22", "run", 30, 300), // Monday
            workout(3, "2024-07-21", "gym", 30, 300), // Sunday
        ];
        let meals = vec![meal(4, "2024-07-17", "lunch", 600)]; // Wednesday

        let breakdown = aggregate_by_weekday(&workouts, &meals);
        assert_eq!(breakdown.labels[0], "Mon");
        assert_eq!(breakdown.workout_counts, [2, 0, 0, 0, 0, 0, 1]);
        assert_eq!(breakdown.meal_counts, [0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_weekday_relabel_requires_seven() {
        let breakdown = aggregate_by_weekday(&[], &[]);
        let short = vec!["a".to_string()];
        assert_eq!(breakdown.clone().with_labels(&short).labels[0], "Mon");

        let slovene: Vec<String> = ["Pon", "Tor", "Sre", "Čet", "Pet", "Sob", "Ned"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(breakdown.with_labels(&slovene).labels[6], "Ned");
    }

    #[test]
    fn test_month_without_activity_is_none() {
        let workouts = vec![workout(1, "2024-06-30", "run", 30, 300)];
        let meals = vec![meal(2, "2024-08-01", "lunch", 600)];

        assert!(aggregate_by_month(&workouts, &meals, day("2024-07-15")).is_none());
        assert!(aggregate_by_month(&[], &[], day("2024-07-15")).is_none());
    }

    #[test]
    fn test_month_totals_and_longest() {
        let workouts = vec![
            workout(1, "2024-07-01", "run", 30, 300),
            workout(2, "2024-07-10", "gym", 60, 500),
            workout(3, "2024-07-20", "bike", 60, 700),
            workout(4, "2023-07-20", "swim", 120, 900), // other year
        ];
        let meals = vec![
            meal(5, "2024-07-02", "lunch", 650),
            meal(6, "2024-07-31", "dinner", 800),
        ];

        let stats = aggregate_by_month(&workouts, &meals, day("2024-07-15")).unwrap();
        assert_eq!(stats.year, 2024);
        assert_eq!(stats.month, 7);
        assert_eq!(stats.workout_count, 3);
        assert_eq!(stats.meal_count, 2);
        assert_eq!(stats.total_calories, 1450);
        assert_eq!(stats.longest_workout.map(|w| w.id), Some(2));
    }

    #[test]
    fn test_month_with_only_meals_has_no_longest() {
        let meals = vec![meal(1, "2024-07-02", "lunch", 650)];
        let stats = aggregate_by_month(&[], &meals, day("2024-07-15")).unwrap();
        assert_eq!(stats.workout_count, 0);
        assert!(stats.longest_workout.is_none());
    }

    #[test]
    fn test_sports_distribution_first_seen_order() {
        let workouts = vec![
            workout(1, "2024-07-01", "Run", 30, 300),
            workout(2, "2024-07-02", "Gym", 30, 300),
            workout(3, "2024-07-03", "Run", 30, 300),
        ];

        let distribution = sports_distribution(&workouts);
        assert_eq!(distribution.labels, vec!["Run", "Gym"]);
        assert_eq!(distribution.counts, vec![2, 1]);
        assert_eq!(distribution.total(), 3);

        let pct = distribution.percentages();
        assert!((pct[0] - 66.666).abs() < 0.01);
        assert!((pct[1] - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_sports_distribution_empty() {
        let distribution = sports_distribution(&[]);
        assert!(distribution.labels.is_empty());
        assert!(distribution.percentages().is_empty());
    }
}
