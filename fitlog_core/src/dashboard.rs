//! Derived views assembled for presentation surfaces.
//!
//! Everything here is recomputed from the record slices on each call; no
//! result is cached between calls.

use crate::aggregate::{
    aggregate_by_weekday, aggregate_rolling_window, sports_distribution, RollingWindow,
    SportsDistribution, WeekdayBreakdown,
};
use crate::config::StatsConfig;
use crate::smoothing::{moving_average, moving_average_unsigned};
use crate::streak::{best_streak, compute_streak};
use crate::superlative::{busiest_calorie_day, find_superlative, most_active_day, DayTotal, Field};
use crate::{MealRecord, WorkoutRecord};
use chrono::NaiveDate;
use serde::Serialize;

/// Rolling-window dashboard
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub window: RollingWindow,
    /// Smoothed `window.net_balance`
    pub net_balance_trend: Vec<i64>,
    /// Smoothed `window.workout_duration`
    pub duration_trend: Vec<i64>,
    pub weekdays: WeekdayBreakdown,
    pub sports: SportsDistribution,
    pub workout_streak: u32,
    pub meal_streak: u32,
}

impl Dashboard {
    pub fn build(
        workouts: &[WorkoutRecord],
        meals: &[MealRecord],
        today: NaiveDate,
        config: &StatsConfig,
    ) -> Self {
        let window = aggregate_rolling_window(workouts, meals, config.window_days, today);

        // Each series is smoothed on its own
        let net_balance_trend = moving_average(&window.net_balance, config.smoothing_window);
        let duration_trend =
            moving_average_unsigned(&window.workout_duration, config.smoothing_window);

        Self {
            today,
            window,
            net_balance_trend,
            duration_trend,
            weekdays: aggregate_by_weekday(workouts, meals).with_labels(&config.weekday_labels),
            sports: sports_distribution(workouts),
            workout_streak: compute_streak(workouts, today),
            meal_streak: compute_streak(meals, today),
        }
    }
}

/// Personal bests across the whole history
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Achievements<'a> {
    pub longest_workout: Option<&'a WorkoutRecord>,
    pub most_calories_burned: Option<&'a WorkoutRecord>,
    /// Day with the most calories eaten
    pub biggest_eating_day: Option<DayTotal>,
    /// Day with the most workouts
    pub most_active_day: Option<DayTotal>,
}

impl<'a> Achievements<'a> {
    pub fn compute(workouts: &'a [WorkoutRecord], meals: &[MealRecord]) -> Self {
        Self {
            longest_workout: find_superlative(workouts, Field::Duration),
            most_calories_burned: find_superlative(workouts, Field::Calories),
            biggest_eating_day: busiest_calorie_day(meals),
            most_active_day: most_active_day(workouts),
        }
    }
}

/// Home screen summary
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HomeSummary<'a> {
    pub workout_total: usize,
    pub meal_total: usize,
    pub workout_streak: u32,
    pub meal_streak: u32,
    pub best_workout_streak: u32,
    pub achievements: Achievements<'a>,
}

impl<'a> HomeSummary<'a> {
    pub fn build(workouts: &'a [WorkoutRecord], meals: &[MealRecord], today: NaiveDate) -> Self {
        Self {
            workout_total: workouts.len(),
            meal_total: meals.len(),
            workout_streak: compute_streak(workouts, today),
            meal_streak: compute_streak(meals, today),
            best_workout_streak: best_streak(workouts),
            achievements: Achievements::compute(workouts, meals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::test_support::*;

    fn sample() -> (Vec<WorkoutRecord>, Vec<MealRecord>) {
        (
            vec![
                workout(1, "2024-07-14", "Run", 30, 300),
                workout(2, "2024-07-15", "Run", 45, 530),
                workout(3, "2024-07-16", "Gym", 60, 600),
            ],
            vec![
                meal(4, "2024-07-15", "Lunch", 700),
                meal(5, "2024-07-16", "Dinner", 900),
                meal(6, "2024-07-16", "Snack", 200),
            ],
        )
    }

    #[test]
    fn test_dashboard_series_align() {
        let (workouts, meals) = sample();
        let config = StatsConfig {
            window_days: 3,
            smoothing_window: 2,
            ..StatsConfig::default()
        };

        let dashboard = Dashboard::build(&workouts, &meals, day("2024-07-16"), &config);

        assert_eq!(dashboard.window.len(), 3);
        assert_eq!(dashboard.window.net_balance, vec![-300, 170, 500]);
        // (-300), (-300+170)/2 = -65, (170+500)/2 = 335
        assert_eq!(dashboard.net_balance_trend, vec![-300, -65, 335]);
        // 30, 37.5 -> 38, 52.5 -> 53
        assert_eq!(dashboard.duration_trend, vec![30, 38, 53]);
        assert_eq!(dashboard.workout_streak, 3);
        assert_eq!(dashboard.meal_streak, 2);
        assert_eq!(dashboard.sports.labels, vec!["Run", "Gym"]);
        assert_eq!(dashboard.weekdays.workout_counts.iter().sum::<u32>(), 3);
    }

    #[test]
    fn test_dashboard_empty() {
        let dashboard = Dashboard::build(&[], &[], day("2024-07-16"), &StatsConfig::default());
        assert_eq!(dashboard.window.len(), 30);
        assert_eq!(dashboard.net_balance_trend.len(), 30);
        assert!(dashboard.net_balance_trend.iter().all(|&v| v == 0));
        assert_eq!(dashboard.workout_streak, 0);
        assert!(dashboard.sports.labels.is_empty());
    }

    #[test]
    fn test_home_summary() {
        let (workouts, meals) = sample();
        let summary = HomeSummary::build(&workouts, &meals, day("2024-07-16"));

        assert_eq!(summary.workout_total, 3);
        assert_eq!(summary.meal_total, 3);
        assert_eq!(summary.workout_streak, 3);
        assert_eq!(summary.best_workout_streak, 3);

        let a = &summary.achievements;
        assert_eq!(a.longest_workout.map(|w| w.id), Some(3));
        assert_eq!(a.most_calories_burned.map(|w| w.id), Some(3));
        assert_eq!(
            a.biggest_eating_day,
            Some(DayTotal {
                date: day("2024-07-16"),
                total: 1100
            })
        );
        assert_eq!(a.most_active_day.map(|d| d.date), Some(day("2024-07-14")));
    }

    #[test]
    fn test_home_summary_empty_has_no_achievements() {
        let summary = HomeSummary::build(&[], &[], day("2024-07-16"));
        assert_eq!(summary.workout_total, 0);
        assert!(summary.achievements.longest_workout.is_none());
        assert!(summary.achievements.most_calories_burned.is_none());
        assert!(summary.achievements.biggest_eating_day.is_none());
        assert!(summary.achievements.most_active_day.is_none());
    }
}
