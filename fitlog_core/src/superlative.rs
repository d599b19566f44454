//! Maximum-by-field lookups ("personal bests").
//!
//! Every finder returns `None` on an empty collection and breaks ties in
//! favour of the first occurrence in collection order.

use crate::Record;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Numeric record field a superlative can be taken over
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Duration,
    Calories,
}

impl Field {
    fn value<R: Record>(&self, record: &R) -> u64 {
        match self {
            Field::Duration => record.duration() as u64,
            Field::Calories => record.calories() as u64,
        }
    }
}

/// A date paired with an aggregated value
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total: u64,
}

/// First item with the strictly greatest key
pub fn max_first_by<'a, T, I, F>(items: I, key: F) -> Option<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> u64,
{
    let mut best: Option<(&'a T, u64)> = None;
    for item in items {
        let value = key(item);
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((item, value)),
        }
    }
    best.map(|(item, _)| item)
}

/// Record with the maximum value of `field`
pub fn find_superlative<R: Record>(records: &[R], field: Field) -> Option<&R> {
    max_first_by(records, |r| field.value(r))
}

/// Date with the largest total meal calories
pub fn busiest_calorie_day<R: Record>(records: &[R]) -> Option<DayTotal> {
    max_day_total(records, |r| r.calories() as u64)
}

/// Date with the most records (used with workouts for "most active day")
pub fn most_active_day<R: Record>(records: &[R]) -> Option<DayTotal> {
    max_day_total(records, |_| 1)
}

fn max_day_total<R, F>(records: &[R], value: F) -> Option<DayTotal>
where
    R: Record,
    F: Fn(&R) -> u64,
{
    // Per-date totals in first-seen order
    let mut totals: Vec<DayTotal> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for record in records {
        let date = record.date();
        match index.get(&date) {
            Some(&i) => totals[i].total += value(record),
            None => {
                index.insert(date, totals.len());
                totals.push(DayTotal {
                    date,
                    total: value(record),
                });
            }
        }
    }

    max_first_by(&totals, |d| d.total).copied()
}
