//! Date keys and date bucketing.
//!
//! Records carry a calendar date with no time of day, so every grouping in
//! the statistics engine keys on `NaiveDate` equality. No timezone
//! normalization happens here; the caller decides what "today" is.

use crate::Record;
use chrono::{Datelike, Days, NaiveDate};
use std::collections::HashMap;

/// Default rolling window length in days
pub const DEFAULT_WINDOW_DAYS: usize = 30;

/// Records that fall on a single date key
#[derive(Debug)]
pub struct DateBucket<'a, R> {
    pub date: NaiveDate,
    pub records: Vec<&'a R>,
}

impl<'a, R> DateBucket<'a, R> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Build `window` consecutive dates ending at `today` (inclusive), oldest first
pub fn date_keys(window: usize, today: NaiveDate) -> Vec<NaiveDate> {
    (0..window as u64)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect()
}

/// Group records under each date key, preserving key order
///
/// Always returns one bucket per key. Records whose date is not among the
/// keys are ignored; keys with no records get an empty bucket.
pub fn bucket_by_date<'a, R: Record>(
    records: &'a [R],
    keys: &[NaiveDate],
) -> Vec<DateBucket<'a, R>> {
    let mut buckets: Vec<DateBucket<'a, R>> = keys
        .iter()
        .map(|&date| DateBucket {
            date,
            records: Vec::new(),
        })
        .collect();

    let mut index: HashMap<NaiveDate, usize> = HashMap::with_capacity(keys.len());
    for (i, key) in keys.iter().enumerate() {
        index.entry(*key).or_insert(i);
    }

    for record in records {
        if let Some(&i) = index.get(&record.date()) {
            buckets[i].records.push(record);
        }
    }

    buckets
}

/// ISO weekday position: Monday = 0 ... Sunday = 6
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Whether two dates share the same calendar month and year
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
