//! Consecutive-day activity streaks.

use crate::Record;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Count consecutive days with at least one record, walking back from `today`
///
/// Returns 0 when `today` itself has no record. Several records on the same
/// day count once.
pub fn compute_streak<R: Record>(records: &[R], today: NaiveDate) -> u32 {
    let active: HashSet<NaiveDate> = records.iter().map(|r| r.date()).collect();

    let mut streak = 0;
    let mut day = Some(today);
    while let Some(d) = day {
        if !active.contains(&d) {
            break;
        }
        streak += 1;
        day = d.pred_opt();
    }

    streak
}

/// Longest run of consecutive active days anywhere in the collection
pub fn best_streak<R: Record>(records: &[R]) -> u32 {
    let mut days: Vec<NaiveDate> = records.iter().map(|r| r.date()).collect();
    days.sort_unstable();
    days.dedup();

    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        run = match previous.and_then(|p| p.succ_opt()) {
            Some(next) if next == day => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(day);
    }

    best
}
