//! Record id generation.
//!
//! Ids are millisecond timestamps bumped forward when needed so that two
//! records created within the same millisecond never share an id.

use std::sync::atomic::{AtomicI64, Ordering};

/// Strictly monotonic id source
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator that will only hand out ids above `floor`
    pub fn seeded(floor: i64) -> Self {
        Self {
            last: AtomicI64::new(floor),
        }
    }

    /// Raise the floor so future ids exceed `id`
    pub fn observe(&self, id: i64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }

    /// Next id given the current wall-clock time in milliseconds
    pub fn next_at(&self, now_ms: i64) -> i64 {
        let mut current = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now_ms.max(current.saturating_add(1));
            match self.last.compare_exchange(
                current,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }

    /// Next id using the system clock
    pub fn next(&self) -> i64 {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_millisecond_yields_distinct_ids() {
        let ids = IdGenerator::default();
        let a = ids.next_at(1_000);
        let b = ids.next_at(1_000);
        let c = ids.next_at(1_000);

        assert_eq!(a, 1_000);
        assert_eq!(b, 1_001);
        assert_eq!(c, 1_002);
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let ids = IdGenerator::default();
        let a = ids.next_at(5_000);
        let b = ids.next_at(4_000);
        assert!(b > a);
    }

    #[test]
    fn test_observe_raises_floor() {
        let ids = IdGenerator::seeded(10);
        ids.observe(9_999);
        ids.observe(50); // lower values are ignored
        assert_eq!(ids.next_at(100), 10_000);
    }

    #[test]
    fn test_many_ids_are_unique() {
        let ids = IdGenerator::default();
        let generated: HashSet<i64> = (0..1_000).map(|_| ids.next()).collect();
        assert_eq!(generated.len(), 1_000);
    }
}
