//! Trailing moving averages for display smoothing.

/// Default smoothing window in days
pub const DEFAULT_SMOOTHING_WINDOW: usize = 7;

/// Trailing moving average with the same length as `series`
///
/// Position `i` is the mean of `series[max(0, i - window + 1)..=i]`, so the
/// first few positions average over fewer points. Means are rounded to the
/// nearest integer with halves rounded away from zero. A window of 0 is
/// treated as 1.
pub fn moving_average(series: &[i64], window: usize) -> Vec<i64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(series.len());
    let mut sum: i128 = 0;

    for (i, &value) in series.iter().enumerate() {
        sum += value as i128;
        if i >= window {
            sum -= series[i - window] as i128;
        }
        let width = (i + 1).min(window);
        out.push(round_div(sum, width as i128));
    }

    out
}

/// Convenience wrapper for unsigned series (durations, calorie totals)
pub fn moving_average_unsigned(series: &[u64], window: usize) -> Vec<i64> {
    let signed: Vec<i64> = series
        .iter()
        .map(|&v| v.min(i64::MAX as u64) as i64)
        .collect();
    moving_average(&signed, window)
}

/// Integer division rounding halves away from zero
fn round_div(numerator: i128, denominator: i128) -> i64 {
    let quotient = numerator / denominator;
    let remainder = (numerator % denominator).abs();
    let rounded = if remainder * 2 >= denominator {
        quotient + numerator.signum()
    } else {
        quotient
    };
    rounded as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_of_one_is_identity() {
        let series = vec![170, -600, 0, 42, 9];
        assert_eq!(moving_average(&series, 1), series);
    }

    #[test]
    fn test_output_length_matches_input() {
        let series: Vec<i64> = (0..30).collect();
        for window in [1usize, 2, 7, 30, 100] {
            assert_eq!(moving_average(&series, window).len(), series.len());
        }
        assert!(moving_average(&[], 7).is_empty());
    }

    #[test]
    fn test_trailing_window_grows_then_slides() {
        let series = vec![10, 20, 30, 40];
        // [10], [10,20], [10,20,30], [20,30,40]
        assert_eq!(moving_average(&series, 3), vec![10, 15, 20, 30]);
    }

    #[test]
    fn test_rounds_halves_away_from_zero() {
        assert_eq!(moving_average(&[1, 2], 2), vec![1, 2]); // 1.5 -> 2
        assert_eq!(moving_average(&[-1, -2], 2), vec![-1, -2]); // -1.5 -> -2
        assert_eq!(moving_average(&[1, 1, 2], 3), vec![1, 1, 1]); // 4/3 -> 1
        assert_eq!(moving_average(&[2, 2, 1], 3), vec![2, 2, 2]); // 5/3 -> 2
        assert_eq!(moving_average(&[-2, -2, -1], 3), vec![-2, -2, -2]);
    }

    #[test]
    fn test_zero_window_treated_as_one() {
        assert_eq!(moving_average(&[3, 5], 0), vec![3, 5]);
    }

    #[test]
    fn test_unsigned_series() {
        assert_eq!(moving_average_unsigned(&[45, 60, 0], 2), vec![45, 53, 30]);
    }
}
