//! Trailing moving average.
//!
//! This is a lossy visual transform: it flattens spikes so the line chart
//! reads as a trend. It never changes the number of points.

/// Average of each value with up to `window - 1` predecessors, rounded to
/// two decimals.
///
/// With fewer than `window` values (or a window of 0 or 1) the input is
/// returned unchanged.
#[must_use]
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || values.len() < window {
        return values.to_vec();
    }
    (0..values.len())
        .map(|idx| {
            let subset = &values[(idx + 1).saturating_sub(window)..=idx];
            let avg = subset.iter().sum::<f64>() / subset.len() as f64;
            (avg * 100.0).round() / 100.0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_pass_through_when_fewer_points_than_window() {
        assert_eq!(moving_average(&[1.0, 9.0], 3), vec![1.0, 9.0]);
        assert!(moving_average(&[], 3).is_empty());
    }

    #[test]
    fn should_average_trailing_window() {
        let smoothed = moving_average(&[3.0, 6.0, 9.0, 12.0], 3);
        assert_eq!(smoothed, vec![3.0, 4.5, 6.0, 9.0]);
    }

    #[test]
    fn should_keep_length() {
        let values: Vec<f64> = (0..17_u32).map(f64::from).collect();
        assert_eq!(moving_average(&values, 3).len(), values.len());
    }

    #[test]
    fn should_round_to_two_decimals() {
        let smoothed = moving_average(&[1.0, 1.0, 2.0], 3);
        assert!((smoothed[2] - 1.33).abs() < 1e-9);
    }
}
