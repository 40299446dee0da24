//! Recursive moving averages: exponential and Wilder-smoothed.
//!
//! Both seed with the simple mean of the first full window and then blend:
//! `out[i] = out[i-1] + alpha * (in[i] - out[i-1])`.

/// Exponential moving average, `alpha = 2 / (period + 1)`.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    recursive(values, period, 2.0 / (period as f64 + 1.0))
}

/// Wilder's smoothed moving average, `alpha = 1 / period`.
pub fn wilder(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    recursive(values, period, 1.0 / period as f64)
}

fn recursive(values: &[f64], period: usize, alpha: f64) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![0.0; n];

    if n < period {
        return result;
    }

    let seed = values[..period].iter().sum::<f64>() / period as f64;
    result[period - 1] = seed;

    let mut prev = seed;
    for i in period..n {
        prev += alpha * (values[i] - prev);
        result[i] = prev;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoothing::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_3_known_values() {
        // alpha = 0.5, seed at index 2 = mean(10,11,12) = 11
        // [3] = 11 + 0.5*(13-11) = 12, [4] = 12 + 0.5*(14-12) = 13
        let result = ema(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        assert_eq!(result[0], 0.0);
        assert_eq!(result[1], 0.0);
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
        assert_approx(result[4], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn wilder_3_known_values() {
        // alpha = 1/3, seed = 11
        // [3] = 11 + (13-11)/3 = 11.6667, [4] = 11.6667 + (14-11.6667)/3 = 12.4444
        let result = wilder(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 35.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(result[4], 112.0 / 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn period_1_is_identity() {
        assert_eq!(ema(&[1.0, 5.0, 3.0], 1), vec![1.0, 5.0, 3.0]);
        assert_eq!(wilder(&[1.0, 5.0, 3.0], 1), vec![1.0, 5.0, 3.0]);
    }

    #[test]
    fn no_partial_seed_window() {
        assert!(ema(&[1.0, 2.0], 3).iter().all(|&v| v == 0.0));
        assert!(wilder(&[1.0, 2.0], 3).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn wilder_is_slower_than_ema() {
        let values = [10.0, 10.0, 10.0, 20.0];
        let e = ema(&values, 3);
        let w = wilder(&values, 3);
        assert!(e[3] > w[3]);
    }
}
