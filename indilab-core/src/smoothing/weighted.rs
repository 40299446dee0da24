//! Linear-weighted moving average kernel.

/// Weighted mean over `period` values, weights `1..=period` from the oldest
/// to the newest value, normalized by `period * (period + 1) / 2`.
pub fn lwma(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let period = period.max(1);
    let mut result = vec![0.0; n];

    if n < period {
        return result;
    }

    let weight_sum = (period * (period + 1)) as f64 / 2.0;

    for i in (period - 1)..n {
        let window = &values[(i + 1 - period)..=i];
        let weighted: f64 = window
            .iter()
            .enumerate()
            .map(|(k, &v)| (k + 1) as f64 * v)
            .sum();
        result[i] = weighted / weight_sum;
    }

    result
}
