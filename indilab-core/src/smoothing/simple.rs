//! Simple moving average kernel.

/// Rolling mean over `period` values.
///
/// Output index `i` holds the mean of `values[i + 1 - period..=i]`; indices
/// below `period - 1` are 0.0. A NaN inside the window yields NaN for as long
/// as it stays in the window, after which the sum is rebuilt from scratch.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let period = period.max(1);
    let mut result = vec![0.0; n];

    if n < period {
        return result;
    }

    let mut sum: f64 = values[..period].iter().sum();
    result[period - 1] = sum / period as f64;

    for i in period..n {
        let leaving = values[i - period];
        let entering = values[i];

        if sum.is_finite() && leaving.is_finite() && entering.is_finite() {
            sum += entering - leaving;
        } else {
            sum = values[(i + 1 - period)..=i].iter().sum();
        }

        result[i] = sum / period as f64;
    }

    result
}
