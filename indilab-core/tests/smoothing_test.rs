//! Smoothing engine integration tests: method agreement, lag and validity.

use indilab_core::smoothing::{ema, lwma, shift, sma, smooth, wilder, SmoothingMethod};

const METHODS: [SmoothingMethod; 4] = [
    SmoothingMethod::Simple,
    SmoothingMethod::Weighted,
    SmoothingMethod::Exponential,
    SmoothingMethod::Smoothed,
];

fn ramp(n: usize) -> Vec<f64> {
    (0..n).map(|i| 1.0 + i as f64 * 0.25).collect()
}

#[test]
fn simple_period_3_scenario() {
    let out = smooth(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 0, SmoothingMethod::Simple);
    assert_eq!(out.values, vec![0.0, 0.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(out.first_valid_bar, 3);
}

#[test]
fn every_method_agrees_on_constant_input() {
    let input = vec![42.0; 30];
    for method in METHODS {
        let out = smooth(&input, 7, 0, method);
        for &v in &out.values[6..] {
            assert!((v - 42.0).abs() < 1e-10, "{method}: {v}");
        }
    }
}

#[test]
fn every_method_is_bounded_by_window() {
    let input: Vec<f64> = (0..50).map(|i| ((i * 7) % 11) as f64).collect();
    for method in [SmoothingMethod::Simple, SmoothingMethod::Weighted] {
        let out = smooth(&input, 5, 0, method);
        for i in 4..input.len() {
            let window = &input[i - 4..=i];
            let lo = window.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert!(out.values[i] >= lo - 1e-12 && out.values[i] <= hi + 1e-12);
        }
    }
}

#[test]
fn dispatch_matches_kernels() {
    let input = ramp(25);
    assert_eq!(SmoothingMethod::Simple.apply(&input, 4), sma(&input, 4));
    assert_eq!(SmoothingMethod::Weighted.apply(&input, 4), lwma(&input, 4));
    assert_eq!(SmoothingMethod::Exponential.apply(&input, 4), ema(&input, 4));
    assert_eq!(SmoothingMethod::Smoothed.apply(&input, 4), wilder(&input, 4));
}

#[test]
fn lag_equals_shifted_unlagged_output() {
    let input = ramp(40);
    for method in METHODS {
        for lag in 0..4 {
            let plain = smooth(&input, 6, 0, method);
            let lagged = smooth(&input, 6, lag, method);
            assert_eq!(lagged.values, shift(&plain.values, lag), "{method} lag {lag}");
            assert_eq!(lagged.first_valid_bar, 6 + lag);
        }
    }
}

#[test]
fn nothing_below_first_computed_index() {
    let input: Vec<f64> = (0..30).map(|i| 5.0 + (i as f64).sin()).collect();
    for method in METHODS {
        for (period, lag) in [(1, 0), (3, 0), (3, 2), (10, 1)] {
            let out = smooth(&input, period, lag, method);
            let floor = period.max(1) - 1 + lag;
            assert!(
                out.values[..floor].iter().all(|&v| v == 0.0),
                "{method} period {period} lag {lag}"
            );
        }
    }
}

#[test]
fn exponential_reacts_faster_than_smoothed() {
    // After a step, EMA (alpha 2/(p+1)) is closer to the new level than Wilder (alpha 1/p).
    let mut input = vec![0.0; 10];
    input.extend(vec![10.0; 5]);
    let e = smooth(&input, 5, 0, SmoothingMethod::Exponential);
    let w = smooth(&input, 5, 0, SmoothingMethod::Smoothed);
    assert!(e.values[12] > w.values[12]);
}

#[test]
fn empty_input() {
    for method in METHODS {
        let out = smooth(&[], 5, 1, method);
        assert!(out.values.is_empty());
        assert!(!out.has_valid_bars());
    }
}
