//! Smoothing engine — interchangeable moving-average algorithms.
//!
//! Every indicator that needs a moving average goes through [`smooth`], which
//! applies the selected method, shifts the result by `lag` bars and reports
//! the first bar a caller may trust.
//!
//! Values below the first computed bar (`period - 1 + lag`) are 0.0.

pub mod exponential;
pub mod simple;
pub mod weighted;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use exponential::{ema, wilder};
pub use simple::sma;
pub use weighted::lwma;

/// Moving-average algorithm selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmoothingMethod {
    #[default]
    Simple,
    Weighted,
    Exponential,
    /// Wilder-style smoothing.
    Smoothed,
}

impl SmoothingMethod {
    /// Captions in choice-list order.
    pub const CAPTIONS: [&'static str; 4] = ["Simple", "Weighted", "Exponential", "Smoothed"];

    const ALL: [SmoothingMethod; 4] = [
        SmoothingMethod::Simple,
        SmoothingMethod::Weighted,
        SmoothingMethod::Exponential,
        SmoothingMethod::Smoothed,
    ];

    /// Resolve a choice index. Out-of-range indices fall back to `Simple`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn from_caption(caption: &str) -> Option<Self> {
        Self::CAPTIONS
            .iter()
            .position(|c| c.eq_ignore_ascii_case(caption.trim()))
            .map(Self::from_index)
    }

    pub fn caption(self) -> &'static str {
        Self::CAPTIONS[self as usize]
    }

    /// Run the kernel for this method without any lag.
    pub fn apply(self, values: &[f64], period: usize) -> Vec<f64> {
        match self {
            Self::Simple => sma(values, period),
            Self::Weighted => lwma(values, period),
            Self::Exponential => ema(values, period),
            Self::Smoothed => wilder(values, period),
        }
    }
}

impl fmt::Display for SmoothingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.caption())
    }
}

/// Output of [`smooth`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothedSeries {
    pub values: Vec<f64>,
    /// Earliest index at which `values` may be used. May exceed `values.len()`
    /// when the history is too short, in which case nothing is usable.
    pub first_valid_bar: usize,
}

impl SmoothedSeries {
    /// Value at `index`, or `None` below the first valid bar or out of range.
    pub fn get(&self, index: usize) -> Option<f64> {
        if index < self.first_valid_bar {
            return None;
        }
        self.values.get(index).copied()
    }

    /// True when at least one bar is usable.
    pub fn has_valid_bars(&self) -> bool {
        self.first_valid_bar < self.values.len()
    }
}

/// Smooth `series` with `method` over `period` bars, shifted forward by `lag`.
///
/// `values[i]` is the average of the window ending at input index `i - lag`.
/// A period of 0 or 1 passes the series through (still shifted).
/// `first_valid_bar = period + lag`.
pub fn smooth(series: &[f64], period: usize, lag: usize, method: SmoothingMethod) -> SmoothedSeries {
    let period = period.max(1);
    let raw = if period == 1 {
        series.to_vec()
    } else {
        method.apply(series, period)
    };

    SmoothedSeries {
        values: shift(&raw, lag),
        first_valid_bar: period + lag,
    }
}

/// Smooth only `series[start..]`, for derived series whose head is not yet
/// defined. The head stays 0.0 and `first_valid_bar = start + period + lag`.
pub fn smooth_from(
    series: &[f64],
    start: usize,
    period: usize,
    lag: usize,
    method: SmoothingMethod,
) -> SmoothedSeries {
    let start = start.min(series.len());
    let tail = smooth(&series[start..], period, lag, method);

    let mut values = vec![0.0; series.len()];
    values[start..].copy_from_slice(&tail.values);

    SmoothedSeries {
        values,
        first_valid_bar: start + tail.first_valid_bar,
    }
}

/// Shift a series forward by `lag` bars, filling the head with 0.0.
pub fn shift(series: &[f64], lag: usize) -> Vec<f64> {
    let n = series.len();
    let mut result = vec![0.0; n];
    if lag < n {
        result[lag..].copy_from_slice(&series[..n - lag]);
    }
    result
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for numeric tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
