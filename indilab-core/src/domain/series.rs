//! Bar series — read-only parallel arrays handed to every calculation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bar::Bar;

/// Comparison tolerance for series drawn in their own pane (oscillators),
/// where the instrument's point size carries no meaning.
pub const OSCILLATOR_SIGMA: f64 = 0.000_005;

/// Where a derived series lives, which decides its comparison tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartScale {
    /// Same scale as price (moving averages, bands).
    Price,
    /// Separate pane with its own scale (RSI, momentum, ...).
    Separate,
}

#[derive(Debug, Error, PartialEq)]
pub enum BarError {
    #[error("field '{field}' has {actual} values, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("point must be finite and positive, got {0}")]
    InvalidPoint(f64),
}

/// Ordered bar data, oldest bar at index 0.
///
/// Invariant: every field vector has the same length. Enforced at
/// construction; the fields are private so the invariant cannot be broken
/// afterwards. Deserialization goes through [`BarSeries::new`] as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBarSeries")]
pub struct BarSeries {
    time: Vec<NaiveDateTime>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
    point: f64,
}

/// Unchecked wire form of [`BarSeries`].
#[derive(Deserialize)]
struct RawBarSeries {
    time: Vec<NaiveDateTime>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
    point: f64,
}

impl TryFrom<RawBarSeries> for BarSeries {
    type Error = BarError;

    fn try_from(raw: RawBarSeries) -> Result<Self, Self::Error> {
        Self::new(raw.time, raw.open, raw.high, raw.low, raw.close, raw.volume, raw.point)
    }
}

impl BarSeries {
    /// Build from parallel arrays.
    pub fn new(
        time: Vec<NaiveDateTime>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
        volume: Vec<f64>,
        point: f64,
    ) -> Result<Self, BarError> {
        if !point.is_finite() || point <= 0.0 {
            return Err(BarError::InvalidPoint(point));
        }

        let expected = time.len();
        for (field, actual) in [
            ("open", open.len()),
            ("high", high.len()),
            ("low", low.len()),
            ("close", close.len()),
            ("volume", volume.len()),
        ] {
            if actual != expected {
                return Err(BarError::LengthMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self {
            time,
            open,
            high,
            low,
            close,
            volume,
            point,
        })
    }

    /// Build from a slice of bar records.
    pub fn from_bars(bars: &[Bar], point: f64) -> Result<Self, BarError> {
        Self::new(
            bars.iter().map(|b| b.time).collect(),
            bars.iter().map(|b| b.open).collect(),
            bars.iter().map(|b| b.high).collect(),
            bars.iter().map(|b| b.low).collect(),
            bars.iter().map(|b| b.close).collect(),
            bars.iter().map(|b| b.volume).collect(),
            point,
        )
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[NaiveDateTime] {
        &self.time
    }

    pub fn open(&self) -> &[f64] {
        &self.open
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    /// Minimum price increment of the instrument.
    pub fn point(&self) -> f64 {
        self.point
    }

    /// Comparison tolerance for a series drawn on the given scale.
    ///
    /// Half a point on the price scale: two prices closer than that are
    /// representation noise, not movement.
    pub fn sigma(&self, scale: ChartScale) -> f64 {
        match scale {
            ChartScale::Price => self.point * 0.5,
            ChartScale::Separate => OSCILLATOR_SIGMA,
        }
    }

    /// Bar record at `index`.
    pub fn bar(&self, index: usize) -> Option<Bar> {
        (index < self.len()).then(|| Bar {
            time: self.time[index],
            open: self.open[index],
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
            volume: self.volume[index],
        })
    }

    /// A series holding the first `len` bars (used to check look-ahead freedom).
    pub fn truncated(&self, len: usize) -> Self {
        let len = len.min(self.len());
        Self {
            time: self.time[..len].to_vec(),
            open: self.open[..len].to_vec(),
            high: self.high[..len].to_vec(),
            low: self.low[..len].to_vec(),
            close: self.close[..len].to_vec(),
            volume: self.volume[..len].to_vec(),
            point: self.point,
        }
    }
}

/// Build a series from `(open, high, low, close)` tuples, one bar per hour.
#[cfg(test)]
pub fn test_series(ohlc: &[(f64, f64, f64, f64)]) -> BarSeries {
    let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let bars: Vec<Bar> = ohlc
        .iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            time: start + chrono::Duration::hours(i as i64),
            open,
            high,
            low,
            close,
            volume: 100.0,
        })
        .collect();
    BarSeries::from_bars(&bars, 0.0001).unwrap()
}
