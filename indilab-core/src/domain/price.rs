//! Base price selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::series::BarSeries;

/// Which per-bar price an indicator reads from a [`BarSeries`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasePrice {
    Open,
    High,
    Low,
    #[default]
    Close,
    /// `(high + low) / 2`
    Median,
    /// `(high + low + close) / 3`
    Typical,
    /// `(high + low + 2 * close) / 4`
    Weighted,
}

impl BasePrice {
    /// Captions in choice-list order.
    pub const CAPTIONS: [&'static str; 7] =
        ["Open", "High", "Low", "Close", "Median", "Typical", "Weighted"];

    const ALL: [BasePrice; 7] = [
        BasePrice::Open,
        BasePrice::High,
        BasePrice::Low,
        BasePrice::Close,
        BasePrice::Median,
        BasePrice::Typical,
        BasePrice::Weighted,
    ];

    /// Resolve a choice index. Out-of-range indices fall back to `Close`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn caption(self) -> &'static str {
        Self::CAPTIONS[self as usize]
    }

    /// Extract this price for every bar of the series.
    pub fn extract(self, bars: &BarSeries) -> Vec<f64> {
        let n = bars.len();
        let (o, h, l, c) = (bars.open(), bars.high(), bars.low(), bars.close());
        match self {
            Self::Open => o.to_vec(),
            Self::High => h.to_vec(),
            Self::Low => l.to_vec(),
            Self::Close => c.to_vec(),
            Self::Median => (0..n).map(|i| (h[i] + l[i]) / 2.0).collect(),
            Self::Typical => (0..n).map(|i| (h[i] + l[i] + c[i]) / 3.0).collect(),
            Self::Weighted => (0..n).map(|i| (h[i] + l[i] + 2.0 * c[i]) / 4.0).collect(),
        }
    }
}

impl fmt::Display for BasePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.caption())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::test_series;

    #[test]
    fn extract_derived_prices() {
        // open 10, high 30, low 5, close 20
        let bars = test_series(&[(10.0, 30.0, 5.0, 20.0)]);
        assert_eq!(BasePrice::Open.extract(&bars), vec![10.0]);
        assert_eq!(BasePrice::Median.extract(&bars), vec![17.5]);
        assert_eq!(BasePrice::Typical.extract(&bars), vec![55.0 / 3.0]);
        assert_eq!(BasePrice::Weighted.extract(&bars), vec![18.75]);
    }

    #[test]
    fn index_roundtrip_and_fallback() {
        for (i, caption) in BasePrice::CAPTIONS.iter().enumerate() {
            assert_eq!(BasePrice::from_index(i).caption(), *caption);
        }
        assert_eq!(BasePrice::from_index(99), BasePrice::Close);
    }
}
