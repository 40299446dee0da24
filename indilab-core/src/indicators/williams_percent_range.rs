//! Williams' Percent Range (%R).
//!
//! %R = -100 * (highest_high - close) / (highest_high - lowest_low) over
//! `period` bars, range -100..0. A window with no range repeats the previous
//! value (the first computed bar reads the midpoint, -50). The short side
//! mirrors the level around -50 (`-100 - level`).

use crate::components::indicator::{describe_logic, replace_params, Indicator, IndicatorSlot};
use crate::components::output::{ChartHint, Component, Components};
use crate::components::params::{keys, NumericParam, ParamError, ParamSet};
use crate::domain::{BarSeries, ChartScale};
use crate::logic::{LogicInput, LogicMode};
use crate::smoothing::{smooth_from, SmoothingMethod};

const MODES: &[LogicMode] = LogicMode::OSCILLATOR;

#[derive(Debug, Clone)]
pub struct WilliamsPercentRange {
    slot: IndicatorSlot,
    params: ParamSet,
}

impl WilliamsPercentRange {
    pub const NAME: &'static str = "williams_percent_range";
    const TITLE: &'static str = "%R";

    pub fn new(slot: IndicatorSlot) -> Self {
        let params = ParamSet::new()
            .with_choice(super::logic_choice(Self::TITLE, MODES, 0))
            .with_choice(super::method_choice(SmoothingMethod::Simple))
            .with_numeric(NumericParam::new(keys::PERIOD, "Period", 14.0, 2.0, 200.0, 0))
            .with_numeric(NumericParam::new(keys::SMOOTHING, "Additional smoothing", 0.0, 0.0, 200.0, 0))
            .with_numeric(NumericParam::new(keys::LEVEL, "Level", -20.0, -100.0, 0.0, 0))
            .with_flag(super::previous_bar_flag());
        Self { slot, params }
    }
}

/// Raw %R. Values before `period - 1` are 0.0.
pub fn percent_range(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    let n = close.len();
    let period = period.max(1);
    let mut result = vec![0.0; n];
    if n < period {
        return result;
    }

    let start = period - 1;
    for i in start..n {
        let window = (i + 1 - period)..=i;
        let hh = high[window.clone()].iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let ll = low[window].iter().copied().fold(f64::INFINITY, f64::min);
        let range = hh - ll;

        result[i] = if range > 0.0 && range.is_finite() && close[i].is_finite() {
            -100.0 * (hh - close[i]) / range
        } else if i > start {
            result[i - 1]
        } else {
            -50.0
        };
    }
    result
}

impl Indicator for WilliamsPercentRange {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn title(&self) -> &str {
        Self::TITLE
    }

    fn slot(&self) -> IndicatorSlot {
        self.slot
    }

    fn params(&self) -> &ParamSet {
        &self.params
    }

    fn configure(&mut self, params: ParamSet) -> Result<(), ParamError> {
        replace_params(&mut self.params, params, Self::NAME)
    }

    fn calculate(&self, bars: &BarSeries) -> Components {
        let p = &self.params;
        let period = p.period(keys::PERIOD).max(1);
        let smoothing = p.period(keys::SMOOTHING);

        let raw = percent_range(bars.high(), bars.low(), bars.close(), period);
        let wpr = smooth_from(&raw, period - 1, smoothing, 0, super::method(p));
        let first = wpr.first_valid_bar;

        let level = p.value_of(keys::LEVEL);
        let input = LogicInput {
            series: &wpr.values,
            first_valid_bar: first,
            lag: super::lag(p),
            level,
            mirrored_level: -100.0 - level,
            sigma: bars.sigma(ChartScale::Separate),
        };
        let signals = super::signals(self.slot, p, MODES, &input);

        tracing::debug!(indicator = Self::NAME, bars = bars.len(), period, smoothing, first_valid_bar = first, "calculated");

        let mut out = Components::new();
        out.push(Component::value(Self::TITLE, ChartHint::Line, first, wpr.values));
        out.extend(signals);
        out
    }

    fn describe(&self) -> String {
        let level = self.params.value_of(keys::LEVEL);
        let levels = (format!("{level:.0}"), format!("{:.0}", -100.0 - level));
        describe_logic(Self::TITLE, &self.params, MODES, Some(levels))
    }
}
