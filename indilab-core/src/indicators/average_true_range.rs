//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR carries no direction, so the long-side rule decides both signals.
//! The level is given in points and scaled by the series' point size.

use crate::components::indicator::{describe_logic, replace_params, Indicator, IndicatorSlot};
use crate::components::output::{ChartHint, Component, Components};
use crate::components::params::{keys, NumericParam, ParamError, ParamSet};
use crate::domain::{BarSeries, ChartScale};
use crate::logic::{self, LogicInput, LogicMode};
use crate::smoothing::{smooth, SmoothingMethod};

const MODES: &[LogicMode] = LogicMode::OSCILLATOR;

#[derive(Debug, Clone)]
pub struct AverageTrueRange {
    slot: IndicatorSlot,
    params: ParamSet,
}

impl AverageTrueRange {
    pub const NAME: &'static str = "average_true_range";
    const TITLE: &'static str = "ATR";

    pub fn new(slot: IndicatorSlot) -> Self {
        let params = ParamSet::new()
            .with_choice(super::logic_choice(Self::TITLE, MODES, 0))
            .with_choice(super::method_choice(SmoothingMethod::Smoothed))
            .with_numeric(NumericParam::new(keys::PERIOD, "Smoothing period", 14.0, 1.0, 200.0, 0))
            .with_numeric(NumericParam::new(keys::LEVEL, "Level (points)", 0.0, 0.0, 10_000.0, 0))
            .with_flag(super::previous_bar_flag());
        Self { slot, params }
    }
}

/// True Range series.
/// TR[0] = high[0] - low[0] (no previous close).
pub fn true_range(bars: &BarSeries) -> Vec<f64> {
    let (high, low, close) = (bars.high(), bars.low(), bars.close());
    let n = bars.len();
    let mut tr = vec![0.0; n];
    if n == 0 {
        return tr;
    }

    tr[0] = high[0] - low[0];
    for i in 1..n {
        let (h, l, pc) = (high[i], low[i], close[i - 1]);
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
    }
    tr
}

impl Indicator for AverageTrueRange {
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
        let period = p.period(keys::PERIOD);

        let atr = smooth(&true_range(bars), period, 0, super::method(p));
        let first = atr.first_valid_bar;

        let level = p.value_of(keys::LEVEL) * bars.point();
        let input = LogicInput {
            series: &atr.values,
            first_valid_bar: first,
            lag: super::lag(p),
            level,
            mirrored_level: level,
            sigma: bars.sigma(ChartScale::Price),
        };
        let mode = LogicMode::resolve(MODES, p.index_of(keys::LOGIC));
        let signals = self
            .slot
            .signal_components(logic::evaluate_non_directional(&input, mode));

        tracing::debug!(indicator = Self::NAME, bars = bars.len(), period, first_valid_bar = first, "calculated");

        let mut out = Components::new();
        out.push(Component::value(Self::TITLE, ChartHint::Line, first, atr.values));
        out.extend(signals);
        out
    }

    fn describe(&self) -> String {
        let level = format!("{:.0} points", self.params.value_of(keys::LEVEL));
        describe_logic(Self::TITLE, &self.params, MODES, Some((level.clone(), level)))
    }
}
