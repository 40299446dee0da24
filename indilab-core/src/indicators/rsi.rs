//! Relative Strength Index (RSI).
//!
//! Gains and losses of the base price are smoothed separately.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Edge cases: avg_loss == 0 → 100; no movement at all → 50.
//! The short side mirrors the level around 50 (`100 - level`).

use crate::components::indicator::{describe_logic, replace_params, Indicator, IndicatorSlot};
use crate::components::output::{ChartHint, Component, Components};
use crate::components::params::{keys, NumericParam, ParamError, ParamSet};
use crate::domain::{BarSeries, BasePrice, ChartScale};
use crate::logic::{LogicInput, LogicMode};
use crate::smoothing::{smooth_from, SmoothingMethod};

const MODES: &[LogicMode] = LogicMode::OSCILLATOR;

#[derive(Debug, Clone)]
pub struct Rsi {
    slot: IndicatorSlot,
    params: ParamSet,
}

impl Rsi {
    pub const NAME: &'static str = "rsi";
    const TITLE: &'static str = "RSI";

    pub fn new(slot: IndicatorSlot) -> Self {
        let params = ParamSet::new()
            .with_choice(super::logic_choice(Self::TITLE, MODES, 0))
            .with_choice(super::method_choice(SmoothingMethod::Smoothed))
            .with_choice(super::base_price_choice(BasePrice::Close))
            .with_numeric(NumericParam::new(keys::PERIOD, "Smoothing period", 14.0, 1.0, 200.0, 0))
            .with_numeric(NumericParam::new(keys::LEVEL, "Level", 30.0, 0.0, 100.0, 0))
            .with_flag(super::previous_bar_flag());
        Self { slot, params }
    }
}

fn rsi_value(gain: f64, loss: f64) -> f64 {
    if loss > 0.0 {
        100.0 - 100.0 / (1.0 + gain / loss)
    } else if gain > 0.0 {
        100.0
    } else {
        50.0
    }
}

impl Indicator for Rsi {
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
        let price = super::base_price(p).extract(bars);
        let n = price.len();

        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];
        for i in 1..n {
            let change = price[i] - price[i - 1];
            if change > 0.0 {
                gains[i] = change;
            } else if change < 0.0 {
                losses[i] = -change;
            }
        }

        // Bar 0 has no change; the first window starts at bar 1.
        let method = super::method(p);
        let avg_gain = smooth_from(&gains, 1, period, 0, method);
        let avg_loss = smooth_from(&losses, 1, period, 0, method);
        let first = avg_gain.first_valid_bar;

        let mut rsi = vec![0.0; n];
        for i in first..n {
            rsi[i] = rsi_value(avg_gain.values[i], avg_loss.values[i]);
        }

        let level = p.value_of(keys::LEVEL);
        let input = LogicInput {
            series: &rsi,
            first_valid_bar: first,
            lag: super::lag(p),
            level,
            mirrored_level: 100.0 - level,
            sigma: bars.sigma(ChartScale::Separate),
        };
        let signals = super::signals(self.slot, p, MODES, &input);

        tracing::debug!(indicator = Self::NAME, bars = n, period, first_valid_bar = first, "calculated");

        let mut out = Components::new();
        out.push(Component::value(Self::TITLE, ChartHint::Line, first, rsi));
        out.extend(signals);
        out
    }

    fn describe(&self) -> String {
        let level = self.params.value_of(keys::LEVEL);
        let levels = (format!("{level:.0}"), format!("{:.0}", 100.0 - level));
        describe_logic(Self::TITLE, &self.params, MODES, Some(levels))
    }
}
