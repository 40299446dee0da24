//! Momentum: base price minus the base price `period` bars ago, optionally
//! smoothed. The short side mirrors the level around zero.

use crate::components::indicator::{describe_logic, replace_params, Indicator, IndicatorSlot};
use crate::components::output::{ChartHint, Component, Components};
use crate::components::params::{keys, NumericParam, ParamError, ParamSet};
use crate::domain::{BarSeries, BasePrice, ChartScale};
use crate::logic::{LogicInput, LogicMode};
use crate::smoothing::{smooth_from, SmoothingMethod};

const MODES: &[LogicMode] = LogicMode::OSCILLATOR;

#[derive(Debug, Clone)]
pub struct Momentum {
    slot: IndicatorSlot,
    params: ParamSet,
}

impl Momentum {
    pub const NAME: &'static str = "momentum";
    const TITLE: &'static str = "Momentum";

    pub fn new(slot: IndicatorSlot) -> Self {
        let params = ParamSet::new()
            .with_choice(super::logic_choice(Self::TITLE, MODES, 0))
            .with_choice(super::method_choice(SmoothingMethod::Simple))
            .with_choice(super::base_price_choice(BasePrice::Close))
            .with_numeric(NumericParam::new(keys::PERIOD, "Period", 10.0, 1.0, 200.0, 0))
            .with_numeric(NumericParam::new(keys::SMOOTHING, "Additional smoothing", 0.0, 0.0, 200.0, 0))
            .with_numeric(NumericParam::new(keys::LEVEL, "Level", 0.0, -100.0, 100.0, 4))
            .with_flag(super::previous_bar_flag());
        Self { slot, params }
    }
}

/// `price[i] - price[i - period]`, 0.0 before `period`.
pub fn momentum(price: &[f64], period: usize) -> Vec<f64> {
    let mut result = vec![0.0; price.len()];
    for i in period..price.len() {
        result[i] = price[i] - price[i - period];
    }
    result
}

impl Indicator for Momentum {
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
        let price = super::base_price(p).extract(bars);

        let raw = momentum(&price, period);
        let smoothed = smooth_from(&raw, period, smoothing, 0, super::method(p));
        let first = smoothed.first_valid_bar;

        let level = p.value_of(keys::LEVEL);
        let input = LogicInput {
            series: &smoothed.values,
            first_valid_bar: first,
            lag: super::lag(p),
            level,
            mirrored_level: -level,
            sigma: bars.sigma(ChartScale::Separate),
        };
        let signals = super::signals(self.slot, p, MODES, &input);

        tracing::debug!(indicator = Self::NAME, bars = bars.len(), period, smoothing, first_valid_bar = first, "calculated");

        let mut out = Components::new();
        out.push(Component::value(Self::TITLE, ChartHint::Histogram, first, smoothed.values));
        out.extend(signals);
        out
    }

    fn describe(&self) -> String {
        let level = self.params.numeric(keys::LEVEL).map(NumericParam::display).unwrap_or_default();
        let mirrored = format!("{:.4}", 0.0 - self.params.value_of(keys::LEVEL));
        describe_logic(Self::TITLE, &self.params, MODES, Some((level, mirrored)))
    }
}
