//! Moving Average of the base price.
//!
//! The only indicator on the price scale: comparisons use half a point as
//! tolerance. `shift` moves the average forward by whole bars.

use crate::components::indicator::{describe_logic, replace_params, Indicator, IndicatorSlot};
use crate::components::output::{ChartHint, Component, Components};
use crate::components::params::{keys, NumericParam, ParamError, ParamSet};
use crate::domain::{BarSeries, BasePrice, ChartScale};
use crate::logic::{LogicInput, LogicMode};
use crate::smoothing::{smooth, SmoothingMethod};

const MODES: &[LogicMode] = LogicMode::DIRECTIONAL;

#[derive(Debug, Clone)]
pub struct MovingAverage {
    slot: IndicatorSlot,
    params: ParamSet,
}

impl MovingAverage {
    pub const NAME: &'static str = "moving_average";
    const TITLE: &'static str = "Moving Average";

    pub fn new(slot: IndicatorSlot) -> Self {
        let params = ParamSet::new()
            .with_choice(super::logic_choice("The Moving Average", MODES, 0))
            .with_choice(super::method_choice(SmoothingMethod::Simple))
            .with_choice(super::base_price_choice(BasePrice::Close))
            .with_numeric(NumericParam::new(keys::PERIOD, "Period", 13.0, 1.0, 200.0, 0))
            .with_numeric(NumericParam::new(keys::SHIFT, "Shift", 0.0, 0.0, 100.0, 0))
            .with_flag(super::previous_bar_flag());
        Self { slot, params }
    }
}

impl Indicator for MovingAverage {
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
        let shift = p.period(keys::SHIFT);
        let price = super::base_price(p).extract(bars);

        let ma = smooth(&price, period, shift, super::method(p));
        let first = ma.first_valid_bar;

        let input = LogicInput {
            series: &ma.values,
            first_valid_bar: first,
            lag: super::lag(p),
            level: 0.0,
            mirrored_level: 0.0,
            sigma: bars.sigma(ChartScale::Price),
        };
        let signals = super::signals(self.slot, p, MODES, &input);

        tracing::debug!(indicator = Self::NAME, bars = bars.len(), period, shift, first_valid_bar = first, "calculated");

        let mut out = Components::new();
        out.push(Component::value("MA Value", ChartHint::Line, first, ma.values));
        out.extend(signals);
        out
    }

    fn describe(&self) -> String {
        describe_logic("The Moving Average", &self.params, MODES, None)
    }
}
