//! Commodity Channel Index (CCI).
//!
//! CCI = (price - MA(price)) / (0.015 * mean deviation), where the mean
//! deviation is taken around the current average over the same window.
//! A window with no deviation repeats the previous value (0 at the first bar).

use crate::components::indicator::{describe_logic, replace_params, Indicator, IndicatorSlot};
use crate::components::output::{ChartHint, Component, Components};
use crate::components::params::{keys, NumericParam, ParamError, ParamSet};
use crate::domain::{BarSeries, BasePrice, ChartScale};
use crate::logic::{LogicInput, LogicMode};
use crate::smoothing::{smooth, SmoothingMethod};

const MODES: &[LogicMode] = LogicMode::OSCILLATOR;

/// Lambert's constant: scales roughly 70-80% of values into ±100.
const SCALE: f64 = 0.015;

#[derive(Debug, Clone)]
pub struct CommodityChannelIndex {
    slot: IndicatorSlot,
    params: ParamSet,
}

impl CommodityChannelIndex {
    pub const NAME: &'static str = "commodity_channel_index";
    const TITLE: &'static str = "CCI";

    pub fn new(slot: IndicatorSlot) -> Self {
        let params = ParamSet::new()
            .with_choice(super::logic_choice(Self::TITLE, MODES, 0))
            .with_choice(super::method_choice(SmoothingMethod::Simple))
            .with_choice(super::base_price_choice(BasePrice::Typical))
            .with_numeric(NumericParam::new(keys::PERIOD, "Smoothing period", 14.0, 2.0, 200.0, 0))
            .with_numeric(NumericParam::new(keys::LEVEL, "Level", 100.0, 0.0, 1000.0, 0))
            .with_flag(super::previous_bar_flag());
        Self { slot, params }
    }
}

impl Indicator for CommodityChannelIndex {
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
        let price = super::base_price(p).extract(bars);
        let n = price.len();

        let ma = smooth(&price, period, 0, super::method(p));
        let first = ma.first_valid_bar;

        let mut cci = vec![0.0; n];
        let start = period - 1;
        for i in start..n {
            let window = &price[(i + 1 - period)..=i];
            let deviation = window.iter().map(|x| (x - ma.values[i]).abs()).sum::<f64>() / period as f64;
            cci[i] = if deviation > 0.0 && deviation.is_finite() {
                (price[i] - ma.values[i]) / (SCALE * deviation)
            } else if i > start {
                cci[i - 1]
            } else {
                0.0
            };
        }

        let level = p.value_of(keys::LEVEL);
        let input = LogicInput {
            series: &cci,
            first_valid_bar: first,
            lag: super::lag(p),
            level,
            mirrored_level: -level,
            sigma: bars.sigma(ChartScale::Separate),
        };
        let signals = super::signals(self.slot, p, MODES, &input);

        tracing::debug!(indicator = Self::NAME, bars = n, period, first_valid_bar = first, "calculated");

        let mut out = Components::new();
        out.push(Component::value(Self::TITLE, ChartHint::Line, first, cci));
        out.extend(signals);
        out
    }

    fn describe(&self) -> String {
        let level = self.params.value_of(keys::LEVEL);
        let levels = (format!("{level:.0}"), format!("{:.0}", 0.0 - level));
        describe_logic(Self::TITLE, &self.params, MODES, Some(levels))
    }
}
