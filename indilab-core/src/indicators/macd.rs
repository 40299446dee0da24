//! Moving Average Convergence/Divergence (MACD).
//!
//! MACD line = MA(fast) - MA(slow), signal line = MA(MACD line, signal),
//! histogram = MACD line - signal line. The logic reads either the histogram
//! or the MACD line, chosen by the `source` parameter.

use crate::components::indicator::{describe_logic, replace_params, Indicator, IndicatorSlot};
use crate::components::output::{ChartHint, Component, Components};
use crate::components::params::{keys, ChoiceParam, NumericParam, ParamError, ParamSet};
use crate::domain::{BarSeries, BasePrice, ChartScale};
use crate::logic::{LogicInput, LogicMode};
use crate::smoothing::{smooth, smooth_from, SmoothingMethod};

const MODES: &[LogicMode] = LogicMode::OSCILLATOR;

const SOURCE: &str = "source";
const SLOW_PERIOD: &str = "slow_period";
const FAST_PERIOD: &str = "fast_period";
const SIGNAL_PERIOD: &str = "signal_period";

#[derive(Debug, Clone)]
pub struct Macd {
    slot: IndicatorSlot,
    params: ParamSet,
}

impl Macd {
    pub const NAME: &'static str = "macd";
    const TITLE: &'static str = "MACD";

    pub fn new(slot: IndicatorSlot) -> Self {
        let params = ParamSet::new()
            .with_choice(super::logic_choice(Self::TITLE, MODES, 0))
            .with_choice(super::method_choice(SmoothingMethod::Exponential))
            .with_choice(super::base_price_choice(BasePrice::Close))
            .with_choice(ChoiceParam::new(SOURCE, "Signal source", ["Histogram", "MACD line"], 0))
            .with_numeric(NumericParam::new(SLOW_PERIOD, "Slow MA period", 26.0, 1.0, 200.0, 0))
            .with_numeric(NumericParam::new(FAST_PERIOD, "Fast MA period", 12.0, 1.0, 200.0, 0))
            .with_numeric(NumericParam::new(SIGNAL_PERIOD, "Signal line period", 9.0, 1.0, 200.0, 0))
            .with_numeric(NumericParam::new(keys::LEVEL, "Level", 0.0, -5.0, 5.0, 5))
            .with_flag(super::previous_bar_flag());
        Self { slot, params }
    }
}

impl Indicator for Macd {
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
        let method = super::method(p);
        let price = super::base_price(p).extract(bars);
        let n = price.len();

        let fast = smooth(&price, p.period(FAST_PERIOD), 0, method);
        let slow = smooth(&price, p.period(SLOW_PERIOD), 0, method);
        let line_first = fast.first_valid_bar.max(slow.first_valid_bar);

        let mut line = vec![0.0; n];
        for i in line_first..n {
            line[i] = fast.values[i] - slow.values[i];
        }

        let signal = smooth_from(&line, line_first, p.period(SIGNAL_PERIOD), 0, method);
        let hist_first = signal.first_valid_bar;
        let mut hist = vec![0.0; n];
        for i in hist_first..n {
            hist[i] = line[i] - signal.values[i];
        }

        let (series, first) = match p.index_of(SOURCE) {
            1 => (&line, line_first),
            _ => (&hist, hist_first),
        };
        let level = p.value_of(keys::LEVEL);
        let input = LogicInput {
            series,
            first_valid_bar: first,
            lag: super::lag(p),
            level,
            mirrored_level: -level,
            sigma: bars.sigma(ChartScale::Separate),
        };
        let signals = super::signals(self.slot, p, MODES, &input);

        tracing::debug!(indicator = Self::NAME, bars = n, line_first, hist_first, "calculated");

        let mut out = Components::new();
        out.push(Component::value("Histogram", ChartHint::Histogram, hist_first, hist));
        out.push(Component::value("MACD line", ChartHint::Line, line_first, line));
        out.push(Component::value("Signal line", ChartHint::Line, hist_first, signal.values));
        out.extend(signals);
        out
    }

    fn describe(&self) -> String {
        let subject = match self.params.index_of(SOURCE) {
            1 => "MACD line",
            _ => "MACD histogram",
        };
        let level = self.params.value_of(keys::LEVEL);
        let levels = (format!("{level:.5}"), format!("{:.5}", 0.0 - level));
        describe_logic(subject, &self.params, MODES, Some(levels))
    }
}
