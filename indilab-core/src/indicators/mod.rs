//! Concrete indicator implementations.
//!
//! Every indicator implements `Indicator` from `components::indicator`, reads
//! its settings from a `ParamSet` and returns its value components followed by
//! the two signal components of its slot.
//!
//! Oscillators share one parameter layout: logic, smoothing method, base
//! price, period(s), level, use-previous-bar.

pub mod average_true_range;
pub mod commodity_channel_index;
pub mod day_of_week;
pub mod macd;
pub mod momentum;
pub mod moving_average;
pub mod rate_of_change;
pub mod rsi;
pub mod williams_percent_range;

pub use average_true_range::AverageTrueRange;
pub use commodity_channel_index::CommodityChannelIndex;
pub use day_of_week::DayOfWeek;
pub use macd::Macd;
pub use momentum::Momentum;
pub use moving_average::MovingAverage;
pub use rate_of_change::RateOfChange;
pub use rsi::Rsi;
pub use williams_percent_range::WilliamsPercentRange;

use crate::components::indicator::IndicatorSlot;
use crate::components::output::Component;
use crate::components::params::{keys, ChoiceParam, FlagParam, ParamSet};
use crate::domain::BasePrice;
use crate::logic::{self, LogicInput, LogicMode};
use crate::smoothing::SmoothingMethod;

pub(crate) fn logic_choice(title: &str, modes: &[LogicMode], default: usize) -> ChoiceParam {
    ChoiceParam::new(keys::LOGIC, "Logic", LogicMode::captions(modes, title), default)
        .with_aliases(modes.iter().map(|m| m.key()))
}

pub(crate) fn method_choice(default: SmoothingMethod) -> ChoiceParam {
    ChoiceParam::new(
        keys::METHOD,
        "Smoothing method",
        SmoothingMethod::CAPTIONS,
        default as usize,
    )
}

pub(crate) fn base_price_choice(default: BasePrice) -> ChoiceParam {
    ChoiceParam::new(keys::BASE_PRICE, "Base price", BasePrice::CAPTIONS, default as usize)
}

pub(crate) fn previous_bar_flag() -> FlagParam {
    FlagParam::new(keys::USE_PREVIOUS_BAR, "Use previous bar value", true)
}

pub(crate) fn method(params: &ParamSet) -> SmoothingMethod {
    SmoothingMethod::from_index(params.index_of(keys::METHOD))
}

pub(crate) fn base_price(params: &ParamSet) -> BasePrice {
    BasePrice::from_index(params.index_of(keys::BASE_PRICE))
}

/// 1 when signals are read from the previous bar.
pub(crate) fn lag(params: &ParamSet) -> usize {
    usize::from(params.is_checked(keys::USE_PREVIOUS_BAR))
}

/// Run the selected logic mode and wrap the result for `slot`.
pub(crate) fn signals(
    slot: IndicatorSlot,
    params: &ParamSet,
    modes: &[LogicMode],
    input: &LogicInput<'_>,
) -> [Component; 2] {
    let mode = LogicMode::resolve(modes, params.index_of(keys::LOGIC));
    slot.signal_components(logic::evaluate(input, mode))
}

/// Build a series from close prices for testing.
///
/// Generates plausible OHLC: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> crate::domain::BarSeries {
    let ohlc: Vec<(f64, f64, f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            (open, open.max(close) + 1.0, open.min(close) - 1.0, close)
        })
        .collect();
    crate::domain::series::test_series(&ohlc)
}

#[cfg(test)]
pub use crate::smoothing::{assert_approx, DEFAULT_EPSILON};
