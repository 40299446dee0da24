//! Day of Week time filter.
//!
//! Both signals are active on bars whose weekday lies in `[from, until)`,
//! wrapping around the week. Equal bounds mean every day.

use chrono::Datelike;

use crate::components::indicator::{replace_params, Indicator, IndicatorSlot};
use crate::components::output::Components;
use crate::components::params::{ChoiceParam, ParamError, ParamSet};
use crate::domain::BarSeries;
use crate::logic::Signals;

const FROM_DAY: &str = "from_day";
const UNTIL_DAY: &str = "until_day";

const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone)]
pub struct DayOfWeek {
    slot: IndicatorSlot,
    params: ParamSet,
}

impl DayOfWeek {
    pub const NAME: &'static str = "day_of_week";
    const TITLE: &'static str = "Day of Week";

    pub fn new(slot: IndicatorSlot) -> Self {
        let params = ParamSet::new()
            .with_choice(ChoiceParam::new(FROM_DAY, "From (incl.)", DAYS, 1))
            .with_choice(ChoiceParam::new(UNTIL_DAY, "Until (excl.)", DAYS, 6));
        Self { slot, params }
    }
}

/// True when `day` (days from Sunday) is inside `[from, until)` on the week circle.
fn in_window(day: usize, from: usize, until: usize) -> bool {
    match from.cmp(&until) {
        std::cmp::Ordering::Less => (from..until).contains(&day),
        std::cmp::Ordering::Greater => day >= from || day < until,
        std::cmp::Ordering::Equal => true,
    }
}

impl Indicator for DayOfWeek {
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
        let from = self.params.index_of(FROM_DAY);
        let until = self.params.index_of(UNTIL_DAY);

        let allowed: Vec<f64> = bars
            .time()
            .iter()
            .map(|t| {
                let day = t.weekday().num_days_from_sunday() as usize;
                if in_window(day, from, until) {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();

        tracing::debug!(indicator = Self::NAME, bars = bars.len(), from, until, "calculated");

        let signals = Signals {
            long: allowed.clone(),
            short: allowed,
            first_bar: 0,
        };
        self.slot.signal_components(signals).into_iter().collect()
    }

    fn describe(&self) -> String {
        let verb = match self.slot {
            IndicatorSlot::OpenFilter => "Enter the market",
            IndicatorSlot::CloseFilter => "Close positions",
        };
        format!(
            "{verb} between {} (incl.) and {} (excl.)",
            DAYS[self.params.index_of(FROM_DAY) % 7],
            DAYS[self.params.index_of(UNTIL_DAY) % 7]
        )
    }
}
