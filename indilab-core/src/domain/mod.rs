//! Domain types: bars, bar series, base price selection.

pub mod bar;
pub mod price;
pub mod series;

pub use bar::Bar;
pub use price::BasePrice;
pub use series::{BarError, BarSeries, ChartScale, OSCILLATOR_SIGMA};
