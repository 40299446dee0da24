//! Indicator building blocks.
//!
//! - Parameter model: choices, numerics and flags with validation
//! - Output components: named value and signal series
//! - The `Indicator` trait and the slot it is used in
//! - The name → factory registry

pub mod indicator;
pub mod output;
pub mod params;
pub mod registry;

pub use indicator::{Indicator, IndicatorSlot};
pub use output::{ChartHint, Component, ComponentKind, Components};
pub use params::{keys, ChoiceParam, FlagParam, NumericParam, ParamError, ParamSet, ParamValue};
pub use registry::{IndicatorFactory, IndicatorRegistry, RegistryError};
