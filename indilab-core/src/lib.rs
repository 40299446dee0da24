//! indilab core — technical indicators built from two shared engines.
//!
//! This crate contains:
//! - Domain types (bars, bar series, base price selection)
//! - The smoothing engine (simple, weighted, exponential, Wilder)
//! - The oscillator-logic interpreter (series + logic mode → long/short signals)
//! - The parameter model, output components and the `Indicator` trait
//! - Concrete indicators and the name → factory registry
//! - TOML/JSON indicator configuration

pub mod components;
pub mod config;
pub mod domain;
pub mod indicators;
pub mod logic;
pub mod smoothing;

pub use components::{
    ChartHint, Component, ComponentKind, Components, Indicator, IndicatorRegistry, IndicatorSlot,
    ParamError, ParamSet, ParamValue, RegistryError,
};
pub use config::{ConfigError, IndicatorConfig};
pub use domain::{Bar, BarError, BarSeries, BasePrice, ChartScale};
pub use logic::{LogicInput, LogicMode, Signals};
pub use smoothing::{smooth, SmoothedSeries, SmoothingMethod};
