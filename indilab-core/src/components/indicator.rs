//! Indicator trait and the slot an indicator is used in.
//!
//! Indicators are pure functions of a bar series and their parameters. They
//! compute every bar in one pass and return [`Components`].
//!
//! # Look-ahead guard
//! No output at bar t may depend on bar t+1 or later. Every registered
//! indicator must give identical output on a truncated series.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::output::{Component, ComponentKind, Components};
use super::params::{keys, ParamError, ParamSet};
use crate::domain::BarSeries;
use crate::logic::{LogicMode, Signals};

/// Where a strategy uses the indicator. Decides the signal component kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorSlot {
    #[default]
    #[serde(alias = "open")]
    OpenFilter,
    #[serde(alias = "close")]
    CloseFilter,
}

impl IndicatorSlot {
    pub fn long_kind(self) -> ComponentKind {
        match self {
            Self::OpenFilter => ComponentKind::AllowOpenLong,
            Self::CloseFilter => ComponentKind::ForceCloseLong,
        }
    }

    pub fn short_kind(self) -> ComponentKind {
        match self {
            Self::OpenFilter => ComponentKind::AllowOpenShort,
            Self::CloseFilter => ComponentKind::ForceCloseShort,
        }
    }

    /// Accepts `open`, `open_filter`, `close`, `close_filter`.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "open" | "open_filter" => Some(Self::OpenFilter),
            "close" | "close_filter" => Some(Self::CloseFilter),
            _ => None,
        }
    }

    /// Wrap interpreter output as this slot's two signal components.
    pub fn signal_components(self, signals: Signals) -> [Component; 2] {
        let (long_name, short_name) = match self {
            Self::OpenFilter => ("Allow long entry", "Allow short entry"),
            Self::CloseFilter => ("Close out long position", "Close out short position"),
        };
        [
            Component::signal(long_name, self.long_kind(), signals.first_bar, signals.long),
            Component::signal(short_name, self.short_kind(), signals.first_bar, signals.short),
        ]
    }
}

impl fmt::Display for IndicatorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenFilter => f.write_str("open_filter"),
            Self::CloseFilter => f.write_str("close_filter"),
        }
    }
}

/// Trait for indicators.
///
/// `calculate` returns value components first, then exactly one long and one
/// short signal component of the kinds given by [`IndicatorSlot`].
pub trait Indicator: Send + Sync {
    /// Registry key, e.g. `"rsi"`.
    fn name(&self) -> &str;

    /// Display title, e.g. `"RSI"`.
    fn title(&self) -> &str;

    fn slot(&self) -> IndicatorSlot;

    fn params(&self) -> &ParamSet;

    /// Replace the parameter selection. `params` must have the same shape as
    /// [`Indicator::params`].
    fn configure(&mut self, params: ParamSet) -> Result<(), ParamError>;

    fn calculate(&self, bars: &BarSeries) -> Components;

    /// One-line description of the active logic.
    fn describe(&self) -> String;

    /// Title plus parameter summary, e.g. `"RSI (Smoothed, Close, 14, 30)"`.
    fn caption(&self) -> String {
        format!("{} {}", self.title(), self.params().caption())
    }
}

/// Shared `configure` body: swap in `new` when its shape matches `current`.
pub(crate) fn replace_params(
    current: &mut ParamSet,
    new: ParamSet,
    indicator: &str,
) -> Result<(), ParamError> {
    if !current.same_shape(&new) {
        return Err(ParamError::ShapeMismatch {
            indicator: indicator.to_string(),
        });
    }
    *current = new;
    Ok(())
}

/// Shared `describe` body for indicators driven by a logic choice.
///
/// Level modes mention the level pair, and the previous-bar flag is noted.
pub(crate) fn describe_logic(
    title: &str,
    params: &ParamSet,
    modes: &[LogicMode],
    levels: Option<(String, String)>,
) -> String {
    let mode = LogicMode::resolve(modes, params.index_of(keys::LOGIC));
    let mut text = mode.caption(title);

    if mode.uses_level() {
        if let Some((level, mirrored)) = levels {
            if level == mirrored {
                text.push_str(&format!(" ({level})"));
            } else {
                text.push_str(&format!(" ({level} / {mirrored})"));
            }
        }
    }
    if mode != LogicMode::Inactive && params.is_checked(keys::USE_PREVIOUS_BAR) {
        text.push_str(" (previous bar value)");
    }
    text
}
