//! Logic modes — how a series maps to long/short signals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declarative rule the interpreter applies to a series.
///
/// Deserializes through [`LogicMode::from_key`], so unknown keys read as `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum LogicMode {
    Rises,
    Falls,
    IsHigherThanLevel,
    IsLowerThanLevel,
    CrossesLevelUpward,
    CrossesLevelDownward,
    ChangesDirectionUpward,
    ChangesDirectionDownward,
    /// Both signals always active; the indicator does not filter.
    Inactive,
}

impl LogicMode {
    /// Modes offered by oscillators with a level line.
    pub const OSCILLATOR: &'static [LogicMode] = &[
        LogicMode::Rises,
        LogicMode::Falls,
        LogicMode::IsHigherThanLevel,
        LogicMode::IsLowerThanLevel,
        LogicMode::CrossesLevelUpward,
        LogicMode::CrossesLevelDownward,
        LogicMode::ChangesDirectionUpward,
        LogicMode::ChangesDirectionDownward,
        LogicMode::Inactive,
    ];

    /// Modes offered by series without a meaningful level (moving averages).
    pub const DIRECTIONAL: &'static [LogicMode] = &[
        LogicMode::Rises,
        LogicMode::Falls,
        LogicMode::ChangesDirectionUpward,
        LogicMode::ChangesDirectionDownward,
        LogicMode::Inactive,
    ];

    const ALL: &'static [LogicMode] = Self::OSCILLATOR;

    /// Stable snake_case key, as used in config files.
    pub fn key(self) -> &'static str {
        match self {
            Self::Rises => "rises",
            Self::Falls => "falls",
            Self::IsHigherThanLevel => "is_higher_than_level",
            Self::IsLowerThanLevel => "is_lower_than_level",
            Self::CrossesLevelUpward => "crosses_level_upward",
            Self::CrossesLevelDownward => "crosses_level_downward",
            Self::ChangesDirectionUpward => "changes_direction_upward",
            Self::ChangesDirectionDownward => "changes_direction_downward",
            Self::Inactive => "inactive",
        }
    }

    /// Resolve a key. Unknown keys resolve to `Inactive` so a misconfigured
    /// filter stops filtering instead of failing.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        match Self::ALL.iter().find(|m| m.key().eq_ignore_ascii_case(key)) {
            Some(mode) => *mode,
            None => {
                tracing::warn!(key, "unknown logic mode, falling back to inactive");
                Self::Inactive
            }
        }
    }

    /// Resolve the `index`-th entry of an indicator's mode list, falling back
    /// to `Inactive` when the index is out of range.
    pub fn resolve(modes: &[LogicMode], index: usize) -> Self {
        match modes.get(index) {
            Some(mode) => *mode,
            None => {
                tracing::warn!(
                    index,
                    available = modes.len(),
                    "logic index out of range, falling back to inactive"
                );
                Self::Inactive
            }
        }
    }

    /// Human caption for an indicator, e.g. `"RSI crosses the Level line upward"`.
    pub fn caption(self, subject: &str) -> String {
        let predicate = match self {
            Self::Rises => "rises",
            Self::Falls => "falls",
            Self::IsHigherThanLevel => "is higher than the Level line",
            Self::IsLowerThanLevel => "is lower than the Level line",
            Self::CrossesLevelUpward => "crosses the Level line upward",
            Self::CrossesLevelDownward => "crosses the Level line downward",
            Self::ChangesDirectionUpward => "changes its direction upward",
            Self::ChangesDirectionDownward => "changes its direction downward",
            Self::Inactive => "is not used as a filter",
        };
        format!("{subject} {predicate}")
    }

    /// Captions for a whole mode list, in order.
    pub fn captions(modes: &[LogicMode], subject: &str) -> Vec<String> {
        modes.iter().map(|m| m.caption(subject)).collect()
    }

    /// True for modes that compare against the level pair.
    pub fn uses_level(self) -> bool {
        matches!(
            self,
            Self::IsHigherThanLevel
                | Self::IsLowerThanLevel
                | Self::CrossesLevelUpward
                | Self::CrossesLevelDownward
        )
    }
}

impl From<String> for LogicMode {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl fmt::Display for LogicMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
