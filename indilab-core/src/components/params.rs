//! Parameter model — declarative description and current selection of an
//! indicator's tunable inputs.
//!
//! Three kinds: choices (index into an option list), numerics (clamped to
//! `[min, max]`) and flags. Every parameter has a stable key used by configs
//! and lookups; captions are for display only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Well-known parameter keys shared by many indicators.
pub mod keys {
    pub const LOGIC: &str = "logic";
    pub const METHOD: &str = "method";
    pub const BASE_PRICE: &str = "base_price";
    pub const PERIOD: &str = "period";
    pub const SMOOTHING: &str = "smoothing";
    pub const SHIFT: &str = "shift";
    pub const LEVEL: &str = "level";
    pub const USE_PREVIOUS_BAR: &str = "use_previous_bar";
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("unknown parameter '{0}'")]
    UnknownKey(String),

    #[error("choice '{key}' has {options} options, index {index} is out of range")]
    ChoiceOutOfRange {
        key: String,
        index: usize,
        options: usize,
    },

    #[error("choice '{key}' has no option '{option}'")]
    UnknownOption { key: String, option: String },

    #[error("parameter '{key}' must be finite, got {value}")]
    NotFinite { key: String, value: f64 },

    #[error("parameter '{key}' expects {expected}")]
    WrongKind { key: String, expected: &'static str },

    #[error("parameter set does not match the parameters of '{indicator}'")]
    ShapeMismatch { indicator: String },
}

/// A value as it arrives from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

/// Enumerated choice: an index into a named option list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceParam {
    pub key: String,
    pub caption: String,
    options: Vec<String>,
    /// Alternative names accepted by [`ChoiceParam::select`], one per option.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<String>,
    index: usize,
}

impl ChoiceParam {
    /// `index` is clamped into the option list.
    pub fn new<S: Into<String>>(
        key: &str,
        caption: &str,
        options: impl IntoIterator<Item = S>,
        index: usize,
    ) -> Self {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let index = index.min(options.len().saturating_sub(1));
        Self {
            key: key.to_string(),
            caption: caption.to_string(),
            options,
            aliases: Vec::new(),
            index,
        }
    }

    pub fn with_aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Caption of the selected option.
    pub fn selected(&self) -> &str {
        self.options.get(self.index).map_or("", String::as_str)
    }

    pub fn set_index(&mut self, index: usize) -> Result<(), ParamError> {
        if index >= self.options.len() {
            return Err(ParamError::ChoiceOutOfRange {
                key: self.key.clone(),
                index,
                options: self.options.len(),
            });
        }
        self.index = index;
        Ok(())
    }

    /// Select by option caption or alias, case-insensitive.
    pub fn select(&mut self, option: &str) -> Result<(), ParamError> {
        let wanted = option.trim();
        let found = self
            .options
            .iter()
            .position(|o| o.eq_ignore_ascii_case(wanted))
            .or_else(|| self.aliases.iter().position(|a| a.eq_ignore_ascii_case(wanted)));

        match found {
            Some(index) => self.set_index(index),
            None => Err(ParamError::UnknownOption {
                key: self.key.clone(),
                option: option.to_string(),
            }),
        }
    }
}

/// Bounded scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericParam {
    pub key: String,
    pub caption: String,
    value: f64,
    min: f64,
    max: f64,
    /// Decimal places used for display.
    precision: usize,
}

impl NumericParam {
    /// `value` is clamped into `[min, max]`.
    pub fn new(key: &str, caption: &str, value: f64, min: f64, max: f64, precision: usize) -> Self {
        debug_assert!(min <= max, "numeric parameter '{key}': min > max");
        Self {
            key: key.to_string(),
            caption: caption.to_string(),
            value: value.clamp(min, max),
            min,
            max,
            precision,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Set and clamp. Returns the stored value.
    pub fn set_value(&mut self, value: f64) -> Result<f64, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NotFinite {
                key: self.key.clone(),
                value,
            });
        }
        let clamped = value.clamp(self.min, self.max);
        if clamped != value {
            tracing::debug!(
                key = %self.key,
                requested = value,
                stored = clamped,
                "numeric parameter clamped"
            );
        }
        self.value = clamped;
        Ok(clamped)
    }

    /// Value as a non-negative whole number of bars.
    pub fn as_period(&self) -> usize {
        self.value.round().max(0.0) as usize
    }

    /// Value formatted with the parameter's precision.
    pub fn display(&self) -> String {
        format!("{:.*}", self.precision, self.value)
    }
}

/// Boolean switch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagParam {
    pub key: String,
    pub caption: String,
    pub checked: bool,
}

impl FlagParam {
    pub fn new(key: &str, caption: &str, checked: bool) -> Self {
        Self {
            key: key.to_string(),
            caption: caption.to_string(),
            checked,
        }
    }

    pub fn set(&mut self, checked: bool) {
        self.checked = checked;
    }
}

/// All parameters of one indicator, in declaration order.
///
/// Serialize-only: a selection is restored by applying [`ParamValue`]s to an
/// indicator's own set, which keeps bounds and option lists authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParamSet {
    choices: Vec<ChoiceParam>,
    numerics: Vec<NumericParam>,
    flags: Vec<FlagParam>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_choice(mut self, choice: ChoiceParam) -> Self {
        self.choices.push(choice);
        self
    }

    pub fn with_numeric(mut self, numeric: NumericParam) -> Self {
        self.numerics.push(numeric);
        self
    }

    pub fn with_flag(mut self, flag: FlagParam) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn choices(&self) -> &[ChoiceParam] {
        &self.choices
    }

    pub fn numerics(&self) -> &[NumericParam] {
        &self.numerics
    }

    pub fn flags(&self) -> &[FlagParam] {
        &self.flags
    }

    pub fn choice(&self, key: &str) -> Option<&ChoiceParam> {
        self.choices.iter().find(|c| c.key == key)
    }

    pub fn numeric(&self, key: &str) -> Option<&NumericParam> {
        self.numerics.iter().find(|n| n.key == key)
    }

    pub fn flag(&self, key: &str) -> Option<&FlagParam> {
        self.flags.iter().find(|f| f.key == key)
    }

    /// Selected index of a choice, 0 when the key is absent.
    pub fn index_of(&self, key: &str) -> usize {
        self.choice(key).map_or(0, ChoiceParam::index)
    }

    /// Value of a numeric, 0.0 when the key is absent.
    pub fn value_of(&self, key: &str) -> f64 {
        self.numeric(key).map_or(0.0, NumericParam::value)
    }

    /// Numeric read as a bar count, 0 when the key is absent.
    pub fn period(&self, key: &str) -> usize {
        self.numeric(key).map_or(0, NumericParam::as_period)
    }

    /// Flag state, false when the key is absent.
    pub fn is_checked(&self, key: &str) -> bool {
        self.flag(key).is_some_and(|f| f.checked)
    }

    pub fn set_choice(&mut self, key: &str, index: usize) -> Result<(), ParamError> {
        self.choice_mut(key)?.set_index(index)
    }

    pub fn select(&mut self, key: &str, option: &str) -> Result<(), ParamError> {
        self.choice_mut(key)?.select(option)
    }

    pub fn set_numeric(&mut self, key: &str, value: f64) -> Result<f64, ParamError> {
        self.numerics
            .iter_mut()
            .find(|n| n.key == key)
            .ok_or_else(|| ParamError::UnknownKey(key.to_string()))?
            .set_value(value)
    }

    pub fn set_flag(&mut self, key: &str, checked: bool) -> Result<(), ParamError> {
        self.flags
            .iter_mut()
            .find(|f| f.key == key)
            .ok_or_else(|| ParamError::UnknownKey(key.to_string()))?
            .set(checked);
        Ok(())
    }

    /// Apply a config value to whichever parameter owns `key`.
    ///
    /// Choices accept an index or an option caption/alias, numerics accept a
    /// number, flags accept a boolean.
    pub fn apply(&mut self, key: &str, value: &ParamValue) -> Result<(), ParamError> {
        if self.choice(key).is_some() {
            return match value {
                ParamValue::Text(option) => self.select(key, option),
                ParamValue::Number(n) if *n >= 0.0 && n.fract() == 0.0 => {
                    self.set_choice(key, *n as usize)
                }
                _ => Err(ParamError::WrongKind {
                    key: key.to_string(),
                    expected: "an option name or index",
                }),
            };
        }
        if self.numeric(key).is_some() {
            return match value {
                ParamValue::Number(n) => self.set_numeric(key, *n).map(|_| ()),
                _ => Err(ParamError::WrongKind {
                    key: key.to_string(),
                    expected: "a number",
                }),
            };
        }
        if self.flag(key).is_some() {
            return match value {
                ParamValue::Flag(b) => self.set_flag(key, *b),
                _ => Err(ParamError::WrongKind {
                    key: key.to_string(),
                    expected: "true or false",
                }),
            };
        }
        Err(ParamError::UnknownKey(key.to_string()))
    }

    /// True when `other` declares the same keys, kinds and option lists.
    pub fn same_shape(&self, other: &ParamSet) -> bool {
        self.choices.len() == other.choices.len()
            && self.numerics.len() == other.numerics.len()
            && self.flags.len() == other.flags.len()
            && self
                .choices
                .iter()
                .zip(&other.choices)
                .all(|(a, b)| a.key == b.key && a.options == b.options)
            && self
                .numerics
                .iter()
                .zip(&other.numerics)
                .all(|(a, b)| a.key == b.key && a.min == b.min && a.max == b.max)
            && self
                .flags
                .iter()
                .zip(&other.flags)
                .all(|(a, b)| a.key == b.key)
    }

    /// Current selection as a caption suffix, e.g. `"(Smoothed, Close, 14, 30)"`.
    ///
    /// The logic choice is left out: it reads as the indicator description.
    pub fn caption(&self) -> String {
        let parts: Vec<String> = self
            .choices
            .iter()
            .filter(|c| c.key != keys::LOGIC)
            .map(|c| c.selected().to_string())
            .chain(self.numerics.iter().map(NumericParam::display))
            .collect();
        format!("({})", parts.join(", "))
    }

    fn choice_mut(&mut self, key: &str) -> Result<&mut ChoiceParam, ParamError> {
        self.choices
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| ParamError::UnknownKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParamSet {
        ParamSet::new()
            .with_choice(
                ChoiceParam::new(keys::LOGIC, "Logic", ["RSI rises", "RSI falls"], 0)
                    .with_aliases(["rises", "falls"]),
            )
            .with_choice(ChoiceParam::new(
                keys::METHOD,
                "Smoothing method",
                ["Simple", "Weighted", "Exponential", "Smoothed"],
                3,
            ))
            .with_numeric(NumericParam::new(keys::PERIOD, "Period", 14.0, 1.0, 200.0, 0))
            .with_numeric(NumericParam::new(keys::LEVEL, "Level", 30.0, 0.0, 100.0, 2))
            .with_flag(FlagParam::new(keys::USE_PREVIOUS_BAR, "Use previous bar value", true))
    }

    #[test]
    fn numeric_is_clamped() {
        let mut p = sample();
        assert_eq!(p.set_numeric(keys::PERIOD, 500.0), Ok(200.0));
        assert_eq!(p.set_numeric(keys::PERIOD, -3.0), Ok(1.0));
        assert_eq!(p.period(keys::PERIOD), 1);
    }

    #[test]
    fn numeric_rejects_nan() {
        let mut p = sample();
        assert!(matches!(
            p.set_numeric(keys::LEVEL, f64::NAN),
            Err(ParamError::NotFinite { .. })
        ));
        assert_eq!(p.value_of(keys::LEVEL), 30.0);
    }

    #[test]
    fn constructor_clamps() {
        let n = NumericParam::new("x", "X", 10.0, 0.0, 5.0, 1);
        assert_eq!(n.value(), 5.0);
        let c = ChoiceParam::new("c", "C", ["a", "b"], 7);
        assert_eq!(c.index(), 1);
    }

    #[test]
    fn choice_index_out_of_range() {
        let mut p = sample();
        assert_eq!(
            p.set_choice(keys::METHOD, 4),
            Err(ParamError::ChoiceOutOfRange {
                key: keys::METHOD.into(),
                index: 4,
                options: 4
            })
        );
        assert_eq!(p.index_of(keys::METHOD), 3);
    }

    #[test]
    fn select_by_caption_and_alias() {
        let mut p = sample();
        p.select(keys::METHOD, "exponential").unwrap();
        assert_eq!(p.choice(keys::METHOD).unwrap().selected(), "Exponential");
        p.select(keys::LOGIC, "falls").unwrap();
        assert_eq!(p.index_of(keys::LOGIC), 1);
        assert!(matches!(
            p.select(keys::LOGIC, "zigzags"),
            Err(ParamError::UnknownOption { .. })
        ));
    }

    #[test]
    fn apply_dispatches_by_kind() {
        let mut p = sample();
        p.apply(keys::PERIOD, &ParamValue::Number(21.0)).unwrap();
        p.apply(keys::METHOD, &ParamValue::Number(0.0)).unwrap();
        p.apply(keys::LOGIC, &ParamValue::Text("RSI falls".into())).unwrap();
        p.apply(keys::USE_PREVIOUS_BAR, &ParamValue::Flag(false)).unwrap();
        assert_eq!(p.period(keys::PERIOD), 21);
        assert_eq!(p.index_of(keys::METHOD), 0);
        assert_eq!(p.index_of(keys::LOGIC), 1);
        assert!(!p.is_checked(keys::USE_PREVIOUS_BAR));
    }

    #[test]
    fn apply_rejects_wrong_kind_and_unknown_key() {
        let mut p = sample();
        assert!(matches!(
            p.apply(keys::PERIOD, &ParamValue::Flag(true)),
            Err(ParamError::WrongKind { .. })
        ));
        assert!(matches!(
            p.apply(keys::METHOD, &ParamValue::Number(1.5)),
            Err(ParamError::WrongKind { .. })
        ));
        assert_eq!(
            p.apply("colour", &ParamValue::Number(1.0)),
            Err(ParamError::UnknownKey("colour".into()))
        );
    }

    #[test]
    fn caption_skips_logic() {
        assert_eq!(sample().caption(), "(Smoothed, 14, 30.00)");
    }

    #[test]
    fn shape_comparison() {
        let mut other = sample();
        other.set_numeric(keys::PERIOD, 50.0).unwrap();
        assert!(sample().same_shape(&other));
        let smaller = ParamSet::new().with_numeric(NumericParam::new(keys::PERIOD, "P", 1.0, 1.0, 2.0, 0));
        assert!(!sample().same_shape(&smaller));
    }

    #[test]
    fn missing_keys_have_neutral_defaults() {
        let p = ParamSet::new();
        assert_eq!(p.index_of("x"), 0);
        assert_eq!(p.value_of("x"), 0.0);
        assert_eq!(p.period("x"), 0);
        assert!(!p.is_checked("x"));
    }

    #[test]
    fn untagged_values_deserialize() {
        let v: Vec<ParamValue> = serde_json::from_str(r#"[true, 14, "Simple"]"#).unwrap();
        assert_eq!(
            v,
            vec![
                ParamValue::Flag(true),
                ParamValue::Number(14.0),
                ParamValue::Text("Simple".into())
            ]
        );
    }
}
