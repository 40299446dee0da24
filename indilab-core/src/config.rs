//! Serializable indicator configuration.
//!
//! One file configures one indicator:
//!
//! ```toml
//! indicator = "rsi"
//! slot = "open_filter"
//!
//! [params]
//! logic = "crosses_level_upward"
//! method = "Smoothed"
//! period = 14
//! level = 30
//! use_previous_bar = true
//! ```
//!
//! Parameters left out keep the indicator's defaults. Files ending in `.json`
//! are read as JSON, everything else as TOML.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::indicator::{Indicator, IndicatorSlot};
use crate::components::params::{ParamError, ParamValue};
use crate::components::registry::{IndicatorRegistry, RegistryError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("write TOML config: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("parameter '{key}' of '{indicator}': {source}")]
    Param {
        indicator: String,
        key: String,
        #[source]
        source: ParamError,
    },

    #[error(transparent)]
    Configure(#[from] ParamError),
}

/// Indicator name, slot and parameter overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub indicator: String,

    #[serde(default)]
    pub slot: IndicatorSlot,

    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

impl IndicatorConfig {
    /// A config that keeps every default.
    pub fn new(indicator: impl Into<String>, slot: IndicatorSlot) -> Self {
        Self {
            indicator: indicator.into(),
            slot,
            params: BTreeMap::new(),
        }
    }

    /// Snapshot an indicator's current selection. Choices are written as
    /// option captions.
    pub fn from_indicator(indicator: &dyn Indicator) -> Self {
        let p = indicator.params();
        let params = p
            .choices()
            .iter()
            .map(|c| (c.key.clone(), ParamValue::Text(c.selected().to_string())))
            .chain(p.numerics().iter().map(|n| (n.key.clone(), ParamValue::Number(n.value()))))
            .chain(p.flags().iter().map(|f| (f.key.clone(), ParamValue::Flag(f.checked))))
            .collect();

        Self {
            indicator: indicator.name().to_string(),
            slot: indicator.slot(),
            params,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Load from a file, JSON when the extension is `json`, TOML otherwise.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Create the indicator from the global registry and apply the overrides.
    pub fn build(&self) -> Result<Box<dyn Indicator>, ConfigError> {
        self.build_with(IndicatorRegistry::global())
    }

    pub fn build_with(&self, registry: &IndicatorRegistry) -> Result<Box<dyn Indicator>, ConfigError> {
        let mut indicator = registry.create(&self.indicator, self.slot)?;
        let mut params = indicator.params().clone();

        for (key, value) in &self.params {
            params
                .apply(key, value)
                .map_err(|source| ConfigError::Param {
                    indicator: self.indicator.clone(),
                    key: key.clone(),
                    source,
                })?;

            if let (ParamValue::Number(requested), Some(numeric)) = (value, params.numeric(key)) {
                if numeric.value() != *requested {
                    tracing::warn!(
                        indicator = %self.indicator,
                        key = %key,
                        requested,
                        stored = numeric.value(),
                        "config value clamped into range"
                    );
                }
            }
        }

        indicator.configure(params)?;
        Ok(indicator)
    }
}
