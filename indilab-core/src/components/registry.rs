//! Indicator registry — creates indicators by name.
//!
//! The process-wide registry is built once on first use and is read-only
//! afterwards. Callers that need extra indicators build their own with
//! [`IndicatorRegistry::with_defaults`] and [`IndicatorRegistry::register`].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use thiserror::Error;

use super::indicator::{Indicator, IndicatorSlot};
use crate::indicators::{
    AverageTrueRange, CommodityChannelIndex, DayOfWeek, Macd, Momentum, MovingAverage,
    RateOfChange, Rsi, WilliamsPercentRange,
};

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("unknown indicator '{0}'")]
    UnknownIndicator(String),
}

/// Factory function type: a fresh indicator with default parameters.
pub type IndicatorFactory = Box<dyn Fn(IndicatorSlot) -> Box<dyn Indicator> + Send + Sync>;

static GLOBAL: Lazy<IndicatorRegistry> = Lazy::new(IndicatorRegistry::with_defaults);

/// Name → factory map. Names are case-insensitive and listed in sorted order.
pub struct IndicatorRegistry {
    factories: BTreeMap<String, IndicatorFactory>,
}

impl IndicatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A registry with every built-in indicator.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MovingAverage::NAME, |slot| Box::new(MovingAverage::new(slot)));
        registry.register(Rsi::NAME, |slot| Box::new(Rsi::new(slot)));
        registry.register(Momentum::NAME, |slot| Box::new(Momentum::new(slot)));
        registry.register(RateOfChange::NAME, |slot| Box::new(RateOfChange::new(slot)));
        registry.register(WilliamsPercentRange::NAME, |slot| {
            Box::new(WilliamsPercentRange::new(slot))
        });
        registry.register(CommodityChannelIndex::NAME, |slot| {
            Box::new(CommodityChannelIndex::new(slot))
        });
        registry.register(Macd::NAME, |slot| Box::new(Macd::new(slot)));
        registry.register(AverageTrueRange::NAME, |slot| Box::new(AverageTrueRange::new(slot)));
        registry.register(DayOfWeek::NAME, |slot| Box::new(DayOfWeek::new(slot)));
        registry
    }

    /// The shared built-in registry.
    pub fn global() -> &'static IndicatorRegistry {
        &GLOBAL
    }

    /// Register a factory, replacing any previous one under the same name.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(IndicatorSlot) -> Box<dyn Indicator> + Send + Sync + 'static,
    {
        if self
            .factories
            .insert(name.to_lowercase(), Box::new(factory))
            .is_some()
        {
            tracing::debug!(name, "indicator factory replaced");
        }
    }

    /// Create an indicator with default parameters.
    pub fn create(&self, name: &str, slot: IndicatorSlot) -> Result<Box<dyn Indicator>, RegistryError> {
        let factory = self
            .factories
            .get(&name.trim().to_lowercase())
            .ok_or_else(|| RegistryError::UnknownIndicator(name.to_string()))?;
        Ok(factory(slot))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&name.trim().to_lowercase())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_has_all_builtins() {
        let registry = IndicatorRegistry::global();
        assert_eq!(registry.len(), 9);
        assert!(registry.contains("rsi"));
        assert!(registry.contains("MACD"));
    }

    #[test]
    fn names_are_sorted() {
        let names = IndicatorRegistry::global().names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn create_sets_slot_and_name() {
        let ind = IndicatorRegistry::global()
            .create("momentum", IndicatorSlot::CloseFilter)
            .unwrap();
        assert_eq!(ind.name(), "momentum");
        assert_eq!(ind.slot(), IndicatorSlot::CloseFilter);
    }

    #[test]
    fn unknown_name_errors() {
        let err = IndicatorRegistry::global()
            .create("ichimoku", IndicatorSlot::OpenFilter)
            .err();
        assert_eq!(err, Some(RegistryError::UnknownIndicator("ichimoku".into())));
    }

    #[test]
    fn custom_registration() {
        let mut registry = IndicatorRegistry::new();
        assert!(registry.is_empty());
        registry.register("Fast RSI", |slot| Box::new(Rsi::new(slot)));
        assert!(registry.contains("fast rsi"));
        assert_eq!(registry.names(), vec!["fast rsi"]);
    }
}
