//! Output components — the named series an indicator hands back.
//!
//! An indicator returns one or more value components (for charting) plus the
//! signal components its slot asks for. Signal components hold 1.0 where the
//! condition holds and 0.0 elsewhere.

use serde::{Deserialize, Serialize};

/// What a component means to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Plain indicator value.
    Value,
    AllowOpenLong,
    AllowOpenShort,
    ForceCloseLong,
    ForceCloseShort,
}

impl ComponentKind {
    pub fn is_signal(self) -> bool {
        !matches!(self, Self::Value)
    }
}

/// How a component would be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartHint {
    Line,
    Histogram,
    NoChart,
}

/// One output series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub kind: ComponentKind,
    pub chart: ChartHint,
    /// Values below this index are not meaningful.
    pub first_bar: usize,
    pub values: Vec<f64>,
}

impl Component {
    pub fn value(name: impl Into<String>, chart: ChartHint, first_bar: usize, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind: ComponentKind::Value,
            chart,
            first_bar,
            values,
        }
    }

    pub fn signal(name: impl Into<String>, kind: ComponentKind, first_bar: usize, values: Vec<f64>) -> Self {
        debug_assert!(kind.is_signal(), "signal component built with kind Value");
        Self {
            name: name.into(),
            kind,
            chart: ChartHint::NoChart,
            first_bar,
            values,
        }
    }

    /// Value at `bar`, `None` below `first_bar` or out of range.
    pub fn get(&self, bar: usize) -> Option<f64> {
        if bar < self.first_bar {
            return None;
        }
        self.values.get(bar).copied()
    }

    /// True where a signal component is set.
    pub fn is_active(&self, bar: usize) -> bool {
        self.get(bar).is_some_and(|v| v != 0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered collection of an indicator's components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Components {
    items: Vec<Component>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, component: Component) {
        self.items.push(component);
    }

    /// First component with this name.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.items.iter().find(|c| c.name == name)
    }

    /// First component of this kind.
    pub fn by_kind(&self, kind: ComponentKind) -> Option<&Component> {
        self.items.iter().find(|c| c.kind == kind)
    }

    pub fn values(&self) -> impl Iterator<Item = &Component> {
        self.items.iter().filter(|c| !c.kind.is_signal())
    }

    pub fn signals(&self) -> impl Iterator<Item = &Component> {
        self.items.iter().filter(|c| c.kind.is_signal())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Component> {
        self.items
    }
}

impl FromIterator<Component> for Components {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Component> for Components {
    fn extend<I: IntoIterator<Item = Component>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
