use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// Visual property values for one element, keyed by property name
/// (`opacity`, `y`, `scale`, `pathLength`, ...).
///
/// Ordered by name so snapshots compare and print deterministically.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateSnapshot {
    values: BTreeMap<String, f32>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, property: impl Into<String>, value: f32) -> Self {
        self.values.insert(property.into(), value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: f32) {
        self.values.insert(property.into(), value);
    }

    pub fn get(&self, property: &str) -> Option<f32> {
        self.values.get(property).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn properties(&self) -> btree_map::Keys<'_, String, f32> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether both snapshots describe exactly the same set of properties
    pub fn same_properties(&self, other: &StateSnapshot) -> bool {
        self.values.len() == other.values.len() && self.properties().eq(other.properties())
    }

    /// First property holding NaN or an infinity, if any
    pub fn first_non_finite(&self) -> Option<&str> {
        self.values
            .iter()
            .find(|(_, v)| !v.is_finite())
            .map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, f32)> for StateSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, f32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f32); N]> for StateSnapshot {
    fn from(pairs: [(K, f32); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl fmt::Display for StateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}={:.2}", name, value)?;
            first = false;
        }
        Ok(())
    }
}
