use std::collections::BTreeMap;

use crate::interpreter::value::Value;

/// Every variable written while running one program, keyed by bare name.
///
/// The store is flat: there is one namespace for the whole program, however
/// many procedures declare variables. Iteration is ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeStore {
    values: BTreeMap<String, Value>,
}

impl RuntimeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current value of `name`, if it was ever assigned.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).copied()
    }

    /// Writes `value` under `name`, replacing any previous value.
    pub fn assign(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// `(name, value)` pairs ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of variables written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the store, returning `(name, value)` pairs ordered by name.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, Value)> {
        self.values.into_iter().collect()
    }
}
