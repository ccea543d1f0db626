//! Per-playthrough record of option selections

use crate::types::script::Guard;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Last selected index for every declared option, `None` while unset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionMemory {
    selections: BTreeMap<String, Option<usize>>,
}

impl OptionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an option as unset; an existing selection is kept
    pub fn declare(&mut self, name: impl Into<String>) {
        self.selections.entry(name.into()).or_insert(None);
    }

    pub fn record(&mut self, name: impl Into<String>, index: usize) {
        self.selections.insert(name.into(), Some(index));
    }

    /// Selected index, `None` when unset or undeclared
    pub fn get(&self, name: &str) -> Option<usize> {
        self.selections.get(name).copied().flatten()
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.selections.contains_key(name)
    }

    /// Whether a guard holds: choice number `threshold` was picked, or the
    /// option is unset and `threshold` is 0. Undeclared options never match.
    pub fn matches(&self, guard: &Guard) -> bool {
        match self.selections.get(&guard.option) {
            Some(Some(index)) => index + 1 == guard.threshold as usize,
            Some(None) => guard.threshold == 0,
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<usize>)> {
        self.selections
            .iter()
            .map(|(name, index)| (name.as_str(), *index))
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
