//! Aggregation of declaration usages.

use indexmap::{IndexMap, IndexSet};

/// Maps each declaration name to the modules that import it.
///
/// Keys appear in the order their first usage was recorded, and each list
/// keeps consumers in recording order. Duplicates are kept: a module that
/// imports the same declaration in two statements is listed twice. A
/// declaration nobody imports has no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageIndex {
    entries: IndexMap<String, Vec<String>>,
}

impl UsageIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `module` to the consumers of `declaration`, creating the
    /// entry if this is its first usage.
    pub fn record(&mut self, declaration: &str, module: &str) {
        self.entries
            .entry(declaration.to_string())
            .or_default()
            .push(module.to_string());
    }

    /// Returns the consumers of a declaration, if it has any.
    pub fn consumers(&self, declaration: &str) -> Option<&[String]> {
        self.entries.get(declaration).map(Vec::as_slice)
    }

    /// Returns true if at least one usage of `declaration` was recorded.
    pub fn contains(&self, declaration: &str) -> bool {
        self.entries.contains_key(declaration)
    }

    /// Number of declarations with at least one consumer.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no usage has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded usages, duplicates included.
    pub fn total_usages(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Iterates over `(declaration, consumers)` in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, modules)| (name.as_str(), modules.as_slice()))
    }

    /// Distinct consumer modules, in the order they were first recorded.
    pub fn modules(&self) -> Vec<&str> {
        let seen: IndexSet<&str> = self
            .entries
            .values()
            .flatten()
            .map(String::as_str)
            .collect();
        seen.into_iter().collect()
    }
}
