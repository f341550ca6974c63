//! Value sets and ordered name sets.
//!
//! Placeholder names are opaque strings. A name such as `123` is never turned
//! into a number, so `ValueSet` is keyed by `String` only and every insertion
//! and lookup goes through `&str`.

use indexmap::IndexSet;
use std::collections::HashMap;

#[cfg(test)]
#[path = "value_set_tests.rs"]
mod tests;

/// A name to value mapping used to fill placeholders.
///
/// Iteration order is irrelevant for rendering; diagnostics follow the order
/// in which placeholders are discovered in the document, not the order in
/// which values were inserted here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSet {
    values: HashMap<String, String>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, returning the value previously stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy of this set with every name prefixed by `prefix`.
    ///
    /// ```rust
    /// use placeholder_engine::ValueSet;
    ///
    /// let vault = ValueSet::from_iter([("foo", "bar")]).prefixed("vault.");
    /// assert_eq!(vault.get("vault.foo"), Some("bar"));
    /// assert!(!vault.contains("foo"));
    /// ```
    pub fn prefixed(&self, prefix: &str) -> Self {
        self.values
            .iter()
            .map(|(name, value)| (format!("{prefix}{name}"), value.clone()))
            .collect()
    }

    /// Looks a name up across `sets`, the first set containing it wins.
    pub fn lookup<'a>(sets: &[&'a ValueSet], name: &str) -> Option<&'a str> {
        sets.iter().copied().find_map(|set| set.get(name))
    }
}

impl<K, V> FromIterator<(K, V)> for ValueSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ValueSet::new();
        set.extend(iter);
        set
    }
}

impl<K, V> Extend<(K, V)> for ValueSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

/// An insertion-ordered, duplicate-free set of placeholder names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSet {
    names: IndexSet<String>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name, returning `false` if it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates in first-inserted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    pub fn join(&self, separator: &str) -> String {
        self.to_vec().join(separator)
    }
}

impl<'a> FromIterator<&'a str> for NameSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = NameSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}
