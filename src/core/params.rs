use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder name -> user-entered value.
pub type ParameterMap = BTreeMap<String, String>;

/// A (category, subcommand) pair indexing into a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub category: String,
    pub subcommand: String,
}

impl Selection {
    pub fn new(category: impl Into<String>, subcommand: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subcommand: subcommand.into(),
        }
    }
}

/// Current selection plus the values entered for its placeholders.
///
/// Values never survive a selection change: `reset` is the only way to
/// change the selection and it always clears them.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    selection: Option<Selection>,
    values: ParameterMap,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, category: impl Into<String>, subcommand: impl Into<String>) {
        self.values.clear();
        self.selection = Some(Selection::new(category, subcommand));
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Stored value, or empty string if unset.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn snapshot(&self) -> ParameterMap {
        self.values.clone()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_defaults_to_empty() {
        let store = ParameterStore::new();
        assert_eq!(store.get("repository"), "");
        assert!(!store.is_set("repository"));
        assert!(store.selection().is_none());
    }

    #[test]
    fn set_accepts_any_text() {
        let mut store = ParameterStore::new();
        store.set("version", "not a semver!");
        store.set("type", "");
        assert_eq!(store.get("version"), "not a semver!");
        assert!(store.is_set("type"));
        assert_eq!(store.get("type"), "");
    }

    #[test]
    fn reset_clears_values_even_for_shared_names() {
        let mut store = ParameterStore::new();
        store.reset("git", "commit");
        store.set("message", "old message");

        store.reset("git", "stash");

        assert_eq!(store.get("message"), "");
        assert!(store.snapshot().is_empty());
        assert_eq!(store.selection(), Some(&Selection::new("git", "stash")));
    }

    #[test]
    fn reset_to_same_selection_still_clears() {
        let mut store = ParameterStore::new();
        store.reset("npm", "publish");
        store.set("tag", "beta");
        store.reset("npm", "publish");
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_detached() {
        let mut store = ParameterStore::new();
        store.set("pod", "web-1");
        let snapshot = store.snapshot();
        store.set("pod", "web-2");
        assert_eq!(snapshot.get("pod").map(String::as_str), Some("web-1"));
    }
}
