//! Derived view of every tag currently in use.

use std::collections::{BTreeMap, BTreeSet};

use super::store::PromptStore;

/// The sorted set of distinct tags across the store at the time it was built.
///
/// Rebuilt from scratch on every call to [`TagIndex::from_store`]; nothing is
/// patched incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    tags: BTreeSet<String>,
}

impl TagIndex {
    pub fn from_store(store: &PromptStore) -> Self {
        let tags = store
            .prompts()
            .flat_map(|p| p.tags.iter().cloned())
            .collect();
        Self { tags }
    }

    /// Tag usage counts, keyed and ordered by tag.
    pub fn counts(store: &PromptStore) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for tag in store.prompts().flat_map(|p| p.tags.iter()) {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Tags in case-sensitive lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tags.iter().cloned().collect()
    }
}
