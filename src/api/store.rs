//! The canonical in-memory collection of prompts and category names.

use crate::core::config::DEFAULT_DUPLICATE_SUFFIX;
use crate::core::storage::{PersistedState, Prompt};
use crate::core::utils::{dedup_tags, new_id, normalize_category};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

use super::error::StoreError;

/// Fields to change on an existing prompt. `None` leaves a field untouched.
///
/// `category` is doubly optional: `Some(None)` clears the category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl PromptPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn category(mut self, category: Option<impl Into<String>>) -> Self {
        self.category = Some(category.map(Into::into));
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.category.is_none() && self.tags.is_none()
    }
}

/// Owns every prompt record and the category registry.
///
/// IDs are keys of the underlying map, so two records can never share one.
#[derive(Debug, Clone)]
pub struct PromptStore {
    prompts: BTreeMap<String, Prompt>,
    categories: BTreeSet<String>,
    duplicate_suffix: String,
}

impl Default for PromptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptStore {
    /// An empty store with an empty category registry.
    pub fn new() -> Self {
        Self {
            prompts: BTreeMap::new(),
            categories: BTreeSet::new(),
            duplicate_suffix: DEFAULT_DUPLICATE_SUFFIX.to_string(),
        }
    }

    /// Sets the marker appended to titles by [`duplicate`](Self::duplicate).
    pub fn with_duplicate_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.duplicate_suffix = suffix.into();
        self
    }

    /// Rebuilds a store from the persisted document, repairing anything that
    /// breaks the store's invariants.
    pub fn from_state(state: PersistedState) -> Self {
        let mut store = Self::new();
        for name in &state.categories {
            // Blank names in the registry carry no information.
            let _ = store.add_category(name);
        }
        for mut prompt in state.prompts {
            if prompt.id.trim().is_empty() {
                prompt.id = store.mint_id();
            }
            if store.prompts.contains_key(&prompt.id) {
                tracing::warn!(id = %prompt.id, "Dropping prompt with duplicate id");
                continue;
            }
            store.insert_normalized(prompt);
        }
        store
    }

    /// Snapshot of the store in its persisted layout.
    pub fn to_state(&self) -> PersistedState {
        PersistedState {
            prompts: self.prompts.values().cloned().collect(),
            categories: self.categories.iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Prompt> {
        self.prompts.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.prompts.contains_key(id)
    }

    /// All prompts, ordered by ID.
    pub fn prompts(&self) -> impl Iterator<Item = &Prompt> {
        self.prompts.values()
    }

    /// Registered category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.contains(name)
    }

    /// Creates a prompt and returns its new ID.
    pub fn create<I, S>(
        &mut self,
        title: &str,
        content: &str,
        category: Option<&str>,
        tags: I,
    ) -> Result<String, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let title = validate_title(title)?;
        let now = Utc::now();
        let prompt = Prompt {
            id: self.mint_id(),
            title,
            content: content.to_string(),
            category: normalize_category(category),
            tags: dedup_tags(tags),
            created_at: now,
            modified_at: now,
            last_used_at: None,
        };
        let id = prompt.id.clone();
        tracing::debug!(%id, title = %prompt.title, "Created prompt");
        self.insert_normalized(prompt);
        Ok(id)
    }

    /// Applies the supplied fields and refreshes `modifiedAt`.
    ///
    /// Nothing is written when any supplied field is invalid.
    pub fn update(&mut self, id: &str, patch: PromptPatch) -> Result<(), StoreError> {
        if !self.prompts.contains_key(id) {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let title = patch.title.as_deref().map(validate_title).transpose()?;
        let category = patch
            .category
            .map(|c| normalize_category(c.as_deref()));

        if let Some(Some(name)) = &category {
            self.categories.insert(name.clone());
        }

        let prompt = self
            .prompts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(title) = title {
            prompt.title = title;
        }
        if let Some(content) = patch.content {
            prompt.content = content;
        }
        if let Some(category) = category {
            prompt.category = category;
        }
        if let Some(tags) = patch.tags {
            prompt.tags = dedup_tags(tags);
        }
        prompt.modified_at = modified_now(prompt.created_at);
        tracing::debug!(%id, "Updated prompt");
        Ok(())
    }

    /// Copies a prompt under a new ID and returns that ID. The original is left as is.
    pub fn duplicate(&mut self, id: &str) -> Result<String, StoreError> {
        let source = self
            .prompts
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let now = Utc::now();
        let copy = Prompt {
            id: self.mint_id(),
            title: format!("{}{}", source.title, self.duplicate_suffix),
            content: source.content.clone(),
            category: source.category.clone(),
            tags: source.tags.clone(),
            created_at: now,
            modified_at: now,
            last_used_at: None,
        };
        let new_id = copy.id.clone();
        tracing::debug!(source = %id, id = %new_id, "Duplicated prompt");
        self.prompts.insert(new_id.clone(), copy);
        Ok(new_id)
    }

    /// Removes a prompt permanently and hands back the removed record.
    pub fn delete(&mut self, id: &str) -> Result<Prompt, StoreError> {
        let removed = self
            .prompts
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        tracing::debug!(%id, "Deleted prompt");
        Ok(removed)
    }

    /// Records that a prompt was opened or used. `modifiedAt` is not touched.
    pub fn touch_used(&mut self, id: &str) -> Result<(), StoreError> {
        let prompt = self
            .prompts
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        prompt.last_used_at = Some(Utc::now());
        Ok(())
    }

    /// Registers a category name. Returns `false` if it was already known.
    pub fn add_category(&mut self, name: &str) -> Result<bool, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::validation("category", "must not be empty"));
        }
        let added = self.categories.insert(name.to_string());
        if added {
            tracing::debug!(category = %name, "Added category");
        }
        Ok(added)
    }

    pub(crate) fn mint_id(&self) -> String {
        new_id(|candidate| self.prompts.contains_key(candidate))
    }

    /// Inserts or overwrites a record after normalising tags, category and
    /// timestamps. The record's category is registered.
    pub(crate) fn insert_normalized(&mut self, mut prompt: Prompt) {
        prompt.title = prompt.title.trim().to_string();
        prompt.tags = dedup_tags(&prompt.tags);
        prompt.category = normalize_category(prompt.category.as_deref());
        if prompt.modified_at < prompt.created_at {
            prompt.modified_at = prompt.created_at;
        }
        if let Some(category) = &prompt.category {
            self.categories.insert(category.clone());
        }
        self.prompts.insert(prompt.id.clone(), prompt);
    }
}

fn validate_title(title: &str) -> Result<String, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::validation("title", "must not be empty"));
    }
    Ok(title.to_string())
}

/// Current time, never earlier than `created_at`.
pub(crate) fn modified_now(created_at: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(created_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_TAGS: [&str; 0] = [];

    fn store_with_one() -> (PromptStore, String) {
        let mut store = PromptStore::new();
        let id = store
            .create("Code Review", "Review this diff", Some("Development"), ["git", "review"])
            .unwrap();
        (store, id)
    }

    #[test]
    fn create_rejects_blank_title() {
        let mut store = PromptStore::new();
        let err = store.create("   ", "body", None, NO_TAGS).unwrap_err();
        assert!(matches!(err, StoreError::Validation { field: "title", .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn create_dedups_tags_and_sets_timestamps() {
        let mut store = PromptStore::new();
        let id = store
            .create(" Summarize ", "", None, ["ai", "ai", "notes", "AI"])
            .unwrap();
        let p = store.get(&id).unwrap();
        assert_eq!(p.title, "Summarize");
        assert_eq!(p.tags, vec!["ai", "notes", "AI"]);
        assert_eq!(p.created_at, p.modified_at);
        assert!(p.last_used_at.is_none());
        assert!(p.category.is_none());
    }

    #[test]
    fn create_registers_category() {
        let (store, _) = store_with_one();
        assert!(store.has_category("Development"));
    }

    #[test]
    fn update_applies_only_supplied_fields() {
        let (mut store, id) = store_with_one();
        let before = store.get(&id).unwrap().clone();
        store
            .update(&id, PromptPatch::default().content("New body"))
            .unwrap();
        let after = store.get(&id).unwrap();
        assert_eq!(after.title, before.title);
        assert_eq!(after.tags, before.tags);
        assert_eq!(after.content, "New body");
        assert!(after.modified_at >= before.modified_at);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn update_with_blank_title_changes_nothing() {
        let (mut store, id) = store_with_one();
        let before = store.get(&id).unwrap().clone();
        let patch = PromptPatch::default().title("").content("ignored");
        assert!(store.update(&id, patch).is_err());
        assert_eq!(store.get(&id).unwrap(), &before);
    }

    #[test]
    fn update_can_clear_category_and_dedup_tags() {
        let (mut store, id) = store_with_one();
        let patch = PromptPatch::default()
            .category(None::<String>)
            .tags(["x", "x", "y"]);
        store.update(&id, patch).unwrap();
        let p = store.get(&id).unwrap();
        assert!(p.category.is_none());
        assert_eq!(p.tags, vec!["x", "y"]);
        // Registry keeps the name even without users.
        assert!(store.has_category("Development"));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = PromptStore::new();
        assert!(matches!(
            store.update("nope", PromptPatch::default().content("x")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn duplicate_gets_new_id_and_leaves_original() {
        let (mut store, id) = store_with_one();
        store.touch_used(&id).unwrap();
        let original = store.get(&id).unwrap().clone();

        let copy_id = store.duplicate(&id).unwrap();
        assert_ne!(copy_id, id);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&id).unwrap(), &original);

        let copy = store.get(&copy_id).unwrap();
        assert_eq!(copy.title, "Code Review (Copy)");
        assert_eq!(copy.content, original.content);
        assert_eq!(copy.tags, original.tags);
        assert_eq!(copy.category, original.category);
        assert!(copy.last_used_at.is_none());
    }

    #[test]
    fn duplicate_suffix_is_configurable() {
        let mut store = PromptStore::new().with_duplicate_suffix(" #2");
        let id = store.create("Plan", "", None, NO_TAGS).unwrap();
        let copy = store.duplicate(&id).unwrap();
        assert_eq!(store.get(&copy).unwrap().title, "Plan #2");
    }

    #[test]
    fn delete_removes_and_reports_missing() {
        let (mut store, id) = store_with_one();
        let removed = store.delete(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.is_empty());
        assert!(matches!(store.delete(&id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn touch_used_keeps_modified_at() {
        let (mut store, id) = store_with_one();
        let modified = store.get(&id).unwrap().modified_at;
        store.touch_used(&id).unwrap();
        let p = store.get(&id).unwrap();
        assert!(p.last_used_at.is_some());
        assert_eq!(p.modified_at, modified);
    }

    #[test]
    fn add_category_is_idempotent() {
        let mut store = PromptStore::new();
        assert!(store.add_category("Writing").unwrap());
        assert!(!store.add_category(" Writing ").unwrap());
        assert_eq!(store.categories().collect::<Vec<_>>(), vec!["Writing"]);
        assert!(store.add_category(" ").is_err());
    }

    #[test]
    fn from_state_repairs_invariants() {
        let (store, id) = store_with_one();
        let mut state = store.to_state();
        let mut twin = state.prompts[0].clone();
        twin.title = "Twin".into();
        state.prompts.push(twin);
        state.prompts[0].tags.push("git".into());
        state.prompts[0].modified_at = state.prompts[0].created_at - chrono::Duration::days(1);
        state.categories.clear();

        let rebuilt = PromptStore::from_state(state);
        assert_eq!(rebuilt.len(), 1);
        let p = rebuilt.get(&id).unwrap();
        assert_eq!(p.title, "Code Review");
        assert_eq!(p.tags, vec!["git", "review"]);
        assert!(p.modified_at >= p.created_at);
        assert!(rebuilt.has_category("Development"));
    }
}
