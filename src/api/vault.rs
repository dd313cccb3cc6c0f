//! The session context the front end talks to.

use serde_json::Value;

use crate::core::config::Config;
use crate::core::storage::{PersistedState, Prompt};

use super::error::StoreError;
use super::filter::{visible, FilterCriteria};
use super::reconcile::{self, ExportDocument, ImportReport, ImportStrategy};
use super::store::{PromptPatch, PromptStore};
use super::tags::TagIndex;

/// One prompt collection plus the filter a user currently has applied.
///
/// Every mutating call drops selections that the mutation made stale, so
/// [`visible`](Vault::visible) never filters on a tag that no longer exists.
#[derive(Debug, Clone, Default)]
pub struct Vault {
    store: PromptStore,
    criteria: FilterCriteria,
}

impl Vault {
    /// An empty vault with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a vault from the persisted document using the configured
    /// duplicate suffix and sort order.
    pub fn from_state(state: PersistedState, config: &Config) -> Self {
        let store = PromptStore::from_state(state).with_duplicate_suffix(config.duplicate_suffix.clone());
        Self {
            store,
            criteria: FilterCriteria::default().sort(config.sort),
        }
    }

    pub fn to_state(&self) -> PersistedState {
        self.store.to_state()
    }

    pub fn store(&self) -> &PromptStore {
        &self.store
    }

    pub fn get(&self, id: &str) -> Result<&Prompt, StoreError> {
        self.store
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn create_prompt<I, S>(
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
        self.store.create(title, content, category, tags)
    }

    pub fn update_prompt(&mut self, id: &str, patch: PromptPatch) -> Result<(), StoreError> {
        self.store.update(id, patch)?;
        self.prune_selection();
        Ok(())
    }

    pub fn duplicate_prompt(&mut self, id: &str) -> Result<String, StoreError> {
        self.store.duplicate(id)
    }

    pub fn delete_prompt(&mut self, id: &str) -> Result<Prompt, StoreError> {
        let removed = self.store.delete(id)?;
        self.prune_selection();
        Ok(removed)
    }

    pub fn touch_used(&mut self, id: &str) -> Result<(), StoreError> {
        self.store.touch_used(id)
    }

    pub fn add_category(&mut self, name: &str) -> Result<bool, StoreError> {
        self.store.add_category(name)
    }

    pub fn current_tag_index(&self) -> TagIndex {
        TagIndex::from_store(&self.store)
    }

    /// Visible prompts for an explicit set of criteria.
    pub fn visible_prompts(&self, criteria: &FilterCriteria) -> Vec<&Prompt> {
        visible(&self.store, criteria)
    }

    /// Visible prompts for the session's own criteria.
    pub fn visible(&self) -> Vec<&Prompt> {
        visible(&self.store, &self.criteria)
    }

    pub fn export_snapshot(&self) -> ExportDocument {
        reconcile::export(&self.store)
    }

    pub fn import_document(
        &mut self,
        document: &Value,
        strategy: ImportStrategy,
    ) -> Result<ImportReport, StoreError> {
        let report = reconcile::import(&mut self.store, document, strategy)?;
        self.prune_selection();
        Ok(report)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replaces the session criteria; tags not currently in use are dropped.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.prune_selection();
    }

    pub fn clear_criteria(&mut self) {
        self.criteria = FilterCriteria::default().sort(self.criteria.sort);
    }

    /// Adds the tag to the selection, or removes it if already selected.
    /// Returns whether the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if let Some(pos) = self.criteria.tags.iter().position(|t| t == tag) {
            self.criteria.tags.remove(pos);
            return false;
        }
        if !self.current_tag_index().contains(tag) {
            return false;
        }
        self.criteria.tags.push(tag.to_string());
        true
    }

    fn prune_selection(&mut self) {
        let index = self.current_tag_index();
        let before = self.criteria.tags.len();
        self.criteria.tags.retain(|t| index.contains(t));
        if self.criteria.tags.len() != before {
            tracing::debug!(
                dropped = before - self.criteria.tags.len(),
                "Dropped stale tag selection"
            );
        }
    }
}
