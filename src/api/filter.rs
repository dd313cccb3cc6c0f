//! Search, category and tag filtering over the store.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::storage::Prompt;

use super::error::StoreError;
use super::store::PromptStore;

/// Category dimension of a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No category filtering.
    #[default]
    Any,
    /// Only prompts without a category.
    Uncategorized,
    /// Only prompts whose category equals this name exactly.
    Named(String),
}

impl CategoryFilter {
    fn matches(&self, prompt: &Prompt) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Uncategorized => prompt.category.is_none(),
            CategoryFilter::Named(name) => prompt.category.as_deref() == Some(name.as_str()),
        }
    }
}

/// Order of the visible list. Ties are always broken by ascending ID.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recently modified first.
    #[default]
    Modified,
    /// Most recently created first.
    Created,
    /// Title, A to Z, ignoring case.
    Title,
    /// Most recently used first; never-used prompts last.
    LastUsed,
}

impl SortOrder {
    fn compare(self, a: &Prompt, b: &Prompt) -> Ordering {
        let primary = match self {
            SortOrder::Modified => b.modified_at.cmp(&a.modified_at),
            SortOrder::Created => b.created_at.cmp(&a.created_at),
            SortOrder::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortOrder::LastUsed => b.last_used_at.cmp(&a.last_used_at),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl FromStr for SortOrder {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modified" => Ok(SortOrder::Modified),
            "created" => Ok(SortOrder::Created),
            "title" => Ok(SortOrder::Title),
            "last-used" | "last_used" | "used" => Ok(SortOrder::LastUsed),
            other => Err(StoreError::Configuration(format!(
                "Unknown sort order '{}' (expected modified, created, title or last-used)",
                other
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Modified => "modified",
            SortOrder::Created => "created",
            SortOrder::Title => "title",
            SortOrder::LastUsed => "last-used",
        };
        f.write_str(name)
    }
}

/// The three filter dimensions plus the ordering of the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub category: CategoryFilter,
    /// Every selected tag must be present on a prompt for it to match.
    pub tags: Vec<String>,
    pub sort: SortOrder,
}

impl FilterCriteria {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// True when no dimension narrows the result.
    pub fn is_unfiltered(&self) -> bool {
        self.search.trim().is_empty()
            && self.category == CategoryFilter::Any
            && self.tags.is_empty()
    }

    pub fn matches(&self, prompt: &Prompt) -> bool {
        let needle = self.search.trim().to_lowercase();
        self.matches_with(prompt, &needle)
    }

    fn matches_with(&self, prompt: &Prompt, needle: &str) -> bool {
        matches_search(prompt, needle)
            && self.category.matches(prompt)
            && self.tags.iter().all(|t| prompt.has_tag(t))
    }
}

fn matches_search(prompt: &Prompt, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    prompt.title.to_lowercase().contains(needle)
        || prompt.content.to_lowercase().contains(needle)
        || prompt.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

/// Computes the visible prompts for `criteria`, fully recomputed on each call.
pub fn visible<'a>(store: &'a PromptStore, criteria: &FilterCriteria) -> Vec<&'a Prompt> {
    let needle = criteria.search.trim().to_lowercase();
    let mut hits: Vec<&Prompt> = store
        .prompts()
        .filter(|p| criteria.matches_with(p, &needle))
        .collect();
    hits.sort_by(|a, b| criteria.sort.compare(a, b));
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PromptPatch;

    const NO_TAGS: [&str; 0] = [];

    fn ids(prompts: &[&Prompt]) -> Vec<String> {
        prompts.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn tag_selection_uses_and_semantics() {
        let mut store = PromptStore::new();
        let a = store.create("A", "", None, ["x", "y"]).unwrap();
        store.create("B", "", None, ["x"]).unwrap();

        let criteria = FilterCriteria::default().tag("x").tag("y");
        assert_eq!(ids(&visible(&store, &criteria)), vec![a]);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut store = PromptStore::new();
        let title = store.create("Code Review", "", None, NO_TAGS).unwrap();
        let body = store.create("Other", "please CODE REVIEW it", None, NO_TAGS).unwrap();
        let tag = store.create("Third", "", None, ["code review"]).unwrap();
        store.create("Unrelated", "nothing", None, NO_TAGS).unwrap();

        let criteria = FilterCriteria::default().search("code review");
        let mut found = ids(&visible(&store, &criteria));
        found.sort();
        let mut expected = vec![title, body, tag];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn blank_search_matches_everything() {
        let mut store = PromptStore::new();
        store.create("A", "", None, NO_TAGS).unwrap();
        store.create("B", "", None, NO_TAGS).unwrap();
        let criteria = FilterCriteria::default().search("   ");
        assert_eq!(visible(&store, &criteria).len(), 2);
        assert!(criteria.is_unfiltered());
    }

    #[test]
    fn category_filter_is_exact_and_has_uncategorized_sentinel() {
        let mut store = PromptStore::new();
        let dev = store.create("A", "", Some("Development"), NO_TAGS).unwrap();
        store.create("B", "", Some("Dev"), NO_TAGS).unwrap();
        let none = store.create("C", "", None, NO_TAGS).unwrap();

        let named = FilterCriteria::default().category(CategoryFilter::Named("Development".into()));
        assert_eq!(ids(&visible(&store, &named)), vec![dev]);

        let uncategorized = FilterCriteria::default().category(CategoryFilter::Uncategorized);
        assert_eq!(ids(&visible(&store, &uncategorized)), vec![none]);

        assert_eq!(visible(&store, &FilterCriteria::default()).len(), 3);
    }

    #[test]
    fn dangling_category_matches_nothing() {
        let mut store = PromptStore::new();
        store.create("A", "", Some("Work"), NO_TAGS).unwrap();
        let criteria = FilterCriteria::default().category(CategoryFilter::Named("Ghost".into()));
        assert!(visible(&store, &criteria).is_empty());
    }

    #[test]
    fn dimensions_are_anded() {
        let mut store = PromptStore::new();
        let hit = store.create("Deploy plan", "", Some("Ops"), ["k8s"]).unwrap();
        store.create("Deploy notes", "", Some("Ops"), NO_TAGS).unwrap();
        store.create("Deploy plan", "", Some("Dev"), ["k8s"]).unwrap();

        let criteria = FilterCriteria::default()
            .search("deploy")
            .category(CategoryFilter::Named("Ops".into()))
            .tag("k8s");
        assert_eq!(ids(&visible(&store, &criteria)), vec![hit]);
    }

    #[test]
    fn most_recently_modified_comes_first() {
        let mut store = PromptStore::new();
        let first = store.create("first", "", None, NO_TAGS).unwrap();
        let second = store.create("second", "", None, NO_TAGS).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store
            .update(&first, PromptPatch::default().content("edited"))
            .unwrap();

        let order = ids(&visible(&store, &FilterCriteria::default()));
        assert_eq!(order, vec![first, second]);
    }

    #[test]
    fn ties_are_broken_by_id() {
        let mut store = PromptStore::new();
        let a = store.create("a", "", None, NO_TAGS).unwrap();
        let b = store.duplicate(&a).unwrap();
        let mut state = store.to_state();
        let ts = state.prompts[0].modified_at;
        for p in &mut state.prompts {
            p.created_at = ts;
            p.modified_at = ts;
        }
        let store = PromptStore::from_state(state);

        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(ids(&visible(&store, &FilterCriteria::default())), expected);
    }

    #[test]
    fn title_and_last_used_orders() {
        let mut store = PromptStore::new();
        let b = store.create("beta", "", None, NO_TAGS).unwrap();
        let a = store.create("Alpha", "", None, NO_TAGS).unwrap();
        let c = store.create("gamma", "", None, NO_TAGS).unwrap();

        let by_title = FilterCriteria::default().sort(SortOrder::Title);
        assert_eq!(ids(&visible(&store, &by_title)), vec![a.clone(), b.clone(), c.clone()]);

        store.touch_used(&c).unwrap();
        let by_use = FilterCriteria::default().sort(SortOrder::LastUsed);
        assert_eq!(ids(&visible(&store, &by_use))[0], c);
    }

    #[test]
    fn sort_order_parses_and_displays() {
        assert_eq!("last-used".parse::<SortOrder>().unwrap(), SortOrder::LastUsed);
        assert_eq!("Title".parse::<SortOrder>().unwrap(), SortOrder::Title);
        assert_eq!(SortOrder::Created.to_string(), "created");
        assert!("random".parse::<SortOrder>().is_err());
    }
}
