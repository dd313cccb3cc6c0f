pub mod api;
pub mod cli;
pub mod commands;
pub mod core;

pub use api::{
    CategoryFilter, FilterCriteria, ImportReport, ImportStrategy, PromptPatch, PromptStore,
    SortOrder, StoreError, TagIndex, Vault,
};
pub use crate::core::storage::{PersistedState, Prompt};
