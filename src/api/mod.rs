//! In-memory prompt store, tag index, filtering and import/export.

mod error;
mod filter;
mod reconcile;
mod store;
mod tags;
mod vault;

pub use error::{MalformedRecord, StoreError};
pub use filter::{visible, CategoryFilter, FilterCriteria, SortOrder};
pub use reconcile::{export, import, import_str, ExportDocument, ImportReport, ImportStrategy};
pub use store::{PromptPatch, PromptStore};
pub use tags::TagIndex;
pub use vault::Vault;
