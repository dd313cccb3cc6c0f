//! Export of the whole store and merging of external documents back into it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::core::storage::Prompt;

use super::error::{MalformedRecord, StoreError};
use super::store::PromptStore;

/// What to do when an incoming record has the ID of a prompt already in the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportStrategy {
    /// Keep the existing record and ignore the incoming one. The default, so
    /// importing the same file twice changes nothing.
    #[default]
    Skip,
    /// Overwrite every field with the incoming record; `modifiedAt` becomes
    /// the import time.
    Replace,
    /// Insert the incoming record under a freshly minted ID, keeping both.
    Duplicate,
}

impl FromStr for ImportStrategy {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(ImportStrategy::Skip),
            "replace" => Ok(ImportStrategy::Replace),
            "duplicate" => Ok(ImportStrategy::Duplicate),
            other => Err(StoreError::Configuration(format!(
                "Unknown import strategy '{}' (expected skip, replace or duplicate)",
                other
            ))),
        }
    }
}

impl fmt::Display for ImportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImportStrategy::Skip => "skip",
            ImportStrategy::Replace => "replace",
            ImportStrategy::Duplicate => "duplicate",
        };
        f.write_str(name)
    }
}

/// A complete, self-describing snapshot of the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub prompts: Vec<Prompt>,
    pub categories: Vec<String>,
    pub exported_at: DateTime<Utc>,
}

/// Outcome of a single import call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Records inserted, including those given a new ID under [`ImportStrategy::Duplicate`].
    pub imported: usize,
    /// Records ignored because their ID already existed.
    pub skipped: usize,
    /// Existing records overwritten by incoming ones.
    pub replaced: usize,
    /// Records rejected individually, in document order.
    pub malformed: Vec<MalformedRecord>,
    /// Category names that were not in the registry before.
    pub categories_added: usize,
}

impl ImportReport {
    pub fn malformed_count(&self) -> usize {
        self.malformed.len()
    }
}

/// Snapshot the whole store.
pub fn export(store: &PromptStore) -> ExportDocument {
    let state = store.to_state();
    ExportDocument {
        prompts: state.prompts,
        categories: state.categories,
        exported_at: Utc::now(),
    }
}

/// Parses `json` and merges it into `store`. See [`import`].
pub fn import_str(
    store: &mut PromptStore,
    json: &str,
    strategy: ImportStrategy,
) -> Result<ImportReport, StoreError> {
    let document: Value = serde_json::from_str(json)?;
    import(store, &document, strategy)
}

/// Merges an external document into `store`.
///
/// The document shape is checked first; a wrong shape fails the whole call
/// without touching the store. Individual bad records are reported in the
/// returned [`ImportReport`] and the rest of the batch still applies. The
/// merge runs on a staged copy that replaces the store in one step.
pub fn import(
    store: &mut PromptStore,
    document: &Value,
    strategy: ImportStrategy,
) -> Result<ImportReport, StoreError> {
    let root = document
        .as_object()
        .ok_or_else(|| StoreError::InvalidDocument("expected a JSON object".to_string()))?;

    let records: &[Value] = match root.get("prompts") {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => {
            return Err(StoreError::InvalidDocument(
                "'prompts' must be an array".to_string(),
            ))
        }
    };
    let categories: &[Value] = match root.get("categories") {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(items)) => items.as_slice(),
        Some(_) => {
            return Err(StoreError::InvalidDocument(
                "'categories' must be an array".to_string(),
            ))
        }
    };

    if let Some(ts) = root
        .get("exportedAt")
        .or_else(|| root.get("exportDate"))
        .and_then(Value::as_str)
    {
        tracing::debug!(exported_at = %ts, "Importing snapshot");
    }

    let now = Utc::now();
    let categories_before = store.categories().count();
    let mut staged = store.clone();
    let mut report = ImportReport::default();

    for name in categories {
        match name.as_str().map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => {
                let _ = staged.add_category(name);
            }
            None => tracing::warn!(value = %name, "Ignoring invalid category entry"),
        }
    }

    for (index, value) in records.iter().enumerate() {
        let (incoming_id, mut prompt) = match parse_record(index, value, now) {
            Ok(parsed) => parsed,
            Err(malformed) => {
                tracing::warn!(%malformed, "Skipping malformed record");
                report.malformed.push(malformed);
                continue;
            }
        };

        match incoming_id {
            Some(id) if staged.contains(&id) => match strategy {
                ImportStrategy::Skip => {
                    report.skipped += 1;
                }
                ImportStrategy::Replace => {
                    prompt.id = id;
                    prompt.modified_at = now.max(prompt.created_at);
                    staged.insert_normalized(prompt);
                    report.replaced += 1;
                }
                ImportStrategy::Duplicate => {
                    prompt.id = staged.mint_id();
                    staged.insert_normalized(prompt);
                    report.imported += 1;
                }
            },
            Some(id) => {
                prompt.id = id;
                staged.insert_normalized(prompt);
                report.imported += 1;
            }
            None => {
                prompt.id = staged.mint_id();
                staged.insert_normalized(prompt);
                report.imported += 1;
            }
        }
    }

    report.categories_added = staged.categories().count() - categories_before;
    *store = staged;

    tracing::info!(
        %strategy,
        imported = report.imported,
        skipped = report.skipped,
        replaced = report.replaced,
        malformed = report.malformed.len(),
        "Import finished"
    );
    Ok(report)
}

/// Validates one incoming record. The returned prompt has an empty ID; the
/// incoming ID, if any, is returned beside it.
fn parse_record(
    index: usize,
    value: &Value,
    now: DateTime<Utc>,
) -> Result<(Option<String>, Prompt), MalformedRecord> {
    let obj = value
        .as_object()
        .ok_or_else(|| MalformedRecord::new(index, "record", "expected an object"))?;

    let id = match obj.get("id") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(_) => return Err(MalformedRecord::new(index, "id", "expected a string")),
    };

    let title = string_field(obj, index, "title")?
        .ok_or_else(|| MalformedRecord::new(index, "title", "missing"))?;
    if title.trim().is_empty() {
        return Err(MalformedRecord::new(index, "title", "must not be empty"));
    }

    let content = string_field(obj, index, "content")?.unwrap_or_default();
    let category = string_field(obj, index, "category")?;

    let tags = match obj.get("tags") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, tag)| {
                tag.as_str().map(str::to_string).ok_or_else(|| {
                    MalformedRecord::new(index, "tags", format!("element {} is not a string", i))
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(MalformedRecord::new(
                index,
                "tags",
                "expected an array of strings",
            ))
        }
    };

    let created_at = timestamp_field(obj, index, "createdAt")?.unwrap_or(now);
    let modified_at = timestamp_field(obj, index, "modifiedAt")?.unwrap_or(created_at);
    let last_used_at = timestamp_field(obj, index, "lastUsedAt")?;

    let prompt = Prompt {
        id: String::new(),
        title,
        content,
        category,
        tags,
        created_at,
        modified_at,
        last_used_at,
    };
    Ok((id, prompt))
}

fn string_field(
    obj: &Map<String, Value>,
    index: usize,
    field: &str,
) -> Result<Option<String>, MalformedRecord> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(MalformedRecord::new(index, field, "expected a string")),
    }
}

fn timestamp_field(
    obj: &Map<String, Value>,
    index: usize,
    field: &str,
) -> Result<Option<DateTime<Utc>>, MalformedRecord> {
    string_field(obj, index, field)?
        .map(|raw| {
            DateTime::parse_from_rfc3339(raw.trim())
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|_| {
                    MalformedRecord::new(index, field, format!("'{}' is not an ISO-8601 timestamp", raw))
                })
        })
        .transpose()
}
