use super::config::{load_config, Config};
use super::utils::ensure_dir;
use crate::api::{StoreError, Vault};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Environment variable that relocates the data directory.
pub const HOME_ENV: &str = "PROMPT_VAULT_HOME";

/// Data for a single, storable prompt.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
}

impl Prompt {
    /// Number of whitespace-separated words in the body.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The document kept on disk between sessions.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PersistedState {
    #[serde(default)]
    pub prompts: Vec<Prompt>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Runtime context holding paths, configuration and the loaded vault.
pub struct AppCtx {
    pub base_dir: PathBuf,
    pub data_path: PathBuf,
    pub config: Config,
    pub vault: Vault,
}

impl AppCtx {
    /// Locate `~/.prompt-vault` (or `$PROMPT_VAULT_HOME`) and load everything in it.
    pub fn init() -> Result<Self, String> {
        let base_dir = match env::var(HOME_ENV) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => {
                let home = env::var("HOME")
                    .map_err(|_| "Unable to determine HOME directory".to_string())?;
                PathBuf::from(home).join(".prompt-vault")
            }
        };
        Self::open(base_dir).map_err(|e| e.to_string())
    }

    /// Load the context rooted at an explicit directory.
    pub fn open(base_dir: PathBuf) -> Result<Self, StoreError> {
        ensure_dir(&base_dir).map_err(StoreError::Init)?;
        let config = load_config(&base_dir)?;
        let data_path = if config.data_file.is_absolute() {
            config.data_file.clone()
        } else {
            base_dir.join(&config.data_file)
        };

        let state = load_state(&data_path)?;
        let vault = Vault::from_state(state, &config);
        tracing::debug!(
            path = %data_path.display(),
            prompts = vault.store().len(),
            "Loaded vault"
        );

        Ok(Self {
            base_dir,
            data_path,
            config,
            vault,
        })
    }

    /// Write the current vault back to disk.
    pub fn save(&self) -> Result<(), String> {
        save_state(&self.data_path, &self.vault.to_state()).map_err(|e| e.to_string())
    }
}

/// Read the persisted document; a missing file is an empty vault.
pub fn load_state(path: &Path) -> Result<PersistedState, StoreError> {
    if !path.exists() {
        return Ok(PersistedState::default());
    }
    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(PersistedState::default());
    }
    serde_json::from_str(&raw).map_err(|e| {
        StoreError::Init(format!("Unable to parse {}: {}", path.display(), e))
    })
}

/// Atomically replace the persisted document.
pub fn save_state(path: &Path, state: &PersistedState) -> Result<(), StoreError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    ensure_dir(dir).map_err(StoreError::Init)?;

    let json = serde_json::to_vec_pretty(state)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).ok();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Prompt {
        let ts = DateTime::parse_from_rfc3339("2024-03-01T10:00:00.000Z")
            .unwrap()
            .with_timezone(&Utc);
        Prompt {
            id: "1700000000000".into(),
            title: "Code Review".into(),
            content: "Review  this\ncode please".into(),
            category: Some("Development".into()),
            tags: vec!["review".into()],
            created_at: ts,
            modified_at: ts,
            last_used_at: None,
        }
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        assert_eq!(sample().word_count(), 4);
    }

    #[test]
    fn prompt_uses_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("modifiedAt").is_some());
        assert!(json.get("lastUsedAt").unwrap().is_null());
    }

    #[test]
    fn missing_file_loads_empty_state() {
        let dir = tempdir().unwrap();
        let state = load_state(&dir.path().join("vault.json")).unwrap();
        assert_eq!(state, PersistedState::default());
    }

    #[test]
    fn save_then_load_returns_same_state() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("vault.json");
        let state = PersistedState {
            prompts: vec![sample()],
            categories: vec!["Development".into()],
        };
        save_state(&path, &state).unwrap();
        assert_eq!(load_state(&path).unwrap(), state);
    }

    #[test]
    fn corrupt_file_is_an_init_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vault.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_state(&path), Err(StoreError::Init(_))));
    }

    #[test]
    fn open_creates_directory_and_empty_vault() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("home");
        let ctx = AppCtx::open(base.clone()).unwrap();
        assert!(base.is_dir());
        assert_eq!(ctx.data_path, base.join("vault.json"));
        assert_eq!(ctx.vault.store().len(), 0);
    }
}
