use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, RosterError};

/// Configuration file name, looked up in the working directory and the
/// user config directory.
pub const CONFIG_FILE: &str = "roster.toml";

/// Top-level roster configuration.
///
/// Every section is optional and every field has a built-in default, so
/// the tool runs with no configuration at all: drop the binary next to
/// `employees.csv` and start it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub auth: AuthSection,
    pub storage: StorageSection,
    pub audit: AuditSection,
}

impl AppConfig {
    /// Load configuration using the documented lookup chain:
    /// an explicit `--config` path, else `roster.toml` in the working
    /// directory, else `roster/roster.toml` under the user config dir.
    /// No file anywhere means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match Self::resolve_path(explicit) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Records file resolution: the `--file` flag wins, then config.
    pub fn records_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.storage.records_file.clone())
    }

    fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        let user = dirs::config_dir()?.join("roster").join(CONFIG_FILE);
        user.exists().then_some(user)
    }

    fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RosterError::InvalidConfig {
                detail: format!("config file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| RosterError::InvalidConfig {
            detail: format!("Failed to parse {}: {e}", path.display()),
        })
    }
}

/// The `[auth]` section: the single valid operator pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    pub username: String,
    pub password: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            username: "user1".to_string(),
            password: "password1".to_string(),
        }
    }
}

/// The `[storage]` section: where the records file lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub records_file: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            records_file: PathBuf::from("employees.csv"),
        }
    }
}

/// The `[audit]` section: where the audit trail is appended.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditSection {
    pub log_file: PathBuf,
}

impl Default for AuditSection {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("audit_log.csv"),
        }
    }
}
