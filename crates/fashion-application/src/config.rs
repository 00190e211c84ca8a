//! Application configuration.
//!
//! Loaded from `config.toml` (see [`FashionPaths::config_file`]). Every field
//! has a default, so a missing file or a partial file is fine:
//!
//! ```toml
//! [storage]
//! namespace = "ai-fashion"
//! persist_mode = "deferred"
//! autosave_interval_ms = 500
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use fashion_core::{DEFAULT_NAMESPACE, FashionError, IdGenerator, PersistMode, Result, StoreOptions};
use fashion_infrastructure::FashionPaths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for store records. `None` uses the platform state directory.
    pub dir: Option<PathBuf>,
    /// Prefix of every storage key.
    pub namespace: String,
    pub persist_mode: PersistMode,
    /// Autosave period for [`PersistMode::Deferred`].
    pub autosave_interval_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            persist_mode: PersistMode::EveryCommit,
            autosave_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Plain,
        }
    }
}

impl AppConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| FashionError::config(format!("Invalid configuration: {}", e)))
    }

    /// Loads the config at `path`.
    ///
    /// # Returns
    ///
    /// - `Ok(AppConfig)`: Parsed config, or the defaults when the file is missing or empty
    /// - `Err(FashionError::Config)`: The file exists but is not valid
    /// - `Err(FashionError::Io)`: The file exists but cannot be read
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_toml_str(&content)
    }

    /// Loads the config from the default location.
    pub fn load_default() -> Result<Self> {
        Self::load(&FashionPaths::config_file()?)
    }

    /// Resolved directory for store records.
    pub fn state_dir(&self) -> Result<PathBuf> {
        match &self.storage.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(FashionPaths::state_dir()?),
        }
    }

    pub fn store_options(&self, ids: Arc<dyn IdGenerator>) -> StoreOptions {
        StoreOptions::new(ids)
            .with_namespace(self.storage.namespace.clone())
            .with_persist_mode(self.storage.persist_mode)
    }

    /// Autosave period, never shorter than 10ms.
    pub fn autosave_interval(&self) -> Duration {
        Duration::from_millis(self.storage.autosave_interval_ms.max(10))
    }
}
