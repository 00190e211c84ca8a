//! Unified path management for AI Fashion files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/ai-fashion/        # Config directory (dirs::config_dir)
//! ├── config.toml              # Application configuration
//! └── state/                   # Persisted store records (FileStateStorage)
//! ```
//!
//! `AI_FASHION_HOME` overrides the base directory, which keeps tests and
//! portable installs away from the user's real config directory.

use std::path::PathBuf;
use thiserror::Error;

/// Environment variable that replaces the platform config directory.
pub const HOME_ENV: &str = "AI_FASHION_HOME";

const APP_DIR: &str = "ai-fashion";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find config directory")]
    ConfigDirNotFound,
}

impl From<PathError> for fashion_core::FashionError {
    fn from(err: PathError) -> Self {
        fashion_core::FashionError::config(err.to_string())
    }
}

pub struct FashionPaths;

impl FashionPaths {
    /// Returns the base directory (e.g., `~/.config/ai-fashion/`).
    pub fn base_dir() -> Result<PathBuf, PathError> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(home));
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// Returns the directory holding persisted store records.
    pub fn state_dir() -> Result<PathBuf, PathError> {
        Ok(Self::base_dir()?.join("state"))
    }
}
