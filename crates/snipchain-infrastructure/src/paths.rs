//! Unified path management for Snipchain files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/snipchain/         # Config directory (platform dependent)
//! ├── config.toml              # Application configuration
//! └── chains.toml              # Chain library
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "snipchain";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for snipchain_core::SnipchainError {
    fn from(e: PathError) -> Self {
        snipchain_core::SnipchainError::config(e.to_string())
    }
}

/// Platform paths for Snipchain, resolved through `dirs`.
pub struct SnipchainPaths;

impl SnipchainPaths {
    /// Returns the configuration directory (e.g. `~/.config/snipchain/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default path of the chain library.
    pub fn chains_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("chains.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        if let Ok(config_dir) = SnipchainPaths::config_dir() {
            assert!(config_dir.ends_with("snipchain"));
        }
    }

    #[test]
    fn test_files_live_under_config_dir() {
        if let (Ok(dir), Ok(config), Ok(chains)) = (
            SnipchainPaths::config_dir(),
            SnipchainPaths::config_file(),
            SnipchainPaths::chains_file(),
        ) {
            assert!(config.starts_with(&dir));
            assert!(config.ends_with("config.toml"));
            assert!(chains.starts_with(&dir));
            assert!(chains.ends_with("chains.toml"));
        }
    }
}
