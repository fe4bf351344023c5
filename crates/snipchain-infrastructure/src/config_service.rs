//! Configuration service implementation.
//!
//! Loads the root configuration from `~/.config/snipchain/config.toml`
//! (or an explicit path) and caches it.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use snipchain_core::config::AppConfig;
use snipchain_core::error::Result;
use tracing::warn;

use crate::paths::SnipchainPaths;
use crate::storage::AtomicTomlFile;

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Uses the default config file location.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses an explicit config file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it on first access.
    ///
    /// A missing file yields defaults; an unreadable one is logged and also
    /// yields defaults.
    pub fn get_config(&self) -> AppConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match self.load_config() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                AppConfig::default()
            }
        };

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Writes `config` to disk and refreshes the cache.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        AtomicTomlFile::new(self.config_path()?).save(config)?;
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(config.clone());
        Ok(())
    }

    /// Path of the chain library: the configured override or the default.
    pub fn chains_file(&self) -> Result<PathBuf> {
        match self.get_config().chains_file {
            Some(path) => Ok(path),
            None => Ok(SnipchainPaths::chains_file()?),
        }
    }

    fn load_config(&self) -> Result<AppConfig> {
        let file = AtomicTomlFile::<AppConfig>::new(self.config_path()?);
        Ok(file.load()?.unwrap_or_default())
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(SnipchainPaths::config_file()?),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipchain_core::config::CycleDetection;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.get_config(), AppConfig::default());
    }

    #[test]
    fn test_broken_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[resolver\nmax_depth = ").unwrap();

        let service = ConfigService::with_path(path);
        assert_eq!(service.get_config(), AppConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());

        let mut config = AppConfig::default();
        config.resolver.max_depth = 4;
        config.resolver.cycle_detection = CycleDetection::Ancestors;
        config.chains_file = Some(temp_dir.path().join("lib.toml"));
        service.save_config(&config).unwrap();

        let fresh = ConfigService::with_path(path);
        assert_eq!(fresh.get_config(), config);
        assert_eq!(fresh.chains_file().unwrap(), temp_dir.path().join("lib.toml"));
    }

    #[test]
    fn test_cache_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());
        assert_eq!(service.get_config().log_level, "warn");

        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();
        assert_eq!(service.get_config().log_level, "warn");

        service.invalidate_cache();
        assert_eq!(service.get_config().log_level, "debug");
    }
}
