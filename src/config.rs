//! Configuration management for atelier.
//!
//! Supports layered configuration: defaults → working directory → user → env

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration with hierarchy: defaults → working dir → user → env
    pub fn load(work_dir: Option<&Path>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Built-in defaults
        builder = builder.add_source(
            File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Local overrides (.atelier.toml in the working directory)
        if let Some(dir) = work_dir {
            let local_config = dir.join(".atelier.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        // 3. User config (~/.config/atelier/config.toml)
        if let Some(dirs) = directories::ProjectDirs::from("com", "atelier", "atelier") {
            let user_config = dirs.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (ATELIER__*)
        builder = builder.add_source(
            Environment::with_prefix("ATELIER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("upload.allowed_extensions"),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject settings the workflows cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.batch_size == 0 {
            return Err(ConfigError::Invalid("catalog.batch_size must be > 0".into()));
        }
        if self.store.recent_capacity == 0 {
            return Err(ConfigError::Invalid(
                "store.recent_capacity must be > 0".into(),
            ));
        }
        if self.upload.allowed_extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "upload.allowed_extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Upload wizard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Accepted file extensions, lowercase, without the dot
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Largest accepted file (inclusive)
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,
    /// Delay between a successful upload and the automatic step change
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
            max_size_bytes: default_max_size_bytes(),
            advance_delay_ms: default_advance_delay_ms(),
        }
    }
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["pdf".to_string(), "ai".to_string(), "xlsx".to_string()]
}

fn default_max_size_bytes() -> u64 {
    50 * 1024 * 1024
}

fn default_advance_delay_ms() -> u64 {
    1500
}

/// Manufacturer catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Records fetched per load
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Total records after which the catalog stops loading
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Simulated fetch latency
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,
    /// How close to the last row the selection gets before prefetching
    #[serde(default = "default_prefetch_margin")]
    pub prefetch_margin: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_items: default_max_items(),
            load_delay_ms: default_load_delay_ms(),
            prefetch_margin: default_prefetch_margin(),
        }
    }
}

fn default_batch_size() -> usize {
    4
}

fn default_max_items() -> usize {
    24
}

fn default_load_delay_ms() -> u64 {
    800
}

fn default_prefetch_margin() -> usize {
    1
}

/// Project store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Number of projects kept in the recent list
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            recent_capacity: default_recent_capacity(),
        }
    }
}

fn default_recent_capacity() -> usize {
    4
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// UI refresh rate in milliseconds
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
    /// Enable vim-style navigation (j/k/h/l)
    #[serde(default = "default_vim_navigation")]
    pub vim_navigation: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
            vim_navigation: default_vim_navigation(),
        }
    }
}

fn default_refresh_rate_ms() -> u64 {
    100
}

fn default_vim_navigation() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.upload.allowed_extensions, vec!["pdf", "ai", "xlsx"]);
        assert_eq!(config.upload.max_size_bytes, 52_428_800);
        assert_eq!(config.upload.advance_delay_ms, 1500);
        assert_eq!(config.catalog.batch_size, 4);
        assert_eq!(config.catalog.max_items, 24);
        assert_eq!(config.store.recent_capacity, 4);
        assert_eq!(config.ui.refresh_rate_ms, 100);
        assert!(config.ui.vim_navigation);
    }

    #[test]
    fn test_embedded_defaults_match_code_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = tokio_test::assert_ok!(AppConfig::load(Some(dir.path())));
        assert_eq!(config.upload.max_size_bytes, 50 * 1024 * 1024);
        assert_eq!(config.catalog.prefetch_margin, 1);
        assert_eq!(config.store.recent_capacity, 4);
    }

    #[test]
    fn test_local_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".atelier.toml"),
            "[catalog]\nbatch_size = 6\nmax_items = 12\n",
        )
        .unwrap();

        let config = AppConfig::load(Some(dir.path())).unwrap();
        assert_eq!(config.catalog.batch_size, 6);
        assert_eq!(config.catalog.max_items, 12);
        // Untouched sections keep their defaults
        assert_eq!(config.upload.advance_delay_ms, 1500);
    }

    #[test]
    fn test_invalid_local_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".atelier.toml"), "[catalog]\nbatch_size = 0\n").unwrap();

        let err = tokio_test::assert_err!(AppConfig::load(Some(dir.path())));
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
