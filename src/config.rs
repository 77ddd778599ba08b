//! Configuration file handling.
//!
//! This module provides loading and saving of apinav configuration
//! from a TOML file.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/apinav/config.toml`
//! - macOS: `~/Library/Application Support/apinav/config.toml`
//! - Windows: `%APPDATA%\apinav\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! [cache]
//! max_entries = 100
//! stale_after_secs = 300
//!
//! [search]
//! max_results = 100
//!
//! [scanners.gin]
//! file_extensions = ["go"]
//! exclude_patterns = ["vendor", "test"]
//! max_file_size_bytes = 524288
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::ProjectType;

const KIB: u64 = 1024;

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use apinav::Config;
///
/// // Load from file (or use defaults if file doesn't exist)
/// let config = Config::load().unwrap();
///
/// println!("Cache size: {} files", config.cache.max_entries);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-ecosystem file discovery settings.
    pub scanners: ScannerConfigs,

    /// Content cache and staleness settings.
    pub cache: CacheSettings,

    /// Search output settings.
    pub search: SearchSettings,
}

/// File discovery settings for one ecosystem scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Extensions (without the dot) of files worth reading.
    pub file_extensions: BTreeSet<String>,

    /// Any file whose path below the root contains one of these
    /// substrings is skipped without being read.
    pub exclude_patterns: BTreeSet<String>,

    /// Files larger than this many bytes are never parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_size_bytes: Option<u64>,
}

impl ScannerConfig {
    pub fn new<E, X>(extensions: E, excludes: X, max_file_size_bytes: Option<u64>) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        X: IntoIterator,
        X::Item: Into<String>,
    {
        Self {
            file_extensions: extensions.into_iter().map(Into::into).collect(),
            exclude_patterns: excludes.into_iter().map(Into::into).collect(),
            max_file_size_bytes,
        }
    }

    /// Check if a path should be skipped.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| !pattern.is_empty() && path.contains(pattern.as_str()))
    }

    /// Check if a file extension is one this scanner reads.
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                self.file_extensions
                    .iter()
                    .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfigs {
    pub spring_boot: ScannerConfig,
    pub express: ScannerConfig,
    pub nest: ScannerConfig,
    pub gin: ScannerConfig,
    pub echo: ScannerConfig,
    pub fastapi: ScannerConfig,
}

impl ScannerConfigs {
    /// Returns the settings for a project type, `None` for [`ProjectType::Unknown`].
    pub fn get(&self, project_type: ProjectType) -> Option<&ScannerConfig> {
        match project_type {
            ProjectType::SpringBoot => Some(&self.spring_boot),
            ProjectType::Express => Some(&self.express),
            ProjectType::Nest => Some(&self.nest),
            ProjectType::Gin => Some(&self.gin),
            ProjectType::Echo => Some(&self.echo),
            ProjectType::FastApi => Some(&self.fastapi),
            ProjectType::Unknown => None,
        }
    }
}

impl Default for ScannerConfigs {
    fn default() -> Self {
        Self {
            spring_boot: ScannerConfig::new(["java"], ["test", "build"], Some(1024 * KIB)),
            express: ScannerConfig::new(["js", "ts"], ["node_modules", "test"], Some(512 * KIB)),
            nest: ScannerConfig::new(["ts"], ["node_modules", "test"], Some(512 * KIB)),
            gin: ScannerConfig::new(["go"], ["vendor", "test"], Some(512 * KIB)),
            echo: ScannerConfig::new(["go"], ["vendor", "test"], Some(512 * KIB)),
            fastapi: ScannerConfig::new(
                ["py"],
                ["test", "__pycache__", "venv", ".env"],
                Some(512 * KIB),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum number of source files kept in memory.
    ///
    /// Default: 100
    pub max_entries: usize,

    /// Age after which [`refresh_if_stale`](crate::EndpointProvider::refresh_if_stale)
    /// triggers a new workspace scan, in seconds.
    ///
    /// Default: 300 (5 minutes)
    pub stale_after_secs: u64,
}

impl CacheSettings {
    pub fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: crate::cache::DEFAULT_CAPACITY,
            stale_after_secs: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum number of search results printed by the CLI.
    ///
    /// Default: 100
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { max_results: 100 }
    }
}

impl Config {
    /// Loads configuration from the default config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from an explicit path, falling back to defaults
    /// when the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to the config file.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("apinav")
            .join("config.toml")
    }

    /// Generates a string containing the default configuration.
    pub fn generate_default_config() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}
