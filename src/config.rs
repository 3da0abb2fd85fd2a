//! TOML configuration.
//!
//! The config file is optional. When it does not exist every section takes
//! its defaults, which scan the current directory against the bundled
//! collection list.

use anyhow::{bail, Context, Result};
use globset::Glob;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub collections: CollectionsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    #[serde(default = "default_dirs")]
    pub dirs: Vec<PathBuf>,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Descend into subdirectories instead of listing direct children only.
    #[serde(default)]
    pub recursive: bool,
    #[serde(default = "default_check_permissions")]
    pub check_permissions: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            dirs: default_dirs(),
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
            recursive: false,
            check_permissions: default_check_permissions(),
        }
    }
}

fn default_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}
fn default_include_globs() -> Vec<String> {
    vec!["**/*".to_string()]
}
fn default_check_permissions() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct CollectionsConfig {
    /// One-id-per-line file replacing the bundled list.
    #[serde(default)]
    pub known_list: Option<PathBuf>,
    /// Fetch the live collection list from `url`.
    #[serde(default)]
    pub online: bool,
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            known_list: None,
            online: false,
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    "https://dumps.wikimedia.org".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl CollectionsConfig {
    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Command-line settings that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces `scan.dirs` when non-empty.
    pub dirs: Vec<PathBuf>,
    /// Replaces `collections.online` when set.
    pub online: Option<bool>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut Config) {
        if !self.dirs.is_empty() {
            config.scan.dirs = self.dirs.clone();
        }
        if let Some(online) = self.online {
            config.collections.online = online;
        }
    }
}

/// Read the config at `path` (or the defaults if it does not exist), apply
/// `overrides`, then validate the result.
pub fn load_config(path: &Path, overrides: &ConfigOverrides) -> Result<Config> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")?
    } else {
        Config::default()
    };

    overrides.apply(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Check the invariants `load_config` guarantees.
pub fn validate(config: &Config) -> Result<()> {
    if config.scan.dirs.is_empty() {
        bail!("scan.dirs must list at least one directory");
    }

    for pattern in config
        .scan
        .include_globs
        .iter()
        .chain(&config.scan.exclude_globs)
    {
        Glob::new(pattern)
            .with_context(|| format!("scan glob '{}' is not a valid pattern", pattern))?;
    }

    let url = &config.collections.url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!(
            "collections.url must start with http:// or https://, got '{}'",
            url
        );
    }

    if config.collections.timeout_secs == 0 {
        bail!("collections.timeout_secs must be > 0");
    }

    Ok(())
}
