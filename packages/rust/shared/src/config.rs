//! Application configuration for warmpath.
//!
//! User config lives at `~/.warmpath/warmpath.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WarmpathError};
use crate::types::SiteConfig;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "warmpath.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".warmpath";

// ---------------------------------------------------------------------------
// Config structs (matching warmpath.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Site the canonicalizer anchors to.
    #[serde(default)]
    pub site: SiteConfig,

    /// Convergent collection bounds.
    #[serde(default)]
    pub collection: CollectionConfig,

    /// Pacing range handed to the caller's delay collaborator.
    #[serde(default)]
    pub delay: DelayRange,
}

/// Call sites that run a convergent collection, each with its own stability threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallSite {
    /// Page-number-paginated people search.
    Search,
    /// Scroll-paginated own-connections list.
    Connections,
    /// Mutual connections shared with a target.
    Mutuals,
    /// Reactions/comments on a post.
    Engagement,
}

/// `[collection]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Hard cap on rounds for any single collection.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Consecutive rounds with zero usable records before giving up.
    #[serde(default = "default_empty_rounds")]
    pub empty_rounds: u32,

    /// Consecutive non-growing rounds per call site.
    #[serde(default)]
    pub stability: StabilityThresholds,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            empty_rounds: default_empty_rounds(),
            stability: StabilityThresholds::default(),
        }
    }
}

impl CollectionConfig {
    /// Stability threshold configured for `site`.
    pub fn stable_rounds(&self, site: CallSite) -> u32 {
        match site {
            CallSite::Search => self.stability.search,
            CallSite::Connections => self.stability.connections,
            CallSite::Mutuals => self.stability.mutuals,
            CallSite::Engagement => self.stability.engagement,
        }
    }
}

fn default_max_rounds() -> u32 {
    25
}
fn default_empty_rounds() -> u32 {
    2
}

/// `[collection.stability]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityThresholds {
    #[serde(default = "default_search_stable")]
    pub search: u32,
    #[serde(default = "default_connections_stable")]
    pub connections: u32,
    #[serde(default = "default_mutuals_stable")]
    pub mutuals: u32,
    #[serde(default = "default_engagement_stable")]
    pub engagement: u32,
}

impl Default for StabilityThresholds {
    fn default() -> Self {
        Self {
            search: default_search_stable(),
            connections: default_connections_stable(),
            mutuals: default_mutuals_stable(),
            engagement: default_engagement_stable(),
        }
    }
}

fn default_search_stable() -> u32 {
    3
}
fn default_connections_stable() -> u32 {
    4
}
fn default_mutuals_stable() -> u32 {
    2
}
fn default_engagement_stable() -> u32 {
    5
}

/// `[delay]` section: bounds for the pause between rounds, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    #[serde(default = "default_delay_min")]
    pub min_ms: u64,
    #[serde(default = "default_delay_max")]
    pub max_ms: u64,
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min_ms: default_delay_min(),
            max_ms: default_delay_max(),
        }
    }
}

impl DelayRange {
    /// Reject inverted ranges.
    pub fn validate(&self) -> Result<()> {
        if self.min_ms > self.max_ms {
            return Err(WarmpathError::config(format!(
                "delay.min_ms ({}) exceeds delay.max_ms ({})",
                self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }
}

fn default_delay_min() -> u64 {
    800
}
fn default_delay_max() -> u64 {
    2200
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.warmpath/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| WarmpathError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.warmpath/warmpath.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| WarmpathError::io(path, e))?;
    parse_config(&content)
        .map_err(|e| WarmpathError::config(format!("failed to load {}: {e}", path.display())))
}

fn parse_config(content: &str) -> Result<AppConfig> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| WarmpathError::config(e.to_string()))?;
    config.delay.validate()?;
    if config.collection.max_rounds == 0 {
        return Err(WarmpathError::config("collection.max_rounds must be at least 1"));
    }
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| WarmpathError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| WarmpathError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| WarmpathError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
