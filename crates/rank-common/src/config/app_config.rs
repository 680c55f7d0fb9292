//! Application configuration structs
//!
//! Loads configuration from a TOML file overridden by `SOCIALRANK__*`
//! environment variables (e.g. `SOCIALRANK__RUNTIME__WORKERS=8`).

use rank_core::{CorpusShape, EngagementConstants};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use validator::Validate;

use super::trust::{ResolvedWeights, TrustConfig};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "SOCIALRANK_CONFIG";
/// Config file used when `SOCIALRANK_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// Prefix of overriding environment variables
pub const ENV_PREFIX: &str = "SOCIALRANK";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub channels: ChannelsConfig,
    /// `None` when the file has no `[trust]` section at all
    #[serde(default)]
    pub trust: Option<TrustConfig>,
    #[serde(default)]
    pub engagement: EngagementConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: default_env(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Input and output locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Crawled `{id}_messages.json`, `{id}_users.json`, `{id}_admins.json`
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    /// Seed trust lists `{id}.json`
    #[serde(default = "default_seed_dir")]
    pub seed_dir: PathBuf,
    /// Root of the `trust/`, `output/` and `ui/` directories
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            seed_dir: default_seed_dir(),
            output_dir: default_output_dir(),
        }
    }
}

/// Communities to process
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelsConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub default_shape: CorpusShape,
    /// Per-community shape overrides
    #[serde(default)]
    pub shapes: BTreeMap<String, CorpusShape>,
}

impl ChannelsConfig {
    /// Included communities minus excluded ones, in include order, deduplicated
    pub fn communities(&self) -> Vec<(String, CorpusShape)> {
        let mut selected: Vec<(String, CorpusShape)> = Vec::with_capacity(self.include.len());
        for id in &self.include {
            let id = id.trim();
            if id.is_empty()
                || self.exclude.iter().any(|excluded| excluded.trim() == id)
                || selected.iter().any(|(seen, _)| seen == id)
            {
                continue;
            }
            selected.push((id.to_string(), self.shape_for(id)));
        }
        selected
    }

    /// Shape of one community; keys may have been lowercased by the loader
    pub fn shape_for(&self, id: &str) -> CorpusShape {
        self.shapes
            .get(id)
            .or_else(|| self.shapes.get(&id.to_lowercase()))
            .copied()
            .unwrap_or(self.default_shape)
    }
}

/// Engagement constants per corpus shape
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EngagementConfig {
    #[serde(default = "default_channel_engagement")]
    #[validate(nested)]
    pub channel: EngagementConstants,
    #[serde(default = "default_flat_engagement")]
    #[validate(nested)]
    pub flat: EngagementConstants,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            channel: default_channel_engagement(),
            flat: default_flat_engagement(),
        }
    }
}

impl EngagementConfig {
    pub fn for_shape(&self, shape: CorpusShape) -> EngagementConstants {
        match shape {
            CorpusShape::Channel => self.channel,
            CorpusShape::Flat => self.flat,
        }
    }
}

/// Report export settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// Exclude admins from the score table before normalization
    #[serde(default)]
    pub members_only: bool,
    /// Crawl window reported in the UI document
    #[serde(default)]
    pub days_back: u32,
}

/// Worker pool settings
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

/// Log output settings; unset fields follow the environment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub json: Option<bool>,
}

// Default value functions
fn default_app_name() -> String {
    "socialrank".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_raw_dir() -> PathBuf {
    PathBuf::from("./data/raw")
}

fn default_seed_dir() -> PathBuf {
    PathBuf::from("./seed")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_channel_engagement() -> EngagementConstants {
    EngagementConstants::CHANNEL
}

fn default_flat_engagement() -> EngagementConstants {
    EngagementConstants::FLAT
}

fn default_workers() -> usize {
    4
}

impl AppConfig {
    /// Load configuration from `.env`, the config file, and the environment
    ///
    /// The file named by `SOCIALRANK_CONFIG` (default `config.toml`) is optional.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let path = env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let settings = ::config::Config::builder()
            .add_source(::config::File::new(&path, ::config::FileFormat::Toml).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("channels.include")
                    .with_list_parse_key("channels.exclude"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(content, ::config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runtime.workers == 0 {
            return Err(ConfigError::InvalidValue(
                "runtime.workers",
                "must be at least 1".to_string(),
            ));
        }
        self.engagement
            .validate()
            .map_err(|e| ConfigError::InvalidValue("engagement", e.to_string()))?;
        if self.channels.communities().is_empty() {
            return Err(ConfigError::NoCommunities);
        }
        Ok(())
    }

    /// Effective trust weights with every substituted default
    pub fn weights(&self) -> ResolvedWeights {
        ResolvedWeights::resolve(self.trust.as_ref())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("No communities configured (channels.include is empty after exclusions)")]
    NoCommunities,
}
