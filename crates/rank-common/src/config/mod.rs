//! Configuration structs

mod app_config;
mod trust;

pub use app_config::{
    AppConfig, AppSettings, ChannelsConfig, ConfigError, DataConfig, EngagementConfig,
    Environment, ExportConfig, LoggingConfig, RuntimeConfig, CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH,
    ENV_PREFIX,
};
pub use trust::{DefaultReason, DefaultedWeight, ResolvedWeights, TrustConfig};
