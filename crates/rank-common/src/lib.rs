//! # rank-common
//!
//! Shared utilities including configuration, error handling, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use self::config::{
    AppConfig, AppSettings, ChannelsConfig, ConfigError, DataConfig, DefaultReason,
    DefaultedWeight, EngagementConfig, Environment, ExportConfig, LoggingConfig,
    ResolvedWeights, RuntimeConfig, TrustConfig, CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH, ENV_PREFIX,
};
pub use error::{AppError, AppResult};
pub use telemetry::{
    try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError,
};
