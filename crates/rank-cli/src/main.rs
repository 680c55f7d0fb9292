//! SocialRank batch entry point
//!
//! Run with:
//! ```bash
//! cargo run -p rank-cli
//! ```
//!
//! Configuration is read from `config.toml` (or `$SOCIALRANK_CONFIG`) and
//! `SOCIALRANK__*` environment variables.

use anyhow::Context;
use rank_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, AppError, TracingConfig};
use rank_service::RunSummary;
use tracing::{error, info, warn};

/// Exit status when some communities could not be ranked
const EXIT_PARTIAL_FAILURE: i32 = 1;

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(summary) if summary.is_success() => 0,
        Ok(_) => EXIT_PARTIAL_FAILURE,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Run failed");
            e.downcast_ref::<AppError>().map_or(1, AppError::exit_code)
        }
    };
    std::process::exit(code);
}

async fn run() -> anyhow::Result<RunSummary> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if let Err(e) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {e}");
            }
            return Err(AppError::from(e)).context("Failed to load configuration");
        }
    };

    let tracing_config = TracingConfig::from_settings(config.app.env, &config.logging);
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(app = %config.app.name, env = ?config.app.env, "Configuration loaded");

    let summary = rank_cli::run(config).await?;
    for failure in &summary.failed {
        warn!(
            community = %failure.community_id,
            code = failure.code,
            "Community not ranked: {}",
            failure.message
        );
    }
    info!(
        ranked = summary.succeeded.len(),
        failed = summary.failed.len(),
        "SocialRank run complete"
    );
    Ok(summary)
}
