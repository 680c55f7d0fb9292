//! # rank-cli
//!
//! Wires the filesystem repositories into the ranking services and runs every
//! configured community through the batch runner.

use std::sync::Arc;

use rank_common::{AppConfig, AppError};
use rank_service::{BatchRunner, RunSummary, ServiceContext, ServiceContextBuilder};
use rank_store::{DataLayout, FsCommunityRepository, FsReportRepository};
use tracing::info;

/// Build the service context over the configured data directories
pub fn create_context(config: &AppConfig) -> Result<ServiceContext, AppError> {
    let layout = DataLayout::from_config(&config.data);
    info!(
        raw_dir = %layout.raw_dir().display(),
        seed_dir = %layout.seed_dir().display(),
        output_dir = %layout.output_dir().display(),
        "Data layout"
    );

    let context = ServiceContextBuilder::from_config(config)
        .community_repo(Arc::new(FsCommunityRepository::new(layout.clone())))
        .report_repo(Arc::new(FsReportRepository::new(layout)))
        .build()?;
    Ok(context)
}

/// Rank every configured community
pub async fn run(config: AppConfig) -> Result<RunSummary, AppError> {
    config.validate()?;
    let communities = config.channels.communities();
    let context = create_context(&config)?;

    info!(
        communities = communities.len(),
        workers = config.runtime.workers,
        "Starting batch"
    );
    let runner = BatchRunner::new(Arc::new(context), config.runtime.workers);
    Ok(runner.run(communities).await)
}
