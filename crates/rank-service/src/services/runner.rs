//! Batch runner - processes communities concurrently
//!
//! One task per community on a `JoinSet`, at most `workers` running at once.
//! A failing community is recorded in the summary and never stops the others.

use std::sync::Arc;

use rank_core::CorpusShape;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, instrument};

use crate::dto::{CommunityFailure, CommunityResult, RunSummary};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::pipeline::RankingService;

type TaskOutput = (usize, String, ServiceResult<CommunityResult>);

pub struct BatchRunner {
    ctx: Arc<ServiceContext>,
    workers: usize,
}

impl BatchRunner {
    /// `workers` is clamped to at least 1
    pub fn new(ctx: Arc<ServiceContext>, workers: usize) -> Self {
        Self {
            ctx,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Rank every community; results keep the input order
    #[instrument(skip(self, communities), fields(communities = communities.len(), workers = self.workers))]
    pub async fn run(&self, communities: Vec<(String, CorpusShape)>) -> RunSummary {
        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks: JoinSet<TaskOutput> = JoinSet::new();

        for (position, (community_id, shape)) in communities.into_iter().enumerate() {
            let ctx = Arc::clone(&self.ctx);
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let result = match permits.acquire_owned().await {
                    Ok(_permit) => RankingService::new(&ctx).run(&community_id, shape).await,
                    Err(e) => Err(ServiceError::internal(format!("worker pool closed: {e}"))),
                };
                (position, community_id, result)
            });
        }

        let mut completed = Vec::new();
        let mut failed = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((position, _, Ok(result))) => completed.push((position, result)),
                Ok((position, community_id, Err(e))) => {
                    error!(community = %community_id, code = e.error_code(), error = %e, "Community failed");
                    failed.push((position, CommunityFailure::new(community_id, &e)));
                }
                Err(join_error) => {
                    let e = ServiceError::from(join_error);
                    error!(error = %e, "Worker task failed");
                    failed.push((usize::MAX, CommunityFailure::new("<unknown>", &e)));
                }
            }
        }

        completed.sort_by_key(|(position, _)| *position);
        failed.sort_by_key(|(position, _)| *position);
        let summary = RunSummary::new(
            completed.into_iter().map(|(_, r)| r).collect(),
            failed.into_iter().map(|(_, f)| f).collect(),
        );

        info!(
            succeeded = summary.succeeded.len(),
            failed = summary.failed.len(),
            "Batch finished"
        );
        summary
    }
}
