//! Response DTOs for a batch run
//!
//! All response DTOs implement `Serialize` so a run summary can be logged or
//! written as JSON.

use rank_core::CorpusShape;
use serde::Serialize;

/// Outcome of a batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub succeeded: Vec<CommunityResult>,
    pub failed: Vec<CommunityFailure>,
}

impl RunSummary {
    pub fn new(succeeded: Vec<CommunityResult>, failed: Vec<CommunityFailure>) -> Self {
        Self { succeeded, failed }
    }

    /// Every community was ranked
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// One ranked community
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityResult {
    pub community_id: String,
    pub shape: CorpusShape,
    pub messages: usize,
    pub skipped_records: usize,
    /// Aggregated edge rows written
    pub edges: usize,
    pub scored_users: usize,
    pub engagement_score: f64,
}

/// One community that could not be ranked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommunityFailure {
    pub community_id: String,
    /// Stable error code
    pub code: &'static str,
    pub message: String,
}
