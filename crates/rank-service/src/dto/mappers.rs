//! Pipeline outcome to DTO mappers

use rank_core::CorpusShape;

use crate::services::{RankingOutcome, ServiceError};

use super::responses::{CommunityFailure, CommunityResult};

impl CommunityResult {
    pub fn from_outcome(community_id: &str, shape: CorpusShape, outcome: &RankingOutcome) -> Self {
        Self {
            community_id: community_id.to_string(),
            shape,
            messages: outcome.messages,
            skipped_records: outcome.skipped_records,
            edges: outcome.edges.len(),
            scored_users: outcome.scores.len(),
            engagement_score: outcome.report.engagement_score,
        }
    }
}

impl CommunityFailure {
    pub fn new(community_id: impl Into<String>, error: &ServiceError) -> Self {
        Self {
            community_id: community_id.into(),
            code: error.error_code(),
            message: error.to_string(),
        }
    }
}
