//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what a ranking run reads and writes; the storage
//! layer provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    CommunityReport, Corpus, CorpusShape, EdgeRow, IdentityMap, ScoreEntry, UserProfile,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Community Repository
// ============================================================================

#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Load the crawled corpus, skipping malformed records.
    ///
    /// Fails with `CorpusNotFound` when nothing was crawled for the community.
    async fn load_corpus(&self, community_id: &str, shape: CorpusShape) -> RepoResult<Corpus>;

    /// Load member profiles; empty when no identity export exists
    async fn load_identities(&self, community_id: &str) -> RepoResult<IdentityMap>;

    /// Load admin profiles; empty when no admin export exists
    async fn load_admins(&self, community_id: &str) -> RepoResult<Vec<UserProfile>>;

    /// Load the seed trust list; empty when none exists
    async fn load_seed(&self, community_id: &str) -> RepoResult<Vec<ScoreEntry>>;
}

// ============================================================================
// Report Repository
// ============================================================================

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Persist the aggregated trust list
    async fn save_edges(&self, community_id: &str, edges: &[EdgeRow]) -> RepoResult<()>;

    /// Persist the normalized score table
    async fn save_scores(&self, community_id: &str, scores: &[ScoreEntry]) -> RepoResult<()>;

    /// Persist the enriched report
    async fn save_report(&self, community_id: &str, report: &CommunityReport) -> RepoResult<()>;
}
