//! Ranking services
//!
//! Corpus traversal, trust graph construction, aggregation, normalization,
//! activity statistics and enrichment, orchestrated per community by the
//! ranking service and across communities by the batch runner.

pub mod aggregate;
pub mod context;
pub mod enrich;
pub mod error;
pub mod graph;
pub mod mentions;
pub mod normalize;
pub mod pipeline;
pub mod runner;
pub mod stats;
pub mod traversal;

// Re-export all services for convenience
pub use aggregate::ScoreAggregator;
pub use context::{log_weight_defaults, ServiceContext, ServiceContextBuilder};
pub use enrich::{engagement_score, Enricher};
pub use error::{ServiceError, ServiceResult};
pub use graph::{EdgeDiagnostics, TrustGraph, TrustGraphBuilder};
pub use mentions::MentionIndex;
pub use normalize::{normalize, SCORE_SCALE};
pub use pipeline::{rank_community, PipelineSettings, RankingOutcome, RankingService};
pub use runner::BatchRunner;
pub use stats::{ActivityCollector, ActivityReport, CommunityTotals, CorpusSummary};
pub use traversal::{layout_for, ChannelLayout, CorpusIndex, CorpusLayout, FlatChatLayout, Visit};
