//! # rank-service
//!
//! Application layer: corpus traversal, trust graph construction, score
//! aggregation and normalization, activity statistics, enrichment, and the
//! batch runner that processes communities concurrently.

pub mod dto;
pub mod services;

pub use dto::{CommunityFailure, CommunityResult, RunSummary};
pub use services::{
    BatchRunner, PipelineSettings, RankingOutcome, RankingService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
