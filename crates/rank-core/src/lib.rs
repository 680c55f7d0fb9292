//! # rank-core
//!
//! Domain layer containing corpus entities, value objects, repository ports, and domain errors.
//! This crate has zero dependencies on infrastructure (filesystem, runtime, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AdminSet, Community, CommunityReport, Corpus, CorpusShape, EdgeRow, IdentityMap,
    InteractionKind, Message, RankedUser, Reaction, ScoreEntry, TrustEdge, UserActivityStats,
    UserProfile, UserScore, REPORT_CATEGORY,
};
pub use error::DomainError;
pub use traits::{CommunityRepository, RepoResult, ReportRepository};
pub use value_objects::{
    EngagementConstants, IdParseError, MessageId, UserId, WeightConfig, THREAD_PARTICIPATION_SHARE,
};
