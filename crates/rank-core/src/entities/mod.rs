//! Domain entities - core business objects

mod community;
mod corpus;
mod edge;
mod export;
mod identity;
mod message;
mod score;
mod stats;

pub use community::Community;
pub use corpus::{Corpus, CorpusShape};
pub use edge::{InteractionKind, TrustEdge};
pub use export::{CommunityReport, EdgeRow, RankedUser, ScoreEntry, REPORT_CATEGORY};
pub use identity::{AdminSet, IdentityMap, UserProfile};
pub use message::{Message, Reaction};
pub use score::UserScore;
pub use stats::UserActivityStats;
