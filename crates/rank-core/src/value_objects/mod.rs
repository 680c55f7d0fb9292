//! Value objects - immutable types that represent domain concepts

mod engagement;
mod ids;
mod weights;

pub use engagement::EngagementConstants;
pub use ids::{IdParseError, MessageId, UserId};
pub use weights::{WeightConfig, THREAD_PARTICIPATION_SHARE};
