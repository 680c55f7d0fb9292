//! Export records - the JSON contract with the front end and persistence jobs
//!
//! User ids serialize as strings; row field names (`i`, `j`, `v`) follow the
//! trust-list convention shared with seed files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::UserScore;
use crate::value_objects::UserId;

/// Report category understood by the front end
pub const REPORT_CATEGORY: &str = "socialrank";

/// One aggregated edge of the trust list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub i: UserId,
    pub j: UserId,
    pub v: f64,
}

/// One user and a value (seed weight or normalized score)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub i: UserId,
    pub v: f64,
}

impl ScoreEntry {
    pub fn new(i: UserId, v: f64) -> Self {
        Self { i, v }
    }
}

impl From<&UserScore> for ScoreEntry {
    fn from(score: &UserScore) -> Self {
        Self::new(score.user_id, score.normalized_score)
    }
}

/// Score or seed row joined with identity and activity data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedUser {
    pub i: UserId,
    pub v: f64,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub is_admin: bool,
    pub num_posts: u64,
    pub num_received_reactions: u64,
    pub num_received_replies: u64,
    pub num_given_reactions: Option<u64>,
    pub num_given_replies: u64,
    pub first_post_at: Option<DateTime<Utc>>,
    pub last_post_at: Option<DateTime<Utc>>,
}

/// Ranked document for one community
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityReport {
    pub category: String,
    pub channel: String,
    pub created_at: DateTime<Utc>,
    pub days_back: u32,
    pub total_num_posts: u64,
    pub total_users: u64,
    pub first_message_at: Option<DateTime<Utc>>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub engagement_score: f64,
    pub seed: Vec<RankedUser>,
    pub scores: Vec<RankedUser>,
}
