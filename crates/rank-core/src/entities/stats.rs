//! Per-user activity statistics

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::UserId;

/// Engagement counters for one user
///
/// `num_given_reactions` is `None` when the corpus only carries aggregated
/// reaction counts and individual reactors are unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserActivityStats {
    pub user_id: UserId,
    pub num_posts: u64,
    pub num_received_reactions: u64,
    pub num_received_replies: u64,
    pub num_given_replies: u64,
    pub num_given_reactions: Option<u64>,
    pub first_post_at: Option<DateTime<Utc>>,
    pub last_post_at: Option<DateTime<Utc>>,
}

impl UserActivityStats {
    /// Zeroed counters for a user with no recorded activity
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            num_posts: 0,
            num_received_reactions: 0,
            num_received_replies: 0,
            num_given_replies: 0,
            num_given_reactions: None,
            first_post_at: None,
            last_post_at: None,
        }
    }

    /// Count one authored message and widen the activity window
    pub fn record_post(&mut self, at: DateTime<Utc>) {
        self.num_posts += 1;
        if self.first_post_at.is_none_or(|first| at < first) {
            self.first_post_at = Some(at);
        }
        if self.last_post_at.is_none_or(|last| at > last) {
            self.last_post_at = Some(at);
        }
    }

    pub fn record_given_reaction(&mut self) {
        *self.num_given_reactions.get_or_insert(0) += 1;
    }
}
