//! User activity statistics
//!
//! Shares the corpus walk with the graph builder. Per-author posts and given
//! replies, per-target received reactions and replies, first/last activity,
//! plus channel-wide totals that include unattributed posts.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rank_core::{UserActivityStats, UserId};

use super::traversal::{CorpusIndex, CorpusLayout};

/// Channel-wide totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityTotals {
    /// Every message, attributed or not
    pub total_posts: u64,
    pub first_message_at: Option<DateTime<Utc>>,
    pub last_message_at: Option<DateTime<Utc>>,
    /// Sum of per-user received reactions
    pub received_reactions: u64,
    /// Sum of per-user received replies
    pub received_replies: u64,
}

/// Per-user statistics plus community totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityReport {
    pub users: BTreeMap<UserId, UserActivityStats>,
    pub totals: CommunityTotals,
}

impl ActivityReport {
    #[inline]
    pub fn get(&self, user_id: UserId) -> Option<&UserActivityStats> {
        self.users.get(&user_id)
    }

    #[inline]
    pub fn total_users(&self) -> u64 {
        self.users.len() as u64
    }
}

/// Collects activity statistics from a walked corpus
pub struct ActivityCollector {
    track_given_reactions: bool,
    users: BTreeMap<UserId, UserActivityStats>,
    totals: CommunityTotals,
}

impl ActivityCollector {
    pub fn new(layout: &dyn CorpusLayout) -> Self {
        Self {
            track_given_reactions: layout.tracks_given_reactions(),
            users: BTreeMap::new(),
            totals: CommunityTotals::default(),
        }
    }

    pub fn collect(mut self, index: &CorpusIndex<'_>) -> ActivityReport {
        for visit in index.visits() {
            let message = visit.message;
            self.record_message_time(message.timestamp);

            let author = message.author_id;
            if let Some(author) = author {
                let stats = self.entry(author);
                stats.record_post(message.timestamp);
                if visit.is_reply() {
                    stats.num_given_replies += 1;
                }

                let received: u64 = message.reactions.iter().map(|r| r.received_count()).sum();
                self.entry(author).num_received_reactions += received;

                if let Some(target) = index.replied_author(visit).filter(|t| *t != author) {
                    self.entry(target).num_received_replies += 1;
                }
            }

            if self.track_given_reactions {
                for reactor in message
                    .reactions
                    .iter()
                    .filter_map(|r| r.attributable_reactor())
                    .filter(|reactor| Some(*reactor) != author)
                {
                    self.entry(reactor).record_given_reaction();
                }
            }
        }

        self.totals.received_reactions = self.users.values().map(|s| s.num_received_reactions).sum();
        self.totals.received_replies = self.users.values().map(|s| s.num_received_replies).sum();

        ActivityReport {
            users: self.users,
            totals: self.totals,
        }
    }

    fn record_message_time(&mut self, at: DateTime<Utc>) {
        let totals = &mut self.totals;
        totals.total_posts += 1;
        if totals.first_message_at.is_none_or(|first| at < first) {
            totals.first_message_at = Some(at);
        }
        if totals.last_message_at.is_none_or(|last| at > last) {
            totals.last_message_at = Some(at);
        }
    }

    fn entry(&mut self, user_id: UserId) -> &mut UserActivityStats {
        let track_given = self.track_given_reactions;
        self.users
            .entry(user_id)
            .or_insert_with(|| empty_stats(user_id, track_given))
    }
}

/// Stats for a user with no recorded activity
pub fn empty_stats(user_id: UserId, track_given_reactions: bool) -> UserActivityStats {
    let mut stats = UserActivityStats::new(user_id);
    if track_given_reactions {
        stats.num_given_reactions = Some(0);
    }
    stats
}

/// Corpus composition, logged per community
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusSummary {
    pub posts_with_author: u64,
    pub posts_without_author: u64,
    pub total_replies: u64,
    pub replies_with_author: u64,
    /// Count-weighted
    pub total_reactions: u64,
    pub reactions_with_user_id: u64,
}

impl CorpusSummary {
    pub fn from_index(index: &CorpusIndex<'_>) -> Self {
        let mut summary = Self::default();
        for visit in index.visits() {
            let attributed = visit.message.is_attributed();
            match (visit.depth, attributed) {
                (0, true) => summary.posts_with_author += 1,
                (0, false) => summary.posts_without_author += 1,
                (_, true) => {
                    summary.total_replies += 1;
                    summary.replies_with_author += 1;
                }
                (_, false) => summary.total_replies += 1,
            }
            for reaction in &visit.message.reactions {
                summary.total_reactions += reaction.received_count();
                if reaction.attributable_reactor().is_some() {
                    summary.reactions_with_user_id += 1;
                }
            }
        }
        summary
    }

    pub fn total_posts(&self) -> u64 {
        self.posts_with_author + self.posts_without_author
    }
}
