//! Enrichment and report assembly
//!
//! Joins score and seed rows with identity metadata, the admin flag and
//! activity statistics, and computes the channel-wide engagement scalar.

use chrono::{DateTime, Utc};
use rank_core::{
    AdminSet, CommunityReport, EngagementConstants, IdentityMap, RankedUser, ScoreEntry,
    REPORT_CATEGORY,
};

use super::stats::{empty_stats, ActivityReport, CommunityTotals};

/// Enriches `(i, v)` rows for one community
pub struct Enricher<'a> {
    identities: &'a IdentityMap,
    admins: &'a AdminSet,
    activity: &'a ActivityReport,
    track_given_reactions: bool,
}

impl<'a> Enricher<'a> {
    pub fn new(
        identities: &'a IdentityMap,
        admins: &'a AdminSet,
        activity: &'a ActivityReport,
        track_given_reactions: bool,
    ) -> Self {
        Self {
            identities,
            admins,
            activity,
            track_given_reactions,
        }
    }

    /// One ranked row; `v` is carried over untouched
    pub fn enrich(&self, row: &ScoreEntry) -> RankedUser {
        let fallback;
        let stats = match self.activity.get(row.i) {
            Some(stats) => stats,
            None => {
                fallback = empty_stats(row.i, self.track_given_reactions);
                &fallback
            }
        };
        let profile = self.identities.get(row.i);

        RankedUser {
            i: row.i,
            v: row.v,
            username: profile.map(|p| p.username.clone()).unwrap_or_default(),
            display_name: self.identities.display_name(row.i),
            bio: profile.map(|p| p.bio.clone()).unwrap_or_default(),
            is_admin: self.admins.contains(&row.i),
            num_posts: stats.num_posts,
            num_received_reactions: stats.num_received_reactions,
            num_received_replies: stats.num_received_replies,
            num_given_reactions: stats.num_given_reactions,
            num_given_replies: stats.num_given_replies,
            first_post_at: stats.first_post_at,
            last_post_at: stats.last_post_at,
        }
    }

    pub fn enrich_all(&self, rows: &[ScoreEntry]) -> Vec<RankedUser> {
        rows.iter().map(|row| self.enrich(row)).collect()
    }
}

/// `min(1, (reactions + replies * K) / (posts * D))`, 0 for an empty corpus
pub fn engagement_score(constants: EngagementConstants, totals: &CommunityTotals) -> f64 {
    if totals.total_posts == 0 {
        return 0.0;
    }
    let interactions =
        totals.received_reactions as f64 + totals.received_replies as f64 * constants.reply_factor;
    let capacity = totals.total_posts as f64 * constants.post_divisor;
    round4(interactions / capacity).min(1.0)
}

#[inline]
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Inputs of the enriched report besides the ranked rows
#[derive(Debug, Clone, Copy)]
pub struct ReportMeta<'a> {
    pub community_id: &'a str,
    pub created_at: DateTime<Utc>,
    pub days_back: u32,
    pub engagement_score: f64,
}

pub fn build_report(
    meta: ReportMeta<'_>,
    activity: &ActivityReport,
    seed: Vec<RankedUser>,
    scores: Vec<RankedUser>,
) -> CommunityReport {
    CommunityReport {
        category: REPORT_CATEGORY.to_string(),
        channel: meta.community_id.to_string(),
        created_at: meta.created_at,
        days_back: meta.days_back,
        total_num_posts: activity.totals.total_posts,
        total_users: activity.total_users(),
        first_message_at: activity.totals.first_message_at,
        last_message_at: activity.totals.last_message_at,
        engagement_score: meta.engagement_score,
        seed,
        scores,
    }
}
