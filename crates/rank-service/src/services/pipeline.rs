//! Ranking pipeline
//!
//! Corpus -> walk -> trust graph -> aggregated scores -> normalized table,
//! with activity statistics and enrichment alongside. `rank_community` is
//! pure; `RankingService` adds loading, persistence and logging.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rank_core::{
    AdminSet, Community, CommunityReport, CorpusShape, EdgeRow, EngagementConstants, ScoreEntry,
    UserId, WeightConfig,
};
use tracing::{debug, info, instrument, warn};

use crate::dto::CommunityResult;

use super::aggregate::ScoreAggregator;
use super::context::ServiceContext;
use super::enrich::{build_report, engagement_score, Enricher, ReportMeta};
use super::error::ServiceResult;
use super::graph::{EdgeDiagnostics, TrustGraphBuilder};
use super::mentions::MentionIndex;
use super::normalize::normalize;
use super::stats::{ActivityCollector, CorpusSummary};
use super::traversal::layout_for;

/// Per-run knobs of the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineSettings {
    pub weights: WeightConfig,
    pub engagement: EngagementConstants,
    /// Drop admins from the score table before normalization
    pub members_only: bool,
    pub days_back: u32,
}

impl PipelineSettings {
    /// Stock engagement constants for the shape, everything else off
    pub fn new(weights: WeightConfig, shape: CorpusShape) -> Self {
        Self {
            weights,
            engagement: EngagementConstants::for_shape(shape),
            members_only: false,
            days_back: 0,
        }
    }
}

/// Everything one community run produces
#[derive(Debug, Clone)]
pub struct RankingOutcome {
    /// Summed per ordered pair, sorted by `(i, j)`
    pub edges: Vec<EdgeRow>,
    /// Normalized scores, highest first
    pub scores: Vec<ScoreEntry>,
    pub report: CommunityReport,
    pub summary: CorpusSummary,
    pub diagnostics: EdgeDiagnostics,
    /// Total weight each user conferred on others
    pub outgoing: BTreeMap<UserId, f64>,
    /// Messages walked, replies included
    pub messages: usize,
    /// Malformed records dropped while loading
    pub skipped_records: usize,
    pub duplicate_ids: usize,
    pub skipped_self_loops: usize,
}

/// Run the whole pipeline over an already loaded community
pub fn rank_community(
    community: &Community,
    settings: &PipelineSettings,
    created_at: DateTime<Utc>,
) -> RankingOutcome {
    let layout = layout_for(community.corpus.shape);
    let index = layout.walk(&community.corpus);

    let mentions = MentionIndex::build(&community.identities);
    let graph = TrustGraphBuilder::new(settings.weights, layout, &mentions).build(&index);

    let aggregator = ScoreAggregator::from_edges(&graph.edges);
    let mut raw = aggregator.raw_scores();
    if settings.members_only {
        raw.retain(|user, _| !community.admins.contains(user));
    }
    let scores: Vec<ScoreEntry> = normalize(&raw).iter().map(ScoreEntry::from).collect();

    let activity = ActivityCollector::new(layout).collect(&index);
    let enricher = Enricher::new(
        &community.identities,
        &community.admins,
        &activity,
        layout.tracks_given_reactions(),
    );
    let meta = ReportMeta {
        community_id: &community.id,
        created_at,
        days_back: settings.days_back,
        engagement_score: engagement_score(settings.engagement, &activity.totals),
    };
    let report = build_report(
        meta,
        &activity,
        enricher.enrich_all(&community.seed),
        enricher.enrich_all(&scores),
    );

    RankingOutcome {
        edges: aggregator.edge_rows(),
        scores,
        report,
        summary: CorpusSummary::from_index(&index),
        diagnostics: graph.diagnostics,
        outgoing: aggregator.outgoing_totals(),
        messages: index.len(),
        skipped_records: community.corpus.skipped_records,
        duplicate_ids: index.duplicate_ids(),
        skipped_self_loops: aggregator.skipped_self_loops(),
    }
}

/// Ranking service - loads, ranks and persists one community
pub struct RankingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RankingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load one community with its metadata.
    ///
    /// Only a missing or unreadable corpus fails; broken identity, admin or
    /// seed exports are logged and treated as empty.
    #[instrument(skip(self))]
    pub async fn load(&self, community_id: &str, shape: CorpusShape) -> ServiceResult<Community> {
        let repo = self.ctx.community_repo();
        let corpus = repo.load_corpus(community_id, shape).await?;

        let mut identities = repo.load_identities(community_id).await.unwrap_or_else(|e| {
            warn!(community = %community_id, error = %e, "Ignoring unreadable identity export");
            rank_core::IdentityMap::new()
        });
        let admin_profiles = repo.load_admins(community_id).await.unwrap_or_else(|e| {
            warn!(community = %community_id, error = %e, "Ignoring unreadable admin export");
            Vec::new()
        });
        let seed = repo.load_seed(community_id).await.unwrap_or_else(|e| {
            warn!(community = %community_id, error = %e, "Ignoring unreadable seed list");
            Vec::new()
        });

        let filled = identities.fill_from_admins(&admin_profiles);
        if filled > 0 {
            debug!(community = %community_id, filled, "Added admins missing from identity export");
        }
        let admins: AdminSet = admin_profiles.iter().map(|p| p.user_id).collect();

        Ok(Community::from_corpus(corpus)
            .with_identities(identities)
            .with_admins(admins)
            .with_seed(seed))
    }

    /// Load and rank without persisting anything
    #[instrument(skip(self))]
    pub async fn rank(&self, community_id: &str, shape: CorpusShape) -> ServiceResult<RankingOutcome> {
        let community = self.load(community_id, shape).await?;
        let settings = self.ctx.settings_for(shape);
        let created_at = Utc::now();

        // CPU-bound; keep it off the async workers
        let outcome =
            tokio::task::spawn_blocking(move || rank_community(&community, &settings, created_at))
                .await?;
        log_outcome(community_id, &outcome);
        Ok(outcome)
    }

    /// Rank one community and write its trust list, score table and report
    #[instrument(skip(self))]
    pub async fn run(&self, community_id: &str, shape: CorpusShape) -> ServiceResult<CommunityResult> {
        let outcome = self.rank(community_id, shape).await?;

        let reports = self.ctx.report_repo();
        reports.save_edges(community_id, &outcome.edges).await?;
        reports.save_scores(community_id, &outcome.scores).await?;
        reports.save_report(community_id, &outcome.report).await?;

        let result = CommunityResult::from_outcome(community_id, shape, &outcome);
        info!(
            community = %community_id,
            edges = result.edges,
            scored_users = result.scored_users,
            engagement = result.engagement_score,
            "Community ranked"
        );
        Ok(result)
    }
}

fn log_outcome(community_id: &str, outcome: &RankingOutcome) {
    let summary = &outcome.summary;
    info!(
        community = %community_id,
        posts_with_author = summary.posts_with_author,
        posts_without_author = summary.posts_without_author,
        total_replies = summary.total_replies,
        replies_with_author = summary.replies_with_author,
        total_reactions = summary.total_reactions,
        reactions_with_user_id = summary.reactions_with_user_id,
        "Corpus summary"
    );

    if outcome.skipped_records > 0 {
        debug!(
            community = %community_id,
            skipped_records = outcome.skipped_records,
            "Malformed records were skipped"
        );
    }
    if outcome.duplicate_ids > 0 {
        warn!(community = %community_id, duplicates = outcome.duplicate_ids, "Duplicate message ids");
    }

    let diagnostics = &outcome.diagnostics;
    for (kind, count) in &diagnostics.counts {
        let weight = diagnostics.weights.get(kind).copied().unwrap_or_default();
        debug!(community = %community_id, kind = %kind, count, weight, "Edges by kind");
    }
    debug!(
        community = %community_id,
        anonymous_reactions = diagnostics.anonymous_reactions,
        unresolved_mentions = diagnostics.unresolved_mentions,
        untargeted_replies = diagnostics.untargeted_replies,
        "Unresolved references"
    );
    for (user, total) in &outcome.outgoing {
        debug!(community = %community_id, user = %user, total, "Trust conferred");
    }
}
