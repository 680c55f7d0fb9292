//! Trust graph builder
//!
//! Four independent, additive rule families turn a walked corpus into
//! directed weighted edges. Self-interactions never produce an edge.

use std::collections::BTreeMap;

use rank_core::{InteractionKind, TrustEdge, UserId, WeightConfig};

use super::mentions::MentionIndex;
use super::traversal::{CorpusIndex, CorpusLayout};

/// Per-kind edge tallies for diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeDiagnostics {
    pub counts: BTreeMap<InteractionKind, usize>,
    pub weights: BTreeMap<InteractionKind, f64>,
    /// Reactions whose reactor is unknown (aggregated counts)
    pub anonymous_reactions: usize,
    /// Mention tokens that matched no username
    pub unresolved_mentions: usize,
    /// Replies whose target could not be determined
    pub untargeted_replies: usize,
}

impl EdgeDiagnostics {
    fn record(&mut self, edge: &TrustEdge) {
        *self.counts.entry(edge.kind).or_default() += 1;
        *self.weights.entry(edge.kind).or_default() += edge.weight;
    }

    pub fn total_edges(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn count(&self, kind: InteractionKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or_default()
    }
}

/// Emitted edges with their diagnostics
#[derive(Debug, Clone, Default)]
pub struct TrustGraph {
    pub edges: Vec<TrustEdge>,
    pub diagnostics: EdgeDiagnostics,
}

impl TrustGraph {
    fn push(&mut self, source: UserId, target: UserId, weight: f64, kind: InteractionKind) {
        if let Some(edge) = TrustEdge::new(source, target, weight, kind) {
            self.diagnostics.record(&edge);
            self.edges.push(edge);
        }
    }
}

/// Builds the trust graph of one corpus
pub struct TrustGraphBuilder<'a> {
    weights: WeightConfig,
    layout: &'a dyn CorpusLayout,
    mentions: &'a MentionIndex,
}

impl<'a> TrustGraphBuilder<'a> {
    pub fn new(weights: WeightConfig, layout: &'a dyn CorpusLayout, mentions: &'a MentionIndex) -> Self {
        Self {
            weights,
            layout,
            mentions,
        }
    }

    /// Emit every edge implied by the walked corpus
    pub fn build(&self, index: &CorpusIndex<'_>) -> TrustGraph {
        let mut graph = TrustGraph::default();

        for visit in index.visits() {
            let message = visit.message;

            // Reactions: reactor -> author
            for reaction in &message.reactions {
                match (reaction.attributable_reactor(), message.author_id) {
                    (Some(reactor), Some(author)) => graph.push(
                        reactor,
                        author,
                        self.weights.reaction_weight,
                        InteractionKind::Reaction,
                    ),
                    (None, _) => graph.diagnostics.anonymous_reactions += 1,
                    (Some(_), None) => {}
                }
            }

            let Some(author) = message.author_id else {
                continue;
            };

            // Replies: replier -> replied-to author
            if visit.is_reply() {
                match index.reply_target(visit) {
                    Some(target) => {
                        graph.push(author, target, self.weights.reply_weight, InteractionKind::Reply);
                    }
                    None => graph.diagnostics.untargeted_replies += 1,
                }
            }

            // Mentions: author -> mentioned
            for username in super::mentions::mention_tokens(message.body()) {
                match self.mentions.resolve(username) {
                    Some(mentioned) => graph.push(
                        author,
                        mentioned,
                        self.weights.mention_weight,
                        InteractionKind::Mention,
                    ),
                    None => graph.diagnostics.unresolved_mentions += 1,
                }
            }
        }

        if self.layout.has_threads() {
            self.thread_edges(index, &mut graph);
        }

        graph
    }

    /// Both directions for every pair of distinct reply authors in a thread,
    /// scaled by the smaller of their reply counts
    fn thread_edges(&self, index: &CorpusIndex<'_>, graph: &mut TrustGraph) {
        let weight = self.weights.thread_participation_weight;
        for participants in index.threads().values() {
            let participants: Vec<(UserId, u64)> =
                participants.iter().map(|(user, count)| (*user, *count)).collect();
            for (i, &(a, count_a)) in participants.iter().enumerate() {
                for &(b, count_b) in &participants[i + 1..] {
                    let pair_weight = weight * count_a.min(count_b) as f64;
                    graph.push(a, b, pair_weight, InteractionKind::ThreadParticipation);
                    graph.push(b, a, pair_weight, InteractionKind::ThreadParticipation);
                }
            }
        }
    }
}
