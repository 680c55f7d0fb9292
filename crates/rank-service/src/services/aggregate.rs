//! Score aggregation
//!
//! `raw_score(u)` is the sum of the weights of edges targeting `u`. Weight
//! contributions are kept per key and summed in sorted order, so the result
//! is bit-identical for any edge order and shards merge by concatenation.

use std::collections::BTreeMap;

use rank_core::{EdgeRow, TrustEdge, UserId};
use tracing::warn;

/// Accumulates edges into per-user and per-pair totals
#[derive(Debug, Clone, Default)]
pub struct ScoreAggregator {
    incoming: BTreeMap<UserId, Vec<f64>>,
    outgoing: BTreeMap<UserId, Vec<f64>>,
    pairs: BTreeMap<(UserId, UserId), Vec<f64>>,
    skipped_self_loops: usize,
}

impl ScoreAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<'e>(edges: impl IntoIterator<Item = &'e TrustEdge>) -> Self {
        let mut aggregator = Self::new();
        aggregator.extend(edges);
        aggregator
    }

    /// Add one edge; self-loops are counted and ignored
    pub fn add(&mut self, edge: &TrustEdge) {
        if edge.is_self_loop() {
            self.skipped_self_loops += 1;
            warn!(user = %edge.source, kind = %edge.kind, "Ignoring self-loop edge");
            return;
        }
        self.incoming.entry(edge.target).or_default().push(edge.weight);
        // Sources get an entry too so they score 0.0 rather than vanish
        self.incoming.entry(edge.source).or_default();
        self.outgoing.entry(edge.source).or_default().push(edge.weight);
        self.pairs.entry(edge.pair()).or_default().push(edge.weight);
    }

    pub fn extend<'e>(&mut self, edges: impl IntoIterator<Item = &'e TrustEdge>) {
        for edge in edges {
            self.add(edge);
        }
    }

    /// Fold another shard into this one
    pub fn merge(&mut self, other: Self) {
        for (user, weights) in other.incoming {
            self.incoming.entry(user).or_default().extend(weights);
        }
        for (user, weights) in other.outgoing {
            self.outgoing.entry(user).or_default().extend(weights);
        }
        for (pair, weights) in other.pairs {
            self.pairs.entry(pair).or_default().extend(weights);
        }
        self.skipped_self_loops += other.skipped_self_loops;
    }

    /// Raw score of every edge endpoint
    pub fn raw_scores(&self) -> BTreeMap<UserId, f64> {
        self.incoming
            .iter()
            .map(|(user, weights)| (*user, exact_sum(weights)))
            .collect()
    }

    /// Total weight each user conferred on others
    pub fn outgoing_totals(&self) -> BTreeMap<UserId, f64> {
        self.outgoing
            .iter()
            .map(|(user, weights)| (*user, exact_sum(weights)))
            .collect()
    }

    /// One row per ordered pair, sorted by `(i, j)`
    pub fn edge_rows(&self) -> Vec<EdgeRow> {
        self.pairs
            .iter()
            .map(|(&(i, j), weights)| EdgeRow {
                i,
                j,
                v: exact_sum(weights),
            })
            .collect()
    }

    pub fn skipped_self_loops(&self) -> usize {
        self.skipped_self_loops
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.incoming.is_empty()
    }
}

/// Order-independent sum
fn exact_sum(weights: &[f64]) -> f64 {
    let mut sorted = weights.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.iter().sum()
}
