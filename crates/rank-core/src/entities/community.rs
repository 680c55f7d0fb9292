//! Community aggregate - everything one processing run needs

use super::corpus::Corpus;
use super::export::ScoreEntry;
use super::identity::{AdminSet, IdentityMap};

/// One community's corpus together with its external metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Community {
    pub id: String,
    pub corpus: Corpus,
    pub identities: IdentityMap,
    pub admins: AdminSet,
    /// Seed trust list, exported alongside the computed scores
    pub seed: Vec<ScoreEntry>,
}

impl Community {
    /// Community with only a corpus and no metadata
    pub fn from_corpus(corpus: Corpus) -> Self {
        Self {
            id: corpus.community_id.clone(),
            corpus,
            identities: IdentityMap::new(),
            admins: AdminSet::new(),
            seed: Vec::new(),
        }
    }

    pub fn with_identities(mut self, identities: IdentityMap) -> Self {
        self.identities = identities;
        self
    }

    pub fn with_admins(mut self, admins: AdminSet) -> Self {
        self.admins = admins;
        self
    }

    pub fn with_seed(mut self, seed: Vec<ScoreEntry>) -> Self {
        self.seed = seed;
        self
    }
}
