//! Filesystem implementation of CommunityRepository

use async_trait::async_trait;
use tracing::{instrument, warn};

use rank_core::entities::{Corpus, CorpusShape, IdentityMap, ScoreEntry, UserProfile};
use rank_core::traits::{CommunityRepository, RepoResult};

use crate::layout::DataLayout;
use crate::mappers::{map_messages, map_seed_rows, map_user_rows};

use super::error::corpus_not_found;
use super::files::read_records;

/// Reads crawler exports from the raw and seed directories
#[derive(Debug, Clone)]
pub struct FsCommunityRepository {
    layout: DataLayout,
}

impl FsCommunityRepository {
    /// Create a new FsCommunityRepository
    pub fn new(layout: DataLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    async fn load_profiles(&self, community_id: &str, admins: bool) -> RepoResult<Vec<UserProfile>> {
        let (path, what) = if admins {
            (self.layout.admins_path(community_id), "admin")
        } else {
            (self.layout.users_path(community_id), "identity")
        };

        let Some(rows) = read_records(&path).await? else {
            warn!(community = %community_id, path = %path.display(), "No {what} export found");
            return Ok(Vec::new());
        };

        let (profiles, skipped) = map_user_rows(rows);
        if skipped > 0 {
            warn!(community = %community_id, skipped, "Skipped {what} rows without a user id");
        }
        Ok(profiles)
    }
}

#[async_trait]
impl CommunityRepository for FsCommunityRepository {
    #[instrument(skip(self))]
    async fn load_corpus(&self, community_id: &str, shape: CorpusShape) -> RepoResult<Corpus> {
        let path = self.layout.messages_path(community_id);
        let records = read_records(&path)
            .await?
            .ok_or_else(|| corpus_not_found(community_id))?;

        let mapped = map_messages(records);
        if mapped.skipped > 0 {
            warn!(
                community = %community_id,
                skipped = mapped.skipped,
                "Skipped malformed message records"
            );
        }

        let mut corpus = Corpus::new(community_id, shape, mapped.messages);
        corpus.skipped_records = mapped.skipped;
        Ok(corpus)
    }

    #[instrument(skip(self))]
    async fn load_identities(&self, community_id: &str) -> RepoResult<IdentityMap> {
        Ok(self.load_profiles(community_id, false).await?.into_iter().collect())
    }

    #[instrument(skip(self))]
    async fn load_admins(&self, community_id: &str) -> RepoResult<Vec<UserProfile>> {
        self.load_profiles(community_id, true).await
    }

    #[instrument(skip(self))]
    async fn load_seed(&self, community_id: &str) -> RepoResult<Vec<ScoreEntry>> {
        let path = self.layout.seed_path(community_id);
        let Some(rows) = read_records(&path).await? else {
            warn!(community = %community_id, path = %path.display(), "No seed list found");
            return Ok(Vec::new());
        };

        let (entries, skipped) = map_seed_rows(rows);
        if skipped > 0 {
            warn!(community = %community_id, skipped, "Skipped unreadable seed rows");
        }
        Ok(entries)
    }
}
