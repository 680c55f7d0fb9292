//! Test helpers for integration tests
//!
//! In-memory repositories implementing both ports, and a temporary data
//! directory laid out like a real deployment.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use rank_core::traits::{CommunityRepository, RepoResult, ReportRepository};
use rank_core::{
    CommunityReport, Corpus, CorpusShape, DomainError, EdgeRow, IdentityMap, Message, ScoreEntry,
    UserProfile, WeightConfig,
};
use rank_service::{ServiceContext, ServiceContextBuilder};
use rank_store::DataLayout;
use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;

/// Weights used by most tests
pub fn test_weights() -> WeightConfig {
    WeightConfig::new(30.0, 40.0, 50.0).with_thread_participation(10.0)
}

// ============================================================================
// In-memory repositories
// ============================================================================

#[derive(Debug, Clone, Default)]
struct StoredCommunity {
    messages: Vec<Message>,
    identities: Vec<UserProfile>,
    admins: Vec<UserProfile>,
    seed: Vec<ScoreEntry>,
}

/// Everything the report repository received for one community
#[derive(Debug, Clone, Default)]
pub struct SavedOutputs {
    pub edges: Vec<EdgeRow>,
    pub scores: Vec<ScoreEntry>,
    pub report: Option<CommunityReport>,
}

/// In-memory store serving inputs and capturing outputs
#[derive(Debug, Default)]
pub struct MemoryStore {
    communities: Mutex<HashMap<String, StoredCommunity>>,
    outputs: Mutex<HashMap<String, SavedOutputs>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn with_community(&self, community_id: &str, f: impl FnOnce(&mut StoredCommunity)) {
        let mut communities = self.communities.lock().unwrap();
        f(communities.entry(community_id.to_string()).or_default());
    }

    pub fn add_messages(&self, community_id: &str, messages: Vec<Message>) {
        self.with_community(community_id, |c| c.messages.extend(messages));
    }

    pub fn add_identities(&self, community_id: &str, profiles: Vec<UserProfile>) {
        self.with_community(community_id, |c| c.identities.extend(profiles));
    }

    pub fn add_admins(&self, community_id: &str, profiles: Vec<UserProfile>) {
        self.with_community(community_id, |c| c.admins.extend(profiles));
    }

    pub fn set_seed(&self, community_id: &str, seed: Vec<ScoreEntry>) {
        self.with_community(community_id, |c| c.seed = seed);
    }

    /// Outputs saved for a community, if any were
    pub fn outputs(&self, community_id: &str) -> Option<SavedOutputs> {
        self.outputs.lock().unwrap().get(community_id).cloned()
    }

    fn stored(&self, community_id: &str) -> Option<StoredCommunity> {
        self.communities.lock().unwrap().get(community_id).cloned()
    }

    fn save(&self, community_id: &str, f: impl FnOnce(&mut SavedOutputs)) {
        let mut outputs = self.outputs.lock().unwrap();
        f(outputs.entry(community_id.to_string()).or_default());
    }
}

#[async_trait]
impl CommunityRepository for MemoryStore {
    async fn load_corpus(&self, community_id: &str, shape: CorpusShape) -> RepoResult<Corpus> {
        let stored = self
            .stored(community_id)
            .ok_or_else(|| DomainError::CorpusNotFound(community_id.to_string()))?;
        Ok(Corpus::new(community_id, shape, stored.messages))
    }

    async fn load_identities(&self, community_id: &str) -> RepoResult<IdentityMap> {
        Ok(self
            .stored(community_id)
            .map(|c| c.identities.into_iter().collect())
            .unwrap_or_default())
    }

    async fn load_admins(&self, community_id: &str) -> RepoResult<Vec<UserProfile>> {
        Ok(self.stored(community_id).map(|c| c.admins).unwrap_or_default())
    }

    async fn load_seed(&self, community_id: &str) -> RepoResult<Vec<ScoreEntry>> {
        Ok(self.stored(community_id).map(|c| c.seed).unwrap_or_default())
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn save_edges(&self, community_id: &str, edges: &[EdgeRow]) -> RepoResult<()> {
        self.save(community_id, |o| o.edges = edges.to_vec());
        Ok(())
    }

    async fn save_scores(&self, community_id: &str, scores: &[ScoreEntry]) -> RepoResult<()> {
        self.save(community_id, |o| o.scores = scores.to_vec());
        Ok(())
    }

    async fn save_report(&self, community_id: &str, report: &CommunityReport) -> RepoResult<()> {
        self.save(community_id, |o| o.report = Some(report.clone()));
        Ok(())
    }
}

/// Service context reading from and writing to one memory store
pub fn memory_context(store: &Arc<MemoryStore>, weights: WeightConfig) -> Result<ServiceContext> {
    let context = ServiceContextBuilder::new()
        .community_repo(Arc::clone(store) as Arc<dyn CommunityRepository>)
        .report_repo(Arc::clone(store) as Arc<dyn ReportRepository>)
        .weights(weights)
        .build()?;
    Ok(context)
}

// ============================================================================
// Filesystem workspace
// ============================================================================

/// Temporary data root with `raw/`, `seed/` and output directories
pub struct TestWorkspace {
    dir: TempDir,
    layout: DataLayout,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let layout = DataLayout::rooted_at(dir.path());
        Ok(Self { dir, layout })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec_pretty(value)?)?;
        Ok(())
    }

    pub fn write_messages<T: Serialize + ?Sized>(&self, community_id: &str, records: &T) -> Result<()> {
        Self::write_json(&self.layout.messages_path(community_id), records)
    }

    pub fn write_users<T: Serialize + ?Sized>(&self, community_id: &str, rows: &T) -> Result<()> {
        Self::write_json(&self.layout.users_path(community_id), rows)
    }

    pub fn write_admins<T: Serialize + ?Sized>(&self, community_id: &str, rows: &T) -> Result<()> {
        Self::write_json(&self.layout.admins_path(community_id), rows)
    }

    pub fn write_seed<T: Serialize + ?Sized>(&self, community_id: &str, rows: &T) -> Result<()> {
        Self::write_json(&self.layout.seed_path(community_id), rows)
    }

    pub fn write_raw(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        Ok(serde_json::from_slice(&std::fs::read(path)?)?)
    }

    /// `[data]` and `[channels]` TOML pointing at this workspace
    pub fn config_toml(&self, include: &[&str], flat: &[&str]) -> String {
        let quoted = |ids: &[&str]| {
            ids.iter()
                .map(|id| format!("\"{id}\""))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let shapes = flat
            .iter()
            .map(|id| format!("\"{id}\" = \"flat\""))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "[data]\nraw_dir = \"{raw}\"\nseed_dir = \"{seed}\"\noutput_dir = \"{out}\"\n\n\
             [channels]\ninclude = [{include}]\nshapes = {{ {shapes} }}\n",
            raw = self.layout.raw_dir().display(),
            seed = self.layout.seed_dir().display(),
            out = self.layout.output_dir().display(),
            include = quoted(include),
        )
    }
}
