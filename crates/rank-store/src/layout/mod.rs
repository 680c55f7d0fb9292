//! Directory layout of crawler inputs and pipeline outputs

use std::path::{Path, PathBuf};

use rank_common::DataConfig;

/// Where each per-community file lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    raw_dir: PathBuf,
    seed_dir: PathBuf,
    output_dir: PathBuf,
}

impl DataLayout {
    pub const TRUST_DIR: &'static str = "trust";
    pub const SCORES_DIR: &'static str = "output";
    pub const REPORT_DIR: &'static str = "ui";

    pub fn new(
        raw_dir: impl Into<PathBuf>,
        seed_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            seed_dir: seed_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(&config.raw_dir, &config.seed_dir, &config.output_dir)
    }

    /// All inputs and outputs under one root: `raw/`, `seed/`, `trust/`, `output/`, `ui/`
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(root.join("raw"), root.join("seed"), root)
    }

    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    pub fn seed_dir(&self) -> &Path {
        &self.seed_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn messages_path(&self, community_id: &str) -> PathBuf {
        self.raw_dir.join(format!("{community_id}_messages.json"))
    }

    pub fn users_path(&self, community_id: &str) -> PathBuf {
        self.raw_dir.join(format!("{community_id}_users.json"))
    }

    pub fn admins_path(&self, community_id: &str) -> PathBuf {
        self.raw_dir.join(format!("{community_id}_admins.json"))
    }

    pub fn seed_path(&self, community_id: &str) -> PathBuf {
        self.seed_dir.join(format!("{community_id}.json"))
    }

    pub fn edges_path(&self, community_id: &str) -> PathBuf {
        self.output_dir
            .join(Self::TRUST_DIR)
            .join(format!("{community_id}.json"))
    }

    pub fn scores_path(&self, community_id: &str) -> PathBuf {
        self.output_dir
            .join(Self::SCORES_DIR)
            .join(format!("{community_id}.json"))
    }

    pub fn report_path(&self, community_id: &str) -> PathBuf {
        self.output_dir
            .join(Self::REPORT_DIR)
            .join(format!("{community_id}.json"))
    }
}
