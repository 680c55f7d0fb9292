//! Filesystem implementation of ReportRepository

use async_trait::async_trait;
use tracing::{debug, instrument};

use rank_core::entities::{CommunityReport, EdgeRow, ScoreEntry};
use rank_core::traits::{RepoResult, ReportRepository};

use crate::layout::DataLayout;

use super::files::write_json;

/// Writes `trust/`, `output/` and `ui/` documents under the output root
#[derive(Debug, Clone)]
pub struct FsReportRepository {
    layout: DataLayout,
}

impl FsReportRepository {
    /// Create a new FsReportRepository
    pub fn new(layout: DataLayout) -> Self {
        Self { layout }
    }
}

#[async_trait]
impl ReportRepository for FsReportRepository {
    #[instrument(skip(self, edges), fields(rows = edges.len()))]
    async fn save_edges(&self, community_id: &str, edges: &[EdgeRow]) -> RepoResult<()> {
        let path = self.layout.edges_path(community_id);
        write_json(&path, edges).await?;
        debug!(path = %path.display(), "Edge list written");
        Ok(())
    }

    #[instrument(skip(self, scores), fields(rows = scores.len()))]
    async fn save_scores(&self, community_id: &str, scores: &[ScoreEntry]) -> RepoResult<()> {
        let path = self.layout.scores_path(community_id);
        write_json(&path, scores).await?;
        debug!(path = %path.display(), "Score table written");
        Ok(())
    }

    #[instrument(skip(self, report))]
    async fn save_report(&self, community_id: &str, report: &CommunityReport) -> RepoResult<()> {
        let path = self.layout.report_path(community_id);
        write_json(&path, report).await?;
        debug!(path = %path.display(), "Report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rank_core::{UserId, REPORT_CATEGORY};

    #[tokio::test]
    async fn test_save_edges_and_scores() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::rooted_at(dir.path());
        let repo = FsReportRepository::new(layout.clone());

        let edges = vec![EdgeRow {
            i: UserId::new(200),
            j: UserId::new(100),
            v: 70.0,
        }];
        repo.save_edges("5", &edges).await.unwrap();
        let written: Vec<EdgeRow> =
            serde_json::from_slice(&std::fs::read(layout.edges_path("5")).unwrap()).unwrap();
        assert_eq!(written, edges);

        let scores = vec![ScoreEntry::new(UserId::new(100), 1000.0)];
        repo.save_scores("5", &scores).await.unwrap();
        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(layout.scores_path("5")).unwrap()).unwrap();
        assert_eq!(written[0]["i"], "100");
        assert_eq!(written[0]["v"], 1000.0);
        assert!(!layout.scores_path("5").with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_report_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let layout = DataLayout::rooted_at(dir.path());
        let repo = FsReportRepository::new(layout.clone());

        let mut report = CommunityReport {
            category: REPORT_CATEGORY.to_string(),
            channel: "5".to_string(),
            created_at: Utc::now(),
            days_back: 7,
            total_num_posts: 3,
            total_users: 2,
            first_message_at: None,
            last_message_at: None,
            engagement_score: 0.25,
            seed: Vec::new(),
            scores: Vec::new(),
        };
        repo.save_report("5", &report).await.unwrap();
        report.total_num_posts = 4;
        repo.save_report("5", &report).await.unwrap();

        let written: CommunityReport =
            serde_json::from_slice(&std::fs::read(layout.report_path("5")).unwrap()).unwrap();
        assert_eq!(written.total_num_posts, 4);
        assert_eq!(written.category, "socialrank");
    }
}
