//! Service context - dependency container for services
//!
//! Holds the repository ports and the resolved run settings.

use std::sync::Arc;

use rank_common::{AppConfig, DefaultReason, EngagementConfig, ExportConfig, ResolvedWeights};
use rank_core::traits::{CommunityRepository, ReportRepository};
use rank_core::{CorpusShape, WeightConfig};
use tracing::warn;

use super::error::{ServiceError, ServiceResult};
use super::pipeline::PipelineSettings;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    community_repo: Arc<dyn CommunityRepository>,
    report_repo: Arc<dyn ReportRepository>,

    // Settings
    weights: WeightConfig,
    engagement: EngagementConfig,
    export: ExportConfig,
}

impl ServiceContext {
    pub fn new(
        community_repo: Arc<dyn CommunityRepository>,
        report_repo: Arc<dyn ReportRepository>,
        weights: WeightConfig,
        engagement: EngagementConfig,
        export: ExportConfig,
    ) -> Self {
        Self {
            community_repo,
            report_repo,
            weights,
            engagement,
            export,
        }
    }

    // === Repositories ===

    pub fn community_repo(&self) -> &dyn CommunityRepository {
        self.community_repo.as_ref()
    }

    pub fn report_repo(&self) -> &dyn ReportRepository {
        self.report_repo.as_ref()
    }

    // === Settings ===

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    pub fn engagement(&self) -> &EngagementConfig {
        &self.engagement
    }

    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Pipeline settings for one corpus shape
    pub fn settings_for(&self, shape: CorpusShape) -> PipelineSettings {
        PipelineSettings {
            weights: self.weights,
            engagement: self.engagement.for_shape(shape),
            members_only: self.export.members_only,
            days_back: self.export.days_back,
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("weights", &self.weights)
            .field("engagement", &self.engagement)
            .field("export", &self.export)
            .finish()
    }
}

/// Log every weight that fell back to a default
pub fn log_weight_defaults(resolved: &ResolvedWeights) {
    for defaulted in &resolved.defaulted {
        match defaulted.reason {
            DefaultReason::SectionMissing => warn!(
                key = defaulted.key,
                value = defaulted.value,
                "No [trust] section configured, using default weight"
            ),
            DefaultReason::KeyMissing => warn!(
                key = defaulted.key,
                value = defaulted.value,
                "Trust weight not configured, using default"
            ),
            DefaultReason::Invalid(configured) => warn!(
                key = defaulted.key,
                configured,
                value = defaulted.value,
                "Invalid trust weight replaced with default"
            ),
        }
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    community_repo: Option<Arc<dyn CommunityRepository>>,
    report_repo: Option<Arc<dyn ReportRepository>>,
    weights: Option<WeightConfig>,
    engagement: EngagementConfig,
    export: ExportConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            community_repo: None,
            report_repo: None,
            weights: None,
            engagement: EngagementConfig::default(),
            export: ExportConfig::default(),
        }
    }

    /// Take weights, engagement constants and export options from the app config.
    ///
    /// Substituted weight defaults are logged here.
    pub fn from_config(config: &AppConfig) -> Self {
        let resolved = config.weights();
        log_weight_defaults(&resolved);
        Self::new()
            .weights(resolved.weights)
            .engagement(config.engagement.clone())
            .export(config.export.clone())
    }

    pub fn community_repo(mut self, repo: Arc<dyn CommunityRepository>) -> Self {
        self.community_repo = Some(repo);
        self
    }

    pub fn report_repo(mut self, repo: Arc<dyn ReportRepository>) -> Self {
        self.report_repo = Some(repo);
        self
    }

    pub fn weights(mut self, weights: WeightConfig) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn engagement(mut self, engagement: EngagementConfig) -> Self {
        self.engagement = engagement;
        self
    }

    pub fn export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository or the weights are
    /// missing, or if a weight is negative or non-finite
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let weights = self
            .weights
            .ok_or_else(|| ServiceError::validation("weights are required"))?;
        weights
            .check()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        Ok(ServiceContext::new(
            self.community_repo
                .ok_or_else(|| ServiceError::validation("community_repo is required"))?,
            self.report_repo
                .ok_or_else(|| ServiceError::validation("report_repo is required"))?,
            weights,
            self.engagement,
            self.export,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
