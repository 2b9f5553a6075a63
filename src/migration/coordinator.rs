use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};

use super::collection::{CollectionFixer, ConcurrentFixer};
use super::holders::{ChannelCollection, CustomShowCollection, FillerCollection};
use crate::cache::ChannelCache;
use crate::config::MigrationConfig;
use crate::errors::AppResult;
use crate::models::{MigrationReportRow, MigrationSummary, OriginServer};
use crate::repositories::{ChannelStore, CustomShowStore, FillerStore};

/// Reconciles every stored program holder with an origin identity change
///
/// Each registered collection pass runs concurrently. Report rows are
/// concatenated in registration order, so the standard coordinator reports
/// channels first, then fillers, then custom shows.
pub struct MigrationCoordinator {
    fixers: Vec<Arc<dyn CollectionFixer>>,
}

impl MigrationCoordinator {
    /// Coordinator with no collections registered
    pub fn empty() -> Self {
        Self { fixers: Vec::new() }
    }

    /// Coordinator over channels, fillers and custom shows
    pub fn new(
        channels: Arc<dyn ChannelStore>,
        fillers: Arc<dyn FillerStore>,
        shows: Arc<dyn CustomShowStore>,
        cache: ChannelCache,
        offline_picture_url: impl Into<String>,
        config: &MigrationConfig,
    ) -> Self {
        let limit = config.max_concurrent_writes;
        Self::empty()
            .with_fixer(Arc::new(ConcurrentFixer::new(
                ChannelCollection::new(channels, cache, offline_picture_url),
                limit,
            )))
            .with_fixer(Arc::new(ConcurrentFixer::new(
                FillerCollection::new(fillers),
                limit,
            )))
            .with_fixer(Arc::new(ConcurrentFixer::new(
                CustomShowCollection::new(shows),
                limit,
            )))
    }

    /// Register an additional collection pass
    pub fn with_fixer(mut self, fixer: Arc<dyn CollectionFixer>) -> Self {
        self.fixers.push(fixer);
        self
    }

    /// Migrate every program bound to `origin_name`.
    ///
    /// With `new_origin` present, bound programs have their artwork moved to
    /// the new address and credential. Without it the origin is being retired
    /// and bound programs become offline placeholders.
    ///
    /// All collection passes run to completion even if one fails; the first
    /// failure (in registration order) is returned. Entity writes committed
    /// before the failure are kept.
    pub async fn migrate(
        &self,
        origin_name: &str,
        new_origin: Option<&OriginServer>,
    ) -> AppResult<Vec<MigrationReportRow>> {
        info!(
            "Starting {} migration for origin '{}' across {} collections",
            if new_origin.is_some() { "rename" } else { "retire" },
            origin_name,
            self.fixers.len()
        );

        let passes = self
            .fixers
            .iter()
            .map(|fixer| fixer.fix_collection(origin_name, new_origin));
        let results = join_all(passes).await;

        let mut report = Vec::new();
        for result in results {
            report.extend(result?);
        }

        for row in &report {
            debug!(
                entity = %row.entity_label,
                channel_number = row.channel_number,
                destroyed = row.destroyed_count,
                modified = row.modified_count,
                "Migration report row"
            );
        }

        let summary = MigrationSummary::from_rows(&report);
        info!(
            "Migration for origin '{}' complete: {} entities, {} programs destroyed, {} modified",
            origin_name, summary.entities, summary.destroyed, summary.modified
        );

        Ok(report)
    }
}
