//! Origin server lifecycle service
//!
//! Registers, reconfigures and removes origin media servers. Reconfiguring
//! or removing an origin runs a migration over every stored program holder
//! before the registry record changes.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::migration::MigrationCoordinator;
use crate::models::{
    normalize_address, MigrationReportRow, OriginServer, OriginServerCreateRequest,
    OriginServerUpdateRequest,
};
use crate::repositories::OriginServerStore;

/// Base name used when a new origin is registered without one
pub const DEFAULT_ORIGIN_NAME: &str = "plex";

/// Service for managing origin servers
///
/// Concurrent calls for the same origin name are not serialized here; the
/// caller is responsible for any exclusion it needs.
#[derive(Clone)]
pub struct OriginServerService {
    store: Arc<dyn OriginServerStore>,
    coordinator: Arc<MigrationCoordinator>,
}

impl OriginServerService {
    pub fn new(store: Arc<dyn OriginServerStore>, coordinator: Arc<MigrationCoordinator>) -> Self {
        Self { store, coordinator }
    }

    /// All registered origins ordered by display index
    pub async fn list_origins(&self) -> AppResult<Vec<OriginServer>> {
        Ok(self.store.list().await?)
    }

    pub async fn get_origin(&self, name: &str) -> AppResult<OriginServer> {
        self.store
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found("origin server", name))
    }

    pub async fn does_name_exist(&self, name: &str) -> AppResult<bool> {
        Ok(self.store.find_by_name(name).await?.is_some())
    }

    /// Register a new origin server.
    ///
    /// A taken name gets the first free numeric suffix (`studio`, `studio2`,
    /// `studio3`, ...). No migration runs since nothing can be bound to a
    /// brand-new origin.
    pub async fn add_origin(&self, candidate: OriginServerCreateRequest) -> AppResult<OriginServer> {
        validate_address(&candidate.address)?;

        let base = candidate
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_ORIGIN_NAME);
        let name = self.resolve_unique_name(base).await?;
        let count = self.store.count().await?;
        let display_index = i64::try_from(count).map_err(|_| {
            AppError::internal(format!("Origin server count {} exceeds display index range", count))
        })?;

        let now = Utc::now();
        let mut server = OriginServer {
            id: Uuid::new_v4(),
            name,
            address: candidate.address,
            credential: candidate.credential,
            send_guide_updates: candidate.send_guide_updates.unwrap_or(false),
            send_channel_updates: candidate.send_channel_updates.unwrap_or(false),
            display_index,
            created_at: now,
            updated_at: now,
        };
        server.normalize();

        self.store.insert(&server).await?;
        info!(
            "Registered origin server '{}' at {} (index {})",
            server.name, server.address, server.display_index
        );

        Ok(server)
    }

    /// Reconfigure an existing origin server and migrate its programs.
    ///
    /// The registry record is only updated after the migration succeeds.
    pub async fn update_origin(
        &self,
        patch: OriginServerUpdateRequest,
    ) -> AppResult<Vec<MigrationReportRow>> {
        let name = patch
            .name
            .as_deref()
            .ok_or_else(|| AppError::validation("Missing server name from request"))?;
        let existing = self
            .store
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found("origin server", name))?;
        validate_address(&patch.address)?;

        let mut updated = OriginServer {
            address: patch.address,
            credential: patch.credential,
            send_guide_updates: patch
                .send_guide_updates
                .unwrap_or(existing.send_guide_updates),
            send_channel_updates: patch
                .send_channel_updates
                .unwrap_or(existing.send_channel_updates),
            updated_at: Utc::now(),
            ..existing.clone()
        };
        updated.normalize();

        let report = self.coordinator.migrate(&existing.name, Some(&updated)).await?;
        self.store.update_by_id(existing.id, &updated).await?;

        info!(
            "Updated origin server '{}' (address {} -> {})",
            updated.name, existing.address, updated.address
        );
        Ok(report)
    }

    /// Retire an origin server: every bound program becomes an offline
    /// placeholder, then the registry record is removed.
    pub async fn delete_origin(&self, name: &str) -> AppResult<Vec<MigrationReportRow>> {
        if name.trim().is_empty() {
            return Err(AppError::validation("Missing server name from request"));
        }

        let report = self.coordinator.migrate(name, None).await?;

        if self.store.remove_by_name(name).await? {
            info!("Removed origin server '{}'", name);
        } else {
            warn!(
                "Origin server '{}' was not registered; bound programs were still retired",
                name
            );
        }

        Ok(report)
    }

    async fn resolve_unique_name(&self, base: &str) -> AppResult<String> {
        let mut candidate = base.to_string();
        let mut suffix = 2u32;
        while self.does_name_exist(&candidate).await? {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }
        Ok(candidate)
    }
}

/// Origin addresses must be absolute http(s) URLs
fn validate_address(address: &str) -> AppResult<()> {
    let normalized = normalize_address(address);
    let url = Url::parse(&normalized)
        .map_err(|e| AppError::validation(format!("Invalid origin address '{}': {}", address, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AppError::validation(format!(
            "Unsupported origin address scheme '{}'",
            other
        ))),
    }
}
