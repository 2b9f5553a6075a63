//! Origin server repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Pool, Row, Sqlite};
use uuid::Uuid;

use super::traits::OriginServerStore;
use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::OriginServer;

const SELECT_COLUMNS: &str = "SELECT id, name, address, credential, send_guide_updates,
    send_channel_updates, display_index, created_at, updated_at FROM origin_servers";

/// SQLite-backed origin server registry storage
#[derive(Clone)]
pub struct OriginServerRepository {
    pool: Pool<Sqlite>,
}

impl OriginServerRepository {
    /// Create a new origin server repository
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn from_row(row: &SqliteRow) -> RepositoryResult<OriginServer> {
        let id: String = row.get("id");
        Ok(OriginServer {
            id: Uuid::parse_str(&id)
                .map_err(|e| RepositoryError::query_failed("decode origin_servers.id", e.to_string()))?,
            name: row.get("name"),
            address: row.get("address"),
            credential: row.get("credential"),
            send_guide_updates: row.get("send_guide_updates"),
            send_channel_updates: row.get("send_channel_updates"),
            display_index: row.get("display_index"),
            created_at: parse_timestamp(&row.get::<String, _>("created_at"))?,
            updated_at: parse_timestamp(&row.get::<String, _>("updated_at"))?,
        })
    }
}

fn parse_timestamp(value: &str) -> RepositoryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::query_failed("decode timestamp", e.to_string()))
}

#[async_trait]
impl OriginServerStore for OriginServerRepository {
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<OriginServer>> {
        let query = format!("{} WHERE name = ?", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn list(&self) -> RepositoryResult<Vec<OriginServer>> {
        let query = format!("{} ORDER BY display_index, name", SELECT_COLUMNS);
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM origin_servers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as u64)
    }

    async fn insert(&self, server: &OriginServer) -> RepositoryResult<()> {
        let result = sqlx::query(
            "INSERT INTO origin_servers (id, name, address, credential, send_guide_updates,
             send_channel_updates, display_index, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(server.id.to_string())
        .bind(&server.name)
        .bind(&server.address)
        .bind(&server.credential)
        .bind(server.send_guide_updates)
        .bind(server.send_channel_updates)
        .bind(server.display_index)
        .bind(server.created_at.to_rfc3339())
        .bind(server.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(RepositoryError::constraint_violation(
                    "origin_servers.name",
                    format!("an origin server named '{}' already exists", server.name),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_by_id(&self, id: Uuid, server: &OriginServer) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE origin_servers SET name = ?, address = ?, credential = ?,
             send_guide_updates = ?, send_channel_updates = ?, display_index = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&server.name)
        .bind(&server.address)
        .bind(&server.credential)
        .bind(server.send_guide_updates)
        .bind(server.send_channel_updates)
        .bind(server.display_index)
        .bind(server.updated_at.to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::record_not_found(
                "origin_servers",
                "id",
                id.to_string(),
            ));
        }

        Ok(())
    }

    async fn remove_by_name(&self, name: &str) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM origin_servers WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
