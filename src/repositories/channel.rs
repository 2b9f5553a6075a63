//! Channel repository implementation
//!
//! Channels are persisted as JSON documents keyed by channel number.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Row, Sqlite};

use super::traits::ChannelStore;
use crate::errors::RepositoryResult;
use crate::models::Channel;

/// SQLite-backed channel storage
#[derive(Clone)]
pub struct ChannelRepository {
    pool: Pool<Sqlite>,
}

impl ChannelRepository {
    /// Create a new channel repository
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn decode(document: &str) -> RepositoryResult<Channel> {
        Ok(serde_json::from_str(document)?)
    }
}

#[async_trait]
impl ChannelStore for ChannelRepository {
    async fn get_all_channel_numbers(&self) -> RepositoryResult<Vec<i32>> {
        let numbers = sqlx::query_scalar::<_, i32>("SELECT number FROM channels ORDER BY number")
            .fetch_all(&self.pool)
            .await?;
        Ok(numbers)
    }

    async fn get_channel(&self, number: i32) -> RepositoryResult<Option<Channel>> {
        let row = sqlx::query("SELECT document FROM channels WHERE number = ?")
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::decode(&row.get::<String, _>("document"))?)),
            None => Ok(None),
        }
    }

    async fn list_channels(&self) -> RepositoryResult<Vec<Channel>> {
        let rows = sqlx::query("SELECT document FROM channels ORDER BY number")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| Self::decode(&row.get::<String, _>("document")))
            .collect()
    }

    async fn save_channel(&self, channel: &Channel) -> RepositoryResult<()> {
        let document = serde_json::to_string(channel)?;

        sqlx::query(
            "INSERT INTO channels (number, name, document, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(number) DO UPDATE SET
                name = excluded.name,
                document = excluded.document,
                updated_at = excluded.updated_at",
        )
        .bind(channel.number)
        .bind(&channel.name)
        .bind(document)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
