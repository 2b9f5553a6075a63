//! Filler and custom show repository implementations
//!
//! Both collections share the same layout: an id, a display name and the
//! full entity as a JSON document. Enumeration order is insertion order
//! (SQLite rowid), which keeps migration reports stable between runs.

use async_trait::async_trait;
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{Pool, Row, Sqlite};

use super::traits::{CustomShowStore, FillerStore};
use crate::errors::RepositoryResult;
use crate::models::{CustomShow, Filler};

async fn load_documents<T: DeserializeOwned>(
    pool: &Pool<Sqlite>,
    table: &str,
) -> RepositoryResult<Vec<T>> {
    let query = format!("SELECT document FROM {} ORDER BY rowid", table);
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    rows.iter()
        .map(|row| -> RepositoryResult<T> {
            Ok(serde_json::from_str(&row.get::<String, _>("document"))?)
        })
        .collect()
}

async fn upsert_document<T: Serialize>(
    pool: &Pool<Sqlite>,
    table: &str,
    id: &str,
    name: &str,
    entity: &T,
) -> RepositoryResult<()> {
    let document = serde_json::to_string(entity)?;
    let query = format!(
        "INSERT INTO {} (id, name, document, updated_at)
         VALUES (?, ?, ?, ?)
         ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            document = excluded.document,
            updated_at = excluded.updated_at",
        table
    );

    sqlx::query(&query)
        .bind(id)
        .bind(name)
        .bind(document)
        .bind(Utc::now().to_rfc3339())
        .execute(pool)
        .await?;

    Ok(())
}

/// SQLite-backed filler storage
#[derive(Clone)]
pub struct FillerRepository {
    pool: Pool<Sqlite>,
}

impl FillerRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FillerStore for FillerRepository {
    async fn get_all_fillers(&self) -> RepositoryResult<Vec<Filler>> {
        load_documents(&self.pool, "fillers").await
    }

    async fn save_filler(&self, id: &str, filler: &Filler) -> RepositoryResult<()> {
        upsert_document(&self.pool, "fillers", id, &filler.name, filler).await
    }
}

/// SQLite-backed custom show storage
#[derive(Clone)]
pub struct CustomShowRepository {
    pool: Pool<Sqlite>,
}

impl CustomShowRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomShowStore for CustomShowRepository {
    async fn get_all_shows(&self) -> RepositoryResult<Vec<CustomShow>> {
        load_documents(&self.pool, "custom_shows").await
    }

    async fn save_show(&self, id: &str, show: &CustomShow) -> RepositoryResult<()> {
        upsert_document(&self.pool, "custom_shows", id, &show.name, show).await
    }
}
