use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqlitePool, SqlitePoolOptions},
    Pool, Sqlite,
};
use tracing::info;

/// Shared handle to the SQLite connection pool
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    pub fn pool(&self) -> Pool<Sqlite> {
        self.pool.clone()
    }

    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        // Create database if it doesn't exist (for SQLite)
        if !Sqlite::database_exists(&config.url).await? {
            Sqlite::create_database(&config.url).await?;
        }

        let pool = if Self::is_in_memory(&config.url) {
            // Every connection to `:memory:` opens a separate database, so the
            // pool must hold exactly one connection for its whole lifetime.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&config.url)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections.unwrap_or(10))
                .connect(&config.url)
                .await?
        };

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    fn is_in_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }
}
