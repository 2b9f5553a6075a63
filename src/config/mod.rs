use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for configuration overrides,
/// e.g. `CHANNEL_ORIGINS__WEB__PORT=9000`.
pub const ENV_PREFIX: &str = "CHANNEL_ORIGINS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub web: WebConfig,
    pub migration: MigrationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Upper bound on concurrently running entity fixups within one collection
    pub max_concurrent_writes: usize,
    /// Path (relative to `web.base_url`) of the picture shown by channels
    /// whose fallback schedule was reset
    pub offline_picture_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://./channel-origins.db".to_string(),
                max_connections: Some(10),
            },
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                base_url: "http://localhost:8000".to_string(),
            },
            migration: MigrationConfig::default(),
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            max_concurrent_writes: 8,
            offline_picture_path: "/images/generic-offline-screen.png".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, the TOML file at `path` and
    /// `CHANNEL_ORIGINS__*` environment variables, in increasing precedence.
    ///
    /// A missing file is created with the default configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::default();

        if !path.exists() {
            let contents = toml::to_string_pretty(&defaults)?;
            std::fs::write(path, contents)?;
        }

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Picture URL assigned to channels whose offline fallback was reset
    pub fn offline_picture_url(&self) -> String {
        format!(
            "{}{}",
            self.web.base_url.trim_end_matches('/'),
            self.migration.offline_picture_path
        )
    }
}
