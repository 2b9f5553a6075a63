//! Shared application context
//!
//! Built once at startup and handed to the web layer. Cloning is cheap;
//! every member is reference counted.

use std::sync::Arc;

use crate::cache::ChannelCache;
use crate::config::Config;
use crate::database::Database;
use crate::migration::MigrationCoordinator;
use crate::repositories::{
    ChannelRepository, ChannelStore, CustomShowRepository, CustomShowStore, FillerRepository,
    FillerStore, OriginServerRepository, OriginServerStore,
};
use crate::services::OriginServerService;

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub database: Database,
    pub channels: Arc<dyn ChannelStore>,
    pub fillers: Arc<dyn FillerStore>,
    pub custom_shows: Arc<dyn CustomShowStore>,
    pub origin_servers: Arc<dyn OriginServerStore>,
    pub channel_cache: ChannelCache,
    pub coordinator: Arc<MigrationCoordinator>,
    pub origin_service: Arc<OriginServerService>,
}

impl AppContext {
    /// Wire the SQLite repositories, channel cache, migration coordinator
    /// and origin service together
    pub fn new(config: Config, database: Database) -> Self {
        let pool = database.pool();
        let channels: Arc<dyn ChannelStore> = Arc::new(ChannelRepository::new(pool.clone()));
        let fillers: Arc<dyn FillerStore> = Arc::new(FillerRepository::new(pool.clone()));
        let custom_shows: Arc<dyn CustomShowStore> =
            Arc::new(CustomShowRepository::new(pool.clone()));
        let origin_servers: Arc<dyn OriginServerStore> =
            Arc::new(OriginServerRepository::new(pool));

        let channel_cache = ChannelCache::new();
        let coordinator = Arc::new(MigrationCoordinator::new(
            Arc::clone(&channels),
            Arc::clone(&fillers),
            Arc::clone(&custom_shows),
            channel_cache.clone(),
            config.offline_picture_url(),
            &config.migration,
        ));
        let origin_service = Arc::new(OriginServerService::new(
            Arc::clone(&origin_servers),
            Arc::clone(&coordinator),
        ));

        Self {
            config,
            database,
            channels,
            fillers,
            custom_shows,
            origin_servers,
            channel_cache,
            coordinator,
            origin_service,
        }
    }
}
