//! Repository trait definitions
//!
//! These traits are the persistence contracts the migration engine and the
//! origin lifecycle service are written against. The SQLite repositories in
//! this module tree implement them; tests substitute mocks.
//!
//! Every write is an independent commit with per-key last-writer-wins
//! semantics. No operation spans more than one entity.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::RepositoryResult;
use crate::models::{Channel, CustomShow, Filler, OriginServer};

/// Storage for channels, keyed by channel number
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelStore: Send + Sync {
    /// All stored channel numbers in ascending order
    async fn get_all_channel_numbers(&self) -> RepositoryResult<Vec<i32>>;

    /// Load a channel by number
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Channel))` - Channel found
    /// * `Ok(None)` - No channel with that number
    /// * `Err(RepositoryError)` - Read or decode failure
    async fn get_channel(&self, number: i32) -> RepositoryResult<Option<Channel>>;

    /// All channels ordered by number
    async fn list_channels(&self) -> RepositoryResult<Vec<Channel>>;

    /// Insert or replace a channel
    async fn save_channel(&self, channel: &Channel) -> RepositoryResult<()>;
}

/// Storage for filler pools, keyed by id
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FillerStore: Send + Sync {
    /// All fillers in stable enumeration order
    async fn get_all_fillers(&self) -> RepositoryResult<Vec<Filler>>;

    /// Insert or replace the filler stored under `id`
    async fn save_filler(&self, id: &str, filler: &Filler) -> RepositoryResult<()>;
}

/// Storage for custom shows, keyed by id
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomShowStore: Send + Sync {
    /// All custom shows in stable enumeration order
    async fn get_all_shows(&self) -> RepositoryResult<Vec<CustomShow>>;

    /// Insert or replace the custom show stored under `id`
    async fn save_show(&self, id: &str, show: &CustomShow) -> RepositoryResult<()>;
}

/// Storage for registered origin servers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OriginServerStore: Send + Sync {
    /// Look up an origin server by its unique name
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<OriginServer>>;

    /// All origin servers ordered by display index
    async fn list(&self) -> RepositoryResult<Vec<OriginServer>>;

    /// Number of registered origin servers
    async fn count(&self) -> RepositoryResult<u64>;

    /// Persist a new origin server
    ///
    /// Fails with `ConstraintViolation` when the name is already taken.
    async fn insert(&self, server: &OriginServer) -> RepositoryResult<()>;

    /// Overwrite the stored record with the given id
    async fn update_by_id(&self, id: Uuid, server: &OriginServer) -> RepositoryResult<()>;

    /// Remove the origin server with the given name
    ///
    /// Returns whether a record was removed.
    async fn remove_by_name(&self, name: &str) -> RepositoryResult<bool>;
}
