//! In-memory channel configuration cache
//!
//! Channel reads for playback and the HTTP API go through this cache. The
//! migration engine clears it after rewriting channel schedules, because any
//! cached channel may hold programs that were destroyed or repointed.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::RepositoryResult;
use crate::models::Channel;
use crate::repositories::ChannelStore;

/// Process-wide cache of channel configurations keyed by channel number
#[derive(Clone, Default)]
pub struct ChannelCache {
    entries: Arc<RwLock<HashMap<i32, Arc<Channel>>>>,
}

impl ChannelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, number: i32) -> Option<Arc<Channel>> {
        self.entries.read().await.get(&number).cloned()
    }

    pub async fn insert(&self, channel: Channel) -> Arc<Channel> {
        let channel = Arc::new(channel);
        self.entries
            .write()
            .await
            .insert(channel.number, Arc::clone(&channel));
        channel
    }

    /// Return the cached channel, loading it from `store` on a miss
    pub async fn get_or_load(
        &self,
        number: i32,
        store: &dyn ChannelStore,
    ) -> RepositoryResult<Option<Arc<Channel>>> {
        if let Some(channel) = self.get(number).await {
            return Ok(Some(channel));
        }

        match store.get_channel(number).await? {
            Some(channel) => Ok(Some(self.insert(channel).await)),
            None => Ok(None),
        }
    }

    pub async fn invalidate(&self, number: i32) {
        self.entries.write().await.remove(&number);
    }

    /// Drop every cached channel
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        debug!("Clearing channel cache ({} entries)", entries.len());
        entries.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
