//! The stored collections that hold programs: channels, fillers and custom
//! shows.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use super::collection::{CollectionKind, ProgramCollection};
use super::rewriter::{ProgramRewriter, ProgramTally};
use crate::cache::ChannelCache;
use crate::errors::RepositoryResult;
use crate::models::{Channel, CustomShow, Filler, MigrationReportRow, OfflineMode, Program};
use crate::repositories::{ChannelStore, CustomShowStore, FillerStore};

/// Channel schedules and fallback schedules
pub struct ChannelCollection {
    store: Arc<dyn ChannelStore>,
    cache: ChannelCache,
    offline_picture_url: String,
}

impl ChannelCollection {
    pub fn new(
        store: Arc<dyn ChannelStore>,
        cache: ChannelCache,
        offline_picture_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cache,
            offline_picture_url: offline_picture_url.into(),
        }
    }
}

#[async_trait]
impl ProgramCollection for ChannelCollection {
    type Entity = Channel;

    fn kind(&self) -> CollectionKind {
        CollectionKind::Channels
    }

    async fn enumerate(&self) -> RepositoryResult<Vec<Channel>> {
        let numbers = self.store.get_all_channel_numbers().await?;
        let mut channels = Vec::with_capacity(numbers.len());
        for number in numbers {
            match self.store.get_channel(number).await? {
                Some(channel) => channels.push(channel),
                None => warn!("Channel {} disappeared before migration, skipping", number),
            }
        }
        Ok(channels)
    }

    fn fix_entity(
        &self,
        mut channel: Channel,
        rewriter: &ProgramRewriter<'_>,
    ) -> (Channel, MigrationReportRow) {
        let mut row = MigrationReportRow::for_channel(channel.number, &channel.name);
        let mut tally = ProgramTally::default();
        let offline_fallback = channel.has_offline_fallback();

        channel.programs = rewriter.rewrite_all(std::mem::take(&mut channel.programs), &mut tally);
        let fallback = rewriter.rewrite_all(std::mem::take(&mut channel.fallback), &mut tally);

        // A fallback made of offline placeholders is replaced by the generic
        // offline picture.
        if offline_fallback {
            if channel.offline.mode != OfflineMode::Pic {
                channel.offline.mode = OfflineMode::Pic;
                channel.offline.picture = Some(self.offline_picture_url.clone());
            }
        } else {
            channel.fallback = fallback;
        }

        tally.apply_to(&mut row);
        (channel, row)
    }

    async fn persist(&self, channel: &Channel) -> RepositoryResult<()> {
        self.store.save_channel(channel).await
    }

    async fn finish(&self) {
        self.cache.clear().await;
    }
}

/// Filler pools never carry offline placeholders
fn without_offline(programs: Vec<Program>) -> Vec<Program> {
    programs.into_iter().filter(|p| !p.is_offline).collect()
}

/// Filler content lists
pub struct FillerCollection {
    store: Arc<dyn FillerStore>,
}

impl FillerCollection {
    pub fn new(store: Arc<dyn FillerStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProgramCollection for FillerCollection {
    type Entity = Filler;

    fn kind(&self) -> CollectionKind {
        CollectionKind::Fillers
    }

    async fn enumerate(&self) -> RepositoryResult<Vec<Filler>> {
        self.store.get_all_fillers().await
    }

    fn fix_entity(
        &self,
        mut filler: Filler,
        rewriter: &ProgramRewriter<'_>,
    ) -> (Filler, MigrationReportRow) {
        let mut row = MigrationReportRow::for_filler(&filler.name);
        let mut tally = ProgramTally::default();

        let content = rewriter.rewrite_all(std::mem::take(&mut filler.content), &mut tally);
        filler.content = without_offline(content);

        tally.apply_to(&mut row);
        (filler, row)
    }

    async fn persist(&self, filler: &Filler) -> RepositoryResult<()> {
        self.store.save_filler(&filler.id, filler).await
    }
}

/// Custom show content lists
pub struct CustomShowCollection {
    store: Arc<dyn CustomShowStore>,
}

impl CustomShowCollection {
    pub fn new(store: Arc<dyn CustomShowStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProgramCollection for CustomShowCollection {
    type Entity = CustomShow;

    fn kind(&self) -> CollectionKind {
        CollectionKind::CustomShows
    }

    async fn enumerate(&self) -> RepositoryResult<Vec<CustomShow>> {
        self.store.get_all_shows().await
    }

    fn fix_entity(
        &self,
        mut show: CustomShow,
        rewriter: &ProgramRewriter<'_>,
    ) -> (CustomShow, MigrationReportRow) {
        let mut row = MigrationReportRow::for_custom_show(&show.name);
        let mut tally = ProgramTally::default();

        let content = rewriter.rewrite_all(std::mem::take(&mut show.content), &mut tally);
        show.content = without_offline(content);

        tally.apply_to(&mut row);
        (show, row)
    }

    async fn persist(&self, show: &CustomShow) -> RepositoryResult<()> {
        self.store.save_show(&show.id, show).await
    }
}
