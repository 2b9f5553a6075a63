//! Collection fixers
//!
//! A collection fixer applies a [`ProgramRewriter`] to every entity of one
//! stored collection kind and persists each entity afterwards. Collection
//! kinds only describe how to enumerate, rewrite and persist their entities
//! ([`ProgramCollection`]); the concurrent fan-out and report assembly live
//! in [`ConcurrentFixer`].

use async_trait::async_trait;
use futures::{stream, StreamExt};
use std::fmt;
use tracing::{debug, error};

use super::rewriter::ProgramRewriter;
use crate::errors::RepositoryResult;
use crate::models::{MigrationReportRow, OriginServer};

/// The kinds of stored collections that hold programs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Channels,
    Fillers,
    CustomShows,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Channels => "channels",
            CollectionKind::Fillers => "fillers",
            CollectionKind::CustomShows => "custom shows",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities a stored collection exposes to the migration engine
#[async_trait]
pub trait ProgramCollection: Send + Sync {
    type Entity: Send + Sync;

    fn kind(&self) -> CollectionKind;

    /// Load every entity of this collection in stable enumeration order
    async fn enumerate(&self) -> RepositoryResult<Vec<Self::Entity>>;

    /// Apply the rewriter to all program lists of one entity
    fn fix_entity(
        &self,
        entity: Self::Entity,
        rewriter: &ProgramRewriter<'_>,
    ) -> (Self::Entity, MigrationReportRow);

    /// Persist one entity after its pass
    async fn persist(&self, entity: &Self::Entity) -> RepositoryResult<()>;

    /// Hook run once the pass is over, whether it succeeded or failed
    async fn finish(&self) {}
}

/// Object-safe view of a collection pass used by the coordinator
#[async_trait]
pub trait CollectionFixer: Send + Sync {
    fn kind(&self) -> CollectionKind;

    /// Run one migration pass over the whole collection, producing one
    /// report row per entity in enumeration order
    async fn fix_collection(
        &self,
        origin_name: &str,
        new_origin: Option<&OriginServer>,
    ) -> RepositoryResult<Vec<MigrationReportRow>>;
}

/// Runs a [`ProgramCollection`] pass with bounded per-entity concurrency
pub struct ConcurrentFixer<C> {
    collection: C,
    max_concurrency: usize,
}

impl<C: ProgramCollection> ConcurrentFixer<C> {
    pub fn new(collection: C, max_concurrency: usize) -> Self {
        Self {
            collection,
            max_concurrency: max_concurrency.max(1),
        }
    }

    async fn run(&self, rewriter: &ProgramRewriter<'_>) -> RepositoryResult<Vec<MigrationReportRow>> {
        let entities = self.collection.enumerate().await?;
        debug!(
            "Migrating {} {} for origin '{}'",
            entities.len(),
            self.collection.kind(),
            rewriter.origin_name()
        );

        // `buffered` yields results in input order regardless of which
        // persist completes first. Every started write is driven to
        // completion before the first failure is returned.
        let fixes = entities
            .into_iter()
            .map(|entity| self.fix_one(entity, rewriter));
        let results: Vec<RepositoryResult<MigrationReportRow>> = stream::iter(fixes)
            .buffered(self.max_concurrency)
            .collect()
            .await;

        results.into_iter().collect()
    }

    async fn fix_one(
        &self,
        entity: C::Entity,
        rewriter: &ProgramRewriter<'_>,
    ) -> RepositoryResult<MigrationReportRow> {
        let (entity, row) = self.collection.fix_entity(entity, rewriter);
        self.collection.persist(&entity).await?;
        Ok(row)
    }
}

#[async_trait]
impl<C: ProgramCollection> CollectionFixer for ConcurrentFixer<C> {
    fn kind(&self) -> CollectionKind {
        self.collection.kind()
    }

    async fn fix_collection(
        &self,
        origin_name: &str,
        new_origin: Option<&OriginServer>,
    ) -> RepositoryResult<Vec<MigrationReportRow>> {
        let rewriter = ProgramRewriter::new(origin_name, new_origin);
        let result = self.run(&rewriter).await;
        if let Err(e) = &result {
            error!(
                "Migration pass over {} failed for origin '{}': {}",
                self.collection.kind(),
                origin_name,
                e
            );
        }
        self.collection.finish().await;
        result
    }
}
