// src/sync/engine.rs
//! One complete sync run, from data source resolution to the written snapshot.

use super::blocks::BlockTreeFetcher;
use super::metadata::MetadataSynchronizer;
use super::reconcile::{reconcile, SyncStats};
use super::source::resolve_data_source;
use crate::api::NotionRepository;
use crate::error::AppError;
use crate::model::ContentItem;
use crate::output::SnapshotStore;
use crate::pipeline::{MetadataSource, SnapshotSink};
use crate::types::NotionId;

/// Result of a successful run.
#[derive(Debug)]
pub struct SyncReport {
    /// The items that were written, in listing order.
    pub items: Vec<ContentItem>,
    pub stats: SyncStats,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.items.len()
    }
}

/// Drives a sync run against a repository.
///
/// The run is strictly sequential: one API call is in flight at a time. Any
/// failure before the final write leaves the previous snapshot untouched.
pub struct ContentSync<R> {
    repo: R,
    database_id: NotionId,
    store: SnapshotStore,
    force_full: bool,
}

impl<R: NotionRepository> ContentSync<R> {
    pub fn new(repo: R, database_id: NotionId, store: SnapshotStore) -> Self {
        Self {
            repo,
            database_id,
            store,
            force_full: false,
        }
    }

    /// Ignores the cached snapshot and refetches every block tree.
    pub fn force_full(mut self, force_full: bool) -> Self {
        self.force_full = force_full;
        self
    }

    pub async fn run(&self) -> Result<SyncReport, AppError> {
        log::info!("Getting data source ID...");
        let data_source_id = resolve_data_source(&self.repo, &self.database_id).await?;

        let cached = if self.force_full {
            log::info!("Force mode: fetching all posts fresh");
            Vec::new()
        } else {
            let cached = self.store.load();
            if !cached.is_empty() {
                log::info!("Loaded {} cached posts for incremental update", cached.len());
            }
            cached
        };

        let metadata = MetadataSynchronizer::new(&self.repo)
            .fetch_published_metadata(&data_source_id)
            .await?;

        let fetcher = BlockTreeFetcher::new(&self.repo);
        let reconciliation = reconcile(metadata, cached, self.force_full, &fetcher).await?;

        SnapshotSink::write(&self.store, &reconciliation.items)?;

        let stats = reconciliation.stats;
        log::info!(
            "Done! {} posts saved ({} fetched, {} cached)",
            reconciliation.items.len(),
            stats.fetched,
            stats.reused
        );

        Ok(SyncReport {
            items: reconciliation.items,
            stats,
        })
    }
}
