// src/sync/reconcile.rs
//! Decides per post whether the cached block tree can be reused.

use crate::error::AppError;
use crate::model::{ContentItem, ContentItemMetadata};
use crate::pipeline::BlockSource;
use std::collections::HashMap;

/// Counters for one reconciliation. `fetched + reused` always equals the
/// number of fresh metadata records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub fetched: usize,
    pub reused: usize,
}

impl SyncStats {
    pub fn total(&self) -> usize {
        self.fetched + self.reused
    }
}

/// Output of [`reconcile`].
#[derive(Debug)]
pub struct Reconciliation {
    /// One item per fresh metadata record, in the same order.
    pub items: Vec<ContentItem>,
    pub stats: SyncStats,
}

/// Merges fresh metadata with a cached snapshot.
///
/// A cached block tree is reused only when the cached item carries exactly
/// the same `last_edited_time` string. Metadata always comes from the fresh
/// listing, so property edits that do not touch the watermark still land.
/// Cached items missing from the fresh listing are dropped. With
/// `force_full`, every tree is refetched regardless of the cache.
///
/// The first fetch failure aborts the reconciliation.
pub async fn reconcile<B>(
    fresh: Vec<ContentItemMetadata>,
    cached: Vec<ContentItem>,
    force_full: bool,
    source: &B,
) -> Result<Reconciliation, AppError>
where
    B: BlockSource + ?Sized,
{
    let mut cache: HashMap<String, ContentItem> = if force_full {
        HashMap::new()
    } else {
        cached
            .into_iter()
            .map(|item| (item.metadata.id.clone(), item))
            .collect()
    };

    let mut stats = SyncStats::default();
    let mut items = Vec::with_capacity(fresh.len());

    for meta in fresh {
        let reusable = cache
            .remove(&meta.id)
            .filter(|cached| cached.watermark() == meta.last_edited_time);

        let blocks = match reusable {
            Some(cached) => {
                log::info!("Using cache for: {}", meta.title);
                stats.reused += 1;
                cached.blocks
            }
            None => {
                log::info!("Fetching blocks for: {}", meta.title);
                let blocks = source.fetch_block_tree(&meta.id).await?;
                stats.fetched += 1;
                blocks
            }
        };

        items.push(ContentItem::new(meta, blocks));
    }

    if !cache.is_empty() {
        log::debug!("Dropping {} cached post(s) no longer published", cache.len());
    }

    Ok(Reconciliation { items, stats })
}
