// src/pipeline.rs
//! Capability traits for the stages of a sync run.
//!
//! Each trait describes a single capability so every stage can be tested
//! in isolation and the reconciler can be driven without a network.

use crate::error::AppError;
use crate::model::{ContentBlock, ContentItem, ContentItemMetadata};

/// Lists the metadata of every published post in a data source.
#[async_trait::async_trait]
pub trait MetadataSource {
    async fn fetch_published_metadata(
        &self,
        data_source_id: &str,
    ) -> Result<Vec<ContentItemMetadata>, AppError>;
}

/// Produces the complete block tree below a page or block.
#[async_trait::async_trait]
pub trait BlockSource: Send + Sync {
    async fn fetch_block_tree(&self, block_id: &str) -> Result<Vec<ContentBlock>, AppError>;
}

/// Persists a complete, reconciled item list.
pub trait SnapshotSink {
    fn write(&self, items: &[ContentItem]) -> Result<(), AppError>;
}
