// src/lib.rs
//! notion2site library: incrementally mirrors a Notion content database into
//! a local JSON snapshot for static site generation.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ErrorKind`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `SyncConfig`
//! - **Domain model**: `ContentItem`, `ContentItemMetadata`, `ContentBlock`, `ContentKind`
//! - **Domain types**: `NotionId`, `ApiKey`, `ValidatedUrl`
//! - **API client**: `NotionRepository`, `NotionHttpClient`, `RateLimitedClient`
//! - **Sync engine**: `ContentSync`, `reconcile`, `BlockTreeFetcher`, `MetadataSynchronizer`
//! - **Output**: `SnapshotStore`, `write_atomically`
//! - **Publishing**: `PublishedDates`, `sort_by_publication`, `render_feed`

pub mod api;
mod config;
mod constants;
mod error;
mod model;
mod output;
mod pipeline;
mod publish;
mod sync;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, ErrorKind, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, SyncConfig, API_KEY_ENV, DATABASE_ID_ENV};
pub use crate::constants::*;

// --- Domain Model ---
pub use crate::model::{
    ContentBlock, ContentItem, ContentItemMetadata, ContentKind, DateValue, PropertyValue,
    RichTextItem, SelectOption,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId, ValidatedUrl};

// --- API Client ---
pub use crate::api::{
    pagination::fetch_all_pages,
    types::{
        DataSourceQuery, DataSourceRef, DatabaseObject, PageRequest, PaginatedResponse,
        PaginationResult, RawPage,
    },
    NotionHttpClient, NotionRepository, RateLimitedClient,
};

// --- Sync Engine ---
pub use crate::sync::{
    extract_metadata, reconcile, resolve_data_source, BlockTreeFetcher, ContentSync,
    MetadataSynchronizer, Reconciliation, SyncReport, SyncStats,
};

// --- Output ---
pub use crate::output::{write_atomically, SnapshotStore};

// --- Publishing ---
pub use crate::publish::{
    items_of_kind, parse_timestamp, publication_date, render_feed, sort_by_publication,
    write_feed, FeedConfig, PublishedDates, SortOrder, FEED_TEMPLATE,
};

// --- Pipeline Traits ---
pub use crate::pipeline::{BlockSource, MetadataSource, SnapshotSink};
