// src/api/mod.rs
//! Notion API interaction: the ability to read a content database.
//!
//! Business logic depends on [`NotionRepository`], never on HTTP details.
//! [`NotionHttpClient`] is the live implementation and [`RateLimitedClient`]
//! paces any implementation to stay under Notion's request ceiling.

pub mod client;
pub mod pagination;
pub mod parser;
pub mod throttle;
pub mod types;

use crate::error::AppError;
use crate::types::NotionId;
use serde_json::Value;
use types::{DataSourceQuery, DatabaseObject, PageRequest, PaginatedResponse};

/// The ability to read content from a Notion workspace, one page of results at a time.
///
/// Listings return raw JSON objects; decoding them is the caller's concern so
/// a single malformed record never fails a whole page.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Retrieves a database object, including the data sources it exposes.
    async fn retrieve_database(&self, id: &NotionId) -> Result<DatabaseObject, AppError>;

    /// Runs one page of a filtered, sorted query against a data source.
    async fn query_data_source(
        &self,
        data_source_id: &str,
        query: &DataSourceQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Value>, AppError>;

    /// Lists one page of the direct children of a block or page.
    async fn list_block_children(
        &self,
        block_id: &str,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Value>, AppError>;
}

#[async_trait::async_trait]
impl<R: NotionRepository + ?Sized> NotionRepository for std::sync::Arc<R> {
    async fn retrieve_database(&self, id: &NotionId) -> Result<DatabaseObject, AppError> {
        (**self).retrieve_database(id).await
    }

    async fn query_data_source(
        &self,
        data_source_id: &str,
        query: &DataSourceQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        (**self).query_data_source(data_source_id, query, page).await
    }

    async fn list_block_children(
        &self,
        block_id: &str,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        (**self).list_block_children(block_id, page).await
    }
}

pub use client::NotionHttpClient;
pub use throttle::RateLimitedClient;
