// src/api/throttle.rs
//! Request pacing for the Notion API.

use super::types::{DataSourceQuery, DatabaseObject, PageRequest, PaginatedResponse};
use super::NotionRepository;
use crate::error::AppError;
use crate::types::NotionId;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Wraps a repository so that calls go out one at a time, each starting at
/// least `interval` after the previous one completed.
///
/// The lock is held for the whole call, so concurrent callers queue up
/// instead of bursting. Errors pass through untouched; there is no retry.
pub struct RateLimitedClient<R> {
    inner: R,
    interval: Duration,
    last_completed: Mutex<Option<Instant>>,
}

impl<R> RateLimitedClient<R> {
    pub fn new(inner: R, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            last_completed: Mutex::new(None),
        }
    }

    async fn paced<T, Fut>(&self, call: Fut) -> Result<T, AppError>
    where
        Fut: Future<Output = Result<T, AppError>>,
    {
        let mut last_completed = self.last_completed.lock().await;

        if let Some(previous) = *last_completed {
            let elapsed = previous.elapsed();
            if elapsed < self.interval {
                sleep(self.interval - elapsed).await;
            }
        }

        let result = call.await;
        *last_completed = Some(Instant::now());
        result
    }
}

#[async_trait::async_trait]
impl<R: NotionRepository> NotionRepository for RateLimitedClient<R> {
    async fn retrieve_database(&self, id: &NotionId) -> Result<DatabaseObject, AppError> {
        self.paced(self.inner.retrieve_database(id)).await
    }

    async fn query_data_source(
        &self,
        data_source_id: &str,
        query: &DataSourceQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        self.paced(self.inner.query_data_source(data_source_id, query, page))
            .await
    }

    async fn list_block_children(
        &self,
        block_id: &str,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        self.paced(self.inner.list_block_children(block_id, page))
            .await
    }
}
