// src/api/pagination.rs
//! Cursor-driven pagination over any Notion listing.

use super::types::{PageRequest, PaginatedResponse, PaginationResult};
use crate::error::AppError;
use std::future::Future;

/// Drains a paginated listing, accumulating results in source order.
///
/// `fetch_fn` is called with the first page request and then with the
/// cursor of each previous response while it reports `has_more`. The first
/// failing call aborts the whole listing and the partial accumulation is
/// dropped.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_fn: F) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut request = PageRequest::first();
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(request).await?;
        pages_fetched += 1;
        items.extend(response.results);

        if !response.has_more {
            break;
        }

        match response.next_cursor {
            Some(cursor) => request = PageRequest::after(cursor),
            None => {
                log::warn!(
                    "Listing reported more results but no cursor after {} page(s); stopping",
                    pages_fetched
                );
                break;
            }
        }
    }

    log::debug!(
        "Pagination complete: {} items over {} page(s)",
        items.len(),
        pages_fetched
    );

    Ok(PaginationResult {
        items,
        pages_fetched,
    })
}
