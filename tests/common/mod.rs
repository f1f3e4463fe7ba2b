// tests/common/mod.rs
//! In-memory Notion workspace shared by the integration tests.

#![allow(dead_code)]

use notion2site::{
    AppError, DataSourceQuery, DataSourceRef, DatabaseObject, NotionErrorCode, NotionId,
    NotionRepository, PageRequest, PaginatedResponse,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const DATABASE_ID: &str = "550e8400e29b41d4a716446655440000";
pub const DATA_SOURCE_ID: &str = "ds-posts";

pub fn database_id() -> NotionId {
    NotionId::parse(DATABASE_ID).unwrap()
}

/// A fake workspace serving one database, its published pages and their
/// block children. Listings are served in small pages so every test also
/// exercises pagination.
pub struct FakeNotion {
    pub data_sources: Vec<String>,
    pub pages: Vec<Value>,
    pub children: HashMap<String, Vec<Value>>,
    pub page_len: usize,
    pub failing_blocks: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl Default for FakeNotion {
    fn default() -> Self {
        Self {
            data_sources: vec![DATA_SOURCE_ID.to_string()],
            pages: Vec::new(),
            children: HashMap::new(),
            page_len: 2,
            failing_blocks: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeNotion {
    pub fn with_page(mut self, page: Value) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_children(mut self, parent: &str, blocks: Vec<Value>) -> Self {
        self.children.insert(parent.to_string(), blocks);
        self
    }

    pub fn without_data_sources(mut self) -> Self {
        self.data_sources.clear();
        self
    }

    pub fn failing_on(mut self, block_id: &str) -> Self {
        self.failing_blocks.insert(block_id.to_string());
        self
    }

    /// Every call so far, as `"<endpoint>:<id>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Distinct block ids whose children were listed, in first-request order.
    pub fn block_requests(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.calls()
            .into_iter()
            .filter_map(|call| call.strip_prefix("blocks:").map(str::to_string))
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn paginate(&self, all: &[Value], page: &PageRequest) -> PaginatedResponse<Value> {
        let start: usize = page
            .start_cursor
            .as_deref()
            .map(|c| c.parse().unwrap())
            .unwrap_or(0);
        let end = (start + self.page_len).min(all.len());
        PaginatedResponse {
            results: all[start..end].to_vec(),
            next_cursor: (end < all.len()).then(|| end.to_string()),
            has_more: end < all.len(),
        }
    }
}

#[async_trait::async_trait]
impl NotionRepository for FakeNotion {
    async fn retrieve_database(&self, id: &NotionId) -> Result<DatabaseObject, AppError> {
        self.record(format!("databases:{}", id));
        Ok(DatabaseObject {
            id: id.to_hyphenated(),
            data_sources: self
                .data_sources
                .iter()
                .map(|id| DataSourceRef {
                    id: id.clone(),
                    name: None,
                })
                .collect(),
        })
    }

    async fn query_data_source(
        &self,
        data_source_id: &str,
        query: &DataSourceQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        self.record(format!("query:{}", data_source_id));
        assert_eq!(query, &DataSourceQuery::published());
        assert_eq!(page.page_size, 100);
        Ok(self.paginate(&self.pages, &page))
    }

    async fn list_block_children(
        &self,
        block_id: &str,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        self.record(format!("blocks:{}", block_id));
        if self.failing_blocks.contains(block_id) {
            return Err(AppError::NotionService {
                code: NotionErrorCode::RateLimited,
                message: "Rate limited".into(),
                status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            });
        }
        let all = self.children.get(block_id).cloned().unwrap_or_default();
        Ok(self.paginate(&all, &page))
    }
}

/// A published page as returned by a data source query.
pub fn page(id: &str, title: &str, slug: &str, kind: &str, edited: &str) -> Value {
    json!({
        "object": "page",
        "id": id,
        "created_time": "2024-01-01T00:00:00.000Z",
        "last_edited_time": edited,
        "properties": {
            "Title": {"id": "title", "type": "title", "title": [{"plain_text": title}]},
            "Slug": {"type": "rich_text", "rich_text": [{"plain_text": slug}]},
            "Type": {"type": "select", "select": {"name": kind}},
            "Status": {"type": "status", "status": {"name": "Published"}},
            "Description": {"type": "rich_text", "rich_text": []},
            "Tags": {"type": "multi_select", "multi_select": [{"name": "notes"}]},
            "Last Updated": {"type": "last_edited_time", "last_edited_time": edited},
            "Published Date": {"type": "date", "date": null}
        }
    })
}

pub fn paragraph(id: &str, text: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "paragraph",
        "has_children": false,
        "paragraph": {"rich_text": [{"plain_text": text}], "color": "default"}
    })
}

/// A block of `kind` that reports children.
pub fn container(id: &str, kind: &str) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": kind,
        "has_children": true,
        kind: {}
    })
}
