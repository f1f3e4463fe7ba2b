// src/api/types.rs
//! Request and response shapes exchanged with the Notion API.

use crate::constants::{NOTION_API_PAGE_SIZE, PROP_STATUS, PUBLISHED_STATUS};
use crate::model::PropertyValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// --- Pagination Types ---

/// Generic paginated response from Notion API.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Which page of a listing to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_size: u32,
    pub start_cursor: Option<String>,
}

impl PageRequest {
    pub fn first() -> Self {
        Self {
            page_size: NOTION_API_PAGE_SIZE,
            start_cursor: None,
        }
    }

    pub fn after(cursor: String) -> Self {
        Self {
            page_size: NOTION_API_PAGE_SIZE,
            start_cursor: Some(cursor),
        }
    }
}

/// Result of a pagination operation.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
}

// --- Data source query ---

/// Body of a data source query, minus the pagination fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSourceQuery {
    pub filter: StatusFilter,
    pub sorts: Vec<TimestampSort>,
}

impl DataSourceQuery {
    /// Published posts, newest first by creation time.
    pub fn published() -> Self {
        Self {
            filter: StatusFilter {
                property: PROP_STATUS.to_string(),
                status: StatusCondition {
                    equals: PUBLISHED_STATUS.to_string(),
                },
            },
            sorts: vec![TimestampSort {
                timestamp: "created_time".to_string(),
                direction: SortDirection::Descending,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusFilter {
    pub property: String,
    pub status: StatusCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCondition {
    pub equals: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampSort {
    pub timestamp: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Descending,
}

/// Full request body: the query plus the page being requested.
#[derive(Debug, Serialize)]
pub struct QueryBody<'a> {
    #[serde(flatten)]
    pub query: &'a DataSourceQuery,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

// --- Response objects ---

/// The parts of a database object needed to locate its data sources.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseObject {
    pub id: String,
    #[serde(default)]
    pub data_sources: Vec<DataSourceRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A page row returned by a data source query, properties still undecoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub id: String,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub last_edited_time: String,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

impl RawPage {
    /// Decodes a query result. Non-page objects and partial objects (no
    /// `properties`) yield `None`.
    pub fn from_raw(raw: Value) -> Option<Self> {
        let object = raw.get("object").and_then(Value::as_str).unwrap_or("page");
        if object != "page" || raw.get("properties").is_none() {
            return None;
        }
        serde_json::from_value(raw)
            .map_err(|e| log::debug!("Skipping undecodable page object: {}", e))
            .ok()
    }

    /// Decodes the named property; a missing property is `Unsupported`.
    pub fn property(&self, name: &str) -> PropertyValue {
        self.properties
            .get(name)
            .map(PropertyValue::decode)
            .unwrap_or(PropertyValue::Unsupported)
    }
}

/// Error response from Notion API.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionApiErrorResponse {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn published_query_body_matches_api_shape() {
        let query = DataSourceQuery::published();
        let body = QueryBody {
            query: &query,
            page_size: 100,
            start_cursor: Some("cursor-1".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "filter": {"property": "Status", "status": {"equals": "Published"}},
                "sorts": [{"timestamp": "created_time", "direction": "descending"}],
                "page_size": 100,
                "start_cursor": "cursor-1"
            })
        );
    }

    #[test]
    fn first_page_omits_cursor() {
        let query = DataSourceQuery::published();
        let page = PageRequest::first();
        let body = QueryBody {
            query: &query,
            page_size: page.page_size,
            start_cursor: page.start_cursor,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("start_cursor").is_none());
    }

    #[test]
    fn raw_page_requires_properties() {
        assert!(RawPage::from_raw(json!({"object": "page", "id": "p1"})).is_none());

        let page = RawPage::from_raw(json!({
            "object": "page",
            "id": "p1",
            "last_edited_time": "2024-01-01T00:00:00.000Z",
            "properties": {}
        }))
        .unwrap();
        assert_eq!(page.property("Slug"), PropertyValue::Unsupported);
    }

    #[test]
    fn raw_page_skips_other_objects() {
        let row = json!({"object": "data_source", "id": "ds", "properties": {}});
        assert!(RawPage::from_raw(row).is_none());
    }
}
