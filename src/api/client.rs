// src/api/client.rs
//! Thin HTTP client for the Notion API.
//!
//! Handles authentication headers and request plumbing; response bodies
//! are handed to [`super::parser`] untouched.

use super::parser::parse_api_response;
use super::types::{DataSourceQuery, DatabaseObject, PageRequest, PaginatedResponse, QueryBody};
use crate::error::AppError;
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use serde_json::Value;

/// Notion API version that exposes data sources.
const NOTION_VERSION: &str = "2025-09-03";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    /// Creates a client against a different API root (proxies, local fakes).
    pub fn with_base_url(api_key: &ApiKey, base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint (path without base URL).
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_database(&self, id: &NotionId) -> Result<DatabaseObject, AppError> {
        let endpoint = format!("databases/{}", id.to_hyphenated());
        let response = self.get(&endpoint, &[]).await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn query_data_source(
        &self,
        data_source_id: &str,
        query: &DataSourceQuery,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        let endpoint = format!("data_sources/{}/query", data_source_id);
        let body = QueryBody {
            query,
            page_size: page.page_size,
            start_cursor: page.start_cursor,
        };
        let response = self.post(&endpoint, &body).await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn list_block_children(
        &self,
        block_id: &str,
        page: PageRequest,
    ) -> Result<PaginatedResponse<Value>, AppError> {
        let endpoint = format!("blocks/{}/children", block_id);
        let mut query = vec![("page_size", page.page_size.to_string())];
        if let Some(cursor) = page.start_cursor {
            query.push(("start_cursor", cursor));
        }
        let response = self.get(&endpoint, &query).await?;
        parse_api_response(extract_response_text(response).await?)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text, keeping status and URL for diagnostics.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
