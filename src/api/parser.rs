// src/api/parser.rs
//! Turns raw API responses into typed values or typed errors.

use super::client::ApiResponse;
use super::types::NotionApiErrorResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use reqwest::StatusCode;

/// Parses a response body, mapping non-2xx statuses to [`AppError::NotionService`].
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse {
            url: url.to_string(),
            message: format!("{} (body: {})", e, preview(body)),
        }
    })
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    match serde_json::from_str::<NotionApiErrorResponse>(body) {
        Ok(error) => AppError::NotionService {
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            status,
        },
        Err(_) => AppError::NotionService {
            code: NotionErrorCode::from_http_status(status.as_u16()),
            message: format!("HTTP {} from {}: {}", status, url, preview(body)),
            status,
        },
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
