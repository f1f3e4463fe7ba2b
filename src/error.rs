// src/error.rs
//! Application error types with structured error handling.
//!
//! Every failure of a sync run falls into one of four kinds (see
//! [`ErrorKind`]). Only snapshot *reads* are recoverable; everything else
//! propagates to `main` and aborts the run before anything is written.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is not shared with the integration
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Broad failure classes of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid credentials/identifiers. Raised before any network call.
    Config,
    /// Any failed API call, including a failed pagination step or nested block fetch.
    Transport,
    /// The configured database exposes no queryable data source.
    DataSourceResolution,
    /// Local filesystem failure while persisting results.
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "configuration"),
            Self::Transport => write!(f, "transport"),
            Self::DataSourceResolution => write!(f, "data source resolution"),
            Self::Io => write!(f, "io"),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("No data sources found for database {database_id}")]
    NoDataSources { database_id: String },

    #[error("Failed to write snapshot to {path}: {source}")]
    SnapshotWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to render feed: {0}")]
    FeedRender(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Classifies the error into one of the run's failure kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingConfiguration(_) | Self::Validation(_) => ErrorKind::Config,
            Self::NetworkFailure(_) | Self::NotionService { .. } | Self::MalformedResponse { .. } => {
                ErrorKind::Transport
            }
            Self::NoDataSources { .. } => ErrorKind::DataSourceResolution,
            Self::SnapshotWrite { .. } | Self::FeedRender(_) | Self::Io(_) => ErrorKind::Io,
        }
    }
}
