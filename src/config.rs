// src/config.rs
use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_REQUEST_INTERVAL};
use crate::error::AppError;
use crate::publish::FeedConfig;
use crate::types::{ApiKey, NotionId, ValidatedUrl};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_ENV: &str = "NOTION_API_KEY";
pub const DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";

/// Parsed command-line input. Credentials come from the environment.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Ignore the cached snapshot and refetch every post
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Directory holding posts.json and published-dates.json
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Minimum milliseconds between two Notion API calls
    #[arg(long, default_value_t = DEFAULT_REQUEST_INTERVAL.as_millis() as u64)]
    pub request_interval_ms: u64,

    /// Also write an RSS feed of the most recent posts to this path
    #[arg(long, requires = "site_url")]
    pub feed: Option<PathBuf>,

    /// Public root URL of the site (e.g., "https://example.com")
    #[arg(long)]
    pub site_url: Option<String>,

    /// Feed channel title (defaults to the site's host name)
    #[arg(long)]
    pub site_title: Option<String>,

    /// Feed channel description (defaults to the title)
    #[arg(long)]
    pub site_description: Option<String>,

    /// Feed language code
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Handlebars template replacing the built-in feed template
    #[arg(long)]
    pub feed_template: Option<PathBuf>,
}

/// Resolved sync configuration, validated before any network call.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub api_key: ApiKey,
    pub database_id: NotionId,
    pub data_dir: PathBuf,
    pub force_full: bool,
    pub request_interval: Duration,
    pub feed: Option<FeedConfig>,
}

impl SyncConfig {
    /// Resolves the configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::from_parts(
            cli,
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(DATABASE_ID_ENV).ok(),
        )
    }

    /// Resolves the configuration from CLI input and already-read credentials.
    pub fn from_parts(
        cli: CommandLineInput,
        api_key: Option<String>,
        database_id: Option<String>,
    ) -> Result<Self, AppError> {
        let api_key = api_key.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", API_KEY_ENV))
        })?;
        let database_id = database_id.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set",
                DATABASE_ID_ENV
            ))
        })?;

        let api_key = ApiKey::new(api_key.trim())?;
        let database_id = NotionId::parse(&database_id)?;
        let feed = Self::resolve_feed(&cli)?;

        Ok(SyncConfig {
            api_key,
            database_id,
            data_dir: cli.data_dir,
            force_full: cli.force,
            request_interval: Duration::from_millis(cli.request_interval_ms),
            feed,
        })
    }

    fn resolve_feed(cli: &CommandLineInput) -> Result<Option<FeedConfig>, AppError> {
        let Some(output) = cli.feed.clone() else {
            return Ok(None);
        };

        let site_url = cli.site_url.as_deref().ok_or_else(|| {
            AppError::MissingConfiguration("--site-url is required with --feed".to_string())
        })?;
        let site_url = ValidatedUrl::parse(site_url)?;

        let title = cli
            .site_title
            .clone()
            .or_else(|| site_url.host().map(str::to_string))
            .unwrap_or_default();
        let description = cli
            .site_description
            .clone()
            .unwrap_or_else(|| title.clone());

        Ok(Some(FeedConfig {
            output,
            site_url,
            title,
            description,
            language: cli.language.clone(),
            template: cli.feed_template.clone(),
        }))
    }
}
