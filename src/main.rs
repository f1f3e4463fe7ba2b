// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2site::{
    write_feed, AppError, CommandLineInput, ContentSync, NotionHttpClient, PublishedDates,
    RateLimitedClient, SnapshotStore, SyncConfig,
};
use std::fs;
use std::process::ExitCode;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("notion2site.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs one sync, then renders the feed if one was requested.
async fn execute_sync(config: &SyncConfig) -> Result<(), AppError> {
    log::debug!("Authenticating with API key {}", config.api_key);
    let http_client = NotionHttpClient::new(&config.api_key)?;
    let client = RateLimitedClient::new(http_client, config.request_interval);
    let store = SnapshotStore::in_dir(&config.data_dir);

    let report = ContentSync::new(client, config.database_id.clone(), store)
        .force_full(config.force_full)
        .run()
        .await?;

    if let Some(feed) = &config.feed {
        let dates = PublishedDates::load_from_dir(&config.data_dir);
        write_feed(&report.items, &dates, feed, chrono::Utc::now())?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = CommandLineInput::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let result = match SyncConfig::resolve(cli) {
        Ok(config) => execute_sync(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Sync failed ({} error): {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}
