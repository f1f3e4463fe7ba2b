// src/publish/feed.rs
//! RSS 2.0 feed of the most recent posts, rendered with Handlebars.

use super::ordering::{parse_timestamp, publication_date, sort_by_publication, SortOrder};
use super::PublishedDates;
use crate::constants::{FEED_ITEM_LIMIT, POSTS_PATH};
use crate::error::AppError;
use crate::model::ContentItem;
use crate::output::write_atomically;
use crate::types::ValidatedUrl;
use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};

const TEMPLATE_NAME: &str = "feed";

/// Built-in feed template. The engine's HTML escaping is also valid XML
/// escaping, so every interpolated value is escaped.
pub const FEED_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
  <channel>
    <title>{{title}}</title>
    <link>{{site_url}}</link>
    <description>{{description}}</description>
    <language>{{language}}</language>
    <lastBuildDate>{{last_build_date}}</lastBuildDate>
    <atom:link href="{{site_url}}/feed.xml" rel="self" type="application/rss+xml"/>
    {{#each items}}
    <item>
      <title>{{title}}</title>
      <link>{{link}}</link>
      <guid isPermaLink="true">{{link}}</guid>
      <description>{{description}}</description>
      {{#if pub_date}}
      <pubDate>{{pub_date}}</pubDate>
      {{/if}}
    </item>
    {{/each}}
  </channel>
</rss>
"#;

/// Site identity and output settings for the feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub output: PathBuf,
    pub site_url: ValidatedUrl,
    pub title: String,
    pub description: String,
    pub language: String,
    /// Replaces [`FEED_TEMPLATE`] when set.
    pub template: Option<PathBuf>,
}

#[derive(Serialize)]
struct FeedChannel<'a> {
    title: &'a str,
    site_url: &'a str,
    description: &'a str,
    language: &'a str,
    last_build_date: String,
    items: Vec<FeedEntry>,
}

#[derive(Serialize)]
struct FeedEntry {
    title: String,
    link: String,
    description: String,
    pub_date: Option<String>,
}

/// Renders the feed for the newest posts by publication date.
pub fn render_feed(
    items: &[ContentItem],
    dates: &PublishedDates,
    config: &FeedConfig,
    build_time: DateTime<Utc>,
) -> Result<String, AppError> {
    let handlebars = load_template(config)?;
    let site = config.site_url.base();

    let entries = sort_by_publication(items, dates, SortOrder::Descending)
        .into_iter()
        .take(FEED_ITEM_LIMIT)
        .map(|item| feed_entry(item, dates, site, &config.title))
        .collect::<Vec<_>>();

    log::debug!("Rendering feed with {} of {} items", entries.len(), items.len());

    let channel = FeedChannel {
        title: &config.title,
        site_url: site,
        description: &config.description,
        language: &config.language,
        last_build_date: build_time.to_rfc2822(),
        items: entries,
    };

    handlebars
        .render(TEMPLATE_NAME, &channel)
        .map_err(|e| AppError::FeedRender(e.to_string()))
}

/// Renders the feed and writes it atomically to `config.output`.
pub fn write_feed(
    items: &[ContentItem],
    dates: &PublishedDates,
    config: &FeedConfig,
    build_time: DateTime<Utc>,
) -> Result<(), AppError> {
    let xml = render_feed(items, dates, config, build_time)?;
    write_atomically(&config.output, &xml)?;
    log::info!("Wrote feed: {}", config.output.display());
    Ok(())
}

fn load_template(config: &FeedConfig) -> Result<Handlebars<'static>, AppError> {
    let source = match &config.template {
        Some(path) => read_template(path)?,
        None => FEED_TEMPLATE.to_string(),
    };

    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string(TEMPLATE_NAME, source)
        .map_err(|e| AppError::FeedRender(e.to_string()))?;
    Ok(handlebars)
}

fn read_template(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|e| {
        AppError::FeedRender(format!("cannot read template {}: {}", path.display(), e))
    })
}

fn feed_entry(item: &ContentItem, dates: &PublishedDates, site: &str, site_title: &str) -> FeedEntry {
    let meta = &item.metadata;
    let description = match meta.description.as_deref() {
        Some(description) if !description.is_empty() => description.to_string(),
        _ => format!("{} - {}", meta.title, site_title),
    };

    FeedEntry {
        title: meta.title.clone(),
        link: format!("{}/{}/{}", site, POSTS_PATH, meta.slug),
        description,
        pub_date: parse_timestamp(&publication_date(item, dates)).map(|d| d.to_rfc2822()),
    }
}
