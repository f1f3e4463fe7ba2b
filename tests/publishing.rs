// tests/publishing.rs
//! Feed and ordering over a snapshot written by a sync run.

mod common;

use chrono::{TimeZone, Utc};
use common::{database_id, page, paragraph, FakeNotion};
use notion2site::{
    items_of_kind, sort_by_publication, write_feed, ContentKind, ContentSync, FeedConfig,
    PublishedDates, SnapshotStore, SortOrder, ValidatedUrl, PUBLISHED_DATES_FILE_NAME,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

async fn synced_snapshot(dir: &TempDir) -> Vec<notion2site::ContentItem> {
    let repo = FakeNotion::default()
        .with_page(page("a", "Alpha", "alpha", "Thought", "2024-03-01T09:00:00.000Z"))
        .with_page(page("b", "Beta", "beta", "Notebook", "2024-04-01T09:00:00.000Z"))
        .with_page(page("c", "Gamma", "gamma", "Thought", "2024-02-01T09:00:00.000Z"))
        .with_children("a", vec![paragraph("a1", "alpha body")]);

    ContentSync::new(repo, database_id(), SnapshotStore::in_dir(dir.path()))
        .run()
        .await
        .unwrap();
    SnapshotStore::in_dir(dir.path()).load()
}

#[tokio::test]
async fn pinned_dates_reorder_the_snapshot() {
    let dir = TempDir::new().unwrap();
    let items = synced_snapshot(&dir).await;
    fs::write(
        dir.path().join(PUBLISHED_DATES_FILE_NAME),
        r#"{"gamma": "2025-01-01"}"#,
    )
    .unwrap();
    let dates = PublishedDates::load_from_dir(dir.path());

    let newest_first: Vec<&str> = sort_by_publication(&items, &dates, SortOrder::Descending)
        .iter()
        .map(|item| item.slug())
        .collect();
    assert_eq!(newest_first, vec!["gamma", "beta", "alpha"]);

    let thoughts: Vec<&str> = items_of_kind(&items, ContentKind::Thought)
        .iter()
        .map(|item| item.slug())
        .collect();
    assert_eq!(thoughts, vec!["alpha", "gamma"]);
}

#[tokio::test]
async fn feed_is_written_atomically_next_to_the_site() {
    let dir = TempDir::new().unwrap();
    let items = synced_snapshot(&dir).await;
    let output = dir.path().join("public").join("feed.xml");
    let config = FeedConfig {
        output: output.clone(),
        site_url: ValidatedUrl::parse("https://notes.example.org").unwrap(),
        title: "Notes".into(),
        description: "Notes & sketches".into(),
        language: "en-GB".into(),
        template: None,
    };
    let build_time = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

    write_feed(&items, &PublishedDates::default(), &config, build_time).unwrap();

    let xml = fs::read_to_string(&output).unwrap();
    assert!(xml.contains("<description>Notes &amp; sketches</description>"));
    assert!(xml.contains("<language>en-GB</language>"));
    assert!(xml.contains("<link>https://notes.example.org/posts/beta</link>"));
    assert!(xml.contains("<description>Alpha - Notes</description>"));
    assert!(xml.contains("<pubDate>Mon, 1 Apr 2024 00:00:00 +0000</pubDate>"));
    assert_eq!(xml.matches("<item>").count(), 3);

    let leftovers: Vec<_> = fs::read_dir(output.parent().unwrap())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("feed.xml")]);
}

#[tokio::test]
async fn custom_template_replaces_the_builtin_one() {
    let dir = TempDir::new().unwrap();
    let items = synced_snapshot(&dir).await;
    let template = dir.path().join("feed.hbs");
    fs::write(&template, "{{title}}:{{#each items}} {{link}}{{/each}}").unwrap();
    let output = dir.path().join("feed.txt");
    let config = FeedConfig {
        output: output.clone(),
        site_url: ValidatedUrl::parse("https://example.com/").unwrap(),
        title: "Mini".into(),
        description: String::new(),
        language: "en".into(),
        template: Some(template),
    };

    write_feed(&items, &PublishedDates::default(), &config, Utc::now()).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Mini: https://example.com/posts/beta https://example.com/posts/alpha https://example.com/posts/gamma"
    );
}
