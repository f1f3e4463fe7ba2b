// src/publish/ordering.rs
//! Publication dates and ordering over snapshot items.

use super::PublishedDates;
use crate::model::{ContentItem, ContentKind};
use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    /// Newest first.
    #[default]
    Descending,
}

/// The date shown for a post: its pinned editorial date, or the day it was
/// last edited.
pub fn publication_date(item: &ContentItem, dates: &PublishedDates) -> String {
    match dates.get(item.slug()) {
        Some(date) => date.to_string(),
        None => item
            .watermark()
            .split('T')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// Full-precision ordering key: pinned date, else the edit watermark.
fn ordering_key<'a>(item: &'a ContentItem, dates: &'a PublishedDates) -> &'a str {
    dates.get(item.slug()).unwrap_or_else(|| item.watermark())
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (as UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Orders items by publication date. Items whose date cannot be parsed go
/// last in either order; ties keep their snapshot order.
pub fn sort_by_publication<'a>(
    items: &'a [ContentItem],
    dates: &PublishedDates,
    order: SortOrder,
) -> Vec<&'a ContentItem> {
    let mut keyed: Vec<(Option<DateTime<Utc>>, &ContentItem)> = items
        .iter()
        .map(|item| (parse_timestamp(ordering_key(item, dates)), item))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(b),
            SortOrder::Descending => b.cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(_, item)| item).collect()
}

pub fn items_of_kind(items: &[ContentItem], kind: ContentKind) -> Vec<&ContentItem> {
    items
        .iter()
        .filter(|item| item.metadata.kind == kind)
        .collect()
}
