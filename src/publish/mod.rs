//! Read-side helpers for site generators consuming the snapshot.
//!
//! Ordering by publication date and the RSS feed both need the editorial
//! date overrides in [`PublishedDates`].

mod feed;
mod ordering;
mod published_dates;

pub use feed::{render_feed, write_feed, FeedConfig, FEED_TEMPLATE};
pub use ordering::{
    items_of_kind, parse_timestamp, publication_date, sort_by_publication, SortOrder,
};
pub use published_dates::PublishedDates;
