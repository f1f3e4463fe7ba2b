// src/constants.rs
//! Domain constants that define the operational boundaries of the sync job.
//!
//! Reading these constants should tell you how the job talks to Notion,
//! which database properties it understands and where it keeps its files.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips, since every round-trip costs a full pacing interval.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Minimum gap between two consecutive Notion API calls.
///
/// Notion allows an average of three requests per second per integration.
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(350);

/// Block kinds that may report `has_children` but whose children belong to
/// another document. Their subtrees are never fetched.
pub const OPAQUE_REFERENCE_BLOCK_KINDS: [&str; 2] = ["child_page", "child_database"];

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Database schema
// ---------------------------------------------------------------------------

/// Status value that marks a post as visible on the site.
pub const PUBLISHED_STATUS: &str = "Published";

pub const PROP_TITLE: &str = "Title";
pub const PROP_SLUG: &str = "Slug";
pub const PROP_TYPE: &str = "Type";
pub const PROP_STATUS: &str = "Status";
pub const PROP_DESCRIPTION: &str = "Description";
pub const PROP_TAGS: &str = "Tags";
pub const PROP_LAST_UPDATED: &str = "Last Updated";
pub const PROP_PUBLISHED_DATE: &str = "Published Date";

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Default directory holding the snapshot and the published-date overrides.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Snapshot file name inside the data directory.
pub const SNAPSHOT_FILE_NAME: &str = "posts.json";

/// Editorial slug → published date overrides inside the data directory.
pub const PUBLISHED_DATES_FILE_NAME: &str = "published-dates.json";

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

/// How many of the most recent items the syndication feed carries.
pub const FEED_ITEM_LIMIT: usize = 20;

/// Path prefix under which posts are served on the site.
pub const POSTS_PATH: &str = "posts";
