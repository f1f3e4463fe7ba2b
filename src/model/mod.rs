//! Domain model of the synchronized content: items, their metadata and block trees.

mod block;
mod property_value;

pub use block::ContentBlock;
pub use property_value::{DateValue, PropertyValue, RichTextItem, SelectOption};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of content kinds a post can belong to.
///
/// Unknown labels resolve to [`ContentKind::Publication`], both when read from
/// Notion and when read back from an older snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Thought,
    Notebook,
    #[default]
    #[serde(other)]
    Publication,
}

impl ContentKind {
    /// Resolves a raw category label (case-insensitive) to a content kind.
    pub fn resolve(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "thought" => Self::Thought,
            "notebook" => Self::Notebook,
            _ => Self::Publication,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publication => "publication",
            Self::Thought => "thought",
            Self::Notebook => "notebook",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lightweight per-post fields read from the database query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemMetadata {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(rename = "type", default)]
    pub kind: ContentKind,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Change-detection watermark. Compared as an exact string, never parsed.
    pub last_edited_time: String,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub published_date: Option<String>,
}

/// A post: its metadata plus the full block tree of its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(flatten)]
    pub metadata: ContentItemMetadata,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

impl ContentItem {
    pub fn new(metadata: ContentItemMetadata, blocks: Vec<ContentBlock>) -> Self {
        Self { metadata, blocks }
    }

    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    pub fn slug(&self) -> &str {
        &self.metadata.slug
    }

    pub fn watermark(&self) -> &str {
        &self.metadata.last_edited_time
    }
}
