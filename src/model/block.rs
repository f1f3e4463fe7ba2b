use crate::constants::OPAQUE_REFERENCE_BLOCK_KINDS;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One node of a post's body.
///
/// Apart from the fields the sync logic reads, the raw API object is kept
/// verbatim in `payload` so the renderer sees exactly what Notion returned.
/// `children` is only present on container blocks whose subtree was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ContentBlock>>,
}

impl ContentBlock {
    /// Decodes one entry of a block-children listing.
    ///
    /// Returns `None` for partial objects (no `id` or `type`), which the API
    /// emits for blocks the integration cannot read.
    pub fn from_raw(raw: Value) -> Option<Self> {
        match serde_json::from_value::<ContentBlock>(raw) {
            Ok(mut block) => {
                // Children are attached by the tree fetcher, never taken from the source.
                block.children = None;
                Some(block)
            }
            Err(e) => {
                log::debug!("Skipping partial block object: {}", e);
                None
            }
        }
    }

    /// Whether the kind references another document instead of owning content.
    pub fn is_opaque_reference(&self) -> bool {
        OPAQUE_REFERENCE_BLOCK_KINDS.contains(&self.kind.as_str())
    }

    /// Whether the subtree of this block must be fetched and embedded.
    pub fn needs_children(&self) -> bool {
        self.has_children && !self.is_opaque_reference()
    }

    /// Number of blocks in this subtree, including the block itself.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(ContentBlock::subtree_len)
            .sum::<usize>()
    }
}
