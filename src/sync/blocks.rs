// src/sync/blocks.rs
//! Recursive retrieval of a page's block tree.

use crate::api::pagination::fetch_all_pages;
use crate::api::NotionRepository;
use crate::error::AppError;
use crate::model::ContentBlock;
use crate::pipeline::BlockSource;
use futures::future::{BoxFuture, FutureExt};

/// Fetches the complete block tree of a page, one level at a time.
///
/// Each level is fully paginated before any of its children are visited.
/// Blocks that embed another document (`child_page`, `child_database`) are
/// kept as leaves even when they report children.
///
/// Recursion depth follows the nesting depth of the page. Notion caps block
/// nesting well below anything that would threaten the stack, so no explicit
/// limit is enforced.
pub struct BlockTreeFetcher<'a, R: ?Sized> {
    repo: &'a R,
}

impl<'a, R: NotionRepository + ?Sized> BlockTreeFetcher<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Returns the children of `block_id`, each with its own subtree attached.
    pub fn fetch_tree<'b>(
        &'b self,
        block_id: &'b str,
    ) -> BoxFuture<'b, Result<Vec<ContentBlock>, AppError>> {
        async move {
            let repo = self.repo;
            let listing =
                fetch_all_pages(move |page| repo.list_block_children(block_id, page)).await?;

            let mut blocks = Vec::with_capacity(listing.items.len());
            for raw in listing.items {
                let Some(mut block) = ContentBlock::from_raw(raw) else {
                    log::debug!("Ignoring partial block object under {}", block_id);
                    continue;
                };

                if block.needs_children() {
                    let child_id = block.id.clone();
                    block.children = Some(self.fetch_tree(&child_id).await?);
                }

                blocks.push(block);
            }

            Ok(blocks)
        }
        .boxed()
    }
}

#[async_trait::async_trait]
impl<R: NotionRepository + ?Sized> BlockSource for BlockTreeFetcher<'_, R> {
    async fn fetch_block_tree(&self, block_id: &str) -> Result<Vec<ContentBlock>, AppError> {
        self.fetch_tree(block_id).await
    }
}
