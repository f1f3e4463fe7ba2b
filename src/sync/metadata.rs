// src/sync/metadata.rs
//! Lists published posts and projects their properties onto typed metadata.

use crate::api::pagination::fetch_all_pages;
use crate::api::types::{DataSourceQuery, RawPage};
use crate::api::NotionRepository;
use crate::constants::*;
use crate::error::AppError;
use crate::model::{ContentItemMetadata, ContentKind};
use crate::pipeline::MetadataSource;
use std::collections::HashSet;

/// Reads post metadata (properties only, no blocks) from a data source.
pub struct MetadataSynchronizer<'a, R: ?Sized> {
    repo: &'a R,
}

impl<'a, R: NotionRepository + ?Sized> MetadataSynchronizer<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }
}

#[async_trait::async_trait]
impl<R: NotionRepository + ?Sized> MetadataSource for MetadataSynchronizer<'_, R> {
    async fn fetch_published_metadata(
        &self,
        data_source_id: &str,
    ) -> Result<Vec<ContentItemMetadata>, AppError> {
        log::info!("Fetching published posts metadata from Notion...");

        let repo = self.repo;
        let query = &DataSourceQuery::published();
        let listing =
            fetch_all_pages(move |page| repo.query_data_source(data_source_id, query, page)).await?;

        let mut seen = HashSet::new();
        let mut metas = Vec::with_capacity(listing.items.len());

        for raw in listing.items {
            let Some(page) = RawPage::from_raw(raw) else {
                continue;
            };
            let meta = extract_metadata(&page);

            if meta.slug.is_empty() {
                log::warn!("Skipping post \"{}\": no slug", meta.title);
                continue;
            }
            if !seen.insert(meta.id.clone()) {
                log::warn!("Skipping duplicate post id {} (\"{}\")", meta.id, meta.title);
                continue;
            }

            metas.push(meta);
        }

        log::info!(
            "Found {} published posts over {} page(s)",
            metas.len(),
            listing.pages_fetched
        );
        Ok(metas)
    }
}

/// Projects a raw page onto post metadata.
///
/// Never fails: a property that is missing or has an unexpected shape
/// contributes the zero value of its field.
pub fn extract_metadata(page: &RawPage) -> ContentItemMetadata {
    let description = page.property(PROP_DESCRIPTION).rich_text();

    ContentItemMetadata {
        id: page.id.clone(),
        title: page.property(PROP_TITLE).title_text(),
        slug: page.property(PROP_SLUG).rich_text(),
        kind: ContentKind::resolve(&page.property(PROP_TYPE).choice_name()),
        status: page.property(PROP_STATUS).status_name(),
        description: (!description.is_empty()).then_some(description),
        tags: page.property(PROP_TAGS).multi_select_names(),
        last_updated: page.property(PROP_LAST_UPDATED).date_or_edit_time(),
        last_edited_time: page.last_edited_time.clone(),
        created_time: page.created_time.clone(),
        published_date: page.property(PROP_PUBLISHED_DATE).date_start(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{DatabaseObject, PageRequest, PaginatedResponse};
    use crate::types::NotionId;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    /// Serves a fixed query listing in a single page.
    struct Listing(Vec<Value>);

    #[async_trait::async_trait]
    impl NotionRepository for Listing {
        async fn retrieve_database(&self, _id: &NotionId) -> Result<DatabaseObject, AppError> {
            unreachable!("metadata tests never resolve databases")
        }

        async fn query_data_source(
            &self,
            _id: &str,
            _query: &DataSourceQuery,
            _page: PageRequest,
        ) -> Result<PaginatedResponse<Value>, AppError> {
            Ok(PaginatedResponse {
                results: self.0.clone(),
                next_cursor: None,
                has_more: false,
            })
        }

        async fn list_block_children(
            &self,
            _block_id: &str,
            _page: PageRequest,
        ) -> Result<PaginatedResponse<Value>, AppError> {
            unreachable!("metadata tests never list blocks")
        }
    }

    fn listed_page(id: &str, properties: Value) -> Value {
        json!({
            "object": "page",
            "id": id,
            "created_time": "2024-01-01T00:00:00.000Z",
            "last_edited_time": "2024-02-01T12:30:00.000Z",
            "properties": properties
        })
    }

    #[tokio::test]
    async fn posts_without_slug_property_are_dropped() {
        let repo = Listing(vec![
            listed_page(
                "kept",
                json!({
                    "Title": {"type": "title", "title": [{"plain_text": "Kept"}]},
                    "Slug": {"type": "rich_text", "rich_text": [{"plain_text": "kept"}]}
                }),
            ),
            listed_page(
                "no-slug-property",
                json!({"Title": {"type": "title", "title": [{"plain_text": "Orphan"}]}}),
            ),
            listed_page(
                "empty-slug",
                json!({"Slug": {"type": "rich_text", "rich_text": []}}),
            ),
        ]);

        let metas = MetadataSynchronizer::new(&repo)
            .fetch_published_metadata("ds")
            .await
            .unwrap();

        let ids: Vec<&str> = metas.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["kept"]);
    }

    #[tokio::test]
    async fn repeated_ids_and_non_pages_are_skipped() {
        let slug = json!({"Slug": {"type": "rich_text", "rich_text": [{"plain_text": "s"}]}});
        let repo = Listing(vec![
            listed_page("p1", slug.clone()),
            listed_page("p1", slug.clone()),
            json!({"object": "data_source", "id": "ds", "properties": slug}),
        ]);

        let metas = MetadataSynchronizer::new(&repo)
            .fetch_published_metadata("ds")
            .await
            .unwrap();

        assert_eq!(metas.len(), 1);
    }

    fn raw_page(properties: serde_json::Value) -> RawPage {
        RawPage::from_raw(json!({
            "object": "page",
            "id": "page-1",
            "created_time": "2024-01-01T00:00:00.000Z",
            "last_edited_time": "2024-02-01T12:30:00.000Z",
            "properties": properties
        }))
        .unwrap()
    }

    #[test]
    fn extracts_every_field() {
        let page = raw_page(json!({
            "Title": {"type": "title", "title": [{"plain_text": "On "}, {"plain_text": "Rust"}]},
            "Slug": {"type": "rich_text", "rich_text": [{"plain_text": "on-rust"}]},
            "Type": {"type": "select", "select": {"name": "Notebook"}},
            "Status": {"type": "status", "status": {"name": "Published"}},
            "Description": {"type": "rich_text", "rich_text": [{"plain_text": "Notes"}]},
            "Tags": {"type": "multi_select", "multi_select": [{"name": "rust"}, {"name": "notes"}]},
            "Last Updated": {"type": "date", "date": {"start": "2024-02-01"}},
            "Published Date": {"type": "date", "date": {"start": "2024-01-15"}}
        }));

        assert_eq!(
            extract_metadata(&page),
            ContentItemMetadata {
                id: "page-1".into(),
                title: "On Rust".into(),
                slug: "on-rust".into(),
                kind: ContentKind::Notebook,
                status: "Published".into(),
                description: Some("Notes".into()),
                tags: vec!["rust".into(), "notes".into()],
                last_updated: Some("2024-02-01".into()),
                last_edited_time: "2024-02-01T12:30:00.000Z".into(),
                created_time: "2024-01-01T00:00:00.000Z".into(),
                published_date: Some("2024-01-15".into()),
            }
        );
    }

    #[test]
    fn mismatched_shapes_yield_zero_values() {
        let page = raw_page(json!({
            "Title": {"type": "rich_text", "rich_text": [{"plain_text": "wrong shape"}]},
            "Slug": {"type": "title", "title": [{"plain_text": "also-wrong"}]},
            "Type": {"type": "multi_select", "multi_select": []},
            "Status": {"type": "select", "select": {"name": "Published"}},
            "Description": {"type": "rich_text", "rich_text": []},
            "Tags": {"type": "select", "select": {"name": "x"}},
            "Last Updated": {"type": "number", "number": 3},
            "Published Date": {"type": "last_edited_time", "last_edited_time": "2024-01-01T00:00:00.000Z"}
        }));

        let meta = extract_metadata(&page);
        assert_eq!(meta.title, "");
        assert_eq!(meta.slug, "");
        assert_eq!(meta.kind, ContentKind::Publication);
        assert_eq!(meta.status, "");
        assert_eq!(meta.description, None);
        assert!(meta.tags.is_empty());
        assert_eq!(meta.last_updated, None);
        assert_eq!(meta.published_date, None);
    }

    #[test]
    fn type_can_come_from_a_status_property() {
        let page = raw_page(json!({
            "Type": {"type": "status", "status": {"name": "Thought"}},
            "Last Updated": {"type": "last_edited_time", "last_edited_time": "2024-03-03T03:03:00.000Z"}
        }));

        let meta = extract_metadata(&page);
        assert_eq!(meta.kind, ContentKind::Thought);
        assert_eq!(meta.last_updated.as_deref(), Some("2024-03-03T03:03:00.000Z"));
    }
}
