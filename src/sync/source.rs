use crate::api::NotionRepository;
use crate::error::AppError;
use crate::types::NotionId;

/// Resolves the queryable data source behind a database.
///
/// Databases may expose several data sources; posts live in the first one.
pub async fn resolve_data_source<R>(repo: &R, database_id: &NotionId) -> Result<String, AppError>
where
    R: NotionRepository + ?Sized,
{
    let database = repo.retrieve_database(database_id).await?;

    if database.data_sources.len() > 1 {
        log::debug!(
            "Database {} has {} data sources; using the first",
            database.id,
            database.data_sources.len()
        );
    }

    let source = database
        .data_sources
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NoDataSources {
            database_id: database_id.to_hyphenated(),
        })?;

    log::debug!(
        "Using data source {} ({})",
        source.id,
        source.name.as_deref().unwrap_or("unnamed")
    );
    Ok(source.id)
}
