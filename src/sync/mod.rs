//! The incremental synchronization engine.
//!
//! A run resolves the data source, lists published metadata, reuses cached
//! block trees whose watermark is unchanged, fetches the rest and hands the
//! reconciled list to the snapshot store.

mod blocks;
mod engine;
mod metadata;
mod reconcile;
mod source;

pub use blocks::BlockTreeFetcher;
pub use engine::{ContentSync, SyncReport};
pub use metadata::{extract_metadata, MetadataSynchronizer};
pub use reconcile::{reconcile, Reconciliation, SyncStats};
pub use source::resolve_data_source;
