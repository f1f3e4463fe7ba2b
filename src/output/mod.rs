// src/output/mod.rs
//! Everything that reaches the filesystem: the snapshot and atomic file writes.

mod snapshot;
mod writer;

pub use snapshot::SnapshotStore;
pub use writer::write_atomically;
