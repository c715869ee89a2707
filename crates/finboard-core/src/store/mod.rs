//! Persistence client contract
//!
//! The edit endpoint talks to storage only through [`RecordStore`]. A store
//! owns its records; callers get clones and never cache them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::models::{Record, RecordChanges};

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Store reference type
pub type StoreRef<R> = Arc<dyn RecordStore<R>>;

/// Single-record find/update/delete by identifier.
///
/// `update` and `delete` are atomic per record and fail with
/// `CoreError::RecordNotFound` when the identifier does not resolve.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Look up exactly one record
    async fn find_unique(&self, id: &str) -> CoreResult<Option<R>>;

    /// Overwrite the mutable fields of a record and return the new state
    async fn update(&self, id: &str, changes: &RecordChanges) -> CoreResult<R>;

    /// Remove a record and return its last state
    async fn delete(&self, id: &str) -> CoreResult<R>;
}
