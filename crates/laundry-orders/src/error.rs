//! Error types shared by every entry, counter and snapshot operation.

use store_actor::FrameworkError;
use thiserror::Error;

/// Errors surfaced by the order lifecycle, the receipt allocator and the statistics engine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EntryError {
    /// A required field is missing or malformed. Rejects the single request.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The receipt counter is missing or its increment could not be committed.
    #[error("Receipt allocation failed: {0}")]
    AllocationFailed(String),

    /// Unknown status value, or a transition that would move an entry backwards.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// The backing store could not be reached. Retryable.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// No entry exists under the given ID.
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// A conditional write saw a different revision than the caller read.
    #[error("Revision conflict: expected {expected}, found {found}")]
    Conflict { expected: u64, found: u64 },
}

impl EntryError {
    /// Whether retrying the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EntryError::StorageUnavailable(_) | EntryError::Conflict { .. }
        )
    }
}

impl From<FrameworkError> for EntryError {
    fn from(e: FrameworkError) -> Self {
        if e.is_disconnected() {
            return EntryError::StorageUnavailable(e.to_string());
        }
        match e.downcast_entity::<EntryError>() {
            Ok(inner) => inner,
            Err(FrameworkError::NotFound(id)) => EntryError::NotFound(id),
            Err(other) => EntryError::StorageUnavailable(other.to_string()),
        }
    }
}
