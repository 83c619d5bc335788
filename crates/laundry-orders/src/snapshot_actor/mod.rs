//! # Snapshot Actor
//!
//! Holds the persisted statistics snapshot: a single document under
//! [`STATS_SNAPSHOT_ID`], overwritten in place on every recomputation. The document is
//! derived data; losing it only costs one recomputation.

pub mod entity;

pub use entity::*;

use store_actor::{ResourceActor, ResourceClient};

/// Key of the singleton statistics document.
pub const STATS_SNAPSHOT_ID: &str = "entryStats";

/// Creates a new snapshot actor and its client.
pub fn new(
    buffer_size: usize,
) -> (ResourceActor<StoredSnapshot>, ResourceClient<StoredSnapshot>) {
    // No create path exists, so the generator is never consulted.
    ResourceActor::new(buffer_size, || STATS_SNAPSHOT_ID.to_string())
}
