//! # Store Interfaces
//!
//! Capability traits the core consumes. The production implementations are the actor clients
//! in [`crate::clients`]; tests substitute mocks or counting wrappers.
//!
//! | Trait | Backing store | Used by |
//! |---|---|---|
//! | [`OrderStore`] | entry actor | service, aggregator |
//! | [`CounterStore`] | counter actor | sequence allocator |
//! | [`SnapshotStore`] | snapshot actor | statistics cache |

pub mod aggregation;
pub mod filter;

pub use aggregation::*;
pub use filter::*;

use crate::error::EntryError;
use crate::model::{Entry, EntryId, EntryPatch, NewEntry, StatisticsSnapshot};
use async_trait::async_trait;
use store_actor::Query;

/// Filtered, sorted, windowed scan over entries.
pub type EntryQuery = Query<Entry>;

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, entry: NewEntry) -> Result<EntryId, EntryError>;

    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, EntryError>;

    async fn find(&self, query: EntryQuery) -> Result<Vec<Entry>, EntryError>;

    async fn count(&self, filter: EntryFilter) -> Result<u64, EntryError>;

    /// Applies `patch` atomically; `None` when `id` is unknown.
    async fn update_by_id(&self, id: EntryId, patch: EntryPatch)
        -> Result<Option<Entry>, EntryError>;

    async fn delete_by_id(&self, id: EntryId) -> Result<Option<Entry>, EntryError>;

    async fn aggregate(&self, aggregation: SalesAggregation) -> Result<Vec<SalesRow>, EntryError>;
}

#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Creates the counter at `start` unless it already exists. Returns whether it was created.
    async fn seed(&self, counter_id: &str, start: u64) -> Result<bool, EntryError>;

    /// Returns the current value and stores `value + 1`, as one atomic step.
    async fn fetch_and_increment(&self, counter_id: &str) -> Result<u64, EntryError>;

    async fn current(&self, counter_id: &str) -> Result<Option<u64>, EntryError>;
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn upsert_singleton(&self, snapshot: StatisticsSnapshot) -> Result<(), EntryError>;

    async fn get_singleton(&self) -> Result<Option<StatisticsSnapshot>, EntryError>;
}
