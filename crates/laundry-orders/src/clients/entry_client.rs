//! # Entry Client
//!
//! Typed access to the entry actor. Framework failures are mapped into [`EntryError`]:
//! entity errors are unwrapped, a closed or dropped actor becomes
//! [`EntryError::StorageUnavailable`].
use crate::error::EntryError;
use crate::model::{Entry, EntryId, EntryPatch, NewEntry};
use crate::store::{EntryFilter, EntryQuery, OrderStore, SalesAggregation, SalesRow};
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, Query, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct EntryClient {
    inner: ResourceClient<Entry>,
}

impl EntryClient {
    pub fn new(inner: ResourceClient<Entry>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Entry> for EntryClient {
    type Error = EntryError;

    fn inner(&self) -> &ResourceClient<Entry> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        EntryError::from(e)
    }
}

#[async_trait]
impl OrderStore for EntryClient {
    #[instrument(skip(self, entry), fields(receipt_no = %entry.receipt_no))]
    async fn insert(&self, entry: NewEntry) -> Result<EntryId, EntryError> {
        debug!("Sending request");
        self.inner.create(entry).await.map_err(Self::map_error)
    }

    async fn find_by_id(&self, id: EntryId) -> Result<Option<Entry>, EntryError> {
        ActorClient::get(self, id).await
    }

    async fn find(&self, query: EntryQuery) -> Result<Vec<Entry>, EntryError> {
        ActorClient::find(self, query).await
    }

    async fn count(&self, filter: EntryFilter) -> Result<u64, EntryError> {
        ActorClient::count(self, filter).await
    }

    #[instrument(skip(self, patch))]
    async fn update_by_id(
        &self,
        id: EntryId,
        patch: EntryPatch,
    ) -> Result<Option<Entry>, EntryError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    async fn delete_by_id(&self, id: EntryId) -> Result<Option<Entry>, EntryError> {
        ActorClient::delete(self, id).await
    }

    /// Scans the matching entries and groups them on the caller's side of the channel, so the
    /// actor is only busy for the scan itself.
    #[instrument(skip(self, aggregation), fields(group_by = ?aggregation.group_by))]
    async fn aggregate(&self, aggregation: SalesAggregation) -> Result<Vec<SalesRow>, EntryError> {
        let entries = self
            .inner
            .find(Query::filtered(aggregation.filter.clone()))
            .await
            .map_err(Self::map_error)?;
        let rows = aggregation.run(&entries);
        debug!(scanned = entries.len(), rows = rows.len(), "Aggregated");
        Ok(rows)
    }
}
