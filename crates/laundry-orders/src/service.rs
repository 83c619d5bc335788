//! # Entry Service
//!
//! The write and read paths over entries. Every mutation runs the same pipeline:
//!
//! ```text
//! validate ─> (allocate receipt) ─> lifecycle ─> store write ─> invalidate statistics
//! ```
//!
//! Stores never touch statistics themselves; invalidation happens here, after the write has
//! been acknowledged.

use crate::clock::SharedClock;
use crate::error::EntryError;
use crate::lifecycle;
use crate::model::{
    Entry, EntryId, EntryPatch, EntryStatus, EntryUpdateRequest, NewEntryRequest,
    StatisticsSnapshot,
};
use crate::sequence::SequenceAllocator;
use crate::stats::{BusinessCalendar, DashboardBucket, StatisticsCache};
use crate::store::{EntryFilter, EntryQuery, EntrySort, OrderStore, SearchTerm};
use std::sync::Arc;
use store_actor::SortOrder;
use tracing::{debug, info, instrument, warn};

pub struct EntryService {
    store: Arc<dyn OrderStore>,
    allocator: SequenceAllocator,
    cache: Arc<StatisticsCache>,
    clock: SharedClock,
    calendar: BusinessCalendar,
    update_retries: u32,
}

fn newest_first(filter: EntryFilter) -> EntryQuery {
    EntryQuery::filtered(filter).sorted(EntrySort::CreatedAt, SortOrder::Descending)
}

fn not_found(id: EntryId) -> EntryError {
    EntryError::NotFound(id.to_string())
}

impl EntryService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        allocator: SequenceAllocator,
        cache: Arc<StatisticsCache>,
        clock: SharedClock,
        calendar: BusinessCalendar,
        update_retries: u32,
    ) -> Self {
        Self {
            store,
            allocator,
            cache,
            clock,
            calendar,
            update_retries,
        }
    }

    pub fn cache(&self) -> &Arc<StatisticsCache> {
        &self.cache
    }

    pub fn allocator(&self) -> &SequenceAllocator {
        &self.allocator
    }

    /// Creates an entry with the next receipt number.
    ///
    /// Invalid requests are rejected before a number is reserved. A number reserved for an
    /// insert that then fails is skipped, never reused. Once the insert succeeds the call
    /// succeeds.
    #[instrument(skip(self, request), fields(customer = %request.customer.name))]
    pub async fn create_entry(&self, request: NewEntryRequest) -> Result<Entry, EntryError> {
        lifecycle::check_creation_request(&request)?;
        let receipt_no = self.allocator.allocate().await?;
        let new_entry = lifecycle::initial_entry(request, receipt_no)?;

        let id = match self.store.insert(new_entry.clone()).await {
            Ok(id) => id,
            Err(e) => {
                warn!(%receipt_no, error = %e, "Insert failed; receipt number left unused");
                return Err(e);
            }
        };
        self.cache.invalidate();
        info!(%id, %receipt_no, "Entry created");

        // Stored from here on; a failed read-back still reports the creation.
        match self.store.find_by_id(id).await {
            Ok(Some(entry)) => Ok(entry),
            Ok(None) => {
                warn!(%id, "Created entry not readable yet, returning insert payload");
                Ok(Entry::from_new(id, new_entry, self.clock.now()))
            }
            Err(e) => {
                warn!(%id, error = %e, "Read-back failed, returning insert payload");
                Ok(Entry::from_new(id, new_entry, self.clock.now()))
            }
        }
    }

    /// Applies field changes and an optional status transition.
    ///
    /// The write is conditional on the revision that was read. On a conflicting concurrent
    /// write the entry is re-read and the request re-applied, up to the configured number of
    /// retries.
    #[instrument(skip(self, request), fields(status = ?request.status))]
    pub async fn update_entry(
        &self,
        id: EntryId,
        request: EntryUpdateRequest,
    ) -> Result<Entry, EntryError> {
        let status = request
            .status
            .as_deref()
            .map(lifecycle::parse_status)
            .transpose()?;

        for attempt in 0..=self.update_retries {
            let current = self.store.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

            let mut next = current.clone();
            request.apply_fields(&mut next);
            if let Some(status) = status {
                next = lifecycle::apply_status(&next, status, self.clock.now())?;
            }

            let patch = EntryPatch::Replace {
                expected_revision: current.revision,
                entry: Box::new(next),
            };
            match self.store.update_by_id(id, patch).await {
                Ok(Some(updated)) => {
                    self.cache.invalidate();
                    info!(
                        %id,
                        status = %updated.status,
                        revision = updated.revision,
                        "Entry updated"
                    );
                    return Ok(updated);
                }
                Ok(None) => return Err(not_found(id)),
                Err(EntryError::Conflict { expected, found }) => {
                    debug!(attempt, expected, found, "Concurrent write, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(%id, retries = self.update_retries, "Giving up after repeated conflicts");
        Err(EntryError::StorageUnavailable(format!(
            "{id} kept changing; gave up after {} retries",
            self.update_retries
        )))
    }

    /// Moves an entry to `status`, stamping the lifecycle date.
    pub async fn apply_status(
        &self,
        id: EntryId,
        status: EntryStatus,
    ) -> Result<Entry, EntryError> {
        self.update_entry(id, EntryUpdateRequest::status(status.as_str()))
            .await
    }

    /// Flips `visible` and returns the new value.
    #[instrument(skip(self))]
    pub async fn toggle_visibility(&self, id: EntryId) -> Result<bool, EntryError> {
        let updated = self
            .store
            .update_by_id(id, EntryPatch::ToggleVisibility)
            .await?
            .ok_or_else(|| not_found(id))?;
        self.cache.invalidate();
        info!(%id, visible = updated.visible, "Visibility toggled");
        Ok(updated.visible)
    }

    #[instrument(skip(self))]
    pub async fn delete_entry(&self, id: EntryId) -> Result<Entry, EntryError> {
        let removed = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;
        self.cache.invalidate();
        info!(%id, receipt_no = %removed.receipt_no, "Entry deleted");
        Ok(removed)
    }

    pub async fn get_entry(&self, id: EntryId) -> Result<Entry, EntryError> {
        self.store.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// All entries, newest first. Hidden entries only when `include_hidden`.
    pub async fn list_entries(&self, include_hidden: bool) -> Result<Vec<Entry>, EntryError> {
        let filter = if include_hidden {
            EntryFilter::all()
        } else {
            EntryFilter::visible_only()
        };
        self.store.find(newest_first(filter)).await
    }

    /// Customer-name substring (case-insensitive) or, for numeric input, exact receipt number.
    #[instrument(skip(self))]
    pub async fn search_entries(&self, query: &str) -> Result<Vec<Entry>, EntryError> {
        let term = SearchTerm::parse(query)
            .ok_or_else(|| EntryError::ValidationFailed("search query is required".into()))?;
        self.store
            .find(newest_first(EntryFilter::all().matching(term)))
            .await
    }

    /// The entries behind one dashboard counter, newest first.
    #[instrument(skip(self))]
    pub async fn dashboard_entries(
        &self,
        bucket: DashboardBucket,
        limit: usize,
    ) -> Result<Vec<Entry>, EntryError> {
        let now = self.clock.now();
        let today = self.calendar.today(now).ok_or_else(|| {
            EntryError::ValidationFailed(format!("{now} is outside the supported calendar range"))
        })?;
        self.store
            .find(newest_first(bucket.filter(today)).limit(limit))
            .await
    }

    pub async fn statistics(&self) -> Result<Arc<StatisticsSnapshot>, EntryError> {
        self.cache.get().await
    }
}
