//! # Receipt Sequence Allocator
//!
//! Hands out receipt numbers from a single named counter. Each allocation is one
//! fetch-and-increment on the counter store, so concurrent creations never see the same
//! number. Numbers reserved by a creation that later fails are skipped, never reused.

use crate::error::EntryError;
use crate::model::ReceiptNumber;
use crate::store::CounterStore;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Name of the counter record backing receipt numbers.
pub const RECEIPT_COUNTER: &str = "receiptNumber";

#[derive(Clone)]
pub struct SequenceAllocator {
    store: Arc<dyn CounterStore>,
    counter_id: String,
}

impl SequenceAllocator {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self::named(store, RECEIPT_COUNTER)
    }

    pub fn named(store: Arc<dyn CounterStore>, counter_id: impl Into<String>) -> Self {
        Self {
            store,
            counter_id: counter_id.into(),
        }
    }

    /// Creates the counter at `seed` if it does not exist yet. An existing counter is left as is.
    #[instrument(skip(self), fields(counter = %self.counter_id))]
    pub async fn bootstrap(&self, seed: u64) -> Result<bool, EntryError> {
        let created = self.store.seed(&self.counter_id, seed).await?;
        if !created {
            info!("Counter already present, keeping its value");
        }
        Ok(created)
    }

    /// Reserves the next receipt number.
    ///
    /// Any failure to reach or advance the counter is reported as
    /// [`EntryError::AllocationFailed`].
    #[instrument(skip(self), fields(counter = %self.counter_id))]
    pub async fn allocate(&self) -> Result<ReceiptNumber, EntryError> {
        match self.store.fetch_and_increment(&self.counter_id).await {
            Ok(value) => {
                info!(receipt_no = value, "Allocated");
                Ok(ReceiptNumber(value))
            }
            Err(e @ EntryError::AllocationFailed(_)) => {
                warn!(error = %e, "Allocation failed");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Allocation failed");
                Err(EntryError::AllocationFailed(e.to_string()))
            }
        }
    }

    /// The number the next allocation will return, if the counter exists.
    pub async fn peek(&self) -> Result<Option<ReceiptNumber>, EntryError> {
        Ok(self
            .store
            .current(&self.counter_id)
            .await?
            .map(ReceiptNumber))
    }
}
