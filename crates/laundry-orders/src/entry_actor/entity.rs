//! [`StoredEntity`] implementation for [`Entry`].

use crate::clock::SharedClock;
use crate::error::EntryError;
use crate::model::{Entry, EntryId, EntryPatch, NewEntry};
use crate::store::{EntryFilter, EntrySort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::convert::Infallible;
use store_actor::StoredEntity;

#[async_trait]
impl StoredEntity for Entry {
    type Id = EntryId;
    type Create = NewEntry;
    type Update = EntryPatch;
    type Filter = EntryFilter;
    type Sort = EntrySort;
    type Action = Infallible;
    type ActionResult = ();
    type Context = SharedClock;
    type Error = EntryError;

    /// Validates the payload. Timestamps are placeholders until `on_create` stamps them.
    fn from_create_params(id: EntryId, params: NewEntry) -> Result<Self, EntryError> {
        params.validate()?;
        Ok(Entry::from_new(id, params, DateTime::<Utc>::UNIX_EPOCH))
    }

    fn matches(&self, filter: &EntryFilter) -> bool {
        filter.matches(self)
    }

    fn compare(&self, other: &Self, sort: &EntrySort) -> Ordering {
        sort.compare(self, other)
    }

    async fn on_create(&mut self, clock: &SharedClock) -> Result<(), EntryError> {
        let now = clock.now();
        self.created_at = now;
        self.updated_at = now;
        Ok(())
    }

    /// # Patches
    /// - `Replace`: revision-checked overwrite of the mutable fields
    /// - `ToggleVisibility`: flips `visible`
    async fn on_update(
        &mut self,
        patch: EntryPatch,
        clock: &SharedClock,
    ) -> Result<(), EntryError> {
        match patch {
            EntryPatch::Replace {
                expected_revision,
                entry,
            } => {
                if expected_revision != self.revision {
                    return Err(EntryError::Conflict {
                        expected: expected_revision,
                        found: self.revision,
                    });
                }
                entry.validate()?;
                // The receipt number is fixed at insert time.
                let Entry {
                    customer,
                    status,
                    visible,
                    products,
                    charges,
                    pickup_and_delivery,
                    ..
                } = *entry;
                self.customer = customer;
                self.status = status;
                self.visible = visible;
                self.products = products;
                self.charges = charges;
                self.pickup_and_delivery = pickup_and_delivery;
            }
            EntryPatch::ToggleVisibility => {
                self.visible = !self.visible;
            }
        }
        self.updated_at = clock.now();
        self.revision += 1;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Infallible,
        _clock: &SharedClock,
    ) -> Result<(), EntryError> {
        match action {}
    }
}
