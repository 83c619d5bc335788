use crate::error::EntryError;
use crate::model::StatisticsSnapshot;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::convert::Infallible;
use store_actor::StoredEntity;

/// A persisted statistics snapshot under its document key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSnapshot {
    pub id: String,
    pub snapshot: StatisticsSnapshot,
}

#[async_trait]
impl StoredEntity for StoredSnapshot {
    type Id = String;
    type Create = Infallible;
    type Update = Infallible;
    type Filter = ();
    type Sort = ();
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = EntryError;

    /// The singleton is only ever written with a keyed put.
    fn from_create_params(_id: String, params: Infallible) -> Result<Self, EntryError> {
        match params {}
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn compare(&self, other: &Self, _sort: &()) -> Ordering {
        self.snapshot.computed_at.cmp(&other.snapshot.computed_at)
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), EntryError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), EntryError> {
        match action {}
    }
}
