use super::actions::CounterAction;
use crate::error::EntryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use store_actor::StoredEntity;

/// A named counter holding the *next* value to hand out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceCounter {
    pub id: String,
    pub next: u64,
}

impl SequenceCounter {
    pub fn new(id: impl Into<String>, next: u64) -> Self {
        Self {
            id: id.into(),
            next,
        }
    }
}

#[async_trait]
impl StoredEntity for SequenceCounter {
    type Id = String;
    type Create = u64;
    type Update = Infallible;
    type Filter = ();
    type Sort = ();
    type Action = CounterAction;
    type ActionResult = u64;
    type Context = ();
    type Error = EntryError;

    fn from_create_params(id: String, start: u64) -> Result<Self, EntryError> {
        Ok(Self::new(id, start))
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn compare(&self, other: &Self, _sort: &()) -> Ordering {
        self.id.cmp(&other.id)
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), EntryError> {
        match update {}
    }

    async fn handle_action(&mut self, action: CounterAction, _ctx: &()) -> Result<u64, EntryError> {
        match action {
            CounterAction::FetchAndIncrement => {
                let current = self.next;
                self.next = current.checked_add(1).ok_or_else(|| {
                    EntryError::AllocationFailed(format!("counter {} exhausted", self.id))
                })?;
                Ok(current)
            }
        }
    }
}
