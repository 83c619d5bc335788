//! # Entry Actor
//!
//! The store that owns every [`Entry`]. One `ResourceActor<Entry>` task processes inserts,
//! scans, conditional updates and deletes one at a time.
//!
//! ## Write rules enforced here
//!
//! - Inserts and replaces are validated field by field ([`EntryError::ValidationFailed`]).
//! - `created_at`/`updated_at` come from the [`Clock`](crate::clock::Clock) injected through
//!   the actor context; every write bumps `updated_at` and `revision`.
//! - [`EntryPatch::Replace`](crate::model::EntryPatch::Replace) is conditional on the
//!   revision the caller read ([`EntryError::Conflict`] otherwise).
//!
//! The store performs no statistics side effects; callers invalidate the statistics cache.
//!
//! ## Usage
//!
//! ```rust
//! use laundry_orders::clock::SystemClock;
//! use laundry_orders::entry_actor;
//! use laundry_orders::clients::EntryClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, generic_client) = entry_actor::new(32);
//!     let client = EntryClient::new(generic_client);
//!     tokio::spawn(actor.run(Arc::new(SystemClock)));
//!     # drop(client);
//! }
//! ```
//!
//! [`Entry`]: crate::model::Entry
//! [`EntryError::ValidationFailed`]: crate::error::EntryError::ValidationFailed
//! [`EntryError::Conflict`]: crate::error::EntryError::Conflict

pub mod entity;

use crate::model::{Entry, EntryId};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use store_actor::{ResourceActor, ResourceClient};

/// Creates a new entry actor and its client. IDs are `entry_1`, `entry_2`, ...
pub fn new(buffer_size: usize) -> (ResourceActor<Entry>, ResourceClient<Entry>) {
    let id_counter = Arc::new(AtomicU32::new(1));
    let next_id = move || EntryId(id_counter.fetch_add(1, Ordering::SeqCst));
    ResourceActor::new(buffer_size, next_id)
}
