//! Domain clients for the store actors.
//!
//! Each wraps a generic [`ResourceClient`](store_actor::ResourceClient), inherits the standard
//! reads from [`ActorClient`](store_actor::ActorClient), and implements the matching store
//! capability trait from [`crate::store`].

pub mod counter_client;
pub mod entry_client;
pub mod snapshot_client;

pub use counter_client::CounterClient;
pub use entry_client::EntryClient;
pub use snapshot_client::SnapshotClient;
