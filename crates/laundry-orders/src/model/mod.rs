//! Domain types: entries (orders), their status, receipt numbers and statistics snapshots.

pub mod entry;
pub mod receipt;
pub mod request;
pub mod snapshot;
pub mod status;

pub use entry::*;
pub use receipt::*;
pub use request::*;
pub use snapshot::*;
pub use status::*;
