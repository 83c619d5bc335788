//! # Laundry Orders
//!
//! Order lifecycle, receipt sequencing and dashboard statistics for a laundry and
//! dry-cleaning business, built on single-writer store actors.
//!
//! | Module | Role |
//! |---|---|
//! | [`model`] | entries, statuses, receipt numbers, snapshots, request bodies |
//! | [`store`] | store capability traits, filters, sales grouping |
//! | [`entry_actor`], [`counter_actor`], [`snapshot_actor`] | the store actors |
//! | [`clients`] | typed clients implementing the store traits |
//! | [`sequence`] | receipt-number allocator |
//! | [`lifecycle`] | status state machine and initial entry construction |
//! | [`stats`] | aggregator and statistics cache |
//! | [`service`] | the write pipeline and read operations |
//! | [`runtime`] | system startup, wiring and shutdown |

pub mod clients;
pub mod clock;
pub mod config;
pub mod counter_actor;
pub mod entry_actor;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod runtime;
pub mod sequence;
pub mod service;
pub mod snapshot_actor;
pub mod stats;
pub mod store;
