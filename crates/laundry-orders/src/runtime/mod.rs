//! # System Lifecycle
//!
//! Starting, wiring and stopping the store actors behind the entry service.
//!
//! ## Startup order
//!
//! 1. **Actors**: entries, counters, snapshots, each in its own Tokio task. The entry actor
//!    receives the clock as its context.
//! 2. **Bootstrap**: the receipt counter is seeded if absent.
//! 3. **Warm start**: the persisted statistics snapshot becomes the cache's fallback.
//!
//! ## Shutdown
//!
//! [`EntrySystem::shutdown`] drops the service (and with it every client), then awaits each
//! actor task. Actors exit once their channel closes, so no explicit stop message is needed.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the `RUST_LOG`-filtered subscriber:
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle and writes
//! RUST_LOG=debug cargo run     # every store request
//! ```

pub mod entry_system;

pub use entry_system::*;
pub use store_actor::tracing::setup_tracing;
