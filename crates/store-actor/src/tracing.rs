//! # Tracing Setup
//!
//! Structured logging for every store and the services built on them. Stores log one event
//! per request, tagged with `entity_type` and the document ID; services wrap their
//! operations in spans (`#[tracing::instrument]`) so a single request reads as one tree.
//!
//! ```bash
//! RUST_LOG=info cargo run                          # lifecycle and writes
//! RUST_LOG=debug cargo run                         # every request, with payloads
//! RUST_LOG=store_actor=warn,laundry_orders=debug   # quiet stores, chatty services
//! ```
//!
//! | Level | Emitted for |
//! |---|---|
//! | `info` | actor start/stop, committed writes |
//! | `debug` | reads, scans, request payloads |
//! | `warn` | rejected hooks, missing documents for actions |

/// Installs the global `fmt` subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops (handy for tests).
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already names the source
        .compact()
        .try_init();
}
