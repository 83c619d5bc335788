//! # Counter Actor
//!
//! Named monotonic counters. The only mutation is [`CounterAction::FetchAndIncrement`],
//! which runs inside the actor's single request loop and is therefore atomic: two concurrent
//! callers can never read the same value.
//!
//! Counters are created with a keyed `Put` in [`PutMode::IfAbsent`](store_actor::PutMode)
//! (see [`CounterClient::seed`](crate::clients::CounterClient)) and are never updated or
//! deleted through any other path.

pub mod actions;
pub mod entity;

pub use actions::*;
pub use entity::*;

use store_actor::{ResourceActor, ResourceClient};

/// Creates a new counter actor and its client.
pub fn new(
    buffer_size: usize,
) -> (ResourceActor<SequenceCounter>, ResourceClient<SequenceCounter>) {
    // Names for counters created without one; the receipt counter is always seeded by name.
    let mut generated = 0u64;
    let next_id = move || {
        generated += 1;
        format!("counter_{generated}")
    };
    ResourceActor::new(buffer_size, next_id)
}
