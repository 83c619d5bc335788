//! # Store Actor
//!
//! Building blocks for document stores that live behind a Tokio actor. Every collection
//! (orders, counters, cached snapshots) is owned by exactly one [`ResourceActor`] task and
//! reached only through a cloneable [`ResourceClient`]. Requests are processed one at a time,
//! so each request, including a custom action, is atomic with respect to every other request
//! on the same store.
//!
//! ## Layers
//!
//! 1. **Document Layer** ([`StoredEntity`]) - the document type, its filter and sort
//!    vocabulary, and its lifecycle hooks.
//! 2. **Runtime Layer** ([`ResourceActor`]) - the request loop owning the documents.
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests and
//!    domain error mapping.
//!
//! ## Request Surface
//!
//! | Request | Reply | Notes |
//! |---|---|---|
//! | `create` | ID | ID drawn from the actor's generator |
//! | `put` | `bool` | [`PutMode::Upsert`] or [`PutMode::IfAbsent`] |
//! | `get` | `Option<T>` | |
//! | `find` | `Vec<T>` | [`Query`]: filter, sort, skip, limit |
//! | `count` | `u64` | |
//! | `update` | `Option<T>` | `None` when the ID is unknown |
//! | `delete` | `Option<T>` | `None` when the ID is unknown |
//! | `perform_action` | `T::ActionResult` | atomic read-modify-write |
//!
//! ## Context Injection
//!
//! Dependencies reach hooks through [`ResourceActor::run`], not the constructor, so stores
//! can be created first and wired afterwards:
//!
//! ```rust
//! use store_actor::{Query, ResourceActor, SortOrder, StoredEntity};
//! use async_trait::async_trait;
//! use std::cmp::Ordering;
//!
//! #[derive(Clone, Debug)]
//! struct Ticket { id: u32, owner: String, open: bool }
//!
//! #[derive(Debug)] struct TicketCreate { owner: String }
//! #[derive(Debug)] struct Prefix(&'static str);
//! #[derive(Debug, thiserror::Error)] #[error("closed ticket")] struct TicketError;
//!
//! #[async_trait]
//! impl StoredEntity for Ticket {
//!     type Id = u32;
//!     type Create = TicketCreate;
//!     type Update = bool;
//!     type Filter = Option<bool>;
//!     type Sort = ();
//!     type Action = ();
//!     type ActionResult = ();
//!     type Context = Prefix;
//!     type Error = TicketError;
//!
//!     fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, TicketError> {
//!         Ok(Self { id, owner: params.owner, open: true })
//!     }
//!     fn matches(&self, open: &Option<bool>) -> bool { open.map_or(true, |o| o == self.open) }
//!     fn compare(&self, other: &Self, _: &()) -> Ordering { self.id.cmp(&other.id) }
//!
//!     async fn on_create(&mut self, ctx: &Prefix) -> Result<(), TicketError> {
//!         self.owner = format!("{}{}", ctx.0, self.owner);
//!         Ok(())
//!     }
//!     async fn on_update(&mut self, open: bool, _: &Prefix) -> Result<(), TicketError> {
//!         if !self.open { return Err(TicketError); }
//!         self.open = open;
//!         Ok(())
//!     }
//!     async fn handle_action(&mut self, _: (), _: &Prefix) -> Result<(), TicketError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut next = 0u32;
//!     let (actor, client) = ResourceActor::<Ticket>::new(16, move || { next += 1; next });
//!     tokio::spawn(actor.run(Prefix("ops/")));
//!
//!     let a = client.create(TicketCreate { owner: "ana".into() }).await.unwrap();
//!     client.create(TicketCreate { owner: "raj".into() }).await.unwrap();
//!     client.update(a, false).await.unwrap();
//!
//!     let open = client
//!         .find(Query::filtered(Some(true)).sorted((), SortOrder::Descending))
//!         .await
//!         .unwrap();
//!     assert_eq!(open.len(), 1);
//!     assert_eq!(open[0].owner, "ops/raj");
//!
//!     // A rejected hook leaves the stored document untouched.
//!     assert!(client.update(a, true).await.is_err());
//!     assert!(!client.get(a).await.unwrap().unwrap().open);
//! }
//! ```
//!
//! ## Shutdown
//!
//! An actor stops once every client clone is dropped and its channel drains. Systems that own
//! several stores drop their clients and await the join handles.
//!
//! ## Testing
//!
//! [`mock::MockClient`] hands out a real `ResourceClient<T>` answered from scripted replies,
//! for driving callers into failure paths without a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::StoredEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use query::{PutMode, Query, SortOrder};
