//! # StoredEntity Trait
//!
//! The `StoredEntity` trait is the contract every document kept by a [`ResourceActor`](crate::ResourceActor)
//! must satisfy. It names the associated types for IDs, creation and patch payloads, filters,
//! sort keys, custom actions, context and errors, and provides the lifecycle hooks
//! (`on_create`, `on_update`, `on_delete`, `handle_action`) the actor calls.
//!
//! # Provided Methods (Hooks)
//! - [`StoredEntity::on_create`]
//! - [`StoredEntity::on_delete`]
//!
//! Both default to `Ok(())`.
//!
//! # Write Semantics
//! Hooks that mutate (`on_update`, `handle_action`) always run against a *copy* of the stored
//! document. The actor commits the copy only when the hook succeeds, so a failing hook never
//! leaves a half-applied document behind.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any document must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks may await. The `Context` type is injected into every
/// hook by [`ResourceActor::run`](crate::ResourceActor::run) ("late binding" of dependencies).
#[async_trait]
pub trait StoredEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this document (e.g. `EntryId`, `String`).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new document.
    type Create: Send + Sync + Debug;

    /// The patch applied by an update request.
    type Update: Send + Sync + Debug;

    /// Predicate evaluated by `Find` and `Count` requests.
    type Filter: Send + Sync + Debug;

    /// Sort key understood by `Find` requests.
    type Sort: Send + Sync + Debug;

    /// Enum representing document-specific operations (e.g. `FetchAndIncrement`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this document.
    ///
    /// One error enum per store rather than per message; clients recover it with
    /// [`FrameworkError::downcast_entity`](crate::FrameworkError::downcast_entity).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full document from the assigned ID and the creation payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this document satisfies `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Ordering of two documents under `sort` (ascending).
    fn compare(&self, other: &Self, sort: &Self::Sort) -> Ordering;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the document is constructed, before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update patch to (a copy of) the document.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the document is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom document-specific action against (a copy of) the document.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
