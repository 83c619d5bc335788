//! # ActorClient Trait
//!
//! Common interface for domain-specific store clients: default `get`, `find`, `count` and
//! `delete` built on top of a generic `ResourceClient`, with errors mapped into the domain's
//! error type.
use crate::{FrameworkError, Query, ResourceClient, StoredEntity};
use async_trait::async_trait;

/// Trait for domain clients to inherit the standard read and delete operations.
///
/// # Example
///
/// ```rust
/// use store_actor::{ActorClient, FrameworkError, ResourceClient, StoredEntity};
/// use async_trait::async_trait;
/// use std::cmp::Ordering;
///
/// #[derive(Clone, Debug)] struct Tag { id: u32 }
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TagError(String);
///
/// #[async_trait]
/// impl StoredEntity for Tag {
///     type Id = u32; type Create = (); type Update = (); type Filter = (); type Sort = ();
///     type Action = (); type ActionResult = (); type Context = (); type Error = TagError;
///     fn from_create_params(id: u32, _: ()) -> Result<Self, TagError> { Ok(Self { id }) }
///     fn matches(&self, _: &()) -> bool { true }
///     fn compare(&self, _: &Self, _: &()) -> Ordering { Ordering::Equal }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// struct TagClient { inner: ResourceClient<Tag> }
///
/// #[async_trait]
/// impl ActorClient<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &ResourceClient<Tag> { &self.inner }
///     fn map_error(e: FrameworkError) -> TagError { TagError(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient) {
///     // get(), find(), count() and delete() come for free.
///     let _ = client.get(1).await;
///     let _ = client.count(()).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: StoredEntity>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map store errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a document by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Run a filtered scan.
    #[tracing::instrument(skip(self, query), fields(filter = ?query.filter))]
    async fn find(&self, query: Query<T>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(query).await.map_err(Self::map_error)
    }

    /// Count documents matching `filter`.
    #[tracing::instrument(skip(self))]
    async fn count(&self, filter: T::Filter) -> Result<u64, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().count(filter).await.map_err(Self::map_error)
    }

    /// Delete a document by ID, returning it when it existed.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
