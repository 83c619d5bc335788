//! # Generic Client
//!
//! The sending half of a store: every method packages a [`ResourceRequest`], sends it over
//! the actor's channel and awaits the one-shot reply.

use crate::entity::StoredEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::query::{PutMode, Query};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a `ResourceActor<T>`.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Async API** – every method resolves to `Result<…, FrameworkError>`.
/// * **Disconnection** – a closed actor yields [`FrameworkError::ActorClosed`], a reply dropped
///   mid-flight yields [`FrameworkError::ActorDropped`].
pub struct ResourceClient<T: StoredEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: StoredEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: StoredEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    /// Stores `item` under `id`; returns whether anything was written.
    pub async fn put(&self, id: T::Id, item: T, mode: PutMode) -> Result<bool, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Put {
            id,
            item,
            mode,
            respond_to,
        })
        .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn find(&self, query: Query<T>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Find { query, respond_to })
            .await
    }

    pub async fn count(&self, filter: T::Filter) -> Result<u64, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Count { filter, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
