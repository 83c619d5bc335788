//! # Store Messages
//!
//! Message types exchanged between a [`ResourceClient`](crate::ResourceClient) and its
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::StoredEntity;
use crate::error::FrameworkError;
use crate::query::{PutMode, Query};
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a store actor.
///
/// The variants cover the document-store surface the domain needs: create with a generated
/// key, keyed put, point reads, filtered scans and counts, patch updates, deletes, and custom
/// actions. Each request is handled to completion before the next one is read, which is what
/// makes `Action` usable as an atomic read-modify-write.
///
/// - **Create**: builds a document from [`StoredEntity::Create`] under a generated ID.
/// - **Put**: stores a fully-formed document under a caller-chosen ID.
/// - **Get**: point lookup.
/// - **Find** / **Count**: scans driven by [`StoredEntity::Filter`].
/// - **Update**: applies [`StoredEntity::Update`]; replies `None` when the ID is unknown.
/// - **Delete**: removes and returns the document; replies `None` when the ID is unknown.
/// - **Action**: executes a custom [`StoredEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: StoredEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Put {
        id: T::Id,
        item: T,
        mode: PutMode,
        respond_to: Response<bool>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        query: Query<T>,
        respond_to: Response<Vec<T>>,
    },
    Count {
        filter: T::Filter,
        respond_to: Response<u64>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
