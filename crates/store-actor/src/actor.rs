//! # Store Actor
//!
//! This module defines the `ResourceActor`, the server half of a store. It owns the documents
//! of one entity type and processes requests strictly one at a time, which gives every request
//! exclusive access to the map without locks.

use crate::client::ResourceClient;
use crate::entity::StoredEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::query::PutMode;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a collection of documents.
///
/// **Concurrency Model**:
/// Each actor runs in its own Tokio task and drains its channel sequentially, so a single
/// request (including a custom `Action`) is an atomic read-modify-write with respect to every
/// other request sent to the same actor. Different actors run in parallel.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new(buffer, next_id)` returns the actor and its client.
/// 2.  **Wire**: dependencies go into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use store_actor::{ResourceActor, StoredEntity};
/// use async_trait::async_trait;
/// use std::cmp::Ordering;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl StoredEntity for Note {
///     type Id = u32; type Create = String; type Update = String; type Filter = ();
///     type Sort = (); type Action = (); type ActionResult = (); type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, text: String) -> Result<Self, NoteError> { Ok(Self { id, text }) }
///     fn matches(&self, _: &()) -> bool { true }
///     fn compare(&self, other: &Self, _: &()) -> Ordering { self.id.cmp(&other.id) }
///     async fn on_update(&mut self, text: String, _: &()) -> Result<(), NoteError> { self.text = text; Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let mut next = 0u32;
///     let (actor, client) = ResourceActor::<Note>::new(10, move || { next += 1; next });
///     tokio::spawn(actor.run(()));
///
///     let id = client.create("hello".to_string()).await.unwrap();
///     let note = client.get(id).await.unwrap().unwrap();
///     assert_eq!(note.text, "hello");
/// }
/// ```
///
/// ## Operations
///
/// * **Create**: draws IDs from `next_id` until a vacant one is found, builds the document with
///   `from_create_params`, runs `on_create`, stores it.
/// * **Put**: stores a caller-built document, honoring [`PutMode`].
/// * **Get / Find / Count**: read-only; `Find` clones the matching window.
/// * **Update / Action**: run the hook on a copy and commit the copy only on success.
/// * **Delete**: runs `on_delete`, removes and returns the document.
pub struct ResourceActor<T: StoredEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: Box<dyn FnMut() -> T::Id + Send>,
}

impl<T: StoredEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// * `buffer_size` - capacity of the request channel; callers wait when it is full.
    /// * `next_id` - ID generator used by `Create` requests.
    pub fn new(
        buffer_size: usize,
        next_id: impl FnMut() -> T::Id + Send + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: Box::new(next_id),
        };
        (actor, ResourceClient::new(sender))
    }

    fn vacant_id(&mut self) -> T::Id {
        loop {
            let id = (self.next_id)();
            if !self.store.contains_key(&id) {
                return id;
            }
        }
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// The `context` argument is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = self.vacant_id();

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Put {
                    id,
                    item,
                    mode,
                    respond_to,
                } => {
                    let written = match mode {
                        PutMode::IfAbsent if self.store.contains_key(&id) => false,
                        _ => {
                            self.store.insert(id.clone(), item);
                            true
                        }
                    };
                    debug!(entity_type, %id, ?mode, written, "Put");
                    let _ = respond_to.send(Ok(written));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Find { query, respond_to } => {
                    let items = query.run(self.store.values());
                    debug!(entity_type, filter = ?query.filter, matched = items.len(), "Find");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Count { filter, respond_to } => {
                    let count = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .count() as u64;
                    debug!(entity_type, ?filter, count, "Count");
                    let _ = respond_to.send(Ok(count));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        debug!(entity_type, %id, "Update target missing");
                        let _ = respond_to.send(Ok(None));
                        continue;
                    };
                    let mut draft = current.clone();
                    if let Err(e) = draft.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), draft.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(Some(draft)));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        debug!(entity_type, %id, "Delete target missing");
                        let _ = respond_to.send(Ok(None));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let removed = self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(removed));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = current.clone();
                    let result = draft
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => {
                            self.store.insert(id.clone(), draft);
                            info!(entity_type, %id, "Action ok");
                        }
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
