//! # Mock Stores & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of scripted expectations instead of a running [`ResourceActor`](crate::ResourceActor).
//! Use it to drive code that sits *around* a store (services, caches, allocators) into states
//! that are awkward to reach with a real actor: an unreachable store, a failing scan halfway
//! through a batch of queries, a counter record that vanished.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, scripted replies | real documents |
//! | **Ordering** | replies consumed strictly in order | actor semantics |
//! | **Error injection** | `return_err(...)` | hard |
//!
//! ```rust
//! use store_actor::mock::MockClient;
//! use store_actor::{FrameworkError, StoredEntity};
//! use async_trait::async_trait;
//! use std::cmp::Ordering;
//!
//! #[derive(Clone, Debug)] struct Note { id: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl StoredEntity for Note {
//!     type Id = u32; type Create = (); type Update = (); type Filter = (); type Sort = ();
//!     type Action = (); type ActionResult = (); type Context = (); type Error = NoteError;
//!     fn from_create_params(id: u32, _: ()) -> Result<Self, NoteError> { Ok(Self { id }) }
//!     fn matches(&self, _: &()) -> bool { true }
//!     fn compare(&self, _: &Self, _: &()) -> Ordering { Ordering::Equal }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Note>::new();
//!     mock.expect_count().return_ok(3);
//!     mock.expect_count().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.count(()).await.unwrap(), 3);
//!     assert!(matches!(client.count(()).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! A request that arrives with no matching expectation at the head of the queue panics the
//! mock task, which the caller observes as [`FrameworkError::ActorDropped`].

use crate::client::ResourceClient;
use crate::entity::StoredEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A scripted reply, matched against the next incoming request.
enum Expectation<T: StoredEntity> {
    Create(Result<T::Id, FrameworkError>),
    Put(Result<bool, FrameworkError>),
    Get(Option<T::Id>, Result<Option<T>, FrameworkError>),
    Find(Result<Vec<T>, FrameworkError>),
    Count(Result<u64, FrameworkError>),
    Update(Option<T::Id>, Result<Option<T>, FrameworkError>),
    Delete(Option<T::Id>, Result<Option<T>, FrameworkError>),
    Action(Option<T::Id>, Result<T::ActionResult, FrameworkError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn check_id<I: PartialEq + std::fmt::Debug>(expected: Option<I>, actual: &I) {
    if let Some(expected) = expected {
        assert_eq!(&expected, actual, "mock received request for unexpected id");
    }
}

/// A mock store with expectation tracking.
pub struct MockClient<T: StoredEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: StoredEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoredEntity> MockClient<T> {
    /// Creates a mock with an empty expectation queue. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();

                match (request, expectation) {
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Put { respond_to, .. }, Some(Expectation::Put(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get(exp, r))) => {
                        check_id(exp, &id);
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Find { respond_to, .. }, Some(Expectation::Find(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Count { respond_to, .. }, Some(Expectation::Count(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update(exp, r)),
                    ) => {
                        check_id(exp, &id);
                        let _ = respond_to.send(r);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete(exp, r)),
                    ) => {
                        check_id(exp, &id);
                        let _ = respond_to.send(r);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action(exp, r)),
                    ) => {
                        check_id(exp, &id);
                        let _ = respond_to.send(r);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: Box::new(wrap),
        }
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Create)
    }

    pub fn expect_put(&mut self) -> ExpectationBuilder<T, bool> {
        self.builder(Expectation::Put)
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |r| Expectation::Get(Some(id), r))
    }

    /// Expects a `get` for any ID.
    pub fn expect_get_any(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(|r| Expectation::Get(None, r))
    }

    pub fn expect_find(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::Find)
    }

    pub fn expect_count(&mut self) -> ExpectationBuilder<T, u64> {
        self.builder(Expectation::Count)
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |r| Expectation::Update(Some(id), r))
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |r| Expectation::Delete(Some(id), r))
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |r| Expectation::Action(Some(id), r))
    }

    /// Number of expectations not consumed yet.
    pub fn remaining(&self) -> usize {
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .len()
    }

    /// Panics unless every expectation has been consumed.
    pub fn verify(&self) {
        let remaining = self.remaining();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Completes an expectation with its scripted reply.
pub struct ExpectationBuilder<T: StoredEntity, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T>>,
}

impl<T: StoredEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        self.expectations
            .lock()
            .expect("mock expectations poisoned")
            .push_back(expectation);
    }
}

/// Creates a client plus the raw receiver, for tests that want to inspect each request.
pub fn create_mock_client<T: StoredEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it when it is an `Action`.
pub async fn expect_action<T: StoredEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
