use crate::counter_actor::{CounterAction, SequenceCounter};
use crate::error::EntryError;
use crate::store::CounterStore;
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, PutMode, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for the counter actor.
#[derive(Clone)]
pub struct CounterClient {
    inner: ResourceClient<SequenceCounter>,
}

impl CounterClient {
    pub fn new(inner: ResourceClient<SequenceCounter>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<SequenceCounter> for CounterClient {
    type Error = EntryError;

    fn inner(&self) -> &ResourceClient<SequenceCounter> {
        &self.inner
    }

    /// A counter that does not exist can never hand out a number.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => {
                EntryError::AllocationFailed(format!("counter {id} does not exist"))
            }
            other => EntryError::from(other),
        }
    }
}

#[async_trait]
impl CounterStore for CounterClient {
    #[instrument(skip(self))]
    async fn seed(&self, counter_id: &str, start: u64) -> Result<bool, EntryError> {
        let created = self
            .inner
            .put(
                counter_id.to_string(),
                SequenceCounter::new(counter_id, start),
                PutMode::IfAbsent,
            )
            .await
            .map_err(Self::map_error)?;
        info!(created, "Counter seeded");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn fetch_and_increment(&self, counter_id: &str) -> Result<u64, EntryError> {
        debug!("Sending request");
        self.inner
            .perform_action(counter_id.to_string(), CounterAction::FetchAndIncrement)
            .await
            .map_err(Self::map_error)
    }

    async fn current(&self, counter_id: &str) -> Result<Option<u64>, EntryError> {
        let counter = self.get(counter_id.to_string()).await?;
        Ok(counter.map(|c| c.next))
    }
}
