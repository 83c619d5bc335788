use crate::error::EntryError;
use crate::model::StatisticsSnapshot;
use crate::snapshot_actor::{StoredSnapshot, STATS_SNAPSHOT_ID};
use crate::store::SnapshotStore;
use async_trait::async_trait;
use store_actor::{ActorClient, FrameworkError, PutMode, ResourceClient};
use tracing::{debug, instrument};

/// Client for the snapshot actor.
#[derive(Clone)]
pub struct SnapshotClient {
    inner: ResourceClient<StoredSnapshot>,
}

impl SnapshotClient {
    pub fn new(inner: ResourceClient<StoredSnapshot>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<StoredSnapshot> for SnapshotClient {
    type Error = EntryError;

    fn inner(&self) -> &ResourceClient<StoredSnapshot> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        EntryError::from(e)
    }
}

#[async_trait]
impl SnapshotStore for SnapshotClient {
    #[instrument(skip(self, snapshot), fields(computed_at = %snapshot.computed_at))]
    async fn upsert_singleton(&self, snapshot: StatisticsSnapshot) -> Result<(), EntryError> {
        debug!("Sending request");
        let document = StoredSnapshot {
            id: STATS_SNAPSHOT_ID.to_string(),
            snapshot,
        };
        self.inner
            .put(STATS_SNAPSHOT_ID.to_string(), document, PutMode::Upsert)
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }

    async fn get_singleton(&self) -> Result<Option<StatisticsSnapshot>, EntryError> {
        let stored = self.get(STATS_SNAPSHOT_ID.to_string()).await?;
        Ok(stored.map(|s| s.snapshot))
    }
}
