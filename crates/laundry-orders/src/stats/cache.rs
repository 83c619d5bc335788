//! # Statistics Cache
//!
//! Holds the last [`StatisticsSnapshot`] and decides when it must be recomputed.
//!
//! - **Fresh**: younger than the TTL and no [`invalidate`](StatisticsCache::invalidate) since
//!   it was computed. Served without touching the store.
//! - **Stale**: recomputed by exactly one caller at a time; concurrent callers wait for that
//!   recomputation and read its result.
//! - **Failure**: a failed recomputation falls back to the previous snapshot when one exists;
//!   on a cold cache the error is returned.
//!
//! Invalidations are counted in an epoch. A snapshot remembers the epoch it was computed
//! under, so an invalidation that lands mid-computation leaves the new snapshot stale.

use super::aggregator::SnapshotSource;
use crate::clock::SharedClock;
use crate::error::EntryError;
use crate::model::StatisticsSnapshot;
use crate::store::SnapshotStore;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

struct Held {
    snapshot: Arc<StatisticsSnapshot>,
    computed_at: DateTime<Utc>,
    /// Invalidation epoch at computation time; `None` for a snapshot loaded from storage.
    epoch: Option<u64>,
}

pub struct StatisticsCache {
    source: Arc<dyn SnapshotSource>,
    persisted: Arc<dyn SnapshotStore>,
    clock: SharedClock,
    ttl: TimeDelta,
    current: RwLock<Option<Held>>,
    refresh: Mutex<()>,
    epoch: AtomicU64,
}

impl StatisticsCache {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        persisted: Arc<dyn SnapshotStore>,
        clock: SharedClock,
        ttl: TimeDelta,
    ) -> Self {
        Self {
            source,
            persisted,
            clock,
            ttl,
            current: RwLock::new(None),
            refresh: Mutex::new(()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Marks the held snapshot stale. Called after every successful entry mutation.
    pub fn invalidate(&self) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(epoch, "Statistics invalidated");
    }

    async fn fresh(&self) -> Option<Arc<StatisticsSnapshot>> {
        let current = self.current.read().await;
        let held = current.as_ref()?;
        let same_epoch = held.epoch == Some(self.epoch.load(Ordering::SeqCst));
        let young = self.clock.now() - held.computed_at < self.ttl;
        (same_epoch && young).then(|| held.snapshot.clone())
    }

    /// Returns the current snapshot, recomputing it when stale.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Arc<StatisticsSnapshot>, EntryError> {
        if let Some(snapshot) = self.fresh().await {
            return Ok(snapshot);
        }

        let _flight = self.refresh.lock().await;
        // Someone else may have finished a recomputation while we waited.
        if let Some(snapshot) = self.fresh().await {
            debug!("Served result of concurrent recomputation");
            return Ok(snapshot);
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let now = self.clock.now();
        match self.source.compute_snapshot(now).await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *self.current.write().await = Some(Held {
                    snapshot: snapshot.clone(),
                    computed_at: now,
                    epoch: Some(epoch),
                });
                info!(epoch, total = snapshot.total_entries, "Statistics recomputed");
                if let Err(e) = self.persisted.upsert_singleton((*snapshot).clone()).await {
                    warn!(error = %e, "Failed to persist statistics snapshot");
                }
                Ok(snapshot)
            }
            Err(e) => match self.current.read().await.as_ref() {
                Some(held) => {
                    warn!(
                        error = %e,
                        computed_at = %held.computed_at,
                        "Recomputation failed, serving previous snapshot"
                    );
                    Ok(held.snapshot.clone())
                }
                None => {
                    warn!(error = %e, "Recomputation failed with no snapshot to fall back on");
                    Err(e)
                }
            },
        }
    }

    /// Loads the persisted snapshot as the fallback for a first failed recomputation.
    ///
    /// The loaded snapshot is never served as fresh. Returns whether one was found.
    #[instrument(skip(self))]
    pub async fn warm_start(&self) -> Result<bool, EntryError> {
        let Some(snapshot) = self.persisted.get_singleton().await? else {
            debug!("No persisted snapshot");
            return Ok(false);
        };
        let mut current = self.current.write().await;
        if current.is_none() {
            info!(computed_at = %snapshot.computed_at, "Loaded persisted snapshot");
            *current = Some(Held {
                computed_at: snapshot.computed_at,
                snapshot: Arc::new(snapshot),
                epoch: None,
            });
        }
        Ok(true)
    }
}
