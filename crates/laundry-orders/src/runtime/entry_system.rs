use crate::clients::{CounterClient, EntryClient, SnapshotClient};
use crate::clock::{SharedClock, SystemClock};
use crate::config::ServiceConfig;
use crate::error::EntryError;
use crate::model::ReceiptNumber;
use crate::sequence::SequenceAllocator;
use crate::service::EntryService;
use crate::stats::{BusinessCalendar, StatisticsCache, StatsAggregator};
use crate::{counter_actor, entry_actor, snapshot_actor};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// The running order backend: three store actors and the service wired on top of them.
///
/// # Example
///
/// ```rust
/// use laundry_orders::config::ServiceConfig;
/// use laundry_orders::runtime::EntrySystem;
///
/// #[tokio::main]
/// async fn main() {
///     let system = EntrySystem::start(ServiceConfig::default()).await.unwrap();
///     let stats = system.service().statistics().await.unwrap();
///     assert_eq!(stats.total_entries, 0);
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct EntrySystem {
    service: EntryService,
    config: ServiceConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl EntrySystem {
    /// Starts the system on the wall clock.
    pub async fn start(config: ServiceConfig) -> Result<Self, EntryError> {
        Self::start_with_clock(config, Arc::new(SystemClock)).await
    }

    /// Starts the system with an injected clock.
    #[instrument(skip_all)]
    pub async fn start_with_clock(
        config: ServiceConfig,
        clock: SharedClock,
    ) -> Result<Self, EntryError> {
        // 1. Actors
        let (entry_actor, entry_resource_client) = entry_actor::new(config.store_buffer);
        let (counter_actor, counter_resource_client) = counter_actor::new(config.store_buffer);
        let (snapshot_actor, snapshot_resource_client) = snapshot_actor::new(config.store_buffer);

        let handles = vec![
            tokio::spawn(entry_actor.run(clock.clone())),
            tokio::spawn(counter_actor.run(())),
            tokio::spawn(snapshot_actor.run(())),
        ];

        let entries: Arc<EntryClient> = Arc::new(EntryClient::new(entry_resource_client));
        let counters = Arc::new(CounterClient::new(counter_resource_client));
        let snapshots = Arc::new(SnapshotClient::new(snapshot_resource_client));

        // 2. Wiring
        let calendar = BusinessCalendar::new(config.business_offset);
        let allocator = SequenceAllocator::new(counters);
        let aggregator = Arc::new(StatsAggregator::new(entries.clone(), calendar));
        let cache = Arc::new(StatisticsCache::new(
            aggregator,
            snapshots,
            clock.clone(),
            config.stats_ttl,
        ));
        let service = EntryService::new(
            entries,
            allocator,
            cache,
            clock,
            calendar,
            config.update_retries,
        );
        let system = Self {
            service,
            config,
            handles,
        };

        // 3. Bootstrap
        system
            .service
            .allocator()
            .bootstrap(system.config.receipt_seed)
            .await?;
        if let Err(e) = system.service.cache().warm_start().await {
            warn!(error = %e, "No statistics fallback loaded");
        }

        info!(
            offset = %system.config.business_offset,
            ttl_secs = system.config.stats_ttl.num_seconds(),
            "Entry system started"
        );
        Ok(system)
    }

    pub fn service(&self) -> &EntryService {
        &self.service
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// `receipt_no` padded to the configured display width.
    pub fn receipt_label(&self, receipt_no: ReceiptNumber) -> String {
        receipt_no.padded(self.config.receipt_width)
    }

    /// Gracefully shuts down every actor.
    ///
    /// Returns an error naming the first actor task that panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down entry system...");

        // Dropping the service drops the last clients and closes every channel.
        drop(self.service);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Entry system shutdown complete.");
        Ok(())
    }
}
