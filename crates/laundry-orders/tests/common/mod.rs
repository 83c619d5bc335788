#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use laundry_orders::clients::{CounterClient, EntryClient, SnapshotClient};
use laundry_orders::clock::{ManualClock, SharedClock};
use laundry_orders::config::ServiceConfig;
use laundry_orders::model::{
    ChargesRequest, CustomerRef, HandlingType, LineItemRequest, NewEntryRequest,
};
use laundry_orders::sequence::SequenceAllocator;
use laundry_orders::service::EntryService;
use laundry_orders::stats::{BusinessCalendar, StatisticsCache, StatsAggregator};
use laundry_orders::store::{CounterStore, OrderStore, SnapshotStore};
use laundry_orders::{counter_actor, entry_actor, snapshot_actor};
use std::sync::Arc;

/// 2024-03-04 06:00 UTC, 11:30 on 2024-03-04 in the +05:30 business timezone.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 6, 0, 0).unwrap()
}

pub fn request(customer: &str, total: f64, expected: DateTime<Utc>) -> NewEntryRequest {
    NewEntryRequest {
        customer: CustomerRef {
            id: format!("cust_{}", customer.to_lowercase().replace(' ', "_")),
            name: customer.to_string(),
            phone: None,
        },
        products: vec![LineItemRequest {
            product_name: "Shirt".into(),
            quantity: 1,
            unit_price: total,
            amount: total,
            tax: None,
        }],
        charges: ChargesRequest {
            subtotal: total,
            tax_amount: None,
            total_amount: total,
        },
        pickup_address: "7 Lake View".into(),
        delivery_address: "7 Lake View".into(),
        pickup_type: HandlingType::SelfService,
        delivery_type: HandlingType::Agent,
        expected_delivery_date: Some(expected),
    }
}

/// A request due two days after `t0`.
pub fn later(customer: &str, total: f64) -> NewEntryRequest {
    request(customer, total, t0() + TimeDelta::days(2))
}

pub fn service_over(
    store: Arc<dyn OrderStore>,
    counters: Arc<dyn CounterStore>,
    snapshots: Arc<dyn SnapshotStore>,
    clock: SharedClock,
    update_retries: u32,
) -> EntryService {
    let config = ServiceConfig::default();
    let calendar = BusinessCalendar::new(config.business_offset);
    let aggregator = Arc::new(StatsAggregator::new(store.clone(), calendar));
    let cache = Arc::new(StatisticsCache::new(
        aggregator,
        snapshots,
        clock.clone(),
        config.stats_ttl,
    ));
    EntryService::new(
        store,
        SequenceAllocator::new(counters),
        cache,
        clock,
        calendar,
        update_retries,
    )
}

/// A service over real actors, with the entry actor's task exposed so tests can kill it.
pub struct Harness {
    pub service: Arc<EntryService>,
    pub clock: Arc<ManualClock>,
    pub entry_task: tokio::task::JoinHandle<()>,
}

pub async fn harness(update_retries: u32) -> Harness {
    let clock = Arc::new(ManualClock::new(t0()));
    let shared: SharedClock = clock.clone();

    let (entries, entry_client) = entry_actor::new(64);
    let entry_task = tokio::spawn(entries.run(shared.clone()));
    let (counters, counter_client) = counter_actor::new(64);
    tokio::spawn(counters.run(()));
    let (snapshots, snapshot_client) = snapshot_actor::new(8);
    tokio::spawn(snapshots.run(()));

    let service = service_over(
        Arc::new(EntryClient::new(entry_client)),
        Arc::new(CounterClient::new(counter_client)),
        Arc::new(SnapshotClient::new(snapshot_client)),
        shared,
        update_retries,
    );
    service.allocator().bootstrap(1).await.unwrap();

    Harness {
        service: Arc::new(service),
        clock,
        entry_task,
    }
}
