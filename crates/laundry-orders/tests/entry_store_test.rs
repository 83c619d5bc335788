//! The entry actor behind its `OrderStore` client.

mod common;

use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};
use common::{later, t0};
use laundry_orders::clients::EntryClient;
use laundry_orders::clock::{ManualClock, SharedClock};
use laundry_orders::config::ServiceConfig;
use laundry_orders::entry_actor;
use laundry_orders::lifecycle;
use laundry_orders::model::{EntryPatch, EntryStatus, ReceiptNumber};
use laundry_orders::store::{
    EntryFilter, EntryQuery, EntrySort, OrderStore, SalesAggregation, SalesBucket, SalesKey,
};
use std::sync::Arc;
use store_actor::SortOrder;

async fn store_with(clock: Arc<ManualClock>) -> EntryClient {
    let shared: SharedClock = clock;
    let (actor, client) = entry_actor::new(16);
    tokio::spawn(actor.run(shared));
    EntryClient::new(client)
}

#[tokio::test]
async fn test_count_and_daily_aggregate() {
    let start = Utc.with_ymd_and_hms(2024, 3, 3, 19, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let store = store_with(clock.clone()).await;

    let mut ids = Vec::new();
    for (n, total) in [(1, 40.0), (2, 60.0), (3, 100.0)] {
        let new = lifecycle::initial_entry(later("Desk", total), ReceiptNumber(n)).unwrap();
        ids.push(store.insert(new).await.unwrap());
        clock.set(t0() + TimeDelta::hours(n as i64));
    }
    store
        .update_by_id(ids[2], EntryPatch::ToggleVisibility)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(store.count(EntryFilter::all()).await.unwrap(), 3);
    assert_eq!(store.count(EntryFilter::visible_only()).await.unwrap(), 2);
    assert_eq!(
        store
            .count(EntryFilter::visible_only().with_status(EntryStatus::Delivered))
            .await
            .unwrap(),
        0
    );

    // 19:00 UTC on the 3rd is already the 4th at +05:30; hidden entries still count as sales.
    let offset = ServiceConfig::default().business_offset;
    let rows = store
        .aggregate(SalesAggregation::new(EntryFilter::all(), SalesBucket::Day, offset))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].key,
        SalesKey::Day(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
    );
    assert_eq!((rows[0].order_count, rows[0].total_sales), (3, 200.0));
}

#[tokio::test]
async fn test_find_sorts_and_windows() {
    let clock = Arc::new(ManualClock::new(t0()));
    let store = store_with(clock.clone()).await;

    for n in 1..=4 {
        let new = lifecycle::initial_entry(later("Queue", 10.0), ReceiptNumber(n)).unwrap();
        store.insert(new).await.unwrap();
        clock.advance(TimeDelta::minutes(1));
    }

    let newest = store
        .find(
            EntryQuery::filtered(EntryFilter::all())
                .sorted(EntrySort::CreatedAt, SortOrder::Descending)
                .limit(2),
        )
        .await
        .unwrap();
    let receipts: Vec<_> = newest.iter().map(|e| e.receipt_no).collect();
    assert_eq!(receipts, [ReceiptNumber(4), ReceiptNumber(3)]);
}
