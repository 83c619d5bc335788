//! End-to-end tests against a started `EntrySystem` with a manual clock.

mod common;

use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};
use common::{later, request, t0};
use laundry_orders::clock::{Clock, ManualClock};
use laundry_orders::config::ServiceConfig;
use laundry_orders::error::EntryError;
use laundry_orders::model::{EntryId, EntryStatus, EntryUpdateRequest, ReceiptNumber};
use laundry_orders::runtime::EntrySystem;
use laundry_orders::stats::DashboardBucket;
use std::sync::Arc;

async fn start(config: ServiceConfig) -> (EntrySystem, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(t0()));
    let system = EntrySystem::start_with_clock(config, clock.clone())
        .await
        .expect("system starts");
    (system, clock)
}

#[tokio::test]
async fn test_receipts_are_sequential_and_padded() {
    let (system, _clock) = start(ServiceConfig::default()).await;
    let service = system.service();

    let mut receipts = Vec::new();
    for name in ["Asha", "Bilal", "Chen"] {
        receipts.push(service.create_entry(later(name, 100.0)).await.unwrap().receipt_no);
    }
    assert_eq!(receipts, [ReceiptNumber(1), ReceiptNumber(2), ReceiptNumber(3)]);
    assert_eq!(receipts[0].to_string(), "0001");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_seeded_counter_continues_from_41() {
    let config = ServiceConfig {
        receipt_seed: 41,
        ..ServiceConfig::default()
    };
    let (system, _clock) = start(config).await;
    let service = system.service();

    let entry = service.create_entry(later("Devika", 80.0)).await.unwrap();
    assert_eq!(entry.receipt_no, ReceiptNumber(41));
    assert_eq!(entry.receipt_no.to_string(), "0041");
    assert_eq!(
        service.allocator().peek().await.unwrap(),
        Some(ReceiptNumber(42))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_receipt_label_uses_configured_width() {
    let config = ServiceConfig {
        receipt_width: 6,
        ..ServiceConfig::default()
    };
    let (system, _clock) = start(config).await;
    let entry = system.service().create_entry(later("Ila", 10.0)).await.unwrap();

    assert_eq!(system.receipt_label(entry.receipt_no), "000001");
    assert_eq!(system.receipt_label(ReceiptNumber(1_234_567)), "1234567");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_created_entry_defaults() {
    let (system, _clock) = start(ServiceConfig::default()).await;
    let entry = system
        .service()
        .create_entry(later("Esha", 120.0))
        .await
        .unwrap();

    assert_eq!(entry.id, EntryId(1));
    assert_eq!(entry.status, EntryStatus::Pending);
    assert!(entry.visible);
    assert_eq!(entry.created_at, t0());
    assert_eq!(entry.updated_at, t0());
    assert_eq!(entry.revision, 0);
    assert_eq!(entry.charges.tax_amount, 0.0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_required_fields_reserve_no_number() {
    let (system, _clock) = start(ServiceConfig::default()).await;
    let service = system.service();

    let mut no_customer = later("", 10.0);
    no_customer.customer.name = String::new();
    assert!(matches!(
        service.create_entry(no_customer).await,
        Err(EntryError::ValidationFailed(_))
    ));

    let mut no_date = later("Farah", 10.0);
    no_date.expected_delivery_date = None;
    assert!(matches!(
        service.create_entry(no_date).await,
        Err(EntryError::ValidationFailed(_))
    ));

    let mut no_address = later("Farah", 10.0);
    no_address.pickup_address = "  ".into();
    assert!(matches!(
        service.create_entry(no_address).await,
        Err(EntryError::ValidationFailed(_))
    ));

    let mut negative = later("Farah", 10.0);
    negative.charges.subtotal = -10.0;
    assert!(matches!(
        service.create_entry(negative).await,
        Err(EntryError::ValidationFailed(_))
    ));

    assert_eq!(
        service.allocator().peek().await.unwrap(),
        Some(ReceiptNumber(1))
    );
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_status_transitions_stamp_dates_once() {
    let (system, clock) = start(ServiceConfig::default()).await;
    let service = system.service();
    let id = service.create_entry(later("Gita", 60.0)).await.unwrap().id;

    clock.advance(TimeDelta::hours(1));
    let collected = service.apply_status(id, EntryStatus::Collected).await.unwrap();
    assert_eq!(collected.pickup_and_delivery.pickup_date, Some(clock.now()));

    clock.advance(TimeDelta::hours(1));
    let delivered_at = clock.now();
    let delivered = service.apply_status(id, EntryStatus::Delivered).await.unwrap();
    assert_eq!(delivered.pickup_and_delivery.delivery_date, Some(delivered_at));
    // Skipped state is not back-filled.
    assert_eq!(delivered.pickup_and_delivery.processed_and_packed_date, None);

    clock.advance(TimeDelta::hours(1));
    let again = service.apply_status(id, EntryStatus::Delivered).await.unwrap();
    assert_eq!(again.pickup_and_delivery.delivery_date, Some(delivered_at));

    let err = service.apply_status(id, EntryStatus::Pending).await.unwrap_err();
    assert!(matches!(err, EntryError::InvalidStatus(_)));
    let err = service
        .update_entry(id, EntryUpdateRequest::status("washed"))
        .await
        .unwrap_err();
    assert!(matches!(err, EntryError::InvalidStatus(_)));

    let stored = service.get_entry(id).await.unwrap();
    assert_eq!(stored.status, EntryStatus::Delivered);
    assert_eq!(stored.pickup_and_delivery.delivery_date, Some(delivered_at));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_field_update_bumps_revision() {
    let (system, clock) = start(ServiceConfig::default()).await;
    let service = system.service();
    let id = service.create_entry(later("Hari", 60.0)).await.unwrap().id;

    clock.advance(TimeDelta::minutes(5));
    let new_date = t0() + TimeDelta::days(4);
    let updated = service
        .update_entry(
            id,
            EntryUpdateRequest {
                delivery_address: Some("22 Hill Road".into()),
                expected_delivery_date: Some(new_date),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.revision, 1);
    assert_eq!(updated.updated_at, t0() + TimeDelta::minutes(5));
    assert_eq!(updated.created_at, t0());
    assert_eq!(updated.pickup_and_delivery.delivery_address, "22 Hill Road");
    assert_eq!(updated.pickup_and_delivery.expected_delivery_date, new_date);
    assert_eq!(updated.receipt_no, ReceiptNumber(1));

    let err = service
        .update_entry(
            id,
            EntryUpdateRequest {
                pickup_address: Some("   ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EntryError::ValidationFailed(_)));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_today_expected_leaves_bucket_when_delivered() {
    let (system, _clock) = start(ServiceConfig::default()).await;
    let service = system.service();

    let due_today = request("Indira", 150.0, t0() + TimeDelta::hours(2));
    let id = service.create_entry(due_today).await.unwrap().id;
    service.create_entry(later("Jai", 90.0)).await.unwrap();

    let stats = service.statistics().await.unwrap();
    assert_eq!(stats.today_expected_count, 1);
    assert_eq!(stats.today_received_count, 2);

    let listed = service
        .dashboard_entries(DashboardBucket::TodayExpected, 5)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);

    // Within the TTL: the mutation alone must make the next read fresh.
    let delivered = service.apply_status(id, EntryStatus::Delivered).await.unwrap();
    let stats = service.statistics().await.unwrap();
    assert_eq!(stats.today_expected_count, 0);
    assert_eq!(stats.delivered_count, 1);
    assert_eq!(
        delivered.pickup_and_delivery.expected_delivery_date,
        t0() + TimeDelta::hours(2)
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_hidden_entries_leave_counts_but_not_sales() {
    let (system, _clock) = start(ServiceConfig::default()).await;
    let service = system.service();

    let hidden = service.create_entry(later("Kabir", 100.0)).await.unwrap().id;
    service.create_entry(later("Lata", 250.0)).await.unwrap();

    assert!(!service.toggle_visibility(hidden).await.unwrap());

    let stats = service.statistics().await.unwrap();
    assert_eq!(stats.total_entries, 1);
    assert_eq!(stats.pending_count, 1);
    assert_eq!(stats.yearly_sales.len(), 1);
    assert_eq!(stats.yearly_sales[0].year, 2024);
    assert_eq!(stats.yearly_sales[0].order_count, 2);
    assert_eq!(stats.yearly_sales[0].total_sales, 350.0);

    assert_eq!(service.list_entries(false).await.unwrap().len(), 1);
    assert_eq!(service.list_entries(true).await.unwrap().len(), 2);
    assert!(!service.get_entry(hidden).await.unwrap().visible);

    assert!(service.toggle_visibility(hidden).await.unwrap());
    assert_eq!(service.statistics().await.unwrap().total_entries, 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_store_still_fills_month_and_week_rows() {
    let (system, _clock) = start(ServiceConfig::default()).await;
    let stats = system.service().statistics().await.unwrap();

    assert_eq!(stats.total_entries, 0);
    assert!(stats.yearly_sales.is_empty());
    assert_eq!(
        stats.monthly_sales.iter().map(|m| m.month).collect::<Vec<_>>(),
        [1, 2, 3]
    );
    assert!(stats.monthly_sales.iter().all(|m| m.order_count == 0));
    assert_eq!(stats.weekly_data.len(), 7);
    assert_eq!(
        stats.weekly_data.last().unwrap().date,
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    );
    assert_eq!(stats.business_date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_buckets_follow_the_business_day() {
    let (system, clock) = start(ServiceConfig::default()).await;
    let service = system.service();

    // 19:00 UTC on the 3rd is 00:30 on the 4th in +05:30.
    clock.set(Utc.with_ymd_and_hms(2024, 3, 3, 19, 0, 0).unwrap());
    service.create_entry(later("Manoj", 40.0)).await.unwrap();
    // 18:00 UTC on the 3rd is still the 3rd locally.
    clock.set(Utc.with_ymd_and_hms(2024, 3, 3, 18, 0, 0).unwrap());
    service.create_entry(later("Nisha", 60.0)).await.unwrap();

    clock.set(t0());
    let stats = service.statistics().await.unwrap();
    assert_eq!(stats.today_received_count, 1);

    let week = &stats.weekly_data;
    assert_eq!(week[6].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    assert_eq!((week[6].order_count, week[6].total_sales), (1, 40.0));
    assert_eq!(week[5].date, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    assert_eq!((week[5].order_count, week[5].total_sales), (1, 60.0));

    let march = &stats.monthly_sales[2];
    assert_eq!((march.month, march.order_count, march.total_sales), (3, 2, 100.0));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_dashboard_lists_agree_with_counts() {
    let (system, _clock) = start(ServiceConfig::default()).await;
    let service = system.service();

    let a = service.create_entry(later("Om", 10.0)).await.unwrap().id;
    let b = service.create_entry(later("Priya", 20.0)).await.unwrap().id;
    let c = service
        .create_entry(request("Qadir", 30.0, t0() + TimeDelta::hours(3)))
        .await
        .unwrap()
        .id;
    service.create_entry(later("Ravi", 40.0)).await.unwrap();
    service.apply_status(a, EntryStatus::Collected).await.unwrap();
    service.apply_status(b, EntryStatus::ProcessedAndPacked).await.unwrap();
    service.apply_status(c, EntryStatus::Collected).await.unwrap();

    let stats = service.statistics().await.unwrap();
    let expected = [
        (DashboardBucket::Pending, stats.pending_count),
        (DashboardBucket::Collected, stats.collected_count),
        (DashboardBucket::ProcessedAndPacked, stats.processed_and_packed_count),
        (DashboardBucket::Delivered, stats.delivered_count),
        (DashboardBucket::TodayExpected, stats.today_expected_count),
        (DashboardBucket::TodayReceived, stats.today_received_count),
    ];
    for (bucket, count) in expected {
        let listed = service.dashboard_entries(bucket, 100).await.unwrap();
        assert_eq!(listed.len() as u64, count, "bucket {bucket}");
    }
    assert_eq!(stats.collected_count, 2);
    assert_eq!(stats.today_expected_count, 1);

    let limited = service
        .dashboard_entries(DashboardBucket::TodayReceived, 2)
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_search_by_name_or_receipt() {
    let (system, _clock) = start(ServiceConfig::default()).await;
    let service = system.service();

    service.create_entry(later("Meera Iyer", 10.0)).await.unwrap();
    service.create_entry(later("Sameer", 10.0)).await.unwrap();
    service.create_entry(later("Tanvi", 10.0)).await.unwrap();

    let by_name = service.search_entries("  MEER ").await.unwrap();
    assert_eq!(by_name.len(), 2);

    let by_receipt = service.search_entries("3").await.unwrap();
    assert_eq!(by_receipt.len(), 1);
    assert_eq!(by_receipt[0].customer.name, "Tanvi");

    assert!(service.search_entries("nobody").await.unwrap().is_empty());
    assert!(matches!(
        service.search_entries("   ").await,
        Err(EntryError::ValidationFailed(_))
    ));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_listing_is_newest_first() {
    let (system, clock) = start(ServiceConfig::default()).await;
    let service = system.service();

    for name in ["Uma", "Vikram", "Wasim"] {
        service.create_entry(later(name, 10.0)).await.unwrap();
        clock.advance(TimeDelta::minutes(1));
    }
    let names: Vec<_> = service
        .list_entries(false)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.customer.name)
        .collect();
    assert_eq!(names, ["Wasim", "Vikram", "Uma"]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_and_not_found() {
    let (system, _clock) = start(ServiceConfig::default()).await;
    let service = system.service();

    let id = service.create_entry(later("Yash", 75.0)).await.unwrap().id;
    assert_eq!(service.statistics().await.unwrap().total_entries, 1);

    let removed = service.delete_entry(id).await.unwrap();
    assert_eq!(removed.customer.name, "Yash");
    assert_eq!(service.statistics().await.unwrap().total_entries, 0);

    assert!(matches!(service.get_entry(id).await, Err(EntryError::NotFound(_))));
    assert!(matches!(service.delete_entry(id).await, Err(EntryError::NotFound(_))));
    assert!(matches!(
        service.toggle_visibility(id).await,
        Err(EntryError::NotFound(_))
    ));
    assert!(matches!(
        service.apply_status(id, EntryStatus::Collected).await,
        Err(EntryError::NotFound(_))
    ));

    // Deleting never hands a receipt number out again.
    let next = service.create_entry(later("Zoya", 10.0)).await.unwrap();
    assert_eq!(next.receipt_no, ReceiptNumber(2));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_snapshot_survives_as_warm_start_fallback() {
    let (system, _clock) = start(ServiceConfig::default()).await;
    let service = system.service();
    service.create_entry(later("Aarav", 10.0)).await.unwrap();

    let served = service.statistics().await.unwrap();
    // The recomputed snapshot is persisted and can be loaded again.
    assert!(service.cache().warm_start().await.unwrap());
    assert_eq!(service.statistics().await.unwrap(), served);

    system.shutdown().await.unwrap();
}
