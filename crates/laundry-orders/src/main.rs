//! # Laundry Orders Demo
//!
//! Walks one business day through the order backend:
//!
//! 1. Start the [`EntrySystem`] from `.env` / environment configuration.
//! 2. Take in a few orders (receipt numbers `0001`, `0002`, ...).
//! 3. Move them through `collected`, `processedAndPacked` and `delivered`.
//! 4. Print the dashboard statistics as JSON.

use chrono::{TimeDelta, Utc};
use laundry_orders::config::ServiceConfig;
use laundry_orders::model::{
    ChargesRequest, CustomerRef, EntryStatus, HandlingType, LineItemRequest, NewEntryRequest,
};
use laundry_orders::runtime::{setup_tracing, EntrySystem};
use laundry_orders::stats::DashboardBucket;
use tracing::{info, Instrument};

fn order(
    customer: &str,
    item: &str,
    quantity: u32,
    unit_price: f64,
    due_in_days: i64,
) -> NewEntryRequest {
    let amount = unit_price * f64::from(quantity);
    NewEntryRequest {
        customer: CustomerRef {
            id: format!("cust_{}", customer.to_lowercase().replace(' ', "_")),
            name: customer.to_string(),
            phone: None,
        },
        products: vec![LineItemRequest {
            product_name: item.to_string(),
            quantity,
            unit_price,
            amount,
            tax: None,
        }],
        charges: ChargesRequest {
            subtotal: amount,
            tax_amount: None,
            total_amount: amount,
        },
        pickup_address: "18 Residency Road".to_string(),
        delivery_address: "18 Residency Road".to_string(),
        pickup_type: HandlingType::Agent,
        delivery_type: HandlingType::Courier,
        expected_delivery_date: Some(Utc::now() + TimeDelta::days(due_in_days)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    setup_tracing();

    let config = ServiceConfig::from_env()?;
    info!(?config, "Starting laundry order backend");
    let system = EntrySystem::start(config).await?;
    let service = system.service();

    let span = tracing::info_span!("intake");
    let entries = async {
        let mut created = Vec::new();
        for request in [
            order("Meera Iyer", "Silk saree", 2, 180.0, 0),
            order("Arjun Rao", "Wool blazer", 1, 350.0, 2),
            order("Fatima Khan", "Bedsheet", 4, 60.0, 1),
        ] {
            let entry = service.create_entry(request).await?;
            info!(
                receipt = %system.receipt_label(entry.receipt_no),
                customer = %entry.customer.name,
                "Received"
            );
            created.push(entry);
        }
        Ok::<_, laundry_orders::error::EntryError>(created)
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("processing");
    async {
        service.apply_status(entries[0].id, EntryStatus::Collected).await?;
        service.apply_status(entries[1].id, EntryStatus::ProcessedAndPacked).await?;
        let delivered = service.apply_status(entries[2].id, EntryStatus::Delivered).await?;
        info!(
            receipt = %system.receipt_label(delivered.receipt_no),
            delivered_at = ?delivered.pickup_and_delivery.delivery_date,
            "Delivered"
        );
        Ok::<_, laundry_orders::error::EntryError>(())
    }
    .instrument(span)
    .await?;

    let due_today = service
        .dashboard_entries(DashboardBucket::TodayExpected, 5)
        .await?;
    info!(count = due_today.len(), "Due back today");

    let stats = service.statistics().await?;
    println!("{}", serde_json::to_string_pretty(stats.as_ref())?);

    system.shutdown().await?;
    Ok(())
}
