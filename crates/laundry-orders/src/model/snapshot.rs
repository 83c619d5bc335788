use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySales {
    pub year: i32,
    pub total_sales: f64,
    pub order_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySales {
    /// 1-based calendar month.
    pub month: u32,
    pub total_sales: f64,
    pub order_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    /// Business-timezone calendar day, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub total_sales: f64,
    pub order_count: u64,
}

/// Aggregate counters and sales buckets over the entry set.
///
/// Derived data only: always reconstructible from the entry store. Counts cover visible
/// entries; sales buckets cover every entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub total_entries: u64,
    pub pending_count: u64,
    pub collected_count: u64,
    pub processed_and_packed_count: u64,
    pub delivered_count: u64,
    pub today_expected_count: u64,
    pub today_received_count: u64,
    /// The business day "today" was evaluated for.
    pub business_date: NaiveDate,
    pub yearly_sales: Vec<YearlySales>,
    pub monthly_sales: Vec<MonthlySales>,
    pub weekly_data: Vec<DailySales>,
    pub computed_at: DateTime<Utc>,
}
