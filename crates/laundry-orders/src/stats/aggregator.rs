//! # Statistics Aggregator
//!
//! Computes a [`StatisticsSnapshot`] from the entry store. Every count and sales series is
//! derived from one scan of the entry set, answered by the entry actor in a single turn, so a
//! write can never land between two figures of the same snapshot. A failed scan fails the
//! whole computation.

use super::calendar::BusinessCalendar;
use super::dashboard::DashboardBucket;
use crate::error::EntryError;
use crate::model::{DailySales, Entry, MonthlySales, StatisticsSnapshot, YearlySales};
use crate::store::{
    EntryFilter, EntryQuery, OrderStore, SalesAggregation, SalesBucket, SalesKey, SalesRow,
    TimeRange,
};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of trailing days in the weekly series.
pub const WEEKLY_DAYS: u64 = 7;

/// Anything that can produce a fresh snapshot. The cache depends on this, not on the store.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn compute_snapshot(
        &self,
        as_of: DateTime<Utc>,
    ) -> Result<StatisticsSnapshot, EntryError>;
}

pub struct StatsAggregator {
    store: Arc<dyn OrderStore>,
    calendar: BusinessCalendar,
}

fn out_of_range(as_of: DateTime<Utc>) -> EntryError {
    EntryError::ValidationFailed(format!("{as_of} is outside the supported calendar range"))
}

fn count(entries: &[Entry], filter: &EntryFilter) -> u64 {
    entries.iter().filter(|e| filter.matches(e)).count() as u64
}

impl StatsAggregator {
    pub fn new(store: Arc<dyn OrderStore>, calendar: BusinessCalendar) -> Self {
        Self { store, calendar }
    }

    fn sales(
        &self,
        entries: &[Entry],
        filter: EntryFilter,
        group_by: SalesBucket,
    ) -> Vec<SalesRow> {
        SalesAggregation::new(filter, group_by, self.calendar.offset()).run(entries)
    }
}

#[async_trait]
impl SnapshotSource for StatsAggregator {
    #[instrument(skip(self))]
    async fn compute_snapshot(
        &self,
        as_of: DateTime<Utc>,
    ) -> Result<StatisticsSnapshot, EntryError> {
        let business_date = self.calendar.local_date(as_of);
        let today = self.calendar.today(as_of).ok_or_else(|| out_of_range(as_of))?;
        let this_year = self
            .calendar
            .year_of(business_date)
            .ok_or_else(|| out_of_range(as_of))?;
        let week = self
            .calendar
            .trailing_days(business_date, WEEKLY_DAYS)
            .ok_or_else(|| out_of_range(as_of))?;
        let week_start = week
            .first()
            .map(|first| self.calendar.start_of(*first))
            .unwrap_or(today.start);
        let week_range = TimeRange::new(week_start, today.end);

        let entries = self
            .store
            .find(EntryQuery::filtered(EntryFilter::all()))
            .await?;

        let total = count(&entries, &EntryFilter::visible_only());
        let [pending, collected, packed, delivered, today_expected, today_received] = [
            DashboardBucket::Pending,
            DashboardBucket::Collected,
            DashboardBucket::ProcessedAndPacked,
            DashboardBucket::Delivered,
            DashboardBucket::TodayExpected,
            DashboardBucket::TodayReceived,
        ]
        .map(|bucket| count(&entries, &bucket.filter(today)));

        let yearly = self.sales(&entries, EntryFilter::all(), SalesBucket::Year);
        let monthly = self.sales(
            &entries,
            EntryFilter::all().created_within(this_year),
            SalesBucket::Month,
        );
        let daily = self.sales(
            &entries,
            EntryFilter::all().created_within(week_range),
            SalesBucket::Day,
        );

        let yearly_sales = yearly
            .into_iter()
            .filter_map(|row| match row.key {
                SalesKey::Year(year) => Some(YearlySales {
                    year,
                    total_sales: row.total_sales,
                    order_count: row.order_count,
                }),
                _ => None,
            })
            .collect();

        let by_month: HashMap<SalesKey, SalesRow> =
            monthly.into_iter().map(|row| (row.key, row)).collect();
        let monthly_sales = (1..=business_date.month())
            .map(|month| {
                let row = by_month.get(&SalesKey::Month(month));
                MonthlySales {
                    month,
                    total_sales: row.map_or(0.0, |r| r.total_sales),
                    order_count: row.map_or(0, |r| r.order_count),
                }
            })
            .collect();

        let by_day: HashMap<SalesKey, SalesRow> =
            daily.into_iter().map(|row| (row.key, row)).collect();
        let weekly_data = week
            .into_iter()
            .map(|date| {
                let row = by_day.get(&SalesKey::Day(date));
                DailySales {
                    date,
                    total_sales: row.map_or(0.0, |r| r.total_sales),
                    order_count: row.map_or(0, |r| r.order_count),
                }
            })
            .collect();

        debug!(
            scanned = entries.len(),
            total,
            today_expected,
            "Snapshot computed"
        );
        Ok(StatisticsSnapshot {
            total_entries: total,
            pending_count: pending,
            collected_count: collected,
            processed_and_packed_count: packed,
            delivered_count: delivered,
            today_expected_count: today_expected,
            today_received_count: today_received,
            business_date,
            yearly_sales,
            monthly_sales,
            weekly_data,
            computed_at: as_of,
        })
    }
}
