//! Grouped sales totals over the entry set.
//!
//! Rows are keyed by calendar buckets of the business timezone, not UTC, so an order placed
//! at 00:30 local time counts toward that local day even though it is still "yesterday" in UTC.

use crate::model::Entry;
use crate::store::filter::EntryFilter;
use chrono::{Datelike, FixedOffset, NaiveDate};
use std::collections::BTreeMap;

/// Calendar bucket used to group entries by `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesBucket {
    Year,
    Month,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SalesKey {
    Year(i32),
    /// 1-based month; combine with a created-range filter to pin the year.
    Month(u32),
    Day(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesRow {
    pub key: SalesKey,
    pub total_sales: f64,
    pub order_count: u64,
}

/// Filter, group and sum request. `total_sales` sums `charges.total_amount`.
#[derive(Debug, Clone)]
pub struct SalesAggregation {
    pub filter: EntryFilter,
    pub group_by: SalesBucket,
    pub utc_offset: FixedOffset,
}

impl SalesAggregation {
    pub fn new(filter: EntryFilter, group_by: SalesBucket, utc_offset: FixedOffset) -> Self {
        Self {
            filter,
            group_by,
            utc_offset,
        }
    }

    fn key_of(&self, entry: &Entry) -> SalesKey {
        let local = entry.created_at.with_timezone(&self.utc_offset).date_naive();
        match self.group_by {
            SalesBucket::Year => SalesKey::Year(local.year()),
            SalesBucket::Month => SalesKey::Month(local.month()),
            SalesBucket::Day => SalesKey::Day(local),
        }
    }

    /// Groups the matching entries, ascending by key. Buckets without entries are absent.
    pub fn run<'a>(&self, entries: impl IntoIterator<Item = &'a Entry>) -> Vec<SalesRow> {
        let mut groups: BTreeMap<SalesKey, (f64, u64)> = BTreeMap::new();
        for entry in entries.into_iter().filter(|e| self.filter.matches(e)) {
            let slot = groups.entry(self.key_of(entry)).or_insert((0.0, 0));
            slot.0 += entry.charges.total_amount;
            slot.1 += 1;
        }
        groups
            .into_iter()
            .map(|(key, (total_sales, order_count))| SalesRow {
                key,
                total_sales,
                order_count,
            })
            .collect()
    }
}
