//! The dashboard buckets and the filters behind them.
//!
//! The aggregator counts with these filters and the service lists with them, so a count and
//! the list behind it can never disagree.

use crate::error::EntryError;
use crate::model::EntryStatus;
use crate::store::{EntryFilter, TimeRange};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DashboardBucket {
    Pending,
    Collected,
    ProcessedAndPacked,
    Delivered,
    /// Expected back today and not delivered yet.
    TodayExpected,
    /// Received (created) today.
    TodayReceived,
}

impl DashboardBucket {
    pub const ALL: [DashboardBucket; 6] = [
        DashboardBucket::Pending,
        DashboardBucket::Collected,
        DashboardBucket::ProcessedAndPacked,
        DashboardBucket::Delivered,
        DashboardBucket::TodayExpected,
        DashboardBucket::TodayReceived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DashboardBucket::Pending => "pending",
            DashboardBucket::Collected => "collected",
            DashboardBucket::ProcessedAndPacked => "processedAndPacked",
            DashboardBucket::Delivered => "delivered",
            DashboardBucket::TodayExpected => "todayExpected",
            DashboardBucket::TodayReceived => "todayReceived",
        }
    }

    /// Visible entries in this bucket, given today's range in the business timezone.
    pub fn filter(self, today: TimeRange) -> EntryFilter {
        let visible = EntryFilter::visible_only();
        match self {
            DashboardBucket::Pending => visible.with_status(EntryStatus::Pending),
            DashboardBucket::Collected => visible.with_status(EntryStatus::Collected),
            DashboardBucket::ProcessedAndPacked => {
                visible.with_status(EntryStatus::ProcessedAndPacked)
            }
            DashboardBucket::Delivered => visible.with_status(EntryStatus::Delivered),
            DashboardBucket::TodayExpected => visible
                .expected_within(today)
                .excluding_status(EntryStatus::Delivered),
            DashboardBucket::TodayReceived => visible.created_within(today),
        }
    }
}

impl Display for DashboardBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardBucket {
    type Err = EntryError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        DashboardBucket::ALL
            .into_iter()
            .find(|bucket| bucket.as_str() == raw.trim())
            .ok_or_else(|| {
                EntryError::ValidationFailed(format!("unknown dashboard bucket {raw:?}"))
            })
    }
}
