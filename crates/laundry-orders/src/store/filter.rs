//! Filter and sort vocabulary of the entry store.
//!
//! An [`EntryFilter`] is a conjunction: every predicate that is set must hold. The one
//! disjunction the domain needs (customer name OR receipt number, for search) is carried by
//! [`SearchTerm`].

use crate::model::{Entry, EntryStatus, ReceiptNumber};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Half-open instant range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Customer-name substring OR exact receipt number.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    needle: String,
    receipt: Option<ReceiptNumber>,
}

impl SearchTerm {
    /// Builds a term from raw user input; `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
            receipt: trimmed.parse::<u64>().ok().map(ReceiptNumber),
        })
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        entry.customer_matches(&self.needle) || self.receipt == Some(entry.receipt_no)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    pub visible: Option<bool>,
    pub status: Option<EntryStatus>,
    pub status_not: Option<EntryStatus>,
    pub created: Option<TimeRange>,
    pub expected_delivery: Option<TimeRange>,
    pub search: Option<SearchTerm>,
}

impl EntryFilter {
    /// Matches every entry, hidden ones included.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn visible_only() -> Self {
        Self {
            visible: Some(true),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn excluding_status(mut self, status: EntryStatus) -> Self {
        self.status_not = Some(status);
        self
    }

    pub fn created_within(mut self, range: TimeRange) -> Self {
        self.created = Some(range);
        self
    }

    pub fn expected_within(mut self, range: TimeRange) -> Self {
        self.expected_delivery = Some(range);
        self
    }

    pub fn matching(mut self, term: SearchTerm) -> Self {
        self.search = Some(term);
        self
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.visible.map_or(true, |v| entry.visible == v)
            && self.status.map_or(true, |s| entry.status == s)
            && self.status_not.map_or(true, |s| entry.status != s)
            && self.created.map_or(true, |r| r.contains(entry.created_at))
            && self
                .expected_delivery
                .map_or(true, |r| r.contains(entry.pickup_and_delivery.expected_delivery_date))
            && self.search.as_ref().map_or(true, |term| term.matches(entry))
    }
}

/// Sort keys understood by the entry store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySort {
    CreatedAt,
}

impl EntrySort {
    pub fn compare(self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            // Ties broken by receipt so listings are stable within one instant.
            EntrySort::CreatedAt => a
                .created_at
                .cmp(&b.created_at)
                .then(a.receipt_no.cmp(&b.receipt_no)),
        }
    }
}
