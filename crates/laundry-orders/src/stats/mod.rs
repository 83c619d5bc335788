//! # Statistics
//!
//! Dashboard counters and sales series derived from the entry store.
//!
//! - [`calendar`]: business-timezone day, year and week arithmetic
//! - [`dashboard`]: the six dashboard buckets and their filters
//! - [`aggregator`]: counts and sales groupings from one scan of the entry set
//! - [`cache`]: TTL + invalidation cache with single-flight recomputation

pub mod aggregator;
pub mod cache;
pub mod calendar;
pub mod dashboard;

pub use aggregator::{SnapshotSource, StatsAggregator, WEEKLY_DAYS};
pub use cache::StatisticsCache;
pub use calendar::BusinessCalendar;
pub use dashboard::DashboardBucket;
