//! Business-timezone calendar arithmetic.
//!
//! "Today" is the local calendar day of an instant in the business offset, expressed back as
//! an absolute half-open UTC range `[local midnight, next local midnight)`.

use crate::store::TimeRange;
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessCalendar {
    offset: FixedOffset,
}

impl BusinessCalendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// The UTC instant of local midnight starting `date`.
    pub fn start_of(&self, date: NaiveDate) -> DateTime<Utc> {
        let local_midnight = date.and_time(NaiveTime::MIN);
        let utc = local_midnight - self.offset;
        Utc.from_utc_datetime(&utc)
    }

    pub fn day(&self, date: NaiveDate) -> Option<TimeRange> {
        let next = date.checked_add_days(Days::new(1))?;
        Some(TimeRange::new(self.start_of(date), self.start_of(next)))
    }

    pub fn today(&self, as_of: DateTime<Utc>) -> Option<TimeRange> {
        self.day(self.local_date(as_of))
    }

    /// Local calendar year containing `date`.
    pub fn year_of(&self, date: NaiveDate) -> Option<TimeRange> {
        let start = NaiveDate::from_ymd_opt(date.year(), 1, 1)?;
        let end = NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)?;
        Some(TimeRange::new(self.start_of(start), self.start_of(end)))
    }

    /// The `days` local dates ending with (and including) `today`, oldest first.
    pub fn trailing_days(&self, today: NaiveDate, days: u64) -> Option<Vec<NaiveDate>> {
        (0..days)
            .rev()
            .map(|back| today.checked_sub_days(Days::new(back)))
            .collect()
    }
}
