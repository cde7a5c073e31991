//! Inclusive date range for event queries.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{DaybookError, DaybookResult};

/// An inclusive `[start, end]` window, as requested by a range query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Parse query-string values into a range.
    ///
    /// Each bound is either a full RFC 3339 instant or a bare YYYY-MM-DD date;
    /// bare dates expand to the start of day for `start` and the end of day
    /// for `end`, so a whole calendar day is covered.
    pub fn parse(start: &str, end: &str) -> DaybookResult<Self> {
        Ok(DateRange {
            start: parse_instant(start, false)?,
            end: parse_instant(end, true)?,
        })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Parse an RFC 3339 instant, or a bare date as start/end of day in UTC.
fn parse_instant(s: &str, end_of_day: bool) -> DaybookResult<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(instant.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| DaybookError::InvalidDate(s.to_string()))?;

    let time = if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    Ok(time.unwrap().and_utc())
}
