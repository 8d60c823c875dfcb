//! Presence periods expressed as calendar date ranges.
//!
//! The form layer lets people enter "present from 2024-03-01 to 2024-03-15"
//! instead of a day count. Both ends are counted, so a single day is 1.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;

/// Date format accepted by [`days_between`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of calendar days from `start` to `end`, both included.
///
/// Returns `None` when `end` is before `start`.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> Option<u32> {
    if end < start {
        return None;
    }
    let days = (end - start).num_days() + 1;
    u32::try_from(days).ok()
}

/// Parses two `YYYY-MM-DD` dates and returns the inclusive day count between
/// them.
pub fn days_between(start: &str, end: &str) -> Result<u32> {
    let start_date = NaiveDate::parse_from_str(start.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid start date '{start}'"))?;
    let end_date = NaiveDate::parse_from_str(end.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid end date '{end}'"))?;

    inclusive_days(start_date, end_date)
        .ok_or_else(|| anyhow!("End date {end_date} is before start date {start_date}"))
}
