use chrono::{DateTime, Months, NaiveDate, Utc};

use crate::error::{AppError, Result};

/// Today's date in UTC at day precision.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Subtract `months` whole months, carrying year rollover. When the source
/// day-of-month does not exist in the target month the result clamps to the
/// last valid day of that month (Mar 31 minus one month is Feb 28/29).
pub fn months_ago(months: u32, from: NaiveDate) -> NaiveDate {
    from.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Truncate an epoch-seconds timestamp to its UTC calendar date.
pub fn date_from_epoch_seconds(secs: i64) -> Result<NaiveDate> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| AppError::MalformedResponse(format!("timestamp {} out of range", secs)))
}
