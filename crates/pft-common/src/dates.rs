//! Conversions between chrono dates and Polars `Date` storage.
//!
//! Polars keeps a `Date` as the number of days since 1970-01-01.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// Days from 0001-01-01 to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Converts a date to its Polars day count.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pft_common::days_since_epoch;
///
/// let date = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
/// assert_eq!(days_since_epoch(date), 1);
/// ```
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Converts a Polars day count back to a date.
pub fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

/// Builds a `Date` column from optional dates.
pub fn date_column(name: &str, dates: &[Option<NaiveDate>]) -> PolarsResult<Column> {
    let days: Vec<Option<i32>> = dates.iter().map(|d| d.map(days_since_epoch)).collect();
    Ok(Series::new(name.into(), days)
        .cast(&DataType::Date)?
        .into_column())
}
