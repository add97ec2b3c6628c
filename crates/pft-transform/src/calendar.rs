//! Calendar Binder: attach fiscal attributes by week and prune the redundant
//! calendar columns.

use std::time::Instant;

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::info;

use pft_common::{any_to_string_non_empty, date_column};
use pft_model::schema::calendar::{CALENDAR_DATE, PRUNED};
use pft_model::schema::long::WEEK;
use pft_model::{ConversionError, ConversionReason, ConversionReport, SourceTable};

use crate::dates::parse_calendar_date;
use crate::error::{Result, TransformError};
use crate::join::left_join;
use crate::normalize::drop_columns;
use crate::reconcile::JOIN_SUFFIX;

/// Output of [`bind_calendar`].
#[derive(Debug, Clone)]
pub struct Bound {
    pub data: DataFrame,
    pub conversions: ConversionReport,
}

/// Converts `CalendarDate` to a `Date` column.
///
/// Native date columns are kept. Text values that match none of the
/// accepted spellings become null and are recorded.
pub fn prepare_calendar(calendar: &SourceTable) -> Result<(DataFrame, ConversionReport)> {
    let mut conversions = ConversionReport::new();
    let column = calendar
        .data
        .column(CALENDAR_DATE)
        .map_err(|_| TransformError::missing_column(calendar.source, CALENDAR_DATE))?;
    if column.dtype() == &DataType::Date {
        return Ok((calendar.data.clone(), conversions));
    }

    let mut dates: Vec<Option<NaiveDate>> = Vec::with_capacity(column.len());
    for row in 0..column.len() {
        let value = column.get(row)?;
        let date = match any_to_string_non_empty(value) {
            Some(text) => {
                let parsed = parse_calendar_date(&text);
                if parsed.is_none() {
                    conversions.record(ConversionError {
                        column: CALENDAR_DATE.to_string(),
                        row,
                        value: text,
                        reason: ConversionReason::InvalidDate,
                    });
                }
                parsed
            }
            None => None,
        };
        dates.push(date);
    }

    let mut data = calendar.data.clone();
    data.with_column(date_column(CALENDAR_DATE, &dates)?)?;
    Ok((data, conversions))
}

/// Drops every pruned calendar column that is present.
pub fn prune(df: &DataFrame) -> Result<DataFrame> {
    drop_columns(df, &PRUNED)
}

/// Left-joins the long table to the calendar on `Week == CalendarDate`,
/// then prunes.
///
/// Every long row is kept exactly once and in order. Rows whose week has no
/// calendar entry keep null calendar attributes.
pub fn bind_calendar(long: &DataFrame, calendar: &SourceTable) -> Result<Bound> {
    let start = Instant::now();
    let (calendar_data, conversions) = prepare_calendar(calendar)?;
    let joined = left_join(long, &calendar_data, &[WEEK], &[CALENDAR_DATE], JOIN_SUFFIX)?;
    let data = prune(&joined)?;
    info!(
        rows = data.height(),
        columns = data.width(),
        calendar_rows = calendar_data.height(),
        duration_ms = start.elapsed().as_millis(),
        "calendar attributes bound"
    );
    Ok(Bound { data, conversions })
}
