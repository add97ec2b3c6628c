//! Wide-to-long reshape of the per-week measurement columns.

use polars::prelude::*;
use tracing::debug;

use pft_common::{any_to_f64, any_to_string, date_column};
use pft_model::schema::long::{IDENTIFYING, IM, WEEK, WEEK_FORMAT};
use pft_model::{ConversionError, ConversionReason, ConversionReport};

use crate::dates::parse_week_header;
use crate::error::Result;
use crate::join::JOIN_SUFFIX;

/// Output of [`unpivot_weeks`].
#[derive(Debug, Clone)]
pub struct Unpivoted {
    /// Identifying columns, then `Week` and `IM`.
    pub data: DataFrame,
    /// Headers treated as per-week measurement columns, in source order.
    pub week_columns: Vec<String>,
    pub conversions: ConversionReport,
}

/// Splits the columns of `df` into identifying columns and week columns.
///
/// Identifying columns follow the fixed identifying list (absent ones
/// skipped), then any join-collision copy of an identifying column
/// (`IM/LF_right`) in table order. Every other column is a week column, in
/// table order.
pub fn split_columns(df: &DataFrame) -> (Vec<String>, Vec<String>) {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut identifying: Vec<String> = IDENTIFYING
        .iter()
        .filter(|id| names.iter().any(|name| name == *id))
        .map(|id| (*id).to_string())
        .collect();
    identifying.extend(
        names
            .iter()
            .filter(|name| is_collision_copy(name))
            .cloned(),
    );
    let weeks = names
        .into_iter()
        .filter(|name| !IDENTIFYING.contains(&name.as_str()) && !is_collision_copy(name))
        .collect();
    (identifying, weeks)
}

fn is_collision_copy(name: &str) -> bool {
    name.strip_suffix(JOIN_SUFFIX)
        .is_some_and(|base| IDENTIFYING.contains(&base))
}

/// Reshapes one row per (item, plant) with N week columns into N rows per
/// (item, plant).
///
/// The rows produced from one source row are contiguous and follow the
/// source column order. `Week` is the week header parsed as a date (null when
/// it does not parse); `IM` is the cell value as a number with commas
/// removed (null when it does not parse). Both failures are recorded in the
/// returned report.
pub fn unpivot_weeks(df: &DataFrame) -> Result<Unpivoted> {
    let (identifying, week_columns) = split_columns(df);
    let height = df.height();
    let width = week_columns.len();
    let long_height = height * width;
    let mut conversions = ConversionReport::new();

    let week_dates: Vec<_> = week_columns
        .iter()
        .map(|header| parse_week_header(header, WEEK_FORMAT))
        .collect();
    let week_cells = week_columns
        .iter()
        .map(|name| df.column(name))
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut repeat_idx: Vec<IdxSize> = Vec::with_capacity(long_height);
    let mut weeks = Vec::with_capacity(long_height);
    let mut measures: Vec<Option<f64>> = Vec::with_capacity(long_height);
    for row in 0..height {
        for (col, cells) in week_cells.iter().enumerate() {
            let long_row = row * width + col;
            repeat_idx.push(row as IdxSize);

            let week = week_dates[col];
            if week.is_none() {
                conversions.record(ConversionError {
                    column: WEEK.to_string(),
                    row: long_row,
                    value: week_columns[col].clone(),
                    reason: ConversionReason::InvalidDate,
                });
            }
            weeks.push(week);

            let cell = cells.get(row)?;
            let measure = any_to_f64(cell.clone());
            if measure.is_none() && !cell.is_null() {
                let value = any_to_string(cell);
                debug!(row = long_row, value = %value, "IM value is not numeric");
                conversions.record(ConversionError {
                    column: IM.to_string(),
                    row: long_row,
                    value,
                    reason: ConversionReason::NotNumeric,
                });
            }
            measures.push(measure);
        }
    }

    let repeat = IdxCa::from_vec(PlSmallStr::from_static("idx"), repeat_idx);
    let mut data = df.select(identifying)?.take(&repeat)?;
    data.with_column(date_column(WEEK, &weeks)?)?;
    data.with_column(Series::new(IM.into(), measures))?;

    Ok(Unpivoted {
        data,
        week_columns,
        conversions,
    })
}
