//! XLSX serialization of the final table.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, Worksheet};

use pft_common::{any_to_f64, any_to_string, date_from_epoch_days};

use crate::error::{ExportError, Result};

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Sheet1";

/// Data rows that fit below the header row.
pub const MAX_DATA_ROWS: usize = 1_048_575;

pub const MAX_COLUMNS: usize = 16_384;

const DATE_NUM_FORMAT: &str = "yyyy-mm-dd";

/// Serializes `df` into an in-memory workbook.
///
/// Columns keep their current order; row 1 holds the column names and every
/// table row becomes one worksheet row. No index column is written. Nulls
/// are left as blank cells.
///
/// `created` is stamped into the document properties, so equal tables
/// written with the same date produce identical bytes.
pub fn write_xlsx(df: &DataFrame, created: NaiveDate) -> Result<Vec<u8>> {
    if df.height() > MAX_DATA_ROWS {
        return Err(ExportError::TooManyRows {
            rows: df.height(),
            max: MAX_DATA_ROWS,
        });
    }
    if df.width() > MAX_COLUMNS {
        return Err(ExportError::TooManyColumns {
            columns: df.width(),
            max: MAX_COLUMNS,
        });
    }

    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(
        u16::try_from(created.year()).unwrap_or(1900),
        created.month() as u8,
        created.day() as u8,
    )?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_NUM_FORMAT);

    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col = col_idx as u16;
        worksheet.write_string_with_format(0, col, column.name().as_str(), &header_format)?;
        for row_idx in 0..df.height() {
            let value = column.get(row_idx).unwrap_or(AnyValue::Null);
            write_cell(worksheet, row_idx as u32 + 1, col, value, &date_format)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: AnyValue<'_>,
    date_format: &Format,
) -> Result<()> {
    match value {
        AnyValue::Null => {}
        AnyValue::Boolean(flag) => {
            worksheet.write_boolean(row, col, flag)?;
        }
        AnyValue::Date(days) => match date_from_epoch_days(days) {
            Some(date) => {
                worksheet.write_datetime_with_format(row, col, &date, date_format)?;
            }
            None => {
                worksheet.write_number(row, col, f64::from(days))?;
            }
        },
        AnyValue::String(text) => {
            worksheet.write_string(row, col, text)?;
        }
        AnyValue::StringOwned(text) => {
            worksheet.write_string(row, col, text.as_str())?;
        }
        other => match any_to_f64(other.clone()) {
            Some(number) => {
                worksheet.write_number(row, col, number)?;
            }
            None => {
                worksheet.write_string(row, col, any_to_string(other))?;
            }
        },
    }
    Ok(())
}
