//! Workbook reading (xls, xlsx, xlsb, ods) using calamine.
//!
//! The first row of the selected worksheet is the header row. Header cells
//! are kept verbatim apart from the renderings needed to make them text:
//! date cells become `MM/DD/YY` (the week-column convention), numbers lose
//! trailing zeros, blanks become `Unnamed: <index>` and repeated names get a
//! `.1`, `.2` suffix.

use std::io::Cursor;

use calamine::{Data, DataType as CellType, Range, Reader, open_workbook_auto_from_rs};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;

use pft_common::{days_since_epoch, format_numeric, unique_names};
use pft_model::SourceKind;
use pft_model::schema::long::WEEK_FORMAT;

use crate::error::{IngestError, Result};

/// Inferred storage type of a worksheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellColumnType {
    Int64,
    Float64,
    Boolean,
    Date,
    Utf8,
}

/// Reads one worksheet of a workbook byte stream into a DataFrame.
///
/// `sheet` selects a worksheet by name; the first worksheet is used when it
/// is `None`.
pub fn read_workbook_bytes(
    input: SourceKind,
    bytes: &[u8],
    sheet: Option<&str>,
) -> Result<DataFrame> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyInput { input });
    }
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(|e| {
            IngestError::Workbook {
                input,
                message: e.to_string(),
            }
        })?;

    let range = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(IngestError::SheetNotFound {
                    input,
                    sheet: name.to_string(),
                });
            }
            workbook
                .worksheet_range(name)
                .map_err(|e| IngestError::Workbook {
                    input,
                    message: e.to_string(),
                })?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or(IngestError::NoWorksheets { input })?
            .map_err(|e| IngestError::Workbook {
                input,
                message: e.to_string(),
            })?,
    };

    range_to_dataframe(input, &range)
}

/// Converts a worksheet range into a DataFrame with row 1 as the header.
fn range_to_dataframe(input: SourceKind, range: &Range<Data>) -> Result<DataFrame> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Err(IngestError::EmptyWorksheet { input });
    };
    let headers = unique_names(header_row.iter().map(header_text).collect());
    if headers.is_empty() {
        return Err(IngestError::EmptyWorksheet { input });
    }

    let data_rows: Vec<&[Data]> = rows
        .filter(|row| !row.iter().all(is_blank))
        .collect();

    let mut columns = Vec::with_capacity(headers.len());
    for (col_idx, header) in headers.iter().enumerate() {
        let cells: Vec<Option<&Data>> = data_rows
            .iter()
            .map(|row| row.get(col_idx).filter(|cell| !matches!(cell, Data::Empty)))
            .collect();
        let column_type = infer_column_type(&cells);
        let series = cells_to_series(header, &cells, column_type).map_err(|e| {
            IngestError::DataFrame {
                input,
                message: e.to_string(),
            }
        })?;
        columns.push(series.into_column());
    }

    DataFrame::new(columns).map_err(|e| IngestError::DataFrame {
        input,
        message: e.to_string(),
    })
}

/// Renders a header cell as text.
fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(v) => format_numeric(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell_datetime(cell) {
            Some(dt) => dt.format(WEEK_FORMAT).to_string(),
            None => cell.to_string(),
        },
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Whitespace-only text counts as blank when deciding whether a whole row
/// is empty; inside a kept row it stays a value.
fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Converts a calamine date cell to NaiveDateTime (Excel serial or ISO text).
fn cell_datetime(cell: &Data) -> Option<NaiveDateTime> {
    match cell {
        Data::DateTime(_) => cell.as_datetime(),
        Data::DateTimeIso(s) => parse_iso_datetime(s),
        _ => None,
    }
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];
    let value = value.trim();
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Infers column type from its non-blank cells.
///
/// Whole-number columns become Int64, other numeric columns Float64, date
/// columns whose values all fall on midnight become Date. Anything mixed is
/// kept as text.
fn infer_column_type(cells: &[Option<&Data>]) -> CellColumnType {
    let present: Vec<&Data> = cells.iter().flatten().copied().collect();
    if present.is_empty() {
        return CellColumnType::Utf8;
    }
    let all_numeric = present
        .iter()
        .all(|cell| matches!(cell, Data::Int(_) | Data::Float(_)));
    if all_numeric {
        let all_whole = present.iter().all(|cell| match cell {
            Data::Int(_) => true,
            Data::Float(v) => v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15,
            _ => false,
        });
        return if all_whole {
            CellColumnType::Int64
        } else {
            CellColumnType::Float64
        };
    }
    if present.iter().all(|cell| matches!(cell, Data::Bool(_))) {
        return CellColumnType::Boolean;
    }
    let all_dates = present.iter().all(|cell| {
        cell_datetime(cell).is_some_and(|dt| dt.time() == NaiveTime::MIN)
    });
    if all_dates {
        return CellColumnType::Date;
    }
    CellColumnType::Utf8
}

/// Renders any cell as text for a mixed column.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(v) => format_numeric(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell_datetime(cell) {
            Some(dt) if dt.time() == NaiveTime::MIN => dt.date().format("%Y-%m-%d").to_string(),
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => cell.to_string(),
        },
        other => other.to_string(),
    }
}

/// Build a Polars Series from a column of calamine cells using the inferred type.
fn cells_to_series(
    name: &str,
    cells: &[Option<&Data>],
    column_type: CellColumnType,
) -> PolarsResult<Series> {
    let series = match column_type {
        CellColumnType::Int64 => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| {
                    cell.and_then(|c| match c {
                        Data::Int(v) => Some(*v),
                        Data::Float(v) => Some(*v as i64),
                        _ => None,
                    })
                })
                .collect();
            Series::new(name.into(), values)
        }
        CellColumnType::Float64 => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| cell.and_then(CellType::as_f64))
                .collect();
            Series::new(name.into(), values)
        }
        CellColumnType::Boolean => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| cell.and_then(CellType::get_bool))
                .collect();
            Series::new(name.into(), values)
        }
        CellColumnType::Date => {
            let values: Vec<Option<i32>> = cells
                .iter()
                .map(|cell| cell.and_then(cell_datetime).map(|dt| days_since_epoch(dt.date())))
                .collect();
            Series::new(name.into(), values).cast(&DataType::Date)?
        }
        CellColumnType::Utf8 => {
            let values: Vec<Option<String>> =
                cells.iter().map(|cell| cell.map(cell_text)).collect();
            Series::new(name.into(), values)
        }
    };
    Ok(series)
}
