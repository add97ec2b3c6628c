//! CSV reading from an in-memory byte stream.

use std::io::Cursor;

use polars::prelude::*;

use pft_model::SourceKind;

use crate::error::{IngestError, Result};

/// Number of rows used to infer column types.
pub const INFER_SCHEMA_ROWS: usize = 100;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported. Returns the bytes
/// with any UTF-8 BOM removed.
pub fn check_encoding(input: SourceKind, bytes: &[u8]) -> Result<&[u8]> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyInput { input });
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            input,
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            input,
            encoding: "UTF-16 BE",
        });
    }
    Ok(bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes))
}

/// Reads comma-separated bytes into a DataFrame.
///
/// Row 1 is the header row; column types are inferred from the first
/// [`INFER_SCHEMA_ROWS`] data rows.
pub fn read_csv_bytes(input: SourceKind, bytes: &[u8]) -> Result<DataFrame> {
    let body = check_encoding(input, bytes)?;
    let first_line = body.split(|b| *b == b'\n').next().unwrap_or_default();
    if first_line.iter().all(u8::is_ascii_whitespace) {
        return Err(IngestError::NoHeader { input });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .into_reader_with_file_handle(Cursor::new(body.to_vec()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            input,
            message: e.to_string(),
        })?;

    if df.width() == 0 {
        return Err(IngestError::NoHeader { input });
    }
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_bytes_header_and_rows() {
        let df = read_csv_bytes(
            SourceKind::Calendar,
            b"CalendarDate,FiscalPeriod\n2025-01-06,P1\n2025-01-13,P1\n",
        )
        .unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["CalendarDate", "FiscalPeriod"]);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_read_csv_bytes_with_bom() {
        let df = read_csv_bytes(SourceKind::Calendar, b"\xEF\xBB\xBFA,B\n1,2\n").unwrap();
        assert_eq!(df.get_column_names()[0].as_str(), "A");
    }

    #[test]
    fn test_read_csv_bytes_header_only() {
        let df = read_csv_bytes(SourceKind::Calendar, b"CalendarDate,FiscalWeek\n").unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_read_csv_bytes_empty() {
        let result = read_csv_bytes(SourceKind::Calendar, b"");
        assert!(matches!(result, Err(IngestError::EmptyInput { .. })));
    }

    #[test]
    fn test_read_csv_bytes_blank_header() {
        let result = read_csv_bytes(SourceKind::Calendar, b"\n1,2\n");
        assert!(matches!(result, Err(IngestError::NoHeader { .. })));
    }

    #[test]
    fn test_check_encoding_rejects_utf16() {
        let result = check_encoding(SourceKind::Calendar, &[0xFF, 0xFE, b'A', 0]);
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }
}
