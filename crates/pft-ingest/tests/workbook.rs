//! Integration tests for workbook and source loading.

use polars::prelude::{AnyValue, DataType};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};

use pft_ingest::{IngestError, load_sources, read_workbook_bytes};
use pft_model::{PipelineOptions, SourceKind};

fn main_workbook() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();
    sheet.set_name("Forecast")?;
    sheet.write_string(0, 0, " Item ")?;
    sheet.write_string(0, 1, "Plant\u{a0}Desc")?;
    sheet.write_string(0, 2, "IM/LF")?;
    sheet.write_datetime_with_format(0, 3, &ExcelDateTime::from_ymd(2025, 1, 6)?, &date_format)?;
    sheet.write_string(0, 4, "01/13/25")?;

    sheet.write_number(1, 0, 100)?;
    sheet.write_string(1, 1, "Plant A")?;
    sheet.write_number(1, 2, 12.5)?;
    sheet.write_number(1, 3, 1200)?;
    sheet.write_string(1, 4, "1,300")?;

    sheet.write_number(3, 0, 200)?;
    sheet.write_string(3, 1, "Plant B")?;
    sheet.write_number(3, 2, 10)?;
    sheet.write_number(3, 3, 5)?;
    sheet.write_number(3, 4, 6)?;
    workbook.save_to_buffer()
}

#[test]
fn reads_headers_verbatim_and_renders_date_headers() {
    let bytes = main_workbook().unwrap();
    let df = read_workbook_bytes(SourceKind::Main, &bytes, None).unwrap();

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(
        names,
        vec![" Item ", "Plant\u{a0}Desc", "IM/LF", "01/06/25", "01/13/25"]
    );
}

#[test]
fn skips_blank_rows_and_infers_types() {
    let bytes = main_workbook().unwrap();
    let df = read_workbook_bytes(SourceKind::Main, &bytes, None).unwrap();

    assert_eq!(df.height(), 2);
    assert_eq!(df.column(" Item ").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("IM/LF").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("01/13/25").unwrap().dtype(), &DataType::String);
    assert_eq!(
        df.column("01/13/25").unwrap().get(0).unwrap(),
        AnyValue::String("1,300")
    );
}

#[test]
fn selects_named_sheet() {
    let bytes = main_workbook().unwrap();
    let df = read_workbook_bytes(SourceKind::Main, &bytes, Some("Forecast")).unwrap();
    assert_eq!(df.height(), 2);

    let missing = read_workbook_bytes(SourceKind::Main, &bytes, Some("Sheet9"));
    assert!(matches!(
        missing,
        Err(IngestError::SheetNotFound { ref sheet, .. }) if sheet == "Sheet9"
    ));
}

#[test]
fn empty_worksheet_is_rejected() {
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    let bytes = workbook.save_to_buffer().unwrap();

    let result = read_workbook_bytes(SourceKind::Reference, &bytes, None);
    assert!(matches!(
        result,
        Err(IngestError::EmptyWorksheet {
            input: SourceKind::Reference
        })
    ));
}

#[test]
fn load_sources_reads_all_three() {
    let main = main_workbook().unwrap();
    let mut reference = Workbook::new();
    let sheet = reference.add_worksheet();
    sheet.write_string(0, 0, "Pepsi Item# (RMID#)").unwrap();
    sheet.write_string(0, 1, "Pepsi Plant Desc").unwrap();
    sheet.write_string(1, 0, " 100 ").unwrap();
    sheet.write_string(1, 1, "Plant A ").unwrap();
    let reference = reference.save_to_buffer().unwrap();
    let calendar = b"CalendarDate,FiscalPeriod\n2025-01-06,P01\n";

    let sources = load_sources(calendar, &main, &reference, &PipelineOptions::default()).unwrap();

    assert_eq!(sources.calendar.source, SourceKind::Calendar);
    assert_eq!(sources.calendar.row_count(), 1);
    assert_eq!(sources.main.row_count(), 2);
    assert_eq!(sources.reference.row_count(), 1);
    assert!(sources.reference.has_column("Pepsi Plant Desc"));
}

#[test]
fn load_sources_names_the_failing_input() {
    let calendar = b"CalendarDate\n2025-01-06\n";
    let result = load_sources(calendar, b"garbage", b"garbage", &PipelineOptions::default());
    let err = result.unwrap_err();
    assert_eq!(err.input(), SourceKind::Main);
}

#[test]
fn whitespace_cells_are_kept_but_whitespace_rows_are_skipped() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Item").unwrap();
    sheet.write_string(0, 1, "Notes").unwrap();
    sheet.write_string(1, 0, "100").unwrap();
    sheet.write_string(1, 1, "  ").unwrap();
    sheet.write_string(2, 0, " ").unwrap();
    sheet.write_string(2, 1, "\t").unwrap();
    sheet.write_string(3, 0, "200").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let df = read_workbook_bytes(SourceKind::Main, &bytes, None).unwrap();

    assert_eq!(df.height(), 2);
    let notes = df.column("Notes").unwrap();
    assert_eq!(notes.get(0).unwrap(), AnyValue::String("  "));
    assert_eq!(notes.get(1).unwrap(), AnyValue::Null);
}
