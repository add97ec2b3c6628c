//! Workbooks written by the exporter, read back with calamine.

use std::io::Cursor;

use calamine::{Data, DataType as _, Range, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDate;
use polars::prelude::*;

use pft_common::date_column;
use pft_model::PipelineOptions;
use pft_output::{SHEET_NAME, XLSX_MIME_TYPE, export_table, write_workbook_file, write_xlsx};

fn final_table() -> DataFrame {
    let week = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    DataFrame::new(vec![
        Series::new("Item".into(), &["100", "200"]).into_column(),
        date_column("Week", &[Some(week), None]).unwrap(),
        Series::new("IM".into(), &[Some(1200.0), None]).into_column(),
        Series::new("LF".into(), &[Some(0.12), None]).into_column(),
        Series::new("FiscalYear".into(), &[Some(2025i64), None]).into_column(),
        Series::new("Special Record".into(), &[Some(true), Some(false)]).into_column(),
    ])
    .unwrap()
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn read_back(bytes: Vec<u8>) -> Range<Data> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    workbook.worksheet_range(SHEET_NAME).unwrap()
}

fn cell(range: &Range<Data>, row: u32, col: u32) -> Data {
    range.get_value((row, col)).cloned().unwrap_or(Data::Empty)
}

#[test]
fn header_row_holds_column_names_in_order() {
    let range = read_back(write_xlsx(&final_table(), run_date()).unwrap());
    let header: Vec<String> = (0..6).map(|col| cell(&range, 0, col).to_string()).collect();
    assert_eq!(
        header,
        vec!["Item", "Week", "IM", "LF", "FiscalYear", "Special Record"]
    );
}

#[test]
fn cells_keep_their_types() {
    let range = read_back(write_xlsx(&final_table(), run_date()).unwrap());

    assert_eq!(cell(&range, 1, 0), Data::String("100".to_string()));
    assert_eq!(
        cell(&range, 1, 1).as_date(),
        NaiveDate::from_ymd_opt(2025, 1, 6)
    );
    assert_eq!(cell(&range, 1, 2), Data::Float(1200.0));
    assert_eq!(cell(&range, 1, 3), Data::Float(0.12));
    assert_eq!(cell(&range, 1, 4), Data::Float(2025.0));
    assert_eq!(cell(&range, 1, 5), Data::Bool(true));
}

#[test]
fn nulls_are_blank_cells() {
    let range = read_back(write_xlsx(&final_table(), run_date()).unwrap());
    assert_eq!(cell(&range, 2, 1), Data::Empty);
    assert_eq!(cell(&range, 2, 2), Data::Empty);
    assert_eq!(cell(&range, 2, 5), Data::Bool(false));
}

#[test]
fn export_table_names_the_workbook_after_the_run() {
    let options = PipelineOptions::default()
        .with_product_label("Pepsi")
        .with_run_date(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    let exported = export_table(&final_table(), &options).unwrap();

    assert_eq!(exported.filename, "Pepsi_2025-03-14.xlsx");
    assert_eq!(exported.mime, XLSX_MIME_TYPE);

    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook_file(&dir.path().join("out"), &exported).unwrap();
    assert_eq!(path.file_name().unwrap(), "Pepsi_2025-03-14.xlsx");
    assert_eq!(std::fs::read(&path).unwrap(), exported.bytes);
}

#[test]
fn identical_tables_give_identical_bytes() {
    let first = write_xlsx(&final_table(), run_date()).unwrap();
    let second = write_xlsx(&final_table(), run_date()).unwrap();
    assert_eq!(first, second);
}
