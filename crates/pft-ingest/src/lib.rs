//! Forecast input loading.
//!
//! This crate turns the three raw byte streams of a run into Polars
//! DataFrames with headers taken from row 1 of each source.
//!
//! # Features
//!
//! - **CSV Loading**: calendar dimension as comma-separated UTF-8 text
//! - **Workbook Loading**: main and reference tables from xls/xlsx/xlsb/ods bytes
//! - **Type Inference**: numeric, boolean and date columns recognized per column
//!
//! # Example
//!
//! ```ignore
//! use pft_ingest::load_sources;
//! use pft_model::PipelineOptions;
//!
//! let sources = load_sources(&calendar_bytes, &main_bytes, &reference_bytes, &PipelineOptions::default())?;
//! println!("{} main rows", sources.main.row_count());
//! ```

mod csv;
mod error;
mod sources;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{INFER_SCHEMA_ROWS, check_encoding, read_csv_bytes};

// === Workbook Reading ===
pub use workbook::read_workbook_bytes;

// === Run Inputs ===
pub use sources::load_sources;
