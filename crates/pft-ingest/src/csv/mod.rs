//! Delimited text reading.

mod reader;

pub use reader::{INFER_SCHEMA_ROWS, check_encoding, read_csv_bytes};
