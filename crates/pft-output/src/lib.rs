//! Export of the final forecast table.
//!
//! - **xlsx**: worksheet serialization with typed cells
//! - **export**: dated filename, MIME type and optional file output

mod error;
mod export;
mod xlsx;

pub use error::{ExportError, Result};
pub use export::{ExportedWorkbook, export_filename, export_table, write_workbook_file};
pub use pft_model::schema::export::XLSX_MIME_TYPE;
pub use xlsx::{MAX_COLUMNS, MAX_DATA_ROWS, SHEET_NAME, write_xlsx};
