//! Export errors.

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

use pft_model::PipelineError;

/// Errors that can occur while serializing the final table.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("table has {rows} rows; a worksheet holds at most {max} data rows")]
    TooManyRows { rows: usize, max: usize },

    #[error("table has {columns} columns; a worksheet holds at most {max}")]
    TooManyColumns { columns: usize, max: usize },

    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("failed to write {}: {error}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

impl From<ExportError> for PipelineError {
    fn from(err: ExportError) -> Self {
        Self::Export {
            message: err.to_string(),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
