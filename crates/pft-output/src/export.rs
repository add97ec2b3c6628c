//! Dated workbook export.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use pft_model::PipelineOptions;
use pft_model::schema::export::{FILENAME_DATE_FORMAT, XLSX_MIME_TYPE};

use crate::error::{ExportError, Result};
use crate::xlsx::write_xlsx;

/// A serialized workbook ready to hand to a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedWorkbook {
    pub bytes: Vec<u8>,
    /// Suggested name, `<label>_<YYYY-MM-DD>.xlsx`.
    pub filename: String,
    pub mime: &'static str,
}

/// Suggested filename for a run.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pft_output::export_filename;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// assert_eq!(export_filename("Pepsi", date), "Pepsi_2025-01-06.xlsx");
/// ```
pub fn export_filename(label: &str, run_date: NaiveDate) -> String {
    format!("{label}_{}.xlsx", run_date.format(FILENAME_DATE_FORMAT))
}

/// Serializes the final table and names it after the run options.
pub fn export_table(df: &DataFrame, options: &PipelineOptions) -> Result<ExportedWorkbook> {
    let start = Instant::now();
    let bytes = write_xlsx(df, options.run_date)?;
    let filename = export_filename(&options.product_label, options.run_date);
    info!(
        filename = %filename,
        rows = df.height(),
        columns = df.width(),
        bytes = bytes.len(),
        duration_ms = start.elapsed().as_millis(),
        "workbook exported"
    );
    Ok(ExportedWorkbook {
        bytes,
        filename,
        mime: XLSX_MIME_TYPE,
    })
}

/// Writes an exported workbook into `output_dir`, creating the directory
/// when needed. Returns the written path.
pub fn write_workbook_file(output_dir: &Path, workbook: &ExportedWorkbook) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|error| ExportError::Io {
        path: output_dir.to_path_buf(),
        error,
    })?;
    let path = output_dir.join(&workbook.filename);
    fs::write(&path, &workbook.bytes).map_err(|error| ExportError::Io {
        path: path.clone(),
        error,
    })?;
    debug!(path = %path.display(), bytes = workbook.bytes.len(), "workbook written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_uses_label_and_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(export_filename("Berry", date), "Berry_2024-12-31.xlsx");
    }
}
