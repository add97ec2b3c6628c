//! Loading the three inputs of a run.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, info};

use pft_model::{LoadedSources, PipelineOptions, SourceKind, SourceTable};

use crate::csv::read_csv_bytes;
use crate::error::Result;
use crate::workbook::read_workbook_bytes;

/// Parses the three raw byte streams into tables.
///
/// The calendar is delimited text; main and reference are workbooks read
/// from the sheets named in `options` (first sheet by default).
pub fn load_sources(
    calendar: &[u8],
    main: &[u8],
    reference: &[u8],
    options: &PipelineOptions,
) -> Result<LoadedSources> {
    let calendar = load_source(SourceKind::Calendar, calendar.len(), || {
        read_csv_bytes(SourceKind::Calendar, calendar)
    })?;
    let main = load_source(SourceKind::Main, main.len(), || {
        read_workbook_bytes(SourceKind::Main, main, options.main_sheet.as_deref())
    })?;
    let reference = load_source(SourceKind::Reference, reference.len(), || {
        read_workbook_bytes(
            SourceKind::Reference,
            reference,
            options.reference_sheet.as_deref(),
        )
    })?;
    Ok(LoadedSources {
        calendar,
        main,
        reference,
    })
}

fn load_source(
    input: SourceKind,
    byte_len: usize,
    read: impl FnOnce() -> Result<DataFrame>,
) -> Result<SourceTable> {
    let start = Instant::now();
    let data = read()?;
    debug!(
        input = %input,
        columns = ?data.get_column_names(),
        "loaded source headers"
    );
    info!(
        input = %input,
        bytes = byte_len,
        rows = data.height(),
        columns = data.width(),
        duration_ms = start.elapsed().as_millis(),
        "source loaded"
    );
    Ok(SourceTable::new(input, data))
}
