//! Forecast pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load**: Parse the calendar CSV and the two workbooks
//! 2. **Normalize**: Clean headers, canonicalize join keys, drop fixed columns
//! 3. **Reconcile**: Join main to reference, reshape weeks, derive `LF`/`LB`
//! 4. **Bind calendar**: Join fiscal attributes by week, prune calendar columns
//! 5. **Export**: Serialize to XLSX with a dated filename
//!
//! [`run_pipeline`] is a pure function of three byte streams and the run
//! options; it performs no file or network I/O.

use std::time::Instant;

use tracing::{info, info_span, warn};

use pft_ingest::load_sources;
use pft_model::{
    ConversionReport, PipelineError, PipelineOptions, SourceKind, Stage, StageSummary,
};
use pft_output::export_table;
use pft_transform::{bind_calendar, normalize_main, normalize_reference, reconcile};

/// The three raw inputs of a run. `None` means not supplied yet.
#[derive(Debug, Clone, Default)]
pub struct PipelineInputs {
    pub calendar: Option<Vec<u8>>,
    pub main: Option<Vec<u8>>,
    pub reference: Option<Vec<u8>>,
}

impl PipelineInputs {
    pub fn new(calendar: Vec<u8>, main: Vec<u8>, reference: Vec<u8>) -> Self {
        Self {
            calendar: Some(calendar),
            main: Some(main),
            reference: Some(reference),
        }
    }

    fn get(&self, source: SourceKind) -> Option<&[u8]> {
        let bytes = match source {
            SourceKind::Calendar => self.calendar.as_deref(),
            SourceKind::Main => self.main.as_deref(),
            SourceKind::Reference => self.reference.as_deref(),
        };
        bytes.filter(|bytes| !bytes.is_empty())
    }

    /// Sources that are absent or empty.
    pub fn missing(&self) -> Vec<SourceKind> {
        SourceKind::ALL
            .into_iter()
            .filter(|source| self.get(*source).is_none())
            .collect()
    }
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The XLSX workbook.
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime: &'static str,
    pub rows: usize,
    /// Column names of the exported table, in order.
    pub columns: Vec<String>,
    /// Week headers found in the main table.
    pub week_columns: Vec<String>,
    pub stages: Vec<StageSummary>,
    pub conversions: ConversionReport,
}

/// Runs the whole pipeline.
///
/// Returns [`PipelineError::IncompleteInput`] without processing anything
/// when any input is absent or empty. Parse, schema and export failures
/// abort the run; cells that cannot be converted become missing values and
/// are listed in [`PipelineOutput::conversions`].
pub fn run_pipeline(
    inputs: &PipelineInputs,
    options: &PipelineOptions,
) -> Result<PipelineOutput, PipelineError> {
    let (Some(calendar), Some(main), Some(reference)) = (
        inputs.get(SourceKind::Calendar),
        inputs.get(SourceKind::Main),
        inputs.get(SourceKind::Reference),
    ) else {
        return Err(PipelineError::IncompleteInput {
            missing: inputs.missing(),
        });
    };

    let run_span = info_span!(
        "pipeline",
        label = %options.product_label,
        run_date = %options.run_date
    );
    let _run_guard = run_span.enter();
    let mut stages = Vec::with_capacity(5);
    let mut conversions = ConversionReport::new();

    // Stage 1: Load
    let start = Instant::now();
    let sources = {
        let _span = info_span!("stage", stage = %Stage::Load).entered();
        load_sources(calendar, main, reference, options)?
    };
    stages.push(complete(
        Stage::Load,
        start,
        sources.main.row_count(),
        sources.main.data.width(),
    ));

    // Stage 2: Normalize
    let start = Instant::now();
    let (main, reference) = {
        let _span = info_span!("stage", stage = %Stage::Normalize).entered();
        (
            normalize_main(sources.main)?,
            normalize_reference(sources.reference)?,
        )
    };
    stages.push(complete(
        Stage::Normalize,
        start,
        main.row_count(),
        main.data.width(),
    ));

    // Stage 3: Reconcile
    let start = Instant::now();
    let reconciled = {
        let _span = info_span!("stage", stage = %Stage::Reconcile).entered();
        reconcile(&main, &reference)?
    };
    conversions.merge(reconciled.conversions);
    stages.push(complete(
        Stage::Reconcile,
        start,
        reconciled.data.height(),
        reconciled.data.width(),
    ));

    // Stage 4: Bind calendar
    let start = Instant::now();
    let bound = {
        let _span = info_span!("stage", stage = %Stage::BindCalendar).entered();
        bind_calendar(&reconciled.data, &sources.calendar)?
    };
    conversions.merge(bound.conversions);
    stages.push(complete(
        Stage::BindCalendar,
        start,
        bound.data.height(),
        bound.data.width(),
    ));

    // Stage 5: Export
    let start = Instant::now();
    let workbook = {
        let _span = info_span!("stage", stage = %Stage::Export).entered();
        export_table(&bound.data, options)?
    };
    stages.push(complete(
        Stage::Export,
        start,
        bound.data.height(),
        bound.data.width(),
    ));

    for (column, reason, count) in conversions.summary() {
        warn!(column = %column, reason = %reason, count, "values degraded to missing");
    }

    Ok(PipelineOutput {
        bytes: workbook.bytes,
        filename: workbook.filename,
        mime: workbook.mime,
        rows: bound.data.height(),
        columns: bound
            .data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect(),
        week_columns: reconciled.week_columns,
        stages,
        conversions,
    })
}

fn complete(stage: Stage, start: Instant, rows: usize, columns: usize) -> StageSummary {
    let duration_ms = start.elapsed().as_millis();
    info!(
        stage = %stage,
        rows,
        columns,
        duration_ms,
        "stage complete"
    );
    StageSummary {
        stage,
        rows,
        columns,
        duration_ms,
    }
}
