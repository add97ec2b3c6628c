use std::path::PathBuf;

use serde::Serialize;

use pft_model::{ConversionReport, SourceKind, StageSummary};

use pft_cli::pipeline::PipelineOutput;

/// How a `run` invocation ended, short of an error.
pub enum RunOutcome {
    /// One or more inputs were not supplied; nothing was processed.
    AwaitingInput(Vec<SourceKind>),
    Completed(Box<RunResult>),
}

pub struct RunResult {
    pub output: PipelineOutput,
    /// Where the workbook was written; `None` on a dry run.
    pub written: Option<PathBuf>,
}

/// Machine-readable run report written by `--summary-json`.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub filename: &'a str,
    pub written: Option<&'a PathBuf>,
    pub rows: usize,
    pub columns: &'a [String],
    pub week_columns: &'a [String],
    pub stages: &'a [StageSummary],
    pub conversions: &'a ConversionReport,
}

impl<'a> RunSummary<'a> {
    pub fn new(result: &'a RunResult) -> Self {
        let output = &result.output;
        Self {
            filename: &output.filename,
            written: result.written.as_ref(),
            rows: output.rows,
            columns: &output.columns,
            week_columns: &output.week_columns,
            stages: &output.stages,
            conversions: &output.conversions,
        }
    }
}
