use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info_span};

use pft_cli::pipeline::{PipelineInputs, run_pipeline};
use pft_model::PipelineOptions;
use pft_model::schema::{calendar, divisors, forecast, long, reference};
use pft_output::{ExportedWorkbook, write_workbook_file};

use crate::cli::RunArgs;
use crate::summary::apply_table_style;
use crate::types::{RunOutcome, RunResult, RunSummary};

pub fn run_columns() -> Result<()> {
    let sets: [(&str, &[&str]); 6] = [
        ("Main join keys", &forecast::KEYS),
        ("Main columns dropped", &forecast::DROPPED),
        ("Reference join keys", &reference::KEYS),
        ("Reference columns dropped after join", &reference::DROPPED_AFTER_JOIN),
        ("Divisors", &divisors::ALL),
        ("Identifying columns", &long::IDENTIFYING),
    ];
    let mut table = Table::new();
    table.set_header(vec!["Set", "Columns"]);
    apply_table_style(&mut table);
    for (label, columns) in sets {
        table.add_row(vec![label.to_string(), columns.join(", ")]);
    }
    table.add_row(vec![
        format!("Calendar columns pruned ({})", calendar::PRUNED.len()),
        calendar::PRUNED.join(", "),
    ]);
    println!("{table}");
    Ok(())
}

pub fn run(args: &RunArgs) -> Result<RunOutcome> {
    let inputs = PipelineInputs {
        calendar: read_input(args.calendar.as_deref())?,
        main: read_input(args.main.as_deref())?,
        reference: read_input(args.reference.as_deref())?,
    };
    let options = run_options(args);

    let output = match run_pipeline(&inputs, &options) {
        Ok(output) => output,
        Err(pft_model::PipelineError::IncompleteInput { missing }) => {
            return Ok(RunOutcome::AwaitingInput(missing));
        }
        Err(error) => return Err(error.into()),
    };

    let written = if args.dry_run {
        None
    } else {
        let _span = info_span!("write", filename = %output.filename).entered();
        let output_dir = args.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let workbook = ExportedWorkbook {
            bytes: output.bytes.clone(),
            filename: output.filename.clone(),
            mime: output.mime,
        };
        Some(write_workbook_file(&output_dir, &workbook).context("write workbook")?)
    };

    let result = RunResult { output, written };
    if let Some(path) = &args.summary_json {
        write_summary_json(path, &result)?;
    }
    Ok(RunOutcome::Completed(Box::new(result)))
}

fn run_options(args: &RunArgs) -> PipelineOptions {
    let mut options = PipelineOptions::default()
        .with_product_label(args.label.clone())
        .with_main_sheet(args.main_sheet.clone())
        .with_reference_sheet(args.reference_sheet.clone());
    if let Some(date) = args.run_date {
        options = options.with_run_date(date);
    }
    options
}

/// Reads one input file. A path that was not given yields `None`.
fn read_input(path: Option<&Path>) -> Result<Option<Vec<u8>>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "input read");
    Ok(Some(bytes))
}

fn write_summary_json(path: &Path, result: &RunResult) -> Result<()> {
    let summary = RunSummary::new(result);
    let json = serde_json::to_string_pretty(&summary).context("serialize run summary")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
