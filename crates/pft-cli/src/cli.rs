//! CLI argument definitions for the forecast transformer.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use pft_model::schema::export::DEFAULT_PRODUCT_LABEL;

#[derive(Parser)]
#[command(
    name = "pft",
    version,
    about = "Pepsi forecast transformer - reconcile forecast extracts into a dated workbook",
    long_about = "Reconcile a forecast extract with its unit-conversion reference and the\n\
                  fiscal calendar, reshape weekly columns into rows, derive LF and LB,\n\
                  and write the result as an XLSX workbook."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the pipeline on a calendar CSV, a main workbook and a reference workbook.
    Run(RunArgs),

    /// List the fixed column sets the pipeline checks, drops or keeps.
    Columns,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Calendar dimension as comma-separated text (must contain CalendarDate).
    #[arg(long = "calendar", value_name = "CSV")]
    pub calendar: Option<PathBuf>,

    /// Main forecast extract workbook.
    #[arg(long = "main", value_name = "WORKBOOK")]
    pub main: Option<PathBuf>,

    /// Unit-conversion reference workbook.
    #[arg(long = "reference", value_name = "WORKBOOK")]
    pub reference: Option<PathBuf>,

    /// Directory for the generated workbook (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Product label used as the filename prefix.
    #[arg(long = "label", value_name = "LABEL", default_value = DEFAULT_PRODUCT_LABEL)]
    pub label: String,

    /// Date embedded in the filename (YYYY-MM-DD, default: today).
    #[arg(long = "run-date", value_name = "DATE")]
    pub run_date: Option<NaiveDate>,

    /// Worksheet to read from the main workbook (default: first sheet).
    #[arg(long = "main-sheet", value_name = "NAME")]
    pub main_sheet: Option<String>,

    /// Worksheet to read from the reference workbook (default: first sheet).
    #[arg(long = "reference-sheet", value_name = "NAME")]
    pub reference_sheet: Option<String>,

    /// Run and report without writing the workbook.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Also write a JSON run summary (stages, conversion failures) to PATH.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
