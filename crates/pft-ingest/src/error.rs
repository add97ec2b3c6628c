//! Error types for input loading.

use thiserror::Error;

use pft_model::{PipelineError, SourceKind};

/// Errors that can occur while turning raw input bytes into tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Byte-level Errors ===
    /// The byte stream is empty.
    #[error("{input} input is empty")]
    EmptyInput { input: SourceKind },

    /// The byte stream starts with a byte-order mark we do not read.
    #[error("{input} input uses unsupported encoding {encoding}")]
    UnsupportedEncoding {
        input: SourceKind,
        encoding: &'static str,
    },

    // === Delimited Text Errors ===
    /// Polars rejected the delimited text.
    #[error("failed to parse {input} CSV: {message}")]
    CsvParse { input: SourceKind, message: String },

    /// The delimited text has no header row.
    #[error("{input} CSV has no header row")]
    NoHeader { input: SourceKind },

    // === Workbook Errors ===
    /// The bytes are not a readable workbook.
    #[error("failed to read {input} workbook: {message}")]
    Workbook { input: SourceKind, message: String },

    /// The workbook contains no worksheets.
    #[error("{input} workbook has no worksheets")]
    NoWorksheets { input: SourceKind },

    /// The requested worksheet does not exist.
    #[error("{input} workbook has no worksheet named '{sheet}'")]
    SheetNotFound { input: SourceKind, sheet: String },

    /// The worksheet has no header row.
    #[error("{input} worksheet is empty")]
    EmptyWorksheet { input: SourceKind },

    // === DataFrame Errors ===
    /// Building the DataFrame from parsed cells failed.
    #[error("failed to build {input} table: {message}")]
    DataFrame { input: SourceKind, message: String },
}

impl IngestError {
    /// The input this error refers to.
    pub fn input(&self) -> SourceKind {
        match self {
            Self::EmptyInput { input }
            | Self::UnsupportedEncoding { input, .. }
            | Self::CsvParse { input, .. }
            | Self::NoHeader { input }
            | Self::Workbook { input, .. }
            | Self::NoWorksheets { input }
            | Self::SheetNotFound { input, .. }
            | Self::EmptyWorksheet { input }
            | Self::DataFrame { input, .. } => *input,
        }
    }
}

impl From<IngestError> for PipelineError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::EmptyInput { input } => Self::IncompleteInput {
                missing: vec![input],
            },
            other => Self::Parse {
                input: other.input(),
                message: other.to_string(),
            },
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
