//! Caller-facing error taxonomy for a pipeline run.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three inputs of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// Calendar dimension (delimited text).
    Calendar,
    /// Inventory/forecast extract (workbook).
    Main,
    /// Unit-conversion reference table (workbook).
    Reference,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [Self::Calendar, Self::Main, Self::Reference];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Main => "main",
            Self::Reference => "reference",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that end a run.
///
/// `IncompleteInput` is a wait state rather than a failure: nothing was
/// processed and the caller should prompt for the missing sources.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// One or more inputs were not supplied.
    #[error("awaiting input: {}", format_sources(.missing))]
    IncompleteInput { missing: Vec<SourceKind> },

    /// A source is not valid in its expected format.
    #[error("failed to parse {input} input: {message}")]
    Parse { input: SourceKind, message: String },

    /// A structurally required column is absent.
    #[error("{input} input is missing required column '{column}'")]
    Schema { input: SourceKind, column: String },

    /// A table operation failed after all inputs were validated.
    #[error("transform failed: {message}")]
    Transform { message: String },

    /// The final table could not be serialized.
    #[error("export failed: {message}")]
    Export { message: String },
}

impl PipelineError {
    /// True for the wait state that should not be reported as a failure.
    pub fn is_incomplete_input(&self) -> bool {
        matches!(self, Self::IncompleteInput { .. })
    }
}

fn format_sources(sources: &[SourceKind]) -> String {
    sources
        .iter()
        .map(|input| input.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
