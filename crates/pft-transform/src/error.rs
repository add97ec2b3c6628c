//! Error types for table transformations.

use polars::prelude::PolarsError;
use thiserror::Error;

use pft_model::{PipelineError, SourceKind};

/// Errors raised by the normalizer, reconciler and calendar binder.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A structurally required column is absent.
    #[error("{input} input is missing required column '{column}'")]
    MissingColumn { input: SourceKind, column: String },

    /// A DataFrame operation failed.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl TransformError {
    pub fn missing_column(input: SourceKind, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            input,
            column: column.into(),
        }
    }
}

impl From<PolarsError> for TransformError {
    fn from(err: PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<TransformError> for PipelineError {
    fn from(err: TransformError) -> Self {
        match err {
            TransformError::MissingColumn { input, column } => Self::Schema { input, column },
            TransformError::DataFrame { message } => Self::Transform { message },
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_becomes_schema_error() {
        let err = TransformError::missing_column(SourceKind::Main, "Lane");
        assert_eq!(err.to_string(), "main input is missing required column 'Lane'");
        let pipeline: PipelineError = err.into();
        assert!(matches!(
            pipeline,
            PipelineError::Schema { input: SourceKind::Main, ref column } if column == "Lane"
        ));
    }

    #[test]
    fn polars_error_becomes_transform_error() {
        let err: TransformError = PolarsError::ColumnNotFound("x".into()).into();
        let pipeline: PipelineError = err.into();
        assert!(matches!(pipeline, PipelineError::Transform { .. }));
    }
}
