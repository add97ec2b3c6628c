//! Data model for the forecast transformer.
//!
//! - **schema**: fixed column sets checked, dropped or preserved by the pipeline
//! - **error**: caller-facing error taxonomy ([`PipelineError`])
//! - **conversion**: row-local conversion failures ([`ConversionReport`])
//! - **table**: table wrappers passed between stages
//! - **options**: run options ([`PipelineOptions`])
//! - **processing**: stage bookkeeping ([`StageSummary`])

pub mod conversion;
pub mod error;
pub mod options;
pub mod processing;
pub mod schema;
pub mod table;

pub use conversion::{ConversionError, ConversionReason, ConversionReport};
pub use error::{PipelineError, Result, SourceKind};
pub use options::PipelineOptions;
pub use processing::{Stage, StageSummary};
pub use table::{LoadedSources, SourceTable};
