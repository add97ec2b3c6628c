//! Table wrappers passed between pipeline stages.

use polars::prelude::DataFrame;

use crate::error::SourceKind;

/// One loaded input table together with the source it came from.
///
/// The source travels with the data so that schema failures deep inside a
/// stage can still name the offending input.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub source: SourceKind,
    pub data: DataFrame,
}

impl SourceTable {
    pub fn new(source: SourceKind, data: DataFrame) -> Self {
        Self { source, data }
    }

    /// Returns the number of records in the table.
    pub fn row_count(&self) -> usize {
        self.data.height()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.data.column(name).is_ok()
    }
}

/// The three inputs of a run after loading.
#[derive(Debug, Clone)]
pub struct LoadedSources {
    pub calendar: SourceTable,
    pub main: SourceTable,
    pub reference: SourceTable,
}
