//! Run options for the forecast pipeline.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::schema::export::DEFAULT_PRODUCT_LABEL;

/// Options controlling one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Prefix of the exported filename (`<label>_<YYYY-MM-DD>.xlsx`).
    pub product_label: String,

    /// Date embedded in the exported filename.
    ///
    /// Defaults to the local calendar date when the options are built.
    pub run_date: NaiveDate,

    /// Worksheet to read from the main workbook. First sheet when `None`.
    pub main_sheet: Option<String>,

    /// Worksheet to read from the reference workbook. First sheet when `None`.
    pub reference_sheet: Option<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            product_label: DEFAULT_PRODUCT_LABEL.to_string(),
            run_date: Local::now().date_naive(),
            main_sheet: None,
            reference_sheet: None,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_product_label(mut self, label: impl Into<String>) -> Self {
        self.product_label = label.into();
        self
    }

    #[must_use]
    pub fn with_run_date(mut self, date: NaiveDate) -> Self {
        self.run_date = date;
        self
    }

    #[must_use]
    pub fn with_main_sheet(mut self, sheet: Option<String>) -> Self {
        self.main_sheet = sheet;
        self
    }

    #[must_use]
    pub fn with_reference_sheet(mut self, sheet: Option<String>) -> Self {
        self.reference_sheet = sheet;
        self
    }
}
