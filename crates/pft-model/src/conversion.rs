//! Row-local conversion failures.
//!
//! A cell that cannot be coerced to its expected type degrades to a missing
//! value. The failure is recorded here and never aborts the run.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of individual failures retained as samples.
pub const MAX_SAMPLES: usize = 50;

/// Why a cell degraded to a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConversionReason {
    /// Text that is not a decimal number after removing commas.
    NotNumeric,
    /// Text that is not a date in the expected format.
    InvalidDate,
    /// The divisor used by a derived measure is missing or zero.
    MissingDivisor,
}

impl fmt::Display for ConversionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotNumeric => "not numeric",
            Self::InvalidDate => "invalid date",
            Self::MissingDivisor => "missing or zero divisor",
        };
        f.write_str(text)
    }
}

/// A single cell that could not be converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionError {
    /// Column the value was destined for (`IM`, `Week`, `LF`, ...).
    pub column: String,
    /// Zero-based row index in the table being produced.
    pub row: usize,
    /// The offending raw value, rendered as text.
    pub value: String,
    pub reason: ConversionReason,
}

/// Aggregated conversion failures of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    counts: BTreeMap<String, BTreeMap<ConversionReason, usize>>,
    samples: Vec<ConversionError>,
}

impl ConversionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one failed cell.
    pub fn record(&mut self, error: ConversionError) {
        *self
            .counts
            .entry(error.column.clone())
            .or_default()
            .entry(error.reason)
            .or_default() += 1;
        if self.samples.len() < MAX_SAMPLES {
            self.samples.push(error);
        }
    }

    /// Merge another report into this one.
    pub fn merge(&mut self, other: ConversionReport) {
        for (column, reasons) in other.counts {
            let entry = self.counts.entry(column).or_default();
            for (reason, count) in reasons {
                *entry.entry(reason).or_default() += count;
            }
        }
        let room = MAX_SAMPLES.saturating_sub(self.samples.len());
        self.samples.extend(other.samples.into_iter().take(room));
    }

    /// Total number of failed cells.
    pub fn total(&self) -> usize {
        self.counts.values().flat_map(BTreeMap::values).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Failures for one column and reason.
    pub fn count(&self, column: &str, reason: ConversionReason) -> usize {
        self.counts
            .get(column)
            .and_then(|reasons| reasons.get(&reason))
            .copied()
            .unwrap_or(0)
    }

    /// `(column, reason, count)` triples in column order.
    pub fn summary(&self) -> Vec<(String, ConversionReason, usize)> {
        self.counts
            .iter()
            .flat_map(|(column, reasons)| {
                reasons
                    .iter()
                    .map(move |(reason, count)| (column.clone(), *reason, *count))
            })
            .collect()
    }

    /// The first recorded failures, in the order they occurred.
    pub fn samples(&self) -> &[ConversionError] {
        &self.samples
    }
}
