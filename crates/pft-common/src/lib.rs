//! Shared utilities for the forecast transformer crates.
//!
//! This crate provides the Polars `AnyValue` helpers every pipeline stage
//! leans on: text rendering for join keys, numeric parsing for quantity
//! cells, trailing-zero-free number formatting, unique column naming and
//! Polars `Date` storage conversions.

pub mod dates;
pub mod names;
pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{
    any_to_f64, any_to_key, any_to_string, any_to_string_non_empty, format_numeric, parse_f64,
    parse_quantity,
};
pub use dates::{date_column, date_from_epoch_days, days_since_epoch};
pub use names::unique_names;
