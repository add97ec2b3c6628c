//! Header cleanup and join-key canonicalization.
//!
//! After this stage the same logical key value is spelled identically in the
//! main and reference tables, so whitespace or hidden characters cannot cause
//! a join miss. No other cell values are touched.

use std::time::Instant;

use polars::prelude::*;
use tracing::{debug, info};

use pft_common::{any_to_key, unique_names};
use pft_model::SourceTable;
use pft_model::schema::{forecast, reference};

use crate::error::{Result, TransformError};

const NO_BREAK_SPACE: char = '\u{a0}';

/// Cleans one header: surrounding whitespace is trimmed and every
/// non-breaking space is removed.
///
/// # Examples
///
/// ```
/// use pft_transform::clean_header;
///
/// assert_eq!(clean_header("  Plant Desc "), "Plant Desc");
/// assert_eq!(clean_header("Plant\u{a0}Desc"), "PlantDesc");
/// ```
pub fn clean_header(raw: &str) -> String {
    raw.trim().chars().filter(|ch| *ch != NO_BREAK_SPACE).collect()
}

/// Applies [`clean_header`] to every column name.
///
/// Names that collide after cleanup are kept apart with a `.1`, `.2` suffix.
pub fn clean_headers(df: &mut DataFrame) -> Result<()> {
    let cleaned: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| clean_header(name))
        .collect();
    df.set_column_names(unique_names(cleaned))?;
    Ok(())
}

/// Fails with a missing-column error for the first absent name.
pub fn require_columns(table: &SourceTable, columns: &[&str]) -> Result<()> {
    match columns.iter().find(|column| !table.has_column(column)) {
        Some(column) => Err(TransformError::missing_column(table.source, *column)),
        None => Ok(()),
    }
}

/// Rewrites key columns as trimmed text.
///
/// Numbers are rendered without trailing zeros so that a numeric `100` and
/// a textual `" 100 "` canonicalize to the same key. Nulls stay null.
pub fn canonicalize_keys(df: &mut DataFrame, keys: &[&str]) -> Result<()> {
    for key in keys {
        let column = df.column(key)?;
        let values: Vec<Option<String>> = (0..column.len())
            .map(|idx| any_to_key(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        df.with_column(Series::new((*key).into(), values))?;
    }
    Ok(())
}

/// Keeps every column except `dropped`, preserving order.
pub fn drop_columns(df: &DataFrame, dropped: &[&str]) -> Result<DataFrame> {
    let kept: Vec<String> = df
        .get_column_names()
        .iter()
        .filter(|name| !dropped.contains(&name.as_str()))
        .map(|name| name.to_string())
        .collect();
    Ok(df.select(kept)?)
}

/// Normalizes the main extract.
///
/// Headers are cleaned, `Item` and `Plant Desc` canonicalized, and the
/// fixed descriptive columns removed. Every key and dropped column must be
/// present.
pub fn normalize_main(mut table: SourceTable) -> Result<SourceTable> {
    let start = Instant::now();
    clean_headers(&mut table.data)?;
    require_columns(&table, &forecast::KEYS)?;
    require_columns(&table, &forecast::DROPPED)?;
    canonicalize_keys(&mut table.data, &forecast::KEYS)?;
    table.data = drop_columns(&table.data, &forecast::DROPPED)?;
    debug!(columns = ?table.column_names(), "main headers after normalization");
    info!(
        input = %table.source,
        rows = table.row_count(),
        columns = table.data.width(),
        duration_ms = start.elapsed().as_millis(),
        "main table normalized"
    );
    Ok(table)
}

/// Normalizes the reference table.
///
/// Headers are cleaned and the composite key canonicalized. The key and the
/// descriptive columns removed after the join must be present.
pub fn normalize_reference(mut table: SourceTable) -> Result<SourceTable> {
    let start = Instant::now();
    clean_headers(&mut table.data)?;
    require_columns(&table, &reference::KEYS)?;
    require_columns(&table, &[reference::SUPPLIER_DESC, reference::ITEM_DESC])?;
    canonicalize_keys(&mut table.data, &reference::KEYS)?;
    debug!(columns = ?table.column_names(), "reference headers after normalization");
    info!(
        input = %table.source,
        rows = table.row_count(),
        columns = table.data.width(),
        duration_ms = start.elapsed().as_millis(),
        "reference table normalized"
    );
    Ok(table)
}
