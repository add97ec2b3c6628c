//! Reconciler: join main onto reference, reshape weeks, derive measures.

use std::time::Instant;

use polars::prelude::*;
use tracing::{debug, info};

use pft_model::schema::{divisors, forecast, reference};
use pft_model::{ConversionReport, SourceKind, SourceTable};

use crate::derive::derive_measures;
use crate::error::{Result, TransformError};
use crate::join::left_join;
use crate::normalize::drop_columns;
use crate::reshape::unpivot_weeks;

pub use crate::join::JOIN_SUFFIX;

/// The long table produced by [`reconcile`].
#[derive(Debug, Clone)]
pub struct Reconciled {
    /// Identifying columns, then `Week`, `IM`, `LF` and `LB`.
    pub data: DataFrame,
    /// Headers that were reshaped into rows, in source order.
    pub week_columns: Vec<String>,
    pub conversions: ConversionReport,
}

/// Left-joins normalized main onto normalized reference and removes the
/// reference-only descriptive columns.
pub fn join_reference(main: &SourceTable, reference: &SourceTable) -> Result<DataFrame> {
    let joined = left_join(
        &main.data,
        &reference.data,
        &forecast::KEYS,
        &reference::KEYS,
        JOIN_SUFFIX,
    )?;
    drop_columns(&joined, &reference::DROPPED_AFTER_JOIN)
}

/// Runs join, reshape and derive.
///
/// The divisor columns must be present after the join; a missing one is
/// reported against the main input.
pub fn reconcile(main: &SourceTable, reference: &SourceTable) -> Result<Reconciled> {
    let start = Instant::now();
    let joined = join_reference(main, reference)?;
    debug!(
        rows = joined.height(),
        columns = joined.width(),
        "main joined to reference"
    );
    for divisor in divisors::ALL {
        if joined.column(divisor).is_err() {
            return Err(TransformError::missing_column(SourceKind::Main, divisor));
        }
    }

    let unpivoted = unpivot_weeks(&joined)?;
    let mut data = unpivoted.data;
    let mut conversions = unpivoted.conversions;
    conversions.merge(derive_measures(&mut data)?);

    info!(
        rows = data.height(),
        columns = data.width(),
        week_columns = unpivoted.week_columns.len(),
        conversion_failures = conversions.total(),
        duration_ms = start.elapsed().as_millis(),
        "main table reconciled"
    );
    Ok(Reconciled {
        data,
        week_columns: unpivoted.week_columns,
        conversions,
    })
}
