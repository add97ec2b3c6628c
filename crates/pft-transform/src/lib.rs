//! Table transformations of the forecast pipeline.
//!
//! - **normalize**: header cleanup, key canonicalization, main column drops
//! - **join**: left join on rendered composite keys
//! - **reshape**: per-week columns into `Week`/`IM` rows
//! - **derive**: `LF` and `LB` from `IM` and the row's divisors
//! - **reconcile**: join, reshape and derive in sequence
//! - **calendar**: `Week == CalendarDate` join and calendar pruning
//!
//! Every function takes one or two tables and returns a new table, so each
//! step can be exercised on its own.

pub mod calendar;
pub mod dates;
pub mod derive;
pub mod error;
pub mod join;
pub mod normalize;
pub mod reconcile;
pub mod reshape;

pub use calendar::{Bound, bind_calendar, prepare_calendar, prune};
pub use derive::{derive_measures, linear_feet, pounds};
pub use error::{Result, TransformError};
pub use join::{left_join, row_keys};
pub use normalize::{clean_header, clean_headers, normalize_main, normalize_reference};
pub use reconcile::{JOIN_SUFFIX, Reconciled, join_reference, reconcile};
pub use reshape::{Unpivoted, split_columns, unpivot_weeks};
