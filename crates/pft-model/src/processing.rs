//! Stage bookkeeping for a pipeline run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five ordered stages of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Load,
    Normalize,
    Reconcile,
    BindCalendar,
    Export,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Normalize => "normalize",
            Self::Reconcile => "reconcile",
            Self::BindCalendar => "bind_calendar",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the table a stage produced, and how long it took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage: Stage,
    pub rows: usize,
    pub columns: usize,
    pub duration_ms: u128,
}
