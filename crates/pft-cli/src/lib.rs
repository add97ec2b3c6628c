//! Library side of the `pft` binary.
//!
//! [`pipeline::run_pipeline`] is the whole transformation as one function of
//! three byte streams; [`logging`] sets up the tracing subscriber.

pub mod logging;
pub mod pipeline;
