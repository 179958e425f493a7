//! Supervised external-process execution.
//!
//! This module is the single way grove runs a subprocess:
//!
//! - [`CommandSpec`] describes one invocation (binary, arguments, stream
//!   tags)
//! - [`ExecContext`] bounds it with a deadline and a cancellation handle
//! - [`run`] executes it, draining stdout and stderr concurrently into
//!   the logger and reporting a single terminal [`ExecError`] on failure
//!
//! The subprocess's output is logged verbatim, line by line; it is never
//! parsed. Failed invocations are never retried here.

mod context;
mod drain;
mod run;

// Re-export public API
pub use context::{CancelCause, ExecContext};
pub use drain::{DrainError, StreamTag, drain};
pub use run::{CommandSpec, ExecError, run};
