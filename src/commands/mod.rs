//! Command implementations for the grove CLI.
//!
//! Thin orchestration over the library modules: each command resolves the
//! store and config, derives an execution context from the requested
//! timeout, and calls into `workdir`.

mod fetch;
mod remove;

use crate::cli::{Cli, Command};
use crate::error::Result;
use crate::exec::ExecContext;
use tokio::time::Duration;

/// Dispatch a parsed CLI invocation to its command implementation.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Fetch(args) => fetch::run(args, cli.dir).await,
        Command::Remove(args) => remove::run(args, cli.dir).await,
    }
}

/// Build the execution context for one command from the effective timeout.
fn exec_context(timeout_secs: Option<u64>) -> ExecContext {
    match timeout_secs {
        Some(secs) => ExecContext::with_timeout(Duration::from_secs(secs)),
        None => ExecContext::unbounded(),
    }
}
