//! Supervised execution of a single external command.
//!
//! [`run`] starts the command, drains both output streams concurrently
//! into the logger, and reports one terminal result. The two drainers are
//! always joined before the process is reaped: a child blocked writing to
//! a full pipe nobody reads can never exit.

use super::context::{CancelCause, ExecContext};
use super::drain::{StreamTag, drain};
use std::process::{ExitStatus, Stdio};
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

/// Why an invocation failed.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The process could not be started (binary missing, permissions).
    #[error("failed to launch `{binary}`: {source}")]
    Launch {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// A captured stream handle was unavailable after spawn.
    #[error("failed to capture {stream} of `{binary}`")]
    Pipe {
        binary: String,
        stream: &'static str,
    },

    /// Waiting for the process to exit failed.
    #[error("failed to reap `{binary}`: {source}")]
    Wait {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran to completion but reported failure.
    #[error("`{binary}` exited with {status}")]
    Exited { binary: String, status: ExitStatus },

    /// The governing context's deadline elapsed before completion.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The governing context was cancelled before completion.
    #[error("cancelled")]
    Cancelled,
}

impl From<CancelCause> for ExecError {
    fn from(cause: CancelCause) -> Self {
        match cause {
            CancelCause::DeadlineExceeded => ExecError::DeadlineExceeded,
            CancelCause::Cancelled => ExecError::Cancelled,
        }
    }
}

/// One external command to execute: binary, ordered arguments, and the
/// tags its output streams are logged under.
///
/// A spec is consumed by [`run`]; it describes exactly one invocation.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    binary: String,
    args: Vec<String>,
    stdout_tag: StreamTag,
    stderr_tag: StreamTag,
}

impl CommandSpec {
    pub fn new<B, I, A>(binary: B, args: I) -> Self
    where
        B: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            binary: binary.into(),
            args: args.into_iter().map(Into::into).collect(),
            stdout_tag: StreamTag::stdout(),
            stderr_tag: StreamTag::stderr(),
        }
    }

    /// Replace the default stream tags.
    pub fn with_tags(mut self, stdout: StreamTag, stderr: StreamTag) -> Self {
        self.stdout_tag = stdout;
        self.stderr_tag = stderr;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Execute `spec` to completion under `ctx` and return a single result.
///
/// Both output streams are drained concurrently, bound to the same
/// context, and joined before the process is reaped. A drain failure on
/// one stream does not cancel the other; drain errors are logged as
/// warnings and never become the invocation's terminal error. If the
/// context expires while the child is still running, the kill is
/// delivered at the reap step and the invocation reports the context's
/// cause in preference to the exit status of the killed child.
pub async fn run(spec: CommandSpec, ctx: &ExecContext) -> Result<(), ExecError> {
    let mut command = Command::new(&spec.binary);
    command
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    info!(binary = %spec.binary, args = ?spec.args, "starting command");
    let mut child = command.spawn().map_err(|source| ExecError::Launch {
        binary: spec.binary.clone(),
        source,
    })?;

    let stdout = child.stdout.take().ok_or_else(|| ExecError::Pipe {
        binary: spec.binary.clone(),
        stream: "stdout",
    })?;
    let stderr = child.stderr.take().ok_or_else(|| ExecError::Pipe {
        binary: spec.binary.clone(),
        stream: "stderr",
    })?;

    let (stdout_drained, stderr_drained) = tokio::join!(
        drain(stdout, &spec.stdout_tag, ctx),
        drain(stderr, &spec.stderr_tag, ctx),
    );
    if let Err(err) = stdout_drained {
        warn!(binary = %spec.binary, "failed to read stdout: {err}");
    }
    if let Err(err) = stderr_drained {
        warn!(binary = %spec.binary, "failed to read stderr: {err}");
    }

    // Reap. If the context expires first, it owns termination: deliver
    // the kill, then collect the exit status.
    let reaped = tokio::select! {
        status = child.wait() => Some(status),
        _ = ctx.expired() => None,
    };
    let status = match reaped {
        Some(status) => status.map_err(|source| ExecError::Wait {
            binary: spec.binary.clone(),
            source,
        })?,
        None => {
            let _ = child.start_kill();
            child.wait().await.map_err(|source| ExecError::Wait {
                binary: spec.binary.clone(),
                source,
            })?
        }
    };

    // A spent context outranks the process's own exit status: the status
    // of a killed child is a side effect of the kill, not the failure.
    if let Some(cause) = ctx.cause() {
        return Err(cause.into());
    }
    if status.success() {
        Ok(())
    } else {
        Err(ExecError::Exited {
            binary: spec.binary,
            status,
        })
    }
}
