//! Workdir teardown: remove the worktree, the remote, and the local branch.
//!
//! The three resources are independent, so every step runs even when an
//! earlier one failed; all failures come back in one ordered aggregate.

use super::{WorkdirSpec, git_command};
use crate::config::Config;
use crate::exec::{self, ExecContext, ExecError};
use std::fmt;

/// One failed teardown step: a human-readable cause label plus the
/// underlying invocation error.
#[derive(Debug)]
pub struct TeardownFailure {
    pub label: &'static str,
    pub source: ExecError,
}

/// Ordered collection of teardown-step failures.
///
/// Order matches step-execution order (worktree, remote, local branch).
/// An empty aggregate never escapes [`remove_workdir`]; it converts to
/// `Ok` via [`into_result`](TeardownError::into_result).
#[derive(Debug, Default)]
pub struct TeardownError {
    failures: Vec<TeardownFailure>,
}

impl TeardownError {
    pub(crate) fn record(&mut self, label: &'static str, source: ExecError) {
        self.failures.push(TeardownFailure { label, source });
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn failures(&self) -> &[TeardownFailure] {
        &self.failures
    }

    /// `Ok` when no step failed, otherwise the aggregate itself.
    pub fn into_result(self) -> Result<(), TeardownError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for TeardownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failures.as_slice() {
            [] => write!(f, "no teardown failures"),
            [only] => write!(f, "{}: {}", only.label, only.source),
            many => {
                write!(f, "{} teardown steps failed: ", many.len())?;
                for (i, failure) in many.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", failure.label, failure.source)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for TeardownError {}

/// Tear down an item's workdir: remove the linked worktree, remove the
/// per-item remote, and force-delete the derived local branch.
///
/// Never stops early. The three resources are independent: a stuck
/// worktree must not prevent reclaiming the remote or the branch. Every
/// step is attempted even if an earlier one failed, and every failure is
/// recorded in execution order.
///
/// # Arguments
///
/// * `ctx` - Deadline/cancellation context bounding all three invocations
/// * `config` - Store configuration (git binary, stream prefixes)
/// * `spec` - Descriptor matching the one the original add used
///
/// # Returns
///
/// * `Ok(())` - All three steps succeeded
/// * `Err(TeardownError)` - One entry per failing step, in step order
pub async fn remove_workdir(
    ctx: &ExecContext,
    config: &Config,
    spec: &WorkdirSpec,
) -> Result<(), TeardownError> {
    let bare = spec.bare_dir.to_string_lossy();
    let work = spec.work_dir.to_string_lossy();
    let mut aggregate = TeardownError::default();

    let worktree_remove = git_command(
        config,
        &["--git-dir", bare.as_ref(), "worktree", "remove", work.as_ref()],
    );
    if let Err(err) = exec::run(worktree_remove, ctx).await {
        aggregate.record("did not remove worktree", err);
    }

    let remote_remove = git_command(
        config,
        &[
            "--git-dir",
            bare.as_ref(),
            "remote",
            "remove",
            spec.remote_name.as_str(),
        ],
    );
    if let Err(err) = exec::run(remote_remove, ctx).await {
        aggregate.record("did not remove remote", err);
    }

    let branch_remove = git_command(
        config,
        &[
            "--git-dir",
            bare.as_ref(),
            "branch",
            "--delete",
            "--force",
            spec.local_branch.as_str(),
        ],
    );
    if let Err(err) = exec::run(branch_remove, ctx).await {
        aggregate.record("did not remove local branch", err);
    }

    aggregate.into_result()
}
