//! Tracked working-directory provisioning and teardown.
//!
//! A workdir is a linked git worktree branched from a per-item remote in
//! the shared bare repository. This module provides the two protocols
//! over the supervised executor:
//!
//! - [`add_workdir`]: register the remote, then create the tracked
//!   worktree; stops at the first failure.
//! - [`remove_workdir`]: delete the worktree, the remote, and the local
//!   branch; always attempts all three and aggregates every failure.
//!
//! Add and Remove for the same item must not run concurrently; callers
//! own that serialization.

mod naming;
mod provision;
mod teardown;

// Re-export public API
pub use naming::{local_branch_name, validate_item};
pub use provision::add_workdir;
pub use teardown::{TeardownError, TeardownFailure, remove_workdir};

use crate::config::Config;
use crate::exec::{CommandSpec, StreamTag};
use std::path::PathBuf;
use tracing::Level;

/// Everything needed to add or remove one item's workdir.
///
/// Built per item by [`StoreContext::workdir_spec`]; the local branch is
/// derived from the item name, so a later remove reconstructs the same
/// descriptor without persisted state.
///
/// [`StoreContext::workdir_spec`]: crate::context::StoreContext::workdir_spec
#[derive(Debug, Clone)]
pub struct WorkdirSpec {
    /// Path of the working directory.
    pub work_dir: PathBuf,
    /// Path of the shared bare repository.
    pub bare_dir: PathBuf,
    /// Name of the per-item remote.
    pub remote_name: String,
    /// Remote URL; required by add, unused by remove.
    pub remote_url: Option<String>,
    /// Remote branch the workdir tracks.
    pub remote_branch: String,
    /// Derived local branch name.
    pub local_branch: String,
}

/// Build a [`CommandSpec`] for the configured git binary with the
/// configured stream prefixes applied.
pub(crate) fn git_command(config: &Config, args: &[&str]) -> CommandSpec {
    CommandSpec::new(config.git_binary.as_str(), args.iter().copied()).with_tags(
        StreamTag::new(config.stdout_prefix.as_str(), Level::INFO),
        StreamTag::new(config.stderr_prefix.as_str(), Level::WARN),
    )
}
