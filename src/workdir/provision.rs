//! Workdir provisioning: register the remote, create the tracked worktree.

use super::{WorkdirSpec, git_command};
use crate::config::Config;
use crate::error::{GroveError, Result};
use crate::exec::{self, ExecContext};

/// Provision an item's workdir.
///
/// Two dependent steps:
///
/// 1. Register the per-item remote in the bare repository, fetching only
///    the tracked branch (`remote add -f -t`).
/// 2. Create a linked worktree at the workdir path, on a new local branch
///    tracking `<remote>/<branch>`.
///
/// A worktree cannot be created on an unregistered remote, so step 1
/// failure aborts before step 2. No cleanup is attempted here; callers
/// reclaim partial state with [`remove_workdir`].
///
/// # Arguments
///
/// * `ctx` - Deadline/cancellation context bounding both invocations
/// * `config` - Store configuration (git binary, stream prefixes)
/// * `spec` - Descriptor of the workdir to create; `remote_url` required
///
/// # Returns
///
/// * `Ok(())` - Both steps succeeded
/// * `Err(GroveError::UserError)` - The descriptor has no remote URL
/// * `Err(GroveError::Exec)` - The first failing step's error
///
/// [`remove_workdir`]: super::remove_workdir
pub async fn add_workdir(ctx: &ExecContext, config: &Config, spec: &WorkdirSpec) -> Result<()> {
    let url = spec.remote_url.as_deref().ok_or_else(|| {
        GroveError::UserError(format!(
            "a remote url is required to add workdir '{}'",
            spec.remote_name
        ))
    })?;

    let bare = spec.bare_dir.to_string_lossy();
    let work = spec.work_dir.to_string_lossy();

    let remote_add = git_command(
        config,
        &[
            "--git-dir",
            bare.as_ref(),
            "remote",
            "add",
            "-f",
            "-t",
            spec.remote_branch.as_str(),
            spec.remote_name.as_str(),
            url,
        ],
    );
    exec::run(remote_add, ctx).await?;

    let upstream = format!("{}/{}", spec.remote_name, spec.remote_branch);
    let worktree_add = git_command(
        config,
        &[
            "--git-dir",
            bare.as_ref(),
            "worktree",
            "add",
            "-b",
            spec.local_branch.as_str(),
            "--track",
            work.as_ref(),
            upstream.as_str(),
        ],
    );
    exec::run(worktree_add, ctx).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StoreContext;
    use crate::test_support::{create_source_repo, create_store, git, git_ok};

    #[tokio::test]
    async fn add_creates_a_tracked_workdir() {
        let source = create_source_repo();
        let store_dir = create_store();
        let store = StoreContext::new(store_dir.path());
        let config = Config::default();

        let spec = store.workdir_spec(
            "alpha",
            Some(source.path().to_string_lossy().as_ref()),
            "main",
            &config.branch_prefix,
        );
        let ctx = ExecContext::unbounded();
        add_workdir(&ctx, &config, &spec).await.unwrap();

        // The workdir is a linked worktree (a .git file, not a directory).
        assert!(spec.work_dir.join(".git").is_file());
        assert!(spec.work_dir.join("README.md").exists());

        // The bare repository gained the remote and the derived branch.
        let bare = store.bare_dir.to_string_lossy().into_owned();
        assert!(git_ok(
            store_dir.path(),
            &["--git-dir", bare.as_str(), "remote", "get-url", "alpha"],
        ));
        assert!(git_ok(
            store_dir.path(),
            &["--git-dir", bare.as_str(), "rev-parse", "--verify", "refs/heads/grove-alpha"],
        ));
    }

    #[tokio::test]
    async fn add_without_a_url_is_a_user_error() {
        let store_dir = create_store();
        let store = StoreContext::new(store_dir.path());
        let config = Config::default();

        let spec = store.workdir_spec("alpha", None, "main", &config.branch_prefix);
        let ctx = ExecContext::unbounded();
        let err = add_workdir(&ctx, &config, &spec).await.unwrap_err();
        assert!(matches!(err, GroveError::UserError(_)));
        assert!(err.to_string().contains("remote url"));
    }

    #[tokio::test]
    async fn failed_remote_registration_skips_worktree_creation() {
        let store_dir = create_store();
        let store = StoreContext::new(store_dir.path());
        let config = Config::default();

        // A path that is not a repository: the -f fetch fails.
        let bogus = store_dir.path().join("not-a-repo");
        let spec = store.workdir_spec(
            "alpha",
            Some(bogus.to_string_lossy().as_ref()),
            "main",
            &config.branch_prefix,
        );
        let ctx = ExecContext::unbounded();
        let err = add_workdir(&ctx, &config, &spec).await.unwrap_err();
        assert!(matches!(err, GroveError::Exec(_)));

        // Step 2 never ran: no workdir, no local branch.
        let bare = store.bare_dir.to_string_lossy().into_owned();
        assert!(!spec.work_dir.exists());
        assert!(!git_ok(
            store_dir.path(),
            &["--git-dir", bare.as_str(), "rev-parse", "--verify", "refs/heads/grove-alpha"],
        ));
    }

    #[tokio::test]
    async fn add_tracks_a_non_default_branch() {
        let source = create_source_repo();
        git(source.path(), &["branch", "feature"]);

        let store_dir = create_store();
        let store = StoreContext::new(store_dir.path());
        let config = Config::default();

        let spec = store.workdir_spec(
            "beta",
            Some(source.path().to_string_lossy().as_ref()),
            "feature",
            &config.branch_prefix,
        );
        let ctx = ExecContext::unbounded();
        add_workdir(&ctx, &config, &spec).await.unwrap();
        assert!(spec.work_dir.exists());

        // The worktree's branch tracks <remote>/<branch>.
        let upstream = String::from_utf8(
            std::process::Command::new("git")
                .current_dir(&spec.work_dir)
                .args(["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"])
                .output()
                .unwrap()
                .stdout,
        )
        .unwrap();
        assert_eq!(upstream.trim(), "beta/feature");
    }
}
