//! The `fetch` command: provision an item's tracked working directory.

use crate::cli::FetchArgs;
use crate::config::Config;
use crate::context::StoreContext;
use crate::error::{GroveError, Result};
use crate::exec::{self, ExecContext};
use crate::workdir;
use std::path::PathBuf;
use tracing::info;

pub async fn run(args: FetchArgs, dir: Option<PathBuf>) -> Result<()> {
    workdir::validate_item(&args.item)?;

    let store = StoreContext::resolve(dir)?;
    let config = Config::load(&store.config_path())?;
    let ctx = super::exec_context(args.timeout_secs.or(config.timeout_secs));

    ensure_bare_repo(&store, &config, &ctx).await?;

    let branch = args.branch.as_deref().unwrap_or(&config.remote_branch);
    let spec = store.workdir_spec(&args.item, Some(&args.url), branch, &config.branch_prefix);
    workdir::add_workdir(&ctx, &config, &spec).await?;

    info!(item = %args.item, workdir = %spec.work_dir.display(), "workdir ready");
    Ok(())
}

/// Initialize the shared bare repository on first use.
async fn ensure_bare_repo(store: &StoreContext, config: &Config, ctx: &ExecContext) -> Result<()> {
    if store.bare_repo_exists() {
        return Ok(());
    }

    std::fs::create_dir_all(&store.root).map_err(|e| {
        GroveError::UserError(format!(
            "failed to create store directory '{}': {}",
            store.root.display(),
            e
        ))
    })?;

    let bare = store.bare_dir.to_string_lossy();
    let init = workdir::git_command(config, &["init", "--bare", bare.as_ref()]);
    exec::run(init, ctx).await?;
    Ok(())
}
