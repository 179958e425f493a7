//! The `remove` command: tear down an item's working directory.

use crate::cli::RemoveArgs;
use crate::config::Config;
use crate::context::StoreContext;
use crate::error::Result;
use crate::workdir;
use std::path::PathBuf;
use tracing::info;

pub async fn run(args: RemoveArgs, dir: Option<PathBuf>) -> Result<()> {
    workdir::validate_item(&args.item)?;

    let store = StoreContext::resolve(dir)?;
    let config = Config::load(&store.config_path())?;
    let ctx = super::exec_context(args.timeout_secs.or(config.timeout_secs));

    // The descriptor is re-derived from the item name, so it matches the
    // one the original fetch used.
    let spec = store.workdir_spec(&args.item, None, &config.remote_branch, &config.branch_prefix);
    workdir::remove_workdir(&ctx, &config, &spec).await?;

    info!(item = %args.item, "workdir removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FetchArgs;
    use crate::commands::fetch;
    use crate::error::GroveError;
    use crate::test_support::create_source_repo;
    use tempfile::TempDir;

    #[tokio::test]
    async fn remove_undoes_a_fetch() {
        let source = create_source_repo();
        let store_dir = TempDir::new().unwrap();
        let store_root = store_dir.path().to_path_buf();

        fetch::run(
            FetchArgs {
                item: "alpha".to_string(),
                url: source.path().to_string_lossy().into_owned(),
                branch: None,
                timeout_secs: None,
            },
            Some(store_root.clone()),
        )
        .await
        .unwrap();
        assert!(store_root.join("alpha").exists());

        run(
            RemoveArgs {
                item: "alpha".to_string(),
                timeout_secs: None,
            },
            Some(store_root.clone()),
        )
        .await
        .unwrap();
        assert!(!store_root.join("alpha").exists());
    }

    #[tokio::test]
    async fn remove_of_an_unknown_item_surfaces_the_aggregate() {
        let store_dir = TempDir::new().unwrap();
        crate::test_support::git(store_dir.path(), &["init", "--bare", "main.git"]);

        let err = run(
            RemoveArgs {
                item: "ghost".to_string(),
                timeout_secs: None,
            },
            Some(store_dir.path().to_path_buf()),
        )
        .await
        .unwrap_err();

        match err {
            GroveError::Teardown(aggregate) => assert_eq!(aggregate.len(), 3),
            other => panic!("expected Teardown, got {other:?}"),
        }
    }
}
