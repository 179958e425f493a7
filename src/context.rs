//! Store layout resolution for grove.
//!
//! A store is one directory holding everything grove manages: the shared
//! bare repository plus one working directory per item. This module
//! resolves the store root and derives every path from it, so add and
//! remove always agree on where an item lives.

use crate::config;
use crate::error::{GroveError, Result};
use crate::workdir::{WorkdirSpec, local_branch_name};
use std::env;
use std::path::PathBuf;

/// Name of the shared bare repository inside the store root.
pub const BARE_REPO_DIR: &str = "main.git";

/// Resolved paths for one grove store.
#[derive(Debug, Clone)]
pub struct StoreContext {
    /// Store root; holds the bare repository and all workdirs.
    pub root: PathBuf,

    /// Path of the shared bare repository (`{root}/main.git`).
    pub bare_dir: PathBuf,
}

impl StoreContext {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        let root = root.into();
        let bare_dir = root.join(BARE_REPO_DIR);
        Self { root, bare_dir }
    }

    /// Resolve the store root from the `--dir` flag, defaulting to the
    /// current working directory.
    pub fn resolve(dir: Option<PathBuf>) -> Result<Self> {
        match dir {
            Some(dir) => Ok(Self::new(dir)),
            None => {
                let cwd = env::current_dir().map_err(|e| {
                    GroveError::UserError(format!(
                        "failed to get current working directory: {}",
                        e
                    ))
                })?;
                Ok(Self::new(cwd))
            }
        }
    }

    /// Path of an item's working directory (`{root}/{item}`).
    pub fn workdir_path(&self, item: &str) -> PathBuf {
        self.root.join(item)
    }

    /// Path of the store's config file (`{root}/grove.yaml`).
    pub fn config_path(&self) -> PathBuf {
        self.root.join(config::CONFIG_FILE)
    }

    /// Build the descriptor for one item's workdir.
    ///
    /// The remote is named after the item and the local branch is derived
    /// from it, so a remove reconstructs the same descriptor an earlier
    /// add used.
    pub fn workdir_spec(
        &self,
        item: &str,
        remote_url: Option<&str>,
        remote_branch: &str,
        branch_prefix: &str,
    ) -> WorkdirSpec {
        WorkdirSpec {
            work_dir: self.workdir_path(item),
            bare_dir: self.bare_dir.clone(),
            remote_name: item.to_string(),
            remote_url: remote_url.map(String::from),
            remote_branch: remote_branch.to_string(),
            local_branch: local_branch_name(branch_prefix, item),
        }
    }

    /// Whether the shared bare repository has been initialized.
    pub fn bare_repo_exists(&self) -> bool {
        self.bare_dir.is_dir()
    }
}
