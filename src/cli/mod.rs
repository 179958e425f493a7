//! CLI argument parsing for grove.
//!
//! Uses clap derive macros for declarative argument definitions. This
//! module defines the command structure; actual implementations are in
//! the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Grove: per-item git worktree provisioning backed by a shared bare
/// repository.
///
/// Each item gets its own working directory in the store, checked out on
/// a derived local branch that tracks a per-item remote in the shared
/// bare repository.
#[derive(Parser, Debug)]
#[command(name = "grove")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Store directory holding the shared repository and all workdirs.
    /// Defaults to the current directory.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for grove.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch an item: provision its tracked working directory.
    ///
    /// Registers a per-item remote in the shared bare repository
    /// (initializing it on first use) and creates a linked worktree on a
    /// derived local branch tracking the remote branch.
    Fetch(FetchArgs),

    /// Remove an item's working directory, remote, and local branch.
    ///
    /// All three teardown steps are attempted even if one fails; every
    /// failure is reported.
    Remove(RemoveArgs),
}

/// Arguments for the `fetch` command.
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Item to fetch (names the workdir, remote, and derived branch).
    pub item: String,

    /// Remote repository URL to register for this item.
    #[arg(long)]
    pub url: String,

    /// Remote branch to track. Defaults to the configured remote_branch.
    #[arg(long)]
    pub branch: Option<String>,

    /// Abort the operation after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

/// Arguments for the `remove` command.
#[derive(Parser, Debug)]
pub struct RemoveArgs {
    /// Item whose workdir should be torn down.
    pub item: String,

    /// Abort the operation after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_fetch_minimal() {
        let cli =
            Cli::try_parse_from(["grove", "fetch", "6.1", "--url", "https://example.com/r.git"])
                .unwrap();
        if let Command::Fetch(args) = cli.command {
            assert_eq!(args.item, "6.1");
            assert_eq!(args.url, "https://example.com/r.git");
            assert_eq!(args.branch, None);
            assert_eq!(args.timeout_secs, None);
        } else {
            panic!("Expected Fetch command");
        }
        assert_eq!(cli.dir, None);
    }

    #[test]
    fn parse_fetch_full() {
        let cli = Cli::try_parse_from([
            "grove",
            "--dir",
            "/data/kernels",
            "fetch",
            "bpf-next",
            "--url",
            "https://example.com/bpf.git",
            "--branch",
            "master",
            "--timeout-secs",
            "600",
        ])
        .unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("/data/kernels")));
        if let Command::Fetch(args) = cli.command {
            assert_eq!(args.item, "bpf-next");
            assert_eq!(args.branch.as_deref(), Some("master"));
            assert_eq!(args.timeout_secs, Some(600));
        } else {
            panic!("Expected Fetch command");
        }
    }

    #[test]
    fn parse_fetch_requires_url() {
        let result = Cli::try_parse_from(["grove", "fetch", "6.1"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_remove() {
        let cli = Cli::try_parse_from(["grove", "remove", "6.1"]).unwrap();
        if let Command::Remove(args) = cli.command {
            assert_eq!(args.item, "6.1");
            assert_eq!(args.timeout_secs, None);
        } else {
            panic!("Expected Remove command");
        }
    }

    #[test]
    fn parse_global_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["grove", "remove", "6.1", "--dir", "/data/kernels"]).unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("/data/kernels")));
    }
}
