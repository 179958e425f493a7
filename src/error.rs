//! Error types for the grove CLI.
//!
//! Uses thiserror for derive macros. Library-layer errors (`ExecError`,
//! `TeardownError`) stay typed and lossless; this module maps every failure
//! class to a stable process exit code.

use crate::exec::ExecError;
use crate::exit_codes;
use crate::workdir::TeardownError;
use thiserror::Error;

/// Main error type for grove operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum GroveError {
    /// User provided invalid arguments or the store is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// The configuration file could not be read, parsed, or validated.
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// A supervised git invocation failed.
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// One or more teardown steps failed while removing a workdir.
    #[error(transparent)]
    Teardown(#[from] TeardownError),
}

impl GroveError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GroveError::UserError(_) => exit_codes::USER_ERROR,
            GroveError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            GroveError::Exec(err) => match err {
                ExecError::DeadlineExceeded | ExecError::Cancelled => exit_codes::TIMEOUT,
                _ => exit_codes::GIT_FAILURE,
            },
            GroveError::Teardown(_) => exit_codes::GIT_FAILURE,
        }
    }
}

/// Result type alias for grove operations.
pub type Result<T> = std::result::Result<T, GroveError>;
