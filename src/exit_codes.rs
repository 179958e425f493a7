//! Exit code constants for the grove CLI.
//!
//! - 0: Success
//! - 1: User error (bad arguments, invalid item name)
//! - 2: Configuration failure
//! - 3: Git subprocess failure
//! - 4: Deadline exceeded or operation cancelled

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid item name, missing remote URL.
pub const USER_ERROR: i32 = 1;

/// Configuration failure: unreadable or invalid `grove.yaml`.
pub const CONFIG_FAILURE: i32 = 2;

/// Git subprocess failure: launch error, non-zero exit, or teardown aggregate.
pub const GIT_FAILURE: i32 = 3;

/// The operation's deadline elapsed or it was cancelled before completion.
pub const TIMEOUT: i32 = 4;
