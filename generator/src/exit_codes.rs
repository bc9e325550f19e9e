//! Stable exit codes for generator CLI commands.

/// Command succeeded, or `generator check` found everything up to date.
pub const OK: i32 = 0;
/// Command failed due to invalid config, missing inputs, or I/O errors.
pub const INVALID: i32 = 1;
/// `generator check` found generated files missing or out of date.
pub const STALE: i32 = 2;
