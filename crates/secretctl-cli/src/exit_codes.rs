//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.
//! Code 2 is left to clap for argument parsing failures.

/// Success - operation completed without errors
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// The Secret does not exist
pub const NOT_FOUND: i32 = 3;

/// A Secret with this name already exists
pub const ALREADY_EXISTS: i32 = 4;

/// The Secret changed since it was read
pub const CONFLICT: i32 = 5;

/// The request did not finish before --timeout
pub const DEADLINE_EXCEEDED: i32 = 6;

/// Usage error - invalid arguments or options (sysexits.h EX_USAGE)
pub const USAGE_ERROR: i32 = 64;

/// Manifest error - input data was malformed (sysexits.h EX_DATAERR)
pub const DATA_ERROR: i32 = 65;

/// IO error - file not found, permission denied, etc. (sysexits.h EX_IOERR)
pub const IO_ERROR: i32 = 74;

/// Configuration error (sysexits.h EX_CONFIG)
pub const CONFIG_ERROR: i32 = 78;
