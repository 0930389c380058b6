//! Exit code constants for the dot0n CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing path, malformed input)
//! - 2: Validation failure (invalid document or failed conformance run)
//! - 3: I/O failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, missing paths, or malformed input JSON.
pub const USER_ERROR: i32 = 1;

/// Validation failure: at least one document is invalid.
pub const VALIDATION_FAILURE: i32 = 2;

/// I/O failure: a file or directory could not be read or written.
pub const IO_FAILURE: i32 = 3;
