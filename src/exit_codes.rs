//! Exit code constants for the patchstat CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input, invalid config)
//! - 2: Patch could not be parsed
//! - 3: Git operation failure
//! - 4: Verification failure (round trip or apply mismatch)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The patch text is not a well-formed unified diff.
pub const PARSE_FAILURE: i32 = 2;

/// Git operation failure, e.g. `git apply --check` rejected the patch.
pub const GIT_FAILURE: i32 = 3;

/// Reconstruction or in-process apply disagreed with the input.
pub const VERIFICATION_FAILURE: i32 = 4;
