//! Error types for patchstat.
//!
//! Uses thiserror for derive macros. Parsing failures are reported through
//! [`ParseError`] wrapped in a [`PatchParseError`] that records where in the
//! input the problem was found; everything the CLI can fail with is collected
//! in [`PatchstatError`].

use crate::exit_codes;
use thiserror::Error;

/// The specific reason a patch failed to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `@@ ... @@` line did not match the hunk header grammar.
    #[error("malformed hunk header: {0:?}")]
    MalformedHunkHeader(String),

    /// A hunk body line started with a character other than ' ', '+', '-' or '\'.
    #[error("malformed hunk line: {0:?}")]
    MalformedHunkLine(String),

    /// The hunk body disagrees with the ranges declared in its header.
    #[error(
        "hunk line count mismatch: header declares -{expected_source} +{expected_target}, \
         body has -{found_source} +{found_target}"
    )]
    HunkLineCountMismatch {
        expected_source: u32,
        expected_target: u32,
        found_source: u32,
        found_target: u32,
    },

    /// The `---`/`+++` header pair is absent or malformed.
    #[error("missing file header: {0}")]
    MissingFileHeader(String),
}

/// Top-level parse failure: the first problem found and the line it was found on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to parse patch at line {line}: {kind}")]
pub struct PatchParseError {
    /// 1-based line number of the offending line or section.
    pub line: usize,
    /// What went wrong.
    #[source]
    pub kind: ParseError,
}

impl PatchParseError {
    pub fn new(line: usize, kind: ParseError) -> Self {
        Self { line, kind }
    }
}

/// Failure to apply a file patch to its original content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// A context or removed line does not match the original file.
    #[error("line {line}: expected {expected:?}, found {found:?}")]
    ContextMismatch {
        line: u32,
        expected: String,
        found: String,
    },

    /// A hunk starts before the previous one ended or runs past the end of the file.
    #[error("hunk at line {line} is out of range (file has {file_lines} lines)")]
    OutOfRange { line: u32, file_lines: usize },
}

/// Main error type for patchstat operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum PatchstatError {
    /// User provided invalid arguments, input or configuration.
    #[error("{0}")]
    UserError(String),

    /// The patch text could not be parsed.
    #[error(transparent)]
    Parse(#[from] PatchParseError),

    /// A file patch could not be applied in-process.
    #[error("apply failed for {path}: {source}")]
    Apply {
        path: String,
        #[source]
        source: ApplyError,
    },

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// Reconstruction or apply output disagreed with the expected text.
    #[error("Verification failed: {0}")]
    VerificationFailed(String),
}

impl PatchstatError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PatchstatError::UserError(_) => exit_codes::USER_ERROR,
            PatchstatError::Parse(_) => exit_codes::PARSE_FAILURE,
            PatchstatError::Apply { .. } => exit_codes::VERIFICATION_FAILURE,
            PatchstatError::GitError(_) => exit_codes::GIT_FAILURE,
            PatchstatError::VerificationFailed(_) => exit_codes::VERIFICATION_FAILURE,
        }
    }
}

/// Result type alias for patchstat operations.
pub type Result<T> = std::result::Result<T, PatchstatError>;
