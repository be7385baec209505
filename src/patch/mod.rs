//! Unified diff parsing.
//!
//! Turns `git diff` (or plain `diff -u`) output into a tree of
//! [`Patch`] → [`FilePatch`] → [`Hunk`] → [`Line`]. The parsing is
//! deterministic and supports:
//! - Multiple files per patch, with or without `diff --git` headers
//! - New and deleted files (`/dev/null`)
//! - Renames, mode changes and binary markers from git extended headers
//! - Multiple hunks per file, omitted range lengths, section headings
//! - `\ No newline at end of file` markers
//! - Blank-line detection (empty content after the marker character)

mod file;
mod helpers;
mod hunk;
mod line;
mod model;
mod parser;


// Re-export public API
pub use helpers::DEV_NULL;
pub use hunk::parse_hunk_header;
pub use line::classify_line;
pub use model::{ChangeType, FileMetadata, FilePatch, Hunk, Line, LineKind, Patch};
pub use parser::parse_patch;
pub(crate) use parser::split_lines;
