//! Patchstat: unified diff parsing, statistics and reconstruction.
//!
//! The core is [`patch::parse_patch`], which turns unified diff text into a
//! [`patch::Patch`] of file sections, hunks and classified lines. On top of
//! it sit [`stats`] for added/removed and blank-line counts, [`reconstruct`]
//! for regenerating the text, and [`apply`] for rebuilding a file's post-image
//! in-process.

pub mod apply;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod logging;
pub mod patch;
pub mod reconstruct;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;
