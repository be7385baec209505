//! CLI argument parsing for patchstat.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Patchstat: parse unified diffs and report what they change.
///
/// Counts added and removed lines per file, with separate tallies for
/// blank lines, and can reconstruct or verify a patch after parsing it.
#[derive(Parser, Debug)]
#[command(name = "patchstat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file to use instead of `.patchstat.yaml`.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for patchstat.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print line and file statistics for a patch.
    Stats(StatsArgs),

    /// Show each file and hunk, including blank-line changes.
    Show(ShowArgs),

    /// Parse a patch and print it back out.
    ///
    /// With --check, the output must match the input line for line.
    Reconstruct(ReconstructArgs),

    /// Check that a patch survives a parse/reconstruct round trip.
    ///
    /// With --repo, also confirm `git apply --check` accepts the patch and
    /// that each file's in-process post-image matches `git apply` output.
    Verify(VerifyArgs),
}

/// Patch input shared by every command. `-` or no path reads stdin.
#[derive(Args, Debug, Clone, Default)]
pub struct PatchInput {
    /// Patch file to read (`-` for stdin).
    #[arg(value_name = "PATCH")]
    pub patch: Option<PathBuf>,
}

/// Arguments for the `stats` command.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: PatchInput,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Include a per-file breakdown.
    #[arg(long)]
    pub per_file: bool,
}

/// Arguments for the `show` command.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: PatchInput,

    /// Lines printed per hunk (overrides config).
    #[arg(long, value_name = "N")]
    pub sample_lines: Option<usize>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `reconstruct` command.
#[derive(Args, Debug)]
pub struct ReconstructArgs {
    #[command(flatten)]
    pub input: PatchInput,

    /// Fail if the reconstruction differs from the input.
    #[arg(long)]
    pub check: bool,
}

/// Arguments for the `verify` command.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub input: PatchInput,

    /// Repository whose working tree holds the patch's pre-image.
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
