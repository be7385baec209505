//! Command implementations for patchstat.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the input handling they share. Each command renders
//! its report to a `String` first so the output can be tested without
//! capturing stdout.

mod reconstruct;
mod show;
mod stats;
mod verify;


use crate::cli::{Command, PatchInput};
use crate::config::Config;
use crate::error::{PatchstatError, Result};
use crate::patch::{Patch, parse_patch};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Dispatch a command to its implementation.
///
/// The config is resolved once here (explicit `--config` path, else
/// `.patchstat.yaml` if present, else defaults) and handed to the command.
pub fn dispatch(command: Command, config_path: Option<&Path>) -> Result<()> {
    let config = Config::resolve(config_path)?;

    let output = match command {
        Command::Stats(args) => stats::cmd_stats(args, &config)?,
        Command::Show(args) => show::cmd_show(args, &config)?,
        Command::Reconstruct(args) => reconstruct::cmd_reconstruct(args)?,
        Command::Verify(args) => verify::cmd_verify(args)?,
    };

    print!("{}", output);
    Ok(())
}

/// Read the raw patch text named by `input`.
///
/// `-` and a missing path both mean stdin.
pub(crate) fn read_input(input: &PatchInput) -> Result<String> {
    match input.patch.as_deref() {
        Some(path) if path != Path::new("-") => {
            log::info!("reading patch from {}", path.display());
            std::fs::read_to_string(path).map_err(|e| {
                PatchstatError::UserError(format!(
                    "failed to read patch file '{}': {}",
                    path.display(),
                    e
                ))
            })
        }
        _ => {
            log::info!("reading patch from stdin");
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| PatchstatError::UserError(format!("failed to read stdin: {}", e)))?;
            Ok(text)
        }
    }
}

/// Read and parse the patch named by `input`, keeping the raw text.
pub(crate) fn load_patch(input: &PatchInput) -> Result<(String, Patch)> {
    let text = read_input(input)?;
    let patch = parse_patch(&text)?;
    log::info!("parsed {} file section(s)", patch.len());
    Ok((text, patch))
}

/// Render `value` as pretty-printed JSON with a trailing newline.
pub(crate) fn render_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| PatchstatError::UserError(format!("failed to serialize report: {}", e)))?;
    json.push('\n');
    Ok(json)
}

/// A text report assembled line by line.
#[derive(Debug, Default)]
pub(crate) struct Report {
    text: String,
}

impl Report {
    /// Append one line.
    pub fn line(&mut self, line: impl AsRef<str>) {
        self.text.push_str(line.as_ref());
        self.text.push('\n');
    }

    /// Append an empty line.
    pub fn blank(&mut self) {
        self.text.push('\n');
    }

    pub fn finish(self) -> String {
        self.text
    }
}
