//! Implementation of the `patchstat show` command.
//!
//! Renders each file section with its hunks, the first few lines of every
//! hunk, and a closing list of blank lines that were added or removed.
//! The JSON form carries every line of every hunk.

use super::{Report, render_json};
use crate::cli::ShowArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{PatchstatError, Result};
use crate::patch::{DEV_NULL, FilePatch, Hunk, LineKind, Patch};
use crate::stats::{BlankLineChange, blank_line_changes};
use serde::Serialize;

/// JSON shape of the `show` report.
#[derive(Debug, Serialize)]
struct ShowReport<'a> {
    files: &'a [FilePatch],
    blank_line_changes: Vec<BlankLineChange>,
}

/// Execute the `patchstat show` command.
pub fn cmd_show(args: ShowArgs, config: &Config) -> Result<String> {
    let sample_lines = args.sample_lines.unwrap_or(config.sample_lines);
    if sample_lines == 0 {
        return Err(PatchstatError::UserError(
            "--sample-lines must be greater than 0".to_string(),
        ));
    }

    let (_, patch) = super::load_patch(&args.input)?;
    let patch = super::stats::exclude_files(patch, config)?;

    let format = if args.json {
        OutputFormat::Json
    } else {
        config.format
    };
    match format {
        OutputFormat::Json => render_show_json(&patch),
        OutputFormat::Text => Ok(render_show(&patch, sample_lines)),
    }
}

pub(crate) fn render_show_json(patch: &Patch) -> Result<String> {
    render_json(&ShowReport {
        files: &patch.files,
        blank_line_changes: blank_line_changes(patch),
    })
}

/// Render the detailed text report for `patch`.
pub(crate) fn render_show(patch: &Patch, sample_lines: usize) -> String {
    let mut report = Report::default();

    report.line(format!("Patch contains {} file(s):", patch.len()));
    report.blank();

    for file in patch {
        render_file(&mut report, file, sample_lines);
    }

    let changes = blank_line_changes(patch);
    report.line(format!("Blank line changes: {}", changes.len()));
    for change in &changes {
        let (marker, side) = match change.kind {
            LineKind::Added => ('+', "target"),
            _ => ('-', "source"),
        };
        let line_no = change
            .line_no
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        report.line(format!("  {} {} ({} line {})", marker, change.path, side, line_no));
    }

    report.finish()
}

fn render_file(report: &mut Report, file: &FilePatch, sample_lines: usize) {
    report.line(format!("File: {}", file.path()));
    report.line(format!("  Change type: {}", file.change_type));
    report.line(format!(
        "  Source file: {}",
        file.source_path.as_deref().unwrap_or(DEV_NULL)
    ));
    report.line(format!(
        "  Target file: {}",
        file.target_path.as_deref().unwrap_or(DEV_NULL)
    ));
    report.line(format!(
        "  Added lines: {} ({} blank)",
        file.added_count(),
        file.added_blank_count()
    ));
    report.line(format!(
        "  Removed lines: {} ({} blank)",
        file.removed_count(),
        file.removed_blank_count()
    ));
    report.line(format!("  Hunks: {}", file.hunks.len()));
    if file.metadata.is_binary {
        report.line("  Binary file");
    }
    report.blank();

    for (i, hunk) in file.hunks.iter().enumerate() {
        render_hunk(report, i + 1, hunk, sample_lines);
    }
}

fn render_hunk(report: &mut Report, number: usize, hunk: &Hunk, sample_lines: usize) {
    report.line(format!("  Hunk {}:", number));
    report.line(format!(
        "    Source start: {}, length: {}",
        hunk.source_start, hunk.source_length
    ));
    report.line(format!(
        "    Target start: {}, length: {}",
        hunk.target_start, hunk.target_length
    ));
    if let Some(heading) = &hunk.section_heading {
        report.line(format!("    Section heading: {}", heading));
    }
    report.line("    Sample lines:");

    for line in hunk.lines.iter().take(sample_lines) {
        // Whitespace-only content is quoted so it stays visible.
        if line.content.trim().is_empty() {
            report.line(format!("    {} {:?}", line.kind.marker(), line.content));
        } else {
            report.line(format!("    {} {}", line.kind.marker(), line.content));
        }
    }
    if hunk.lines.len() > sample_lines {
        report.line(format!("    ... ({} more)", hunk.lines.len() - sample_lines));
    }
    report.blank();
}
