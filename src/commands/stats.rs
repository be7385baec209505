//! Implementation of the `patchstat stats` command.

use super::{Report, render_json};
use crate::cli::StatsArgs;
use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::patch::Patch;
use crate::stats::{PatchStatistics, compute_statistics};

/// Execute the `patchstat stats` command.
///
/// CLI flags win over the config: `--json` forces JSON and `--per-file`
/// forces the breakdown on.
pub fn cmd_stats(args: StatsArgs, config: &Config) -> Result<String> {
    let (_, patch) = super::load_patch(&args.input)?;
    let patch = exclude_files(patch, config)?;

    let format = if args.json {
        OutputFormat::Json
    } else {
        config.format
    };
    let stats = if args.per_file || config.per_file {
        PatchStatistics::with_files(&patch)
    } else {
        compute_statistics(&patch)
    };

    render_stats(&stats, format)
}

/// Drop file sections matching the config's `exclude` globs.
pub(crate) fn exclude_files(patch: Patch, config: &Config) -> Result<Patch> {
    if config.exclude.is_empty() {
        return Ok(patch);
    }

    let excludes = config.exclude_set()?;
    let before = patch.len();
    let files: Vec<_> = patch
        .files
        .into_iter()
        .filter(|file| !Config::is_excluded(&excludes, file))
        .collect();

    if files.len() != before {
        log::info!("excluded {} file(s) by config", before - files.len());
    }

    Ok(Patch {
        files,
        trailing_lines: patch.trailing_lines,
    })
}

/// Render statistics as text or JSON.
pub(crate) fn render_stats(stats: &PatchStatistics, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(stats),
        OutputFormat::Text => Ok(render_text(stats)),
    }
}

fn render_text(stats: &PatchStatistics) -> String {
    let mut report = Report::default();

    report.line("Patch Statistics");
    report.line("================");
    report.blank();
    report.line(format!("Files:  {:>6}", stats.file_count));
    for (change_type, count) in &stats.files_by_change_type {
        report.line(format!("  {:10} {:>3}", change_type, count));
    }
    report.line(format!("Hunks:  {:>6}", stats.hunk_count));
    report.line(format!("Lines:  +{} -{}", stats.added_lines, stats.removed_lines));
    report.line(format!(
        "Blank:  +{} -{}",
        stats.added_blank_lines, stats.removed_blank_lines
    ));

    if !stats.files.is_empty() {
        report.blank();
        report.line("Per file:");
        for file in &stats.files {
            report.line(format!(
                "  {:8} {} (+{} -{}, blank +{} -{}, {} hunk(s))",
                file.change_type,
                file.path,
                file.added_lines,
                file.removed_lines,
                file.added_blank_lines,
                file.removed_blank_lines,
                file.hunk_count
            ));
        }
    }

    report.finish()
}
