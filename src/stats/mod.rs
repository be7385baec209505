//! Statistics over a parsed patch.
//!
//! All figures are recomputed from the [`Patch`] on demand; sums do not
//! depend on the order of files, hunks or lines.

#[cfg(test)]
mod tests;

use crate::patch::{ChangeType, FilePatch, LineKind, Patch};
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals for a whole patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchStatistics {
    pub added_lines: usize,
    pub removed_lines: usize,
    pub added_blank_lines: usize,
    pub removed_blank_lines: usize,
    pub hunk_count: usize,
    pub file_count: usize,
    pub files_by_change_type: BTreeMap<ChangeType, usize>,
    /// Per-file breakdown, in patch order. Only filled by [`PatchStatistics::with_files`].
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileStatistics>,
}

/// Counts for a single file section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatistics {
    pub path: String,
    pub change_type: ChangeType,
    pub added_lines: usize,
    pub removed_lines: usize,
    pub added_blank_lines: usize,
    pub removed_blank_lines: usize,
    pub hunk_count: usize,
}

impl FileStatistics {
    pub fn from_file(file: &FilePatch) -> Self {
        let mut stats = Self {
            path: file.path().to_string(),
            change_type: file.change_type,
            added_lines: 0,
            removed_lines: 0,
            added_blank_lines: 0,
            removed_blank_lines: 0,
            hunk_count: file.hunks.len(),
        };

        for line in file.lines() {
            match line.kind {
                LineKind::Added => {
                    stats.added_lines += 1;
                    stats.added_blank_lines += usize::from(line.is_blank);
                }
                LineKind::Removed => {
                    stats.removed_lines += 1;
                    stats.removed_blank_lines += usize::from(line.is_blank);
                }
                LineKind::Context | LineKind::NoNewlineMarker => {}
            }
        }

        stats
    }
}

impl PatchStatistics {
    /// Compute totals for `patch`.
    pub fn from_patch(patch: &Patch) -> Self {
        let mut stats = Self::default();
        for file in patch {
            stats.absorb(&FileStatistics::from_file(file));
        }
        stats
    }

    /// Compute totals plus the per-file breakdown.
    pub fn with_files(patch: &Patch) -> Self {
        let mut stats = Self::default();
        for file in patch {
            let file_stats = FileStatistics::from_file(file);
            stats.absorb(&file_stats);
            stats.files.push(file_stats);
        }
        stats
    }

    /// Number of files with the given change type.
    pub fn files_with(&self, change_type: ChangeType) -> usize {
        self.files_by_change_type
            .get(&change_type)
            .copied()
            .unwrap_or(0)
    }

    fn absorb(&mut self, file: &FileStatistics) {
        self.added_lines += file.added_lines;
        self.removed_lines += file.removed_lines;
        self.added_blank_lines += file.added_blank_lines;
        self.removed_blank_lines += file.removed_blank_lines;
        self.hunk_count += file.hunk_count;
        self.file_count += 1;
        *self.files_by_change_type.entry(file.change_type).or_insert(0) += 1;
    }
}

/// Compute totals for `patch`.
pub fn compute_statistics(patch: &Patch) -> PatchStatistics {
    PatchStatistics::from_patch(patch)
}

/// A blank line that was added or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlankLineChange {
    pub path: String,
    /// `Added` or `Removed`.
    pub kind: LineKind,
    /// Target line number for additions, source line number for removals.
    pub line_no: Option<u32>,
}

/// List every blank added or removed line in patch order.
pub fn blank_line_changes(patch: &Patch) -> Vec<BlankLineChange> {
    let mut changes = Vec::new();
    for file in patch {
        for line in file.lines().filter(|l| l.is_blank) {
            let line_no = match line.kind {
                LineKind::Added => line.target_line_no,
                LineKind::Removed => line.source_line_no,
                LineKind::Context | LineKind::NoNewlineMarker => continue,
            };
            changes.push(BlankLineChange {
                path: file.path().to_string(),
                kind: line.kind,
                line_no,
            });
        }
    }
    changes
}
