//! Helper functions for file header parsing.

use super::model::FileMetadata;

/// Path sentinel used by unified diffs for "no file".
pub const DEV_NULL: &str = "/dev/null";

/// A parsed `---`/`+++` operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct FileLabel {
    /// Path with the prefix removed; `None` for `/dev/null`.
    pub path: Option<String>,
    /// The prefix that was removed (`a/`, `b/` or empty).
    pub prefix: String,
    /// Anything after the first tab, usually a timestamp.
    pub timestamp: Option<String>,
}

/// Parse the operand of a `---` or `+++` line.
///
/// `expected_prefix` is `a/` for the source side and `b/` for the target side;
/// it is stripped when present and recorded so the label can be rebuilt.
pub(super) fn parse_file_label(rest: &str, expected_prefix: &str) -> FileLabel {
    let (name, timestamp) = match rest.split_once('\t') {
        Some((name, ts)) => (name, Some(ts.to_string())),
        None => (rest, None),
    };

    if name == DEV_NULL {
        return FileLabel {
            path: None,
            prefix: String::new(),
            timestamp,
        };
    }

    match name.strip_prefix(expected_prefix) {
        Some(path) => FileLabel {
            path: Some(path.to_string()),
            prefix: expected_prefix.to_string(),
            timestamp,
        },
        None => FileLabel {
            path: Some(name.to_string()),
            prefix: String::new(),
            timestamp,
        },
    }
}

/// Parse the source and target paths from a "diff --git" line.
///
/// Handles various formats:
/// - "a/path/to/file b/path/to/file" (normal)
/// - "a/path/to/file b/path/to/renamed" (rename)
/// - "a/dir with space/f b/dir with space/f" (spaces)
///
/// Returns (source, target) without their prefixes, or None if parsing fails.
pub(super) fn parse_diff_git_line(rest: &str) -> Option<(String, String)> {
    // Paths can contain spaces, so split on the last " b/" occurrence
    let b_pos = rest.rfind(" b/")?;
    let a_part = &rest[..b_pos];
    let b_part = &rest[b_pos + 3..];

    let a_path = a_part.strip_prefix("a/")?;
    if a_path.is_empty() || b_part.is_empty() {
        return None;
    }

    Some((a_path.to_string(), b_part.to_string()))
}

/// Record what a git extended header line says about the file.
///
/// Lines that are not recognised are ignored here; the caller keeps every
/// line verbatim regardless.
pub(super) fn record_extended_header(metadata: &mut FileMetadata, line: &str) {
    if let Some(mode) = line.strip_prefix("old mode ") {
        metadata.old_mode = Some(mode.to_string());
    } else if let Some(mode) = line.strip_prefix("new mode ") {
        metadata.new_mode = Some(mode.to_string());
    } else if let Some(mode) = line.strip_prefix("new file mode ") {
        metadata.new_file_mode = Some(mode.to_string());
    } else if let Some(mode) = line.strip_prefix("deleted file mode ") {
        metadata.deleted_file_mode = Some(mode.to_string());
    } else if let Some(path) = line.strip_prefix("rename from ") {
        metadata.rename_from = Some(path.to_string());
    } else if let Some(path) = line.strip_prefix("rename to ") {
        metadata.rename_to = Some(path.to_string());
    } else if let Some(pct) = line.strip_prefix("similarity index ") {
        metadata.similarity = pct.trim_end_matches('%').parse().ok();
    } else if line == "GIT binary patch"
        || (line.starts_with("Binary files ") && line.ends_with(" differ"))
    {
        metadata.is_binary = true;
    }
}
