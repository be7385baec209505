//! Parsing of a single file section: headers followed by hunks.

use super::helpers::{parse_diff_git_line, parse_file_label, record_extended_header};
use super::hunk::parse_hunk;
use super::model::{ChangeType, FileMetadata, FilePatch};
use super::parser::Cursor;
use crate::error::{ParseError, PatchParseError};

/// Parse one file section starting at the cursor.
///
/// The cursor must be on a `diff --git` line or on a `---` line directly
/// followed by `+++`. `leading` holds lines seen since the previous section
/// ended; they are kept verbatim as the first extended header lines.
///
/// Git sections may omit `---`/`+++` entirely (pure renames, mode changes,
/// empty or binary files); paths then come from `rename from`/`rename to` or
/// the `diff --git` line itself.
pub(super) fn parse_file_patch(
    cursor: &mut Cursor<'_>,
    leading: Vec<String>,
) -> Result<FilePatch, PatchParseError> {
    let section_no = cursor.line_no();
    let mut metadata = FileMetadata {
        extended_headers: leading,
        ..FileMetadata::default()
    };

    let mut git_paths = None;
    if let Some(line) = cursor.peek().filter(|l| l.starts_with("diff --git ")) {
        git_paths = parse_diff_git_line(&line["diff --git ".len()..]);
        metadata.extended_headers.push(line.to_string());
        cursor.advance();

        while let Some(raw) = cursor.peek() {
            if raw.starts_with("diff --git ") || raw.starts_with("--- ") || raw.starts_with("@@") {
                break;
            }
            record_extended_header(&mut metadata, raw);
            metadata.extended_headers.push(raw.to_string());
            cursor.advance();
        }
    }

    let (source_path, target_path) = match cursor.peek() {
        Some(minus) if minus.starts_with("--- ") => {
            let minus_no = cursor.line_no();
            cursor.advance();
            let plus = cursor
                .peek()
                .and_then(|l| l.strip_prefix("+++ "))
                .ok_or_else(|| {
                    PatchParseError::new(
                        minus_no + 1,
                        ParseError::MissingFileHeader(format!(
                            "expected '+++' line after {minus:?}"
                        )),
                    )
                })?;
            cursor.advance();

            let source = parse_file_label(&minus["--- ".len()..], "a/");
            let target = parse_file_label(plus, "b/");
            if source.path.is_none() && target.path.is_none() {
                return Err(PatchParseError::new(
                    minus_no,
                    ParseError::MissingFileHeader("both sides are /dev/null".to_string()),
                ));
            }

            metadata.has_file_lines = true;
            metadata.source_prefix = source.prefix;
            metadata.target_prefix = target.prefix;
            metadata.source_timestamp = source.timestamp;
            metadata.target_timestamp = target.timestamp;
            (source.path, target.path)
        }
        Some(hunk) if hunk.starts_with("@@") => {
            return Err(PatchParseError::new(
                cursor.line_no(),
                ParseError::MissingFileHeader("hunk without '---'/'+++' lines".to_string()),
            ));
        }
        _ => git_only_paths(&metadata, git_paths).ok_or_else(|| {
            PatchParseError::new(
                section_no,
                ParseError::MissingFileHeader("cannot determine file paths".to_string()),
            )
        })?,
    };

    let mut hunks = Vec::new();
    while cursor.peek().is_some_and(|l| l.starts_with("@@")) {
        hunks.push(parse_hunk(cursor)?);
    }

    let change_type = ChangeType::classify(source_path.as_deref(), target_path.as_deref(), &hunks);

    log::debug!(
        "parsed file section at line {}: {:?} -> {:?} ({}, {} hunks)",
        section_no,
        source_path,
        target_path,
        change_type,
        hunks.len()
    );

    Ok(FilePatch {
        source_path,
        target_path,
        change_type,
        metadata,
        hunks,
    })
}

/// Paths for a git section that has no `---`/`+++` lines.
fn git_only_paths(
    metadata: &FileMetadata,
    git_paths: Option<(String, String)>,
) -> Option<(Option<String>, Option<String>)> {
    let (source, target) = match (&metadata.rename_from, &metadata.rename_to) {
        (Some(from), Some(to)) => (from.clone(), to.clone()),
        _ => git_paths?,
    };

    let source = metadata.new_file_mode.is_none().then_some(source);
    let target = metadata.deleted_file_mode.is_none().then_some(target);
    Some((source, target))
}
