//! In-process application of a file patch to its original content.
//!
//! Used to cross-check the parser: the post-image is rebuilt purely from the
//! Context and Added lines of each hunk, at the positions the hunk headers
//! declare. There is no fuzz and no offset search; any disagreement with the
//! original content is an error.

#[cfg(test)]
mod tests;

use crate::error::ApplyError;
use crate::patch::{FilePatch, LineKind};

/// Apply `file` to `original` and return the resulting file content.
///
/// # Arguments
///
/// * `original` - Content of the source file (empty for a created file)
/// * `file` - The parsed file section
///
/// # Returns
///
/// * `Ok(String)` - Post-image content
/// * `Err(ApplyError::ContextMismatch)` - A context/removed line does not match
/// * `Err(ApplyError::OutOfRange)` - A hunk overlaps the previous one or runs past EOF
pub fn apply_file_patch(original: &str, file: &FilePatch) -> Result<String, ApplyError> {
    // Only `\n` terminates; a CRLF file keeps its `\r`, as the hunk lines do.
    let source: Vec<&str> = original.split_terminator('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(source.len());
    let mut pos = 0usize;
    // Set when a no-newline marker follows the most recent target-side line.
    let mut target_lacks_newline = false;

    for hunk in &file.hunks {
        // A zero-length source range names the line *after which* the hunk applies.
        let begin = if hunk.source_length == 0 {
            hunk.source_start as usize
        } else {
            (hunk.source_start as usize).saturating_sub(1)
        };
        if begin < pos || begin > source.len() {
            return Err(ApplyError::OutOfRange {
                line: hunk.source_start,
                file_lines: source.len(),
            });
        }

        out.extend_from_slice(&source[pos..begin]);
        pos = begin;
        target_lacks_newline = false;

        let mut previous = None;
        for line in &hunk.lines {
            match line.kind {
                LineKind::Context | LineKind::Removed => {
                    let found = source.get(pos).ok_or(ApplyError::OutOfRange {
                        line: hunk.source_start,
                        file_lines: source.len(),
                    })?;
                    if *found != line.content {
                        return Err(ApplyError::ContextMismatch {
                            line: (pos + 1) as u32,
                            expected: line.content.clone(),
                            found: found.to_string(),
                        });
                    }
                    pos += 1;
                    if line.kind == LineKind::Context {
                        out.push(&line.content);
                        target_lacks_newline = false;
                    }
                }
                LineKind::Added => {
                    out.push(&line.content);
                    target_lacks_newline = false;
                }
                LineKind::NoNewlineMarker => {
                    if matches!(previous, Some(LineKind::Context | LineKind::Added)) {
                        target_lacks_newline = true;
                    }
                }
            }
            previous = Some(line.kind);
        }
    }

    let reached_eof = pos == source.len() && !file.hunks.is_empty();
    out.extend_from_slice(&source[pos..]);

    if out.is_empty() {
        return Ok(String::new());
    }

    let ends_with_newline = if reached_eof {
        !target_lacks_newline
    } else {
        original.ends_with('\n')
    };

    let mut result = out.join("\n");
    if ends_with_newline {
        result.push('\n');
    }
    Ok(result)
}
