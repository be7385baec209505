//! Hunk header parsing and count-driven hunk body consumption.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::line::classify_line;
use super::model::{Hunk, Line, LineKind};
use super::parser::Cursor;
use crate::error::{ParseError, PatchParseError};

static HUNK_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@(?: (.*))?$")
        .expect("hunk header regex is valid")
});

/// Parse a hunk header line into an empty [`Hunk`].
///
/// Format: `@@ -src_start[,src_len] +tgt_start[,tgt_len] @@ [heading]`.
/// An omitted length means 1.
pub fn parse_hunk_header(line: &str) -> Result<Hunk, ParseError> {
    let malformed = || ParseError::MalformedHunkHeader(line.to_string());

    let caps = HUNK_HEADER_RE.captures(line).ok_or_else(malformed)?;

    let number = |caps: &Captures<'_>, idx: usize| -> Result<Option<u32>, ParseError> {
        caps.get(idx)
            .map(|m| m.as_str().parse::<u32>().map_err(|_| malformed()))
            .transpose()
    };

    let source_start = number(&caps, 1)?.ok_or_else(malformed)?;
    let source_length = number(&caps, 2)?;
    let target_start = number(&caps, 3)?.ok_or_else(malformed)?;
    let target_length = number(&caps, 4)?;

    Ok(Hunk {
        source_start,
        source_length: source_length.unwrap_or(1),
        target_start,
        target_length: target_length.unwrap_or(1),
        source_length_explicit: source_length.is_some(),
        target_length_explicit: target_length.is_some(),
        section_heading: caps.get(5).map(|m| m.as_str().to_string()),
        lines: Vec::new(),
    })
}

/// Consume one hunk (header plus body) from the cursor.
///
/// Exactly as many body lines are read as the header's ranges require, plus
/// any `\` markers interleaved with them or directly following the last one.
/// An empty body line is read as a blank context line.
/// The body must account for the declared ranges exactly; a short body, an
/// overlong body or a line that overshoots one side fails the whole parse.
pub(super) fn parse_hunk(cursor: &mut Cursor<'_>) -> Result<Hunk, PatchParseError> {
    let header_no = cursor.line_no();
    let header = cursor.advance().unwrap_or_default();
    let mut hunk =
        parse_hunk_header(header).map_err(|kind| PatchParseError::new(header_no, kind))?;

    let mut counts = Counts::default();
    let mut source_no = hunk.source_start;
    let mut target_no = hunk.target_start;

    while counts.source < hunk.source_length || counts.target < hunk.target_length {
        let Some(raw) = cursor.peek() else {
            break;
        };
        if raw.starts_with("@@") || raw.starts_with("diff --git ") {
            break;
        }

        let line_no = cursor.line_no();
        cursor.advance();
        // A bare blank context line whose leading space was stripped in transit.
        let line = if raw.is_empty() {
            Line::new(LineKind::Context, "", Some(source_no), Some(target_no))
        } else {
            classify_line(raw, source_no, target_no)
                .map_err(|kind| PatchParseError::new(line_no, kind))?
        };

        match line.kind {
            LineKind::Context => {
                counts.source += 1;
                counts.target += 1;
                source_no = source_no.saturating_add(1);
                target_no = target_no.saturating_add(1);
            }
            LineKind::Removed => {
                counts.source += 1;
                source_no = source_no.saturating_add(1);
            }
            LineKind::Added => {
                counts.target += 1;
                target_no = target_no.saturating_add(1);
            }
            LineKind::NoNewlineMarker => {}
        }
        hunk.lines.push(line);

        if counts.source > hunk.source_length || counts.target > hunk.target_length {
            return Err(counts.mismatch(&hunk, header_no));
        }
    }

    if counts.source != hunk.source_length || counts.target != hunk.target_length {
        return Err(counts.mismatch(&hunk, header_no));
    }

    if let Some(raw) = cursor.peek().filter(|raw| raw.starts_with('\\')) {
        let line_no = cursor.line_no();
        cursor.advance();
        let marker = classify_line(raw, source_no, target_no)
            .map_err(|kind| PatchParseError::new(line_no, kind))?;
        hunk.lines.push(marker);
    }

    if let Some(kind) = overlong_body_line(cursor) {
        match kind {
            LineKind::Context => {
                counts.source += 1;
                counts.target += 1;
            }
            LineKind::Removed => counts.source += 1,
            _ => counts.target += 1,
        }
        return Err(counts.mismatch(&hunk, header_no));
    }

    log::debug!(
        "parsed hunk -{},{} +{},{} ({} lines)",
        hunk.source_start,
        hunk.source_length,
        hunk.target_start,
        hunk.target_length,
        hunk.lines.len()
    );

    Ok(hunk)
}

/// Source/target line tallies for a hunk body being consumed.
#[derive(Debug, Default)]
struct Counts {
    source: u32,
    target: u32,
}

impl Counts {
    fn mismatch(&self, hunk: &Hunk, header_no: usize) -> PatchParseError {
        PatchParseError::new(
            header_no,
            ParseError::HunkLineCountMismatch {
                expected_source: hunk.source_length,
                expected_target: hunk.target_length,
                found_source: self.source,
                found_target: self.target,
            },
        )
    }
}

/// If the line after a complete hunk still reads as hunk body, return its kind.
///
/// A `-` line is only body when it does not begin the next file's `---`/`+++`
/// header pair and is not a mail signature separator (`-- `).
fn overlong_body_line(cursor: &Cursor<'_>) -> Option<LineKind> {
    let raw = cursor.peek()?;
    match raw.chars().next()? {
        ' ' => Some(LineKind::Context),
        '+' => Some(LineKind::Added),
        '-' if raw == "-- " || raw == "--" || cursor.at_file_header_pair() => None,
        '-' => Some(LineKind::Removed),
        _ => None,
    }
}
