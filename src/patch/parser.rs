//! Top-level patch parsing: splits the text into file sections.

use super::file::parse_file_patch;
use super::model::Patch;
use crate::error::{ParseError, PatchParseError};

/// Split patch text into lines without their terminators.
///
/// The terminator of the first line decides the framing. A CRLF-framed patch
/// has `\r\n` stripped everywhere. In an LF-framed patch only `\n` is a
/// terminator, so a `\r` that belongs to file content (a diff of a CRLF
/// file) is kept on the line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let crlf_framed = text
        .split_inclusive('\n')
        .next()
        .is_some_and(|first| first.ends_with("\r\n"));

    if crlf_framed {
        text.lines().collect()
    } else {
        text.split_terminator('\n').collect()
    }
}

/// Line-oriented read position over patch text, split by [`split_lines`].
pub(super) struct Cursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: split_lines(text),
            pos: 0,
        }
    }

    /// The current line, without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Consume and return the current line.
    pub fn advance(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    /// 1-based number of the current line.
    pub fn line_no(&self) -> usize {
        self.pos + 1
    }

    /// True when the current line is `---` and the next one is `+++`.
    pub fn at_file_header_pair(&self) -> bool {
        let next = self.lines.get(self.pos + 1).copied();
        self.peek().is_some_and(|l| l.starts_with("--- "))
            && next.is_some_and(|l| l.starts_with("+++ "))
    }

    /// True when a new file section begins at the current line.
    pub fn at_file_start(&self) -> bool {
        self.peek().is_some_and(|l| l.starts_with("diff --git ")) || self.at_file_header_pair()
    }
}

/// Parse unified diff text into a [`Patch`].
///
/// File sections start at `diff --git` lines, or at bare `---`/`+++` pairs
/// when the text has no git headers. Sections are returned in input order.
/// Text containing no file section yields an empty patch.
///
/// Parsing is fail-fast: the first malformed header, hunk or line aborts the
/// whole parse and no partial patch is returned.
///
/// # Example
///
/// ```
/// use patchstat::patch::{parse_patch, ChangeType};
///
/// let text = "--- /dev/null\n+++ b/new.txt\n@@ -0,0 +1 @@\n+content\n";
/// let patch = parse_patch(text)?;
/// assert_eq!(patch.files[0].change_type, ChangeType::Added);
/// # Ok::<(), patchstat::error::PatchParseError>(())
/// ```
pub fn parse_patch(text: &str) -> Result<Patch, PatchParseError> {
    let mut cursor = Cursor::new(text);
    let mut files = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    while let Some(raw) = cursor.peek() {
        if cursor.at_file_start() {
            files.push(parse_file_patch(&mut cursor, std::mem::take(&mut pending))?);
            continue;
        }

        if raw.starts_with("@@") {
            return Err(PatchParseError::new(
                cursor.line_no(),
                ParseError::MissingFileHeader("hunk header outside a file section".to_string()),
            ));
        }

        pending.push(raw.to_string());
        cursor.advance();
    }

    log::debug!("parsed patch with {} file section(s)", files.len());

    Ok(Patch {
        files,
        trailing_lines: pending,
    })
}
