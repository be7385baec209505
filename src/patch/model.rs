//! Structured model of a parsed unified diff.
//!
//! A [`Patch`] owns its [`FilePatch`]es, which own their [`Hunk`]s, which own
//! their [`Line`]s. Everything is built once by the parser and treated as
//! immutable afterwards.

use serde::Serialize;
use std::fmt;

/// What a single hunk body line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Unchanged line present on both sides (` `).
    Context,
    /// Line present only in the target (`+`).
    Added,
    /// Line present only in the source (`-`).
    Removed,
    /// `\ No newline at end of file` marker for the preceding line.
    NoNewlineMarker,
}

impl LineKind {
    /// The character that prefixes lines of this kind.
    pub fn marker(self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Added => '+',
            LineKind::Removed => '-',
            LineKind::NoNewlineMarker => '\\',
        }
    }

    /// Map a leading character back to its kind.
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            ' ' => Some(LineKind::Context),
            '+' => Some(LineKind::Added),
            '-' => Some(LineKind::Removed),
            '\\' => Some(LineKind::NoNewlineMarker),
            _ => None,
        }
    }
}

/// One classified line of a hunk body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub kind: LineKind,
    /// Text after the marker character, terminator removed, whitespace kept.
    pub content: String,
    /// True iff `content` is empty or a lone `\r`. A line of spaces is not blank.
    pub is_blank: bool,
    /// Line number in the source file (Context and Removed only).
    pub source_line_no: Option<u32>,
    /// Line number in the target file (Context and Added only).
    pub target_line_no: Option<u32>,
}

impl Line {
    pub fn new(
        kind: LineKind,
        content: impl Into<String>,
        source_line_no: Option<u32>,
        target_line_no: Option<u32>,
    ) -> Self {
        let content = content.into();
        // A lone `\r` is the line ending of a CRLF file, not content.
        let is_blank = content.is_empty() || content == "\r";
        Self {
            kind,
            is_blank,
            content,
            source_line_no,
            target_line_no,
        }
    }

    pub fn is_added(&self) -> bool {
        self.kind == LineKind::Added
    }

    pub fn is_removed(&self) -> bool {
        self.kind == LineKind::Removed
    }

    pub fn is_context(&self) -> bool {
        self.kind == LineKind::Context
    }
}

/// A contiguous region of change within one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hunk {
    pub source_start: u32,
    pub source_length: u32,
    pub target_start: u32,
    pub target_length: u32,
    /// Whether the header spelled out `,len` for the source range.
    #[serde(skip)]
    pub source_length_explicit: bool,
    /// Whether the header spelled out `,len` for the target range.
    #[serde(skip)]
    pub target_length_explicit: bool,
    /// Text following the closing `@@`, if any.
    pub section_heading: Option<String>,
    pub lines: Vec<Line>,
}

impl Hunk {
    /// Create an empty hunk. Lengths of 1 are written in the compact form,
    /// as git does.
    pub fn new(source_start: u32, source_length: u32, target_start: u32, target_length: u32) -> Self {
        Self {
            source_start,
            source_length,
            target_start,
            target_length,
            source_length_explicit: source_length != 1,
            target_length_explicit: target_length != 1,
            section_heading: None,
            lines: Vec::new(),
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.section_heading = Some(heading.into());
        self
    }

    pub fn with_lines(mut self, lines: Vec<Line>) -> Self {
        self.lines = lines;
        self
    }

    pub fn added_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_added()).count()
    }

    pub fn removed_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_removed()).count()
    }

    /// True if any line adds or removes content.
    pub fn modifies_content(&self) -> bool {
        self.lines.iter().any(|l| l.is_added() || l.is_removed())
    }
}

/// How a file is affected by its patch section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    Renamed,
}

impl ChangeType {
    /// Derive the change type from the two paths and the hunks.
    ///
    /// A missing source means the file was created, a missing target means it
    /// was deleted. Differing paths count as a rename only when no hunk touches
    /// content; a rename with edits is reported as a modification.
    pub fn classify(source: Option<&str>, target: Option<&str>, hunks: &[Hunk]) -> Self {
        match (source, target) {
            (None, _) => ChangeType::Added,
            (_, None) => ChangeType::Removed,
            (Some(s), Some(t)) if s != t && !hunks.iter().any(Hunk::modifies_content) => {
                ChangeType::Renamed
            }
            _ => ChangeType::Modified,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Removed => "removed",
            ChangeType::Modified => "modified",
            ChangeType::Renamed => "renamed",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Header details of a file section that do not affect classification but
/// are needed to reproduce the section exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    /// Raw lines preceding `---` (`diff --git`, `index`, mode lines, ...).
    pub extended_headers: Vec<String>,
    /// Whether the section had `---`/`+++` lines.
    pub has_file_lines: bool,
    /// Prefix stripped from the source path (`a/` or empty).
    pub source_prefix: String,
    /// Prefix stripped from the target path (`b/` or empty).
    pub target_prefix: String,
    /// Text after a tab on the `---` line.
    pub source_timestamp: Option<String>,
    /// Text after a tab on the `+++` line.
    pub target_timestamp: Option<String>,
    pub old_mode: Option<String>,
    pub new_mode: Option<String>,
    pub new_file_mode: Option<String>,
    pub deleted_file_mode: Option<String>,
    pub rename_from: Option<String>,
    pub rename_to: Option<String>,
    /// Percentage from a `similarity index` line.
    pub similarity: Option<u8>,
    /// Set when git reported `Binary files ... differ`.
    pub is_binary: bool,
}

/// All changes to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilePatch {
    /// Source path without its `a/` prefix; `None` for a created file.
    pub source_path: Option<String>,
    /// Target path without its `b/` prefix; `None` for a deleted file.
    pub target_path: Option<String>,
    pub change_type: ChangeType,
    #[serde(skip)]
    pub metadata: FileMetadata,
    pub hunks: Vec<Hunk>,
}

impl FilePatch {
    /// Build a file patch with git-style `a/`/`b/` headers.
    pub fn new(source_path: Option<String>, target_path: Option<String>, hunks: Vec<Hunk>) -> Self {
        let change_type = ChangeType::classify(source_path.as_deref(), target_path.as_deref(), &hunks);
        Self {
            source_path,
            target_path,
            change_type,
            metadata: FileMetadata {
                has_file_lines: true,
                source_prefix: "a/".to_string(),
                target_prefix: "b/".to_string(),
                ..FileMetadata::default()
            },
            hunks,
        }
    }

    /// The path the change is reported under: the target, or the source for a deletion.
    pub fn path(&self) -> &str {
        self.target_path
            .as_deref()
            .or(self.source_path.as_deref())
            .unwrap_or_default()
    }

    pub fn is_added_file(&self) -> bool {
        self.change_type == ChangeType::Added
    }

    pub fn is_removed_file(&self) -> bool {
        self.change_type == ChangeType::Removed
    }

    pub fn is_modified_file(&self) -> bool {
        self.change_type == ChangeType::Modified
    }

    /// True when both paths exist and differ, whether or not content changed.
    pub fn is_rename(&self) -> bool {
        matches!((&self.source_path, &self.target_path), (Some(s), Some(t)) if s != t)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.hunks.iter().flat_map(|h| h.lines.iter())
    }

    pub fn added_count(&self) -> usize {
        self.lines().filter(|l| l.is_added()).count()
    }

    pub fn removed_count(&self) -> usize {
        self.lines().filter(|l| l.is_removed()).count()
    }

    pub fn added_blank_count(&self) -> usize {
        self.lines().filter(|l| l.is_added() && l.is_blank).count()
    }

    pub fn removed_blank_count(&self) -> usize {
        self.lines().filter(|l| l.is_removed() && l.is_blank).count()
    }
}

/// A parsed unified diff: file sections in the order they appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Patch {
    pub files: Vec<FilePatch>,
    /// Lines after the last file section, kept verbatim.
    #[serde(skip)]
    pub trailing_lines: Vec<String>,
}

impl Patch {
    pub fn new(files: Vec<FilePatch>) -> Self {
        Self {
            files,
            trailing_lines: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilePatch> {
        self.files.iter()
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a FilePatch;
    type IntoIter = std::slice::Iter<'a, FilePatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
