//! Regenerating unified diff text from a parsed [`Patch`].
//!
//! Output uses `\n` terminators. Hunk headers are rebuilt from the stored
//! ranges, not recounted from the lines, so a hand-built hunk with
//! inconsistent ranges is reproduced as-is.

use crate::error::PatchParseError;
use crate::patch::{DEV_NULL, FilePatch, Hunk, Line, Patch, parse_patch, split_lines};
use std::fmt;

/// Render `patch` back to unified diff text.
pub fn reconstruct(patch: &Patch) -> String {
    patch.to_string()
}

/// Standardize line terminators: every line ends with exactly one `\n`.
///
/// In a CRLF-framed patch `\r\n` becomes `\n`; in an LF-framed patch a `\r`
/// before `\n` is file content and stays. A missing final terminator is
/// added. Empty text stays empty.
pub fn normalize(text: &str) -> String {
    split_lines(text)
        .into_iter()
        .map(|line| format!("{line}\n"))
        .collect()
}

/// First line at which a reconstruction differs from the normalized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripMismatch {
    /// 1-based line number.
    pub line: usize,
    /// Line from the normalized input, `None` past its end.
    pub expected: Option<String>,
    /// Line from the reconstruction, `None` past its end.
    pub actual: Option<String>,
}

impl fmt::Display for RoundTripMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {} differs: expected {:?}, reconstructed {:?}",
            self.line, self.expected, self.actual
        )
    }
}

/// Compare the reconstruction of `patch` with the text it was parsed from.
///
/// Returns `None` when they agree modulo line terminators.
pub fn check_round_trip(patch: &Patch, original: &str) -> Option<RoundTripMismatch> {
    let rebuilt = reconstruct(patch);
    let mut expected = split_lines(original).into_iter();
    let mut actual = rebuilt.split_terminator('\n');
    let mut line = 0;

    loop {
        line += 1;
        match (expected.next(), actual.next()) {
            (None, None) => return None,
            (e, a) if e == a => continue,
            (e, a) => {
                return Some(RoundTripMismatch {
                    line,
                    expected: e.map(str::to_string),
                    actual: a.map(str::to_string),
                });
            }
        }
    }
}

/// Parse `text`, reconstruct it and compare against the normalized input.
pub fn verify_round_trip(text: &str) -> Result<Option<RoundTripMismatch>, PatchParseError> {
    let patch = parse_patch(text)?;
    Ok(check_round_trip(&patch, text))
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.marker(), self.content)
    }
}

fn write_range(f: &mut fmt::Formatter<'_>, start: u32, length: u32, explicit: bool) -> fmt::Result {
    if explicit || length != 1 {
        write!(f, "{start},{length}")
    } else {
        write!(f, "{start}")
    }
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("@@ -")?;
        write_range(f, self.source_start, self.source_length, self.source_length_explicit)?;
        f.write_str(" +")?;
        write_range(f, self.target_start, self.target_length, self.target_length_explicit)?;
        f.write_str(" @@")?;
        if let Some(heading) = &self.section_heading {
            write!(f, " {heading}")?;
        }
        writeln!(f)?;

        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn write_label(
    f: &mut fmt::Formatter<'_>,
    marker: &str,
    path: Option<&str>,
    prefix: &str,
    timestamp: Option<&str>,
) -> fmt::Result {
    match path {
        Some(path) => write!(f, "{marker} {prefix}{path}")?,
        None => write!(f, "{marker} {DEV_NULL}")?,
    }
    if let Some(ts) = timestamp {
        write!(f, "\t{ts}")?;
    }
    writeln!(f)
}

impl fmt::Display for FilePatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.metadata;
        for header in &meta.extended_headers {
            writeln!(f, "{header}")?;
        }

        if meta.has_file_lines || !self.hunks.is_empty() {
            write_label(
                f,
                "---",
                self.source_path.as_deref(),
                &meta.source_prefix,
                meta.source_timestamp.as_deref(),
            )?;
            write_label(
                f,
                "+++",
                self.target_path.as_deref(),
                &meta.target_prefix,
                meta.target_timestamp.as_deref(),
            )?;
        }

        for hunk in &self.hunks {
            write!(f, "{hunk}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            write!(f, "{file}")?;
        }
        for line in &self.trailing_lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::LineKind;

    const SAMPLE: &str = r#"From 1234567 Mon Sep 17 00:00:00 2001
Subject: [PATCH] sample

diff --git a/example.py b/example.py
index 1111111..2222222 100644
--- a/example.py
+++ b/example.py
@@ -1,4 +1,5 @@ def hello():
 def hello():
     print("Hello, World!")
+
 def goodbye():
     print("Goodbye!")
@@ -7 +8 @@
-    hello()
+    hello()
diff --git a/gone.txt b/gone.txt
deleted file mode 100644
index 3333333..0000000
--- a/gone.txt
+++ /dev/null
@@ -1,2 +0,0 @@
-bye
-
diff --git a/a.txt b/b.txt
similarity index 100%
rename from a.txt
rename to b.txt
diff --git a/tail.txt b/tail.txt
--- a/tail.txt
+++ b/tail.txt
@@ -1,1 +1,1 @@
-x
\ No newline at end of file
+y
\ No newline at end of file
--- a/plain.txt	2024-01-01 00:00:00.000000000 +0000
+++ b/plain.txt	2024-01-02 00:00:00.000000000 +0000
@@ -3,0 +4 @@
+appended
--
2.43.0
"#;

    #[test]
    fn round_trip_is_exact() {
        let patch = parse_patch(SAMPLE).unwrap();
        assert_eq!(reconstruct(&patch), normalize(SAMPLE));
        assert_eq!(check_round_trip(&patch, SAMPLE), None);
    }

    #[test]
    fn round_trip_normalizes_crlf() {
        let crlf = SAMPLE.replace('\n', "\r\n");
        let patch = parse_patch(&crlf).unwrap();
        assert_eq!(reconstruct(&patch), normalize(SAMPLE));
        assert_eq!(check_round_trip(&patch, &crlf), None);
    }

    #[test]
    fn reparse_of_reconstruction_is_identical() {
        let patch = parse_patch(SAMPLE).unwrap();
        let again = parse_patch(&reconstruct(&patch)).unwrap();
        assert_eq!(again, patch);
    }

    #[test]
    fn normalize_adds_final_newline() {
        assert_eq!(normalize("a\r\nb"), "a\nb\n");
        assert_eq!(normalize("a\n-b\r\n"), "a\n-b\r\n");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn hand_built_patch_uses_git_conventions() {
        let hunk = Hunk::new(0, 0, 1, 1).with_lines(vec![Line::new(
            LineKind::Added,
            "content",
            None,
            Some(1),
        )]);
        let patch = Patch::new(vec![FilePatch::new(None, Some("new.txt".to_string()), vec![hunk])]);

        assert_eq!(
            reconstruct(&patch),
            "--- /dev/null\n+++ b/new.txt\n@@ -0,0 +1 @@\n+content\n"
        );
    }

    #[test]
    fn inconsistent_ranges_are_reproduced() {
        let hunk = Hunk::new(10, 3, 10, 3)
            .with_heading("fn f()")
            .with_lines(vec![Line::new(LineKind::Removed, "only", Some(10), None)]);
        let patch = Patch::new(vec![FilePatch::new(
            Some("f.rs".to_string()),
            Some("f.rs".to_string()),
            vec![hunk],
        )]);

        let text = reconstruct(&patch);

        assert!(text.contains("@@ -10,3 +10,3 @@ fn f()\n-only\n"));
        assert!(parse_patch(&text).is_err());
    }

    #[test]
    fn mismatch_reports_first_differing_line() {
        let patch = parse_patch("--- a/f\n+++ b/f\n@@ -1 +1 @@\n-a\n+b\n").unwrap();

        let mismatch = check_round_trip(&patch, "--- a/f\n+++ b/f\n@@ -1,1 +1,1 @@\n-a\n+b\n");

        assert_eq!(
            mismatch,
            Some(RoundTripMismatch {
                line: 3,
                expected: Some("@@ -1,1 +1,1 @@".to_string()),
                actual: Some("@@ -1 +1 @@".to_string()),
            })
        );
    }

    #[test]
    fn verify_round_trip_parses_then_compares() {
        assert_eq!(verify_round_trip(SAMPLE).unwrap(), None);

        let err = verify_round_trip("@@ -1 +1 @@\n-a\n+b\n").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn carriage_returns_in_content_survive_round_trip() {
        // git frames the patch with LF; the file itself uses CRLF.
        let text = "--- a/win.txt\n+++ b/win.txt\n@@ -1 +1 @@\n-old\r\n+new\r\n";
        let patch = parse_patch(text).unwrap();

        assert_eq!(reconstruct(&patch), text);
        assert_eq!(check_round_trip(&patch, text), None);

        let lossy = text.replace("-old\r\n", "-old\n");
        assert_eq!(
            check_round_trip(&patch, &lossy),
            Some(RoundTripMismatch {
                line: 4,
                expected: Some("-old".to_string()),
                actual: Some("-old\r".to_string()),
            })
        );
    }

    #[test]
    fn bare_empty_context_line_is_written_with_marker() {
        let text = "--- a/f\n+++ b/f\n@@ -1,3 +1,4 @@\n line one\n\n+\n line two\n";
        let patch = parse_patch(text).unwrap();

        let rebuilt = reconstruct(&patch);

        assert_eq!(rebuilt, text.replace("line one\n\n", "line one\n \n"));
        assert_eq!(parse_patch(&rebuilt).unwrap(), patch);
    }
}
