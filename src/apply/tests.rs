//! Tests for in-process patch application.

use super::apply_file_patch;
use crate::error::ApplyError;
use crate::patch::parse_patch;

fn apply_single(diff: &str, original: &str) -> Result<String, ApplyError> {
    let patch = parse_patch(diff).unwrap();
    apply_file_patch(original, &patch.files[0])
}

#[test]
fn test_adds_blank_line_in_middle() {
    let diff = "--- a/f.txt\n+++ b/f.txt\n@@ -1,2 +1,3 @@\n line one\n+\n line two\n";

    let result = apply_single(diff, "line one\nline two\nline three\n").unwrap();

    assert_eq!(result, "line one\n\nline two\nline three\n");
}

#[test]
fn test_removes_blank_lines() {
    let diff = r#"--- a/config.txt
+++ b/config.txt
@@ -1,6 +1,4 @@
 # Configuration file
 setting1=value1
-
 setting2=value2
-
 setting3=value3
"#;
    let original = "# Configuration file\nsetting1=value1\n\nsetting2=value2\n\nsetting3=value3\n";

    let result = apply_single(diff, original).unwrap();

    assert_eq!(
        result,
        "# Configuration file\nsetting1=value1\nsetting2=value2\nsetting3=value3\n"
    );
}

#[test]
fn test_creates_new_file() {
    let diff = "--- /dev/null\n+++ b/new.txt\n@@ -0,0 +1,2 @@\n+# New File\n+\n";

    assert_eq!(apply_single(diff, "").unwrap(), "# New File\n\n");
}

#[test]
fn test_deletes_file() {
    let diff = "--- a/old.txt\n+++ /dev/null\n@@ -1,2 +0,0 @@\n-a\n-b\n";

    assert_eq!(apply_single(diff, "a\nb\n").unwrap(), "");
}

#[test]
fn test_multiple_hunks_copy_untouched_regions() {
    let diff = r#"--- a/n.txt
+++ b/n.txt
@@ -2 +2 @@
-2
+two
@@ -5,0 +6 @@
+after five
"#;

    let result = apply_single(diff, "1\n2\n3\n4\n5\n6\n").unwrap();

    assert_eq!(result, "1\ntwo\n3\n4\n5\nafter five\n6\n");
}

#[test]
fn test_no_newline_at_end_of_target() {
    let diff = "--- a/t.txt\n+++ b/t.txt\n@@ -1 +1 @@\n-x\n+y\n\\ No newline at end of file\n";

    assert_eq!(apply_single(diff, "x\n").unwrap(), "y");
}

#[test]
fn test_adding_missing_final_newline() {
    let diff = "--- a/t.txt\n+++ b/t.txt\n@@ -1 +1 @@\n-x\n\\ No newline at end of file\n+x\n";

    assert_eq!(apply_single(diff, "x").unwrap(), "x\n");
}

#[test]
fn test_context_mismatch() {
    let diff = "--- a/f.txt\n+++ b/f.txt\n@@ -1,2 +1,2 @@\n keep\n-old\n+new\n";

    let err = apply_single(diff, "keep\nOTHER\n").unwrap_err();

    assert_eq!(
        err,
        ApplyError::ContextMismatch {
            line: 2,
            expected: "old".to_string(),
            found: "OTHER".to_string(),
        }
    );
}

#[test]
fn test_hunk_past_end_of_file() {
    let diff = "--- a/f.txt\n+++ b/f.txt\n@@ -10 +10 @@\n-x\n+y\n";

    let err = apply_single(diff, "only\n").unwrap_err();

    assert_eq!(
        err,
        ApplyError::OutOfRange {
            line: 10,
            file_lines: 1
        }
    );
}

#[test]
fn test_whitespace_only_lines_must_match_exactly() {
    let diff = "--- a/f.txt\n+++ b/f.txt\n@@ -1 +1 @@\n-    \n+\n";

    assert_eq!(apply_single(diff, "    \n").unwrap(), "\n");
    assert!(matches!(
        apply_single(diff, "\n"),
        Err(ApplyError::ContextMismatch { .. })
    ));
}

#[test]
fn test_crlf_file_with_lf_framed_patch() {
    let diff = "--- a/w.txt\n+++ b/w.txt\n@@ -1,2 +1,2 @@\n keep\r\n-old\r\n+new\r\n";

    let result = apply_single(diff, "keep\r\nold\r\n").unwrap();

    assert_eq!(result, "keep\r\nnew\r\n");
}
