//! Tests for patch statistics.

use super::*;
use crate::patch::{FilePatch, Hunk, Line, parse_patch};

const MIXED: &str = r#"diff --git a/example.py b/example.py
index 1111111..2222222 100644
--- a/example.py
+++ b/example.py
@@ -1,4 +1,5 @@
 def hello():
     print("Hello, World!")
+
 def goodbye():
     print("Goodbye!")
diff --git a/config.txt b/config.txt
index 3333333..4444444 100644
--- a/config.txt
+++ b/config.txt
@@ -1,6 +1,4 @@
 # Configuration file
 setting1=value1
-
 setting2=value2
-
 setting3=value3
diff --git a/newfile.md b/newfile.md
new file mode 100644
index 0000000..5555555
--- /dev/null
+++ b/newfile.md
@@ -0,0 +1,3 @@
+# New File
+
+It has some empty lines.
diff --git a/a.txt b/b.txt
similarity index 100%
rename from a.txt
rename to b.txt
"#;

/// The blank-line addition example from a single modified file.
#[test]
fn test_single_blank_addition() {
    let diff = "--- a/f.txt\n+++ b/f.txt\n@@ -1,2 +1,3 @@\n line one\n+\n line two\n";
    let patch = parse_patch(diff).unwrap();

    let stats = compute_statistics(&patch);

    assert_eq!(stats.added_lines, 1);
    assert_eq!(stats.added_blank_lines, 1);
    assert_eq!(stats.removed_lines, 0);
    assert_eq!(stats.removed_blank_lines, 0);
    assert_eq!(stats.hunk_count, 1);
    assert_eq!(stats.file_count, 1);
    assert_eq!(stats.files_with(ChangeType::Modified), 1);
}

/// A pure file addition is tallied under `Added`.
#[test]
fn test_pure_addition() {
    let diff = "--- /dev/null\n+++ b/new.txt\n@@ -0,0 +1,1 @@\n+content\n";
    let patch = parse_patch(diff).unwrap();

    let stats = compute_statistics(&patch);

    assert_eq!(patch.files[0].change_type, ChangeType::Added);
    assert_eq!(stats.added_lines, 1);
    assert_eq!(stats.added_blank_lines, 0);
    assert_eq!(stats.files_with(ChangeType::Added), 1);
}

/// Totals over a multi-file patch, grouped by change type.
#[test]
fn test_mixed_patch_totals() {
    let patch = parse_patch(MIXED).unwrap();

    let stats = compute_statistics(&patch);

    assert_eq!(stats.file_count, 4);
    assert_eq!(stats.hunk_count, 3);
    assert_eq!(stats.added_lines, 4);
    assert_eq!(stats.added_blank_lines, 2);
    assert_eq!(stats.removed_lines, 2);
    assert_eq!(stats.removed_blank_lines, 2);
    assert_eq!(stats.files_with(ChangeType::Modified), 2);
    assert_eq!(stats.files_with(ChangeType::Added), 1);
    assert_eq!(stats.files_with(ChangeType::Renamed), 1);
    assert_eq!(stats.files_with(ChangeType::Removed), 0);
    assert!(stats.files.is_empty());
}

/// Reordering files does not change any total.
#[test]
fn test_totals_are_order_independent() {
    let patch = parse_patch(MIXED).unwrap();
    let forward = compute_statistics(&patch);

    let mut reversed = patch.clone();
    reversed.files.reverse();
    assert_eq!(compute_statistics(&reversed), forward);

    let mut rotated = patch.clone();
    rotated.files.rotate_left(1);
    for file in &mut rotated.files {
        file.hunks.reverse();
        for hunk in &mut file.hunks {
            hunk.lines.reverse();
        }
    }
    assert_eq!(compute_statistics(&rotated), forward);
}

/// Context blank lines and no-newline markers are never counted.
#[test]
fn test_context_and_markers_not_counted() {
    let hunk = Hunk::new(1, 2, 1, 2).with_lines(vec![
        Line::new(LineKind::Context, "", Some(1), Some(1)),
        Line::new(LineKind::Context, "x", Some(2), Some(2)),
        Line::new(LineKind::NoNewlineMarker, "", None, None),
    ]);
    let patch = Patch::new(vec![FilePatch::new(
        Some("f".to_string()),
        Some("f".to_string()),
        vec![hunk],
    )]);

    let stats = compute_statistics(&patch);

    assert_eq!(stats.added_lines, 0);
    assert_eq!(stats.removed_lines, 0);
    assert_eq!(stats.added_blank_lines, 0);
    assert_eq!(stats.removed_blank_lines, 0);
    assert_eq!(stats.hunk_count, 1);
}

/// Per-file breakdown follows patch order and sums to the totals.
#[test]
fn test_per_file_breakdown() {
    let patch = parse_patch(MIXED).unwrap();

    let stats = PatchStatistics::with_files(&patch);

    let paths: Vec<&str> = stats.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["example.py", "config.txt", "newfile.md", "b.txt"]);
    assert_eq!(stats.files[1].removed_blank_lines, 2);
    assert_eq!(stats.files[2].added_lines, 3);
    assert_eq!(
        stats.files.iter().map(|f| f.added_lines).sum::<usize>(),
        stats.added_lines
    );
    assert_eq!(PatchStatistics { files: Vec::new(), ..stats }, compute_statistics(&patch));
}

/// Blank line changes are listed with their file and line number.
#[test]
fn test_blank_line_changes() {
    let patch = parse_patch(MIXED).unwrap();

    let changes = blank_line_changes(&patch);

    assert_eq!(changes.len(), 4);
    assert_eq!(changes[0].path, "example.py");
    assert_eq!(changes[0].kind, LineKind::Added);
    assert_eq!(changes[0].line_no, Some(3));
    assert_eq!(changes[1].path, "config.txt");
    assert_eq!(changes[1].kind, LineKind::Removed);
    assert_eq!(changes[1].line_no, Some(3));
    assert_eq!(changes[2].line_no, Some(5));
    assert_eq!(changes[3].path, "newfile.md");
    assert_eq!(changes[3].line_no, Some(2));
}

/// Statistics serialize with snake_case change type keys.
#[test]
fn test_json_shape() {
    let patch = parse_patch(MIXED).unwrap();

    let json = serde_json::to_value(compute_statistics(&patch)).unwrap();

    assert_eq!(json["added_blank_lines"], 2);
    assert_eq!(json["files_by_change_type"]["renamed"], 1);
    assert!(json.get("files").is_none());
}
