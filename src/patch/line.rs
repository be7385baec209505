//! Classification of individual hunk body lines.

use super::model::{Line, LineKind};
use crate::error::ParseError;

/// Classify one raw hunk body line.
///
/// The first character selects the kind; the rest, minus any line terminator,
/// becomes the content. `source_no`/`target_no` are the current positions of
/// the caller's counters and are attached only to the sides the line exists on.
///
/// # Returns
///
/// * `Ok(Line)` - The classified line
/// * `Err(ParseError::MalformedHunkLine)` - Empty line or unknown leading character
pub fn classify_line(raw: &str, source_no: u32, target_no: u32) -> Result<Line, ParseError> {
    let raw = strip_terminator(raw);

    let mut chars = raw.chars();
    let kind = chars
        .next()
        .and_then(LineKind::from_marker)
        .ok_or_else(|| ParseError::MalformedHunkLine(raw.to_string()))?;
    let content = chars.as_str();

    let (source, target) = match kind {
        LineKind::Context => (Some(source_no), Some(target_no)),
        LineKind::Removed => (Some(source_no), None),
        LineKind::Added => (None, Some(target_no)),
        LineKind::NoNewlineMarker => (None, None),
    };

    Ok(Line::new(kind, content, source, target))
}

/// Strip a `\n` or `\r\n` terminator. A bare trailing `\r` is content.
fn strip_terminator(raw: &str) -> &str {
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_marker() {
        let added = classify_line("+x", 1, 1).unwrap();
        assert_eq!(added.kind, LineKind::Added);
        assert_eq!(added.source_line_no, None);
        assert_eq!(added.target_line_no, Some(1));

        let removed = classify_line("-x", 4, 2).unwrap();
        assert_eq!(removed.kind, LineKind::Removed);
        assert_eq!(removed.source_line_no, Some(4));
        assert_eq!(removed.target_line_no, None);

        let context = classify_line(" x", 4, 2).unwrap();
        assert_eq!(context.kind, LineKind::Context);
        assert_eq!(context.source_line_no, Some(4));
        assert_eq!(context.target_line_no, Some(2));

        let marker = classify_line("\\ No newline at end of file", 4, 2).unwrap();
        assert_eq!(marker.kind, LineKind::NoNewlineMarker);
        assert_eq!(marker.content, " No newline at end of file");
        assert_eq!(marker.source_line_no, None);
        assert_eq!(marker.target_line_no, None);
    }

    #[test]
    fn bare_marker_is_blank() {
        assert!(classify_line("+", 1, 1).unwrap().is_blank);
        assert!(classify_line("-\n", 1, 1).unwrap().is_blank);
        assert!(classify_line(" \r\n", 1, 1).unwrap().is_blank);
    }

    #[test]
    fn carriage_return_without_newline_is_content() {
        let line = classify_line("-old\r", 3, 3).unwrap();
        assert_eq!(line.content, "old\r");

        let blank = classify_line("+\r", 3, 3).unwrap();
        assert_eq!(blank.content, "\r");
        assert!(blank.is_blank);
    }

    #[test]
    fn whitespace_only_is_not_blank() {
        let line = classify_line("+   ", 1, 1).unwrap();
        assert!(!line.is_blank);
        assert_eq!(line.content, "   ");
    }

    #[test]
    fn trailing_whitespace_is_preserved() {
        let line = classify_line("-    hello() \n", 9, 9).unwrap();
        assert_eq!(line.content, "    hello() ");
    }

    #[test]
    fn rejects_unknown_marker() {
        let err = classify_line("@@ -1 +1 @@", 1, 1).unwrap_err();
        assert_eq!(err, ParseError::MalformedHunkLine("@@ -1 +1 @@".to_string()));
    }

    #[test]
    fn rejects_empty_line() {
        assert!(matches!(
            classify_line("", 1, 1),
            Err(ParseError::MalformedHunkLine(_))
        ));
    }
}
