//! Single-file transforms and migration hints.
//!
//! `imports` is the only transform that produces new source text; the
//! others report what a manual migration has to touch.

pub mod data_fetching;
pub mod image;
pub mod imports;
pub mod router;

use std::ops::Range;

/// Replace `range` of the original text with `text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TextEdit {
    pub range: Range<usize>,
    pub text: String,
}

/// Apply non-overlapping edits, back to front so earlier offsets stay valid.
pub(crate) fn apply_edits(source: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by(|a, b| b.range.start.cmp(&a.range.start));
    let mut out = source.to_string();
    for edit in edits {
        out.replace_range(edit.range, &edit.text);
    }
    out
}

/// 1-based line and column (in characters) of a byte offset.
pub(crate) fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
