//! Per-line formatting report

use crate::cursor::{DocumentCursor, LineSource};
use crate::document::{Document, TextRange};
use crate::style::StyleSnapshot;
use linesync_core::{classify, LineType};
use serde::Serialize;

/// Formatting of one document line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineReport {
    /// 1-based line number among non-empty lines
    pub number: usize,
    /// Trimmed text
    pub text: String,
    /// Script classification
    pub line_type: LineType,
    /// Range of the owning paragraph
    pub range: TextRange,
    /// Captured formatting
    pub style: StyleSnapshot,
}

/// Report the first `max_lines` non-empty lines of `document`
pub fn inspect(document: &Document, max_lines: usize) -> Vec<LineReport> {
    let mut cursor = DocumentCursor::new(document);
    std::iter::from_fn(|| cursor.next_line())
        .take(max_lines)
        .enumerate()
        .map(|(i, line)| LineReport {
            number: i + 1,
            line_type: classify(&line.text),
            range: line.range,
            style: (*line.style).clone(),
            text: line.text,
        })
        .collect()
}
