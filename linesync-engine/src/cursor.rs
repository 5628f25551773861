//! Line cursors over documents
//!
//! A cursor walks a document in reading order and yields trimmed, non-empty
//! lines. Paragraphs containing embedded newlines yield one line per
//! non-empty segment. Segments share the paragraph's range and style but
//! each records where its own text starts.

use crate::document::{Document, TextRange};
use crate::style::StyleSnapshot;
use std::rc::Rc;

/// One non-empty line pulled from a document
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Trimmed text
    pub text: String,
    /// Index of the first character of the line
    pub start_index: i64,
    /// Range of the owning structural element
    pub range: TextRange,
    /// Formatting captured from the owning paragraph
    pub style: Rc<StyleSnapshot>,
}

/// Source of lines in reading order
pub trait LineSource {
    /// Next non-empty line, or `None` once exhausted
    ///
    /// Keeps returning `None` after exhaustion.
    fn next_line(&mut self) -> Option<Line>;

    /// Restart from the beginning of the document
    fn rewind(&mut self);
}

/// Position within a document
#[derive(Debug, Clone)]
pub struct DocumentCursor<'a> {
    document: &'a Document,
    element_index: usize,
    line_index: usize,
}

impl<'a> DocumentCursor<'a> {
    /// Cursor at the start of `document`
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            element_index: 0,
            line_index: 0,
        }
    }

    /// Index of the structural element the cursor points into
    pub fn element_index(&self) -> usize {
        self.element_index
    }

    /// Index of the next line within the current paragraph
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// Whether the cursor has passed the last element
    pub fn is_exhausted(&self) -> bool {
        self.element_index >= self.document.body.content.len()
    }
}

impl LineSource for DocumentCursor<'_> {
    fn next_line(&mut self) -> Option<Line> {
        let content = &self.document.body.content;

        while let Some(element) = content.get(self.element_index) {
            if let Some(paragraph) = &element.paragraph {
                let lines = paragraph.lines();
                if let Some((offset, text)) = lines.get(self.line_index) {
                    let found = Line {
                        text: text.clone(),
                        start_index: element.start_index + offset,
                        range: element.range(),
                        style: Rc::new(StyleSnapshot::capture(paragraph)),
                    };
                    self.line_index += 1;
                    if self.line_index >= lines.len() {
                        self.element_index += 1;
                        self.line_index = 0;
                    }
                    return Some(found);
                }
            }

            self.element_index += 1;
            self.line_index = 0;
        }

        None
    }

    fn rewind(&mut self) {
        self.element_index = 0;
        self.line_index = 0;
    }
}
