//! In-memory document editor
//!
//! Applies [`Request`]s to a [`Document`] the way a batch update backend
//! would. Style updates honour the request's field mask; insertions and
//! deletions edit run content and shift every later index by the UTF-16
//! length delta. A request either applies completely or leaves the document
//! untouched.

use crate::document::{utf16_len, Bullet, Document, ParagraphElement, TextRange, BODY_START};
use crate::error::SinkError;
use crate::request::{
    CreateParagraphBulletsRequest, Request, UpdateParagraphStyleRequest, UpdateTextStyleRequest,
};
use crate::sink::FormatSink;
use crate::style::StyleSnapshot;
use log::debug;
use std::str::FromStr;

/// Paragraph attributes addressable by a field mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParagraphField {
    Alignment,
    IndentFirstLine,
    IndentStart,
    IndentEnd,
}

impl FromStr for ParagraphField {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alignment" => Ok(Self::Alignment),
            "indentFirstLine" => Ok(Self::IndentFirstLine),
            "indentStart" => Ok(Self::IndentStart),
            "indentEnd" => Ok(Self::IndentEnd),
            other => Err(SinkError::UnsupportedField(other.to_string())),
        }
    }
}

/// Character attributes addressable by a field mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextField {
    WeightedFontFamily,
    FontSize,
    Bold,
    Italic,
    Underline,
    ForegroundColor,
}

impl FromStr for TextField {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weightedFontFamily" => Ok(Self::WeightedFontFamily),
            "fontSize" => Ok(Self::FontSize),
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            "underline" => Ok(Self::Underline),
            "foregroundColor" => Ok(Self::ForegroundColor),
            other => Err(SinkError::UnsupportedField(other.to_string())),
        }
    }
}

fn parse_fields<F: FromStr<Err = SinkError>>(mask: &str) -> Result<Vec<F>, SinkError> {
    mask.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(F::from_str)
        .collect()
}

/// Byte offset of the UTF-16 offset `units` within `text`
///
/// `index` is the absolute document index, used for error reporting.
fn byte_offset(text: &str, units: i64, index: i64) -> Result<usize, SinkError> {
    let mut seen = 0i64;
    for (byte, ch) in text.char_indices() {
        if seen == units {
            return Ok(byte);
        }
        seen += ch.len_utf16() as i64;
        if seen > units {
            return Err(SinkError::SplitsCharacter { index });
        }
    }
    if seen == units {
        Ok(text.len())
    } else {
        Err(SinkError::IndexOutOfRange { index })
    }
}

/// Applies edits to an owned document
#[derive(Debug, Clone)]
pub struct DocumentEditor {
    document: Document,
    applied: usize,
}

impl DocumentEditor {
    /// Take ownership of `document` for editing
    pub fn new(document: Document) -> Self {
        Self {
            document,
            applied: 0,
        }
    }

    /// Current state of the document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Finish editing
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Number of requests applied so far
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Apply requests in order, stopping at the first failure
    ///
    /// Returns the number of requests applied.
    pub fn apply_all(&mut self, requests: &[Request]) -> Result<usize, SinkError> {
        for request in requests {
            self.apply(request)?;
        }
        Ok(requests.len())
    }

    /// Apply one request
    pub fn apply(&mut self, request: &Request) -> Result<(), SinkError> {
        debug!("applying {} request", request.kind());
        match request {
            Request::UpdateParagraphStyle(update) => self.update_paragraph_style(update)?,
            Request::UpdateTextStyle(update) => self.update_text_style(update)?,
            Request::InsertText(insert) => self.insert(insert.location.index, &insert.text)?,
            Request::DeleteContentRange(delete) => self.delete(delete.range)?,
            Request::CreateParagraphBullets(create) => self.create_bullets(create)?,
        }
        self.applied += 1;
        Ok(())
    }

    fn body_start(&self) -> i64 {
        self.document
            .body
            .content
            .first()
            .map_or(BODY_START, |element| element.start_index)
    }

    fn check_range(&self, range: TextRange) -> Result<(), SinkError> {
        if range.start_index >= range.end_index {
            return Err(SinkError::InvalidRange {
                start: range.start_index,
                end: range.end_index,
            });
        }
        if range.start_index < self.body_start() {
            return Err(SinkError::IndexOutOfRange {
                index: range.start_index,
            });
        }
        if range.end_index > self.document.end_index() {
            return Err(SinkError::IndexOutOfRange {
                index: range.end_index,
            });
        }
        Ok(())
    }

    fn update_paragraph_style(
        &mut self,
        update: &UpdateParagraphStyleRequest,
    ) -> Result<(), SinkError> {
        self.check_range(update.range)?;
        let fields: Vec<ParagraphField> = parse_fields(&update.fields)?;
        let source = &update.paragraph_style;

        for element in &mut self.document.body.content {
            if !update
                .range
                .overlaps(element.start_index, element.end_index)
            {
                continue;
            }
            let Some(paragraph) = element.paragraph.as_mut() else {
                continue;
            };

            let style = paragraph.paragraph_style.get_or_insert_with(Default::default);
            for field in &fields {
                match field {
                    ParagraphField::Alignment => style.alignment = source.alignment,
                    ParagraphField::IndentFirstLine => {
                        style.indent_first_line = source.indent_first_line.clone()
                    }
                    ParagraphField::IndentStart => style.indent_start = source.indent_start.clone(),
                    ParagraphField::IndentEnd => style.indent_end = source.indent_end.clone(),
                }
            }
        }
        Ok(())
    }

    fn update_text_style(&mut self, update: &UpdateTextStyleRequest) -> Result<(), SinkError> {
        self.check_range(update.range)?;
        let fields: Vec<TextField> = parse_fields(&update.fields)?;
        let source = &update.text_style;
        let range = update.range;

        let mut document = self.document.clone();
        for element in &mut document.body.content {
            if !range.overlaps(element.start_index, element.end_index) {
                continue;
            }
            let Some(paragraph) = element.paragraph.as_mut() else {
                continue;
            };

            let mut elements = Vec::with_capacity(paragraph.elements.len());
            for run_element in paragraph.elements.drain(..) {
                let overlaps = range.overlaps(run_element.start_index, run_element.end_index);
                match run_element.text_run {
                    Some(run) if overlaps => {
                        let start = range.start_index.max(run_element.start_index);
                        let end = range.end_index.min(run_element.end_index);
                        let head = byte_offset(
                            &run.content,
                            start - run_element.start_index,
                            start,
                        )?;
                        let tail =
                            byte_offset(&run.content, end - run_element.start_index, end)?;

                        let mut styled = run.clone();
                        styled.content = run.content[head..tail].to_string();
                        let style = styled.text_style.get_or_insert_with(Default::default);
                        for field in &fields {
                            match field {
                                TextField::WeightedFontFamily => {
                                    style.weighted_font_family = source.weighted_font_family.clone()
                                }
                                TextField::FontSize => style.font_size = source.font_size.clone(),
                                TextField::Bold => style.bold = source.bold,
                                TextField::Italic => style.italic = source.italic,
                                TextField::Underline => style.underline = source.underline,
                                TextField::ForegroundColor => {
                                    style.foreground_color = source.foreground_color.clone()
                                }
                            }
                        }

                        let mut before = run.clone();
                        before.content = run.content[..head].to_string();
                        let mut after = run;
                        after.content = after.content[tail..].to_string();

                        for piece in [before, styled, after] {
                            if !piece.content.is_empty() {
                                elements.push(ParagraphElement {
                                    text_run: Some(piece),
                                    ..ParagraphElement::default()
                                });
                            }
                        }
                    }
                    text_run => elements.push(ParagraphElement {
                        text_run,
                        ..run_element
                    }),
                }
            }
            paragraph.elements = elements;
        }

        document.reindex();
        self.document = document;
        Ok(())
    }

    /// Insert `text` at `index`
    ///
    /// The text joins the run containing `index`. Insertion at the very end
    /// of the body lands before the final newline.
    fn insert(&mut self, index: i64, text: &str) -> Result<(), SinkError> {
        if text.is_empty() {
            return Err(SinkError::Rejected("inserted text is empty".to_string()));
        }
        if index < self.body_start() || index > self.document.end_index() {
            return Err(SinkError::IndexOutOfRange { index });
        }

        let end_index = self.document.end_index();
        let mut target = None;
        let mut last_run = None;
        for (e, element) in self.document.body.content.iter().enumerate() {
            let Some(paragraph) = &element.paragraph else {
                continue;
            };
            for (r, run_element) in paragraph.elements.iter().enumerate() {
                let Some(run) = &run_element.text_run else {
                    continue;
                };
                if run_element.start_index <= index && index < run_element.end_index {
                    let offset = byte_offset(&run.content, index - run_element.start_index, index)?;
                    target = Some((e, r, offset));
                    break;
                }
                let before_newline = run.content.strip_suffix('\n').unwrap_or(&run.content);
                last_run = Some((e, r, before_newline.len(), run_element.end_index));
            }
            if target.is_some() {
                break;
            }
        }

        let target = match (target, last_run) {
            (Some(found), _) => found,
            (None, Some((e, r, offset, run_end))) if index == end_index && run_end == end_index => {
                (e, r, offset)
            }
            _ => return Err(SinkError::IndexOutOfRange { index }),
        };

        let (e, r, offset) = target;
        if let Some(run) = self.document.body.content[e]
            .paragraph
            .as_mut()
            .and_then(|paragraph| paragraph.elements[r].text_run.as_mut())
        {
            run.content.insert_str(offset, text);
        }
        self.document.reindex();
        debug!("inserted {} units at {}", utf16_len(text), index);
        Ok(())
    }

    fn delete(&mut self, range: TextRange) -> Result<(), SinkError> {
        self.check_range(range)?;
        let body_start = self.body_start();

        let mut document = self.document.clone();
        for element in &mut document.body.content {
            if !range.overlaps(element.start_index, element.end_index) {
                continue;
            }
            let Some(paragraph) = element.paragraph.as_mut() else {
                continue;
            };

            for run_element in &mut paragraph.elements {
                if !range.overlaps(run_element.start_index, run_element.end_index) {
                    continue;
                }
                let Some(run) = run_element.text_run.as_mut() else {
                    continue;
                };
                let start = range.start_index.max(run_element.start_index);
                let end = range.end_index.min(run_element.end_index);
                let head = byte_offset(&run.content, start - run_element.start_index, start)?;
                let tail = byte_offset(&run.content, end - run_element.start_index, end)?;
                run.content.replace_range(head..tail, "");
            }

            paragraph.elements.retain(|run_element| {
                run_element
                    .text_run
                    .as_ref()
                    .map_or(true, |run| !run.content.is_empty())
            });
        }

        document.body.content.retain(|element| {
            element
                .paragraph
                .as_ref()
                .map_or(true, |paragraph| !paragraph.elements.is_empty())
        });
        if let Some(first) = document.body.content.first_mut() {
            let shift = first.start_index - body_start;
            first.start_index -= shift;
            first.end_index -= shift;
        }
        document.reindex();
        self.document = document;
        Ok(())
    }

    fn create_bullets(&mut self, create: &CreateParagraphBulletsRequest) -> Result<(), SinkError> {
        self.check_range(create.range)?;
        if create.bullet_preset.is_empty() {
            return Err(SinkError::Rejected("bullet preset is empty".to_string()));
        }

        let list_id = format!("list.{}", create.range.start_index);
        for element in &mut self.document.body.content {
            if !create
                .range
                .overlaps(element.start_index, element.end_index)
            {
                continue;
            }
            if let Some(paragraph) = element.paragraph.as_mut() {
                paragraph.bullet.get_or_insert_with(|| Bullet {
                    list_id: list_id.clone(),
                    nesting_level: 0,
                });
            }
        }
        Ok(())
    }
}

impl FormatSink for DocumentEditor {
    fn apply_style(
        &mut self,
        range: TextRange,
        snapshot: &StyleSnapshot,
    ) -> Result<(), SinkError> {
        // a failed text style must not leave the paragraph style behind
        let mut staged = DocumentEditor::new(self.document.clone());
        staged.apply_all(&snapshot.to_requests(range))?;
        self.document = staged.document;
        self.applied += staged.applied;
        Ok(())
    }

    fn insert_text(&mut self, index: i64, text: &str) -> Result<(), SinkError> {
        self.apply(&Request::insert_text(index, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Alignment, Dimension, Paragraph, ParagraphStyle, TextRun, TextStyle};

    fn editor(text: &str) -> DocumentEditor {
        DocumentEditor::new(Document::from_plain_text("doc", text))
    }

    fn texts(editor: &DocumentEditor) -> Vec<String> {
        editor
            .document()
            .paragraphs()
            .map(|(_, paragraph)| paragraph.text())
            .collect()
    }

    #[test]
    fn test_paragraph_style_honours_mask() {
        let mut editor = editor("One\nTwo\nThree");
        let request = Request::UpdateParagraphStyle(UpdateParagraphStyleRequest {
            range: TextRange::new(5, 9),
            paragraph_style: ParagraphStyle {
                alignment: Some(Alignment::Center),
                indent_start: Some(Dimension::points(36.0)),
                ..ParagraphStyle::default()
            },
            fields: "alignment".to_string(),
        });

        editor.apply(&request).unwrap();

        let styles: Vec<_> = editor
            .document()
            .paragraphs()
            .map(|(_, p)| p.paragraph_style.clone())
            .collect();
        assert_eq!(styles[0], None);
        let second = styles[1].as_ref().unwrap();
        assert_eq!(second.alignment, Some(Alignment::Center));
        assert_eq!(second.indent_start, None);
        assert_eq!(styles[2], None);
        assert_eq!(editor.applied(), 1);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut editor = editor("One");
        let request = Request::UpdateTextStyle(UpdateTextStyleRequest {
            range: TextRange::new(1, 4),
            text_style: TextStyle::default(),
            fields: "bold,smallCaps".to_string(),
        });

        assert_eq!(
            editor.apply(&request),
            Err(SinkError::UnsupportedField("smallCaps".to_string()))
        );
        assert_eq!(editor.applied(), 0);
    }

    #[test]
    fn test_text_style_splits_runs() {
        let mut editor = editor("Hello world");
        let request = Request::UpdateTextStyle(UpdateTextStyleRequest {
            range: TextRange::new(7, 12),
            text_style: TextStyle {
                bold: true,
                ..TextStyle::default()
            },
            fields: "bold".to_string(),
        });

        editor.apply(&request).unwrap();

        let (_, paragraph) = editor.document().paragraphs().next().unwrap();
        let runs: Vec<_> = paragraph
            .text_runs()
            .map(|run| {
                (
                    run.content.as_str(),
                    run.text_style.as_ref().map_or(false, |s| s.bold),
                )
            })
            .collect();
        assert_eq!(runs, vec![("Hello ", false), ("world", true), ("\n", false)]);
        assert_eq!(paragraph.elements[1].start_index, 7);
    }

    #[test]
    fn test_insert_shifts_later_indices() {
        let mut editor = editor("One\nTwo");
        editor.insert_text(5, "\t\t").unwrap();

        assert_eq!(texts(&editor), vec!["One\n", "\t\tTwo\n"]);
        let ranges: Vec<_> = editor
            .document()
            .body
            .content
            .iter()
            .map(|e| e.range())
            .collect();
        assert_eq!(ranges, vec![TextRange::new(1, 5), TextRange::new(5, 11)]);
    }

    #[test]
    fn test_insert_at_end_lands_before_final_newline() {
        let mut editor = editor("One");
        editor.insert_text(5, "\n").unwrap();
        assert_eq!(texts(&editor), vec!["One\n\n"]);
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut editor = editor("One");
        assert_eq!(
            editor.insert_text(9, "x"),
            Err(SinkError::IndexOutOfRange { index: 9 })
        );
        assert_eq!(
            editor.insert_text(0, "x"),
            Err(SinkError::IndexOutOfRange { index: 0 })
        );
    }

    #[test]
    fn test_insert_inside_surrogate_pair_fails() {
        let mut editor = DocumentEditor::new(
            Document::new("doc").with_paragraph(Paragraph::new("😀x")),
        );
        assert_eq!(
            editor.insert_text(2, "y"),
            Err(SinkError::SplitsCharacter { index: 2 })
        );
        assert_eq!(texts(&editor), vec!["😀x\n"]);
    }

    #[test]
    fn test_delete_range() {
        let mut editor = DocumentEditor::new(Document::new("doc").with_paragraph(
            Paragraph::from_runs(vec![TextRun::new("  ·"), TextRun::new("Item\n")]),
        ));
        editor
            .apply(&Request::delete_range(TextRange::new(3, 4)))
            .unwrap();

        assert_eq!(texts(&editor), vec!["  Item\n"]);
        assert_eq!(editor.document().end_index(), 8);
    }

    #[test]
    fn test_delete_whole_paragraph() {
        let mut editor = editor("One\nTwo");
        editor
            .apply(&Request::delete_range(TextRange::new(1, 5)))
            .unwrap();

        assert_eq!(texts(&editor), vec!["Two\n"]);
        assert_eq!(editor.document().body.content[0].range(), TextRange::new(1, 5));
    }

    #[test]
    fn test_reversed_range_is_invalid() {
        let mut editor = editor("One");
        assert_eq!(
            editor.apply(&Request::delete_range(TextRange::new(3, 2))),
            Err(SinkError::InvalidRange { start: 3, end: 2 })
        );
    }

    #[test]
    fn test_create_bullets() {
        let mut editor = editor("One\nTwo\nThree");
        editor
            .apply(&Request::checkbox_bullets(TextRange::new(5, 9)))
            .unwrap();

        let bullets: Vec<_> = editor
            .document()
            .paragraphs()
            .map(|(_, p)| p.bullet.as_ref().map(|b| b.list_id.clone()))
            .collect();
        assert_eq!(bullets, vec![None, Some("list.5".to_string()), None]);
    }

    #[test]
    fn test_apply_style_through_sink() {
        let mut editor = editor("Heading");
        let snapshot = StyleSnapshot {
            alignment: Some(Alignment::End),
            font_size: Some(20.0),
            ..StyleSnapshot::default()
        };

        editor.apply_style(TextRange::new(1, 9), &snapshot).unwrap();

        let (_, paragraph) = editor.document().paragraphs().next().unwrap();
        assert_eq!(
            paragraph.paragraph_style.as_ref().unwrap().alignment,
            Some(Alignment::End)
        );
        let run = paragraph.text_runs().next().unwrap();
        assert_eq!(
            run.text_style.as_ref().unwrap().font_size,
            Some(Dimension::points(20.0))
        );
        assert_eq!(editor.applied(), 2);
    }

    #[test]
    fn test_byte_offset() {
        assert_eq!(byte_offset("a遗b", 2, 0), Ok(4));
        assert_eq!(byte_offset("ab", 2, 0), Ok(2));
        assert_eq!(
            byte_offset("ab", 3, 7),
            Err(SinkError::IndexOutOfRange { index: 7 })
        );
    }

    #[test]
    fn test_apply_style_is_all_or_nothing() {
        let mut editor = editor("😀");
        let snapshot = StyleSnapshot {
            alignment: Some(Alignment::Center),
            bold: true,
            ..StyleSnapshot::default()
        };

        assert_eq!(
            editor.apply_style(TextRange::new(1, 2), &snapshot),
            Err(SinkError::SplitsCharacter { index: 2 })
        );
        let (_, paragraph) = editor.document().paragraphs().next().unwrap();
        assert_eq!(paragraph.paragraph_style, None);
        assert_eq!(editor.applied(), 0);

        editor.apply_style(TextRange::new(1, 3), &snapshot).unwrap();
        let (_, paragraph) = editor.document().paragraphs().next().unwrap();
        assert_eq!(
            paragraph.paragraph_style.as_ref().unwrap().alignment,
            Some(Alignment::Center)
        );
        assert_eq!(editor.applied(), 2);
    }
}
