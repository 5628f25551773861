//! Whole-document maintenance passes
//!
//! Each pass inspects a document and produces the batch of requests that
//! performs it. Passes that change text emit their requests last paragraph
//! first so every index stays valid while the batch is applied in order.

use crate::document::{utf16_len, Alignment, Document, ParagraphStyle, TextRange};
use crate::request::{Request, UpdateParagraphStyleRequest};
use linesync_core::starts_with_secondary;

/// Marker character turned into a checkbox bullet
pub const BULLET_MARKER: char = '·';

/// Available maintenance passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenancePass {
    /// Empty line after every line starting with the secondary script
    AddSpacing,
    /// `·`-prefixed lines become checkbox bullets
    Bullets,
    /// Center every paragraph
    Center,
    /// One tab at the start of every line with visible text
    Indent,
}

impl MaintenancePass {
    /// Requests performing this pass on `document`
    pub fn requests(self, document: &Document) -> Vec<Request> {
        match self {
            MaintenancePass::AddSpacing => spacing_requests(document),
            MaintenancePass::Bullets => bullet_requests(document),
            MaintenancePass::Center => center_requests(document),
            MaintenancePass::Indent => indent_requests(document),
        }
    }

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            MaintenancePass::AddSpacing => "add-spacing",
            MaintenancePass::Bullets => "bullets",
            MaintenancePass::Center => "center",
            MaintenancePass::Indent => "indent",
        }
    }
}

/// Insert an empty line after each paragraph starting with the secondary script
pub fn spacing_requests(document: &Document) -> Vec<Request> {
    document
        .paragraphs()
        .rev()
        .filter(|(_, paragraph)| {
            let text = paragraph.text();
            let text = text.trim();
            !text.is_empty() && starts_with_secondary(text)
        })
        .map(|(element, _)| Request::insert_text(element.end_index, "\n"))
        .collect()
}

/// Convert `·`-prefixed paragraphs into checkbox bullets
///
/// Only the first non-whitespace character of a paragraph is considered.
/// Each match yields a bullet creation over the paragraph followed by the
/// deletion of the marker.
pub fn bullet_requests(document: &Document) -> Vec<Request> {
    let mut requests = Vec::new();

    for (element, paragraph) in document.paragraphs().rev() {
        let marker = paragraph
            .elements
            .iter()
            .filter_map(|run_element| {
                run_element
                    .text_run
                    .as_ref()
                    .map(|run| (run_element.start_index, run.content.as_str()))
            })
            .find_map(|(start_index, content)| {
                let (offset, ch) = content.char_indices().find(|(_, ch)| !ch.is_whitespace())?;
                Some((start_index + utf16_len(&content[..offset]), ch))
            });

        let Some((index, BULLET_MARKER)) = marker else {
            continue;
        };

        requests.push(Request::checkbox_bullets(element.range()));
        requests.push(Request::delete_range(TextRange::new(
            index,
            index + BULLET_MARKER.len_utf16() as i64,
        )));
    }

    requests
}

/// Center-align every paragraph
pub fn center_requests(document: &Document) -> Vec<Request> {
    document
        .paragraphs()
        .map(|(element, _)| {
            Request::UpdateParagraphStyle(UpdateParagraphStyleRequest {
                range: element.range(),
                paragraph_style: ParagraphStyle {
                    alignment: Some(Alignment::Center),
                    ..ParagraphStyle::default()
                },
                fields: "alignment".to_string(),
            })
        })
        .collect()
}

/// Insert one tab at the start of every line with visible text
///
/// Paragraphs holding several lines, such as those left behind by the
/// spacing pass, get one tab per line rather than one at the paragraph start.
pub fn indent_requests(document: &Document) -> Vec<Request> {
    document
        .paragraphs()
        .rev()
        .flat_map(|(element, paragraph)| {
            paragraph
                .lines()
                .into_iter()
                .rev()
                .map(move |(offset, _)| {
                    Request::insert_text(element.start_index + offset, "\t")
                })
        })
        .collect()
}
