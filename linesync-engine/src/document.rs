//! Structural document model
//!
//! Mirrors the JSON shape of a structural document export: a body made of
//! structural elements, each optionally holding a paragraph of text runs.
//! All indices count UTF-16 code units, and the body conventionally starts at
//! index 1.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Index of the first character of a document body
pub const BODY_START: i64 = 1;

/// Length of a string in UTF-16 code units
pub fn utf16_len(text: &str) -> i64 {
    text.encode_utf16().count() as i64
}

/// Half-open range of UTF-16 indices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    /// First index covered
    pub start_index: i64,
    /// One past the last index covered
    pub end_index: i64,
}

impl TextRange {
    /// Create a range from its bounds
    pub fn new(start_index: i64, end_index: i64) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    /// Whether two half-open ranges share at least one index
    pub fn overlaps(&self, start_index: i64, end_index: i64) -> bool {
        start_index < self.end_index && self.start_index < end_index
    }
}

impl std::fmt::Display for TextRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{})", self.start_index, self.end_index)
    }
}

/// A whole document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document identifier
    #[serde(default)]
    pub document_id: String,
    /// Human readable title
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Document body
    #[serde(default)]
    pub body: Body,
}

/// Ordered body content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Structural elements in reading order
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// One structural element of the body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralElement {
    /// First index of the element
    #[serde(default)]
    pub start_index: i64,
    /// One past the last index of the element
    #[serde(default)]
    pub end_index: i64,
    /// Paragraph content, absent for section breaks and other structures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<Paragraph>,
}

impl StructuralElement {
    /// Range covered by this element
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start_index, self.end_index)
    }
}

/// A paragraph made of runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Paragraph elements (text runs)
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
    /// Paragraph-level style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_style: Option<ParagraphStyle>,
    /// List membership
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet: Option<Bullet>,
}

/// Element of a paragraph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    /// First index of the element
    #[serde(default)]
    pub start_index: i64,
    /// One past the last index of the element
    #[serde(default)]
    pub end_index: i64,
    /// Text content, absent for inline objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_run: Option<TextRun>,
}

/// Run of uniformly styled text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// Raw content, including the paragraph's trailing newline
    #[serde(default)]
    pub content: String,
    /// Character style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    /// Aligned to the start of the line
    Start,
    /// Centered
    Center,
    /// Aligned to the end of the line
    End,
    /// Justified
    Justified,
}

impl Alignment {
    /// Wire name of the alignment
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Start => "START",
            Alignment::Center => "CENTER",
            Alignment::End => "END",
            Alignment::Justified => "JUSTIFIED",
        }
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Magnitude with a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Magnitude
    #[serde(default)]
    pub magnitude: f64,
    /// Unit, normally `PT`
    #[serde(default = "Dimension::default_unit")]
    pub unit: String,
}

impl Dimension {
    /// Dimension in points
    pub fn points(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: Self::default_unit(),
        }
    }

    fn default_unit() -> String {
        "PT".to_string()
    }
}

/// Paragraph-level style
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    /// Alignment, unset means START
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// First line indent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_first_line: Option<Dimension>,
    /// Left indent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_start: Option<Dimension>,
    /// Right indent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_end: Option<Dimension>,
}

/// List membership of a paragraph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    /// List identifier
    #[serde(default)]
    pub list_id: String,
    /// Nesting level, 0 for top level
    #[serde(default)]
    pub nesting_level: i64,
}

/// Character style of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Bold
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    /// Italic
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    /// Underline
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
    /// Font size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    /// Font family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_font_family: Option<WeightedFontFamily>,
    /// Foreground colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
}

/// Font family with optional weight
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedFontFamily {
    /// Family name
    #[serde(default)]
    pub font_family: String,
    /// Font weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

/// Colour that may be unset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionalColor {
    /// The colour, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Colour value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    /// RGB components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb_color: Option<RgbColor>,
}

/// RGB components in 0.0..=1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    /// Red
    #[serde(default)]
    pub red: f64,
    /// Green
    #[serde(default)]
    pub green: f64,
    /// Blue
    #[serde(default)]
    pub blue: f64,
}

impl OptionalColor {
    /// Wrap RGB components
    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self {
            color: Some(Color {
                rgb_color: Some(RgbColor { red, green, blue }),
            }),
        }
    }

    /// RGB components, when set
    pub fn rgb_color(&self) -> Option<RgbColor> {
        self.color.as_ref().and_then(|color| color.rgb_color)
    }
}

impl TextRun {
    /// Unstyled run
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            text_style: None,
        }
    }

    /// Attach a character style
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.text_style = Some(style);
        self
    }
}

impl Paragraph {
    /// Single-run paragraph; a trailing newline is added when missing
    pub fn new(text: &str) -> Self {
        let content = if text.ends_with('\n') {
            text.to_string()
        } else {
            format!("{text}\n")
        };
        Self::from_runs(vec![TextRun::new(content)])
    }

    /// Paragraph from explicit runs
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self {
            elements: runs
                .into_iter()
                .map(|run| ParagraphElement {
                    start_index: 0,
                    end_index: 0,
                    text_run: Some(run),
                })
                .collect(),
            paragraph_style: None,
            bullet: None,
        }
    }

    /// Attach a paragraph style
    pub fn with_style(mut self, style: ParagraphStyle) -> Self {
        self.paragraph_style = Some(style);
        self
    }

    /// Apply one character style to every run
    pub fn with_text_style(mut self, style: TextStyle) -> Self {
        for run in self.text_runs_mut() {
            run.text_style = Some(style.clone());
        }
        self
    }

    /// Mark the paragraph as a list item
    pub fn with_bullet(mut self, bullet: Bullet) -> Self {
        self.bullet = Some(bullet);
        self
    }

    /// Text runs in order
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.elements.iter().filter_map(|e| e.text_run.as_ref())
    }

    fn text_runs_mut(&mut self) -> impl Iterator<Item = &mut TextRun> {
        self.elements.iter_mut().filter_map(|e| e.text_run.as_mut())
    }

    /// Concatenated content of all runs
    pub fn text(&self) -> String {
        self.text_runs().map(|run| run.content.as_str()).collect()
    }

    /// Trimmed non-blank lines with the UTF-16 offset where each line starts
    ///
    /// Offsets are relative to the paragraph start and point at the character
    /// after the preceding newline, so leading whitespace stays after them.
    pub fn lines(&self) -> Vec<(i64, String)> {
        let text = self.text();
        let mut lines = Vec::new();
        let mut offset = 0;
        for segment in text.split('\n') {
            let line = segment.trim();
            if !line.is_empty() {
                lines.push((offset, line.to_string()));
            }
            offset += utf16_len(segment) + 1;
        }
        lines
    }
}

impl Document {
    /// Empty document
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            ..Self::default()
        }
    }

    /// One paragraph per line of `text`
    pub fn from_plain_text(document_id: impl Into<String>, text: &str) -> Self {
        let mut document = Self::new(document_id);
        for line in text.lines() {
            document.push_paragraph(Paragraph::new(line));
        }
        document
    }

    /// Builder form of [`Document::push_paragraph`]
    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.push_paragraph(paragraph);
        self
    }

    /// Append a paragraph and recompute indices
    pub fn push_paragraph(&mut self, paragraph: Paragraph) {
        let start_index = self
            .body
            .content
            .last()
            .map_or(BODY_START, |element| element.end_index);
        self.body.content.push(StructuralElement {
            start_index,
            end_index: start_index,
            paragraph: Some(paragraph),
        });
        self.reindex();
    }

    /// Paragraph elements in reading order
    pub fn paragraphs(
        &self,
    ) -> impl DoubleEndedIterator<Item = (&StructuralElement, &Paragraph)> {
        self.body
            .content
            .iter()
            .filter_map(|element| element.paragraph.as_ref().map(|p| (element, p)))
    }

    /// Index one past the last character of the body
    pub fn end_index(&self) -> i64 {
        self.body
            .content
            .last()
            .map_or(BODY_START, |element| element.end_index)
    }

    /// Recompute every start and end index from run contents
    ///
    /// The first element keeps its start index. Elements without a paragraph
    /// keep their length.
    pub fn reindex(&mut self) {
        let mut index = self
            .body
            .content
            .first()
            .map_or(BODY_START, |element| element.start_index);

        for element in &mut self.body.content {
            let element_len = element.end_index - element.start_index;
            element.start_index = index;

            match element.paragraph.as_mut() {
                Some(paragraph) => {
                    for run in &mut paragraph.elements {
                        let run_len = match &run.text_run {
                            Some(text_run) => utf16_len(&text_run.content),
                            None => run.end_index - run.start_index,
                        };
                        run.start_index = index;
                        index += run_len;
                        run.end_index = index;
                    }
                }
                None => index += element_len,
            }

            element.end_index = index;
        }
    }

    /// Parse a document from its JSON export
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
