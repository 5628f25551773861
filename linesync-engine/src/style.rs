//! Formatting snapshots
//!
//! A [`StyleSnapshot`] flattens the paragraph style, the list membership and
//! the first styled run of a line into one immutable value that can be copied
//! onto another line.

use crate::document::{Alignment, Paragraph, TextRun};
use serde::{Deserialize, Serialize};

/// RGB colour with components in 0.0..=255.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red
    pub red: f64,
    /// Green
    pub green: f64,
    /// Blue
    pub blue: f64,
}

/// List membership captured with a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletInfo {
    /// List identifier
    pub list_id: String,
    /// Nesting level
    pub nesting_level: i64,
}

/// Formatting features of one line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSnapshot {
    /// Paragraph alignment; START when the paragraph has a style but no alignment
    pub alignment: Option<Alignment>,
    /// First line indent in points
    pub first_line_indent: Option<f64>,
    /// Left indent in points
    pub left_indent: Option<f64>,
    /// Right indent in points
    pub right_indent: Option<f64>,
    /// Font family
    pub font_family: Option<String>,
    /// Font size in points
    pub font_size: Option<f64>,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Underline
    pub underline: bool,
    /// Foreground colour
    pub color: Option<Rgb>,
    /// List membership
    pub bullet: Option<BulletInfo>,
    /// Number of tab characters leading the line
    pub leading_tabs: usize,
}

impl StyleSnapshot {
    /// Capture the style of a paragraph and its first non-blank run
    pub fn capture(paragraph: &Paragraph) -> Self {
        let first_run = first_text_run(paragraph);
        let mut snapshot = StyleSnapshot {
            leading_tabs: leading_tabs(paragraph),
            ..Self::default()
        };

        if let Some(style) = &paragraph.paragraph_style {
            snapshot.alignment = Some(style.alignment.unwrap_or(Alignment::Start));
            snapshot.first_line_indent = style.indent_first_line.as_ref().map(|d| d.magnitude);
            snapshot.left_indent = style.indent_start.as_ref().map(|d| d.magnitude);
            snapshot.right_indent = style.indent_end.as_ref().map(|d| d.magnitude);

            snapshot.bullet = paragraph.bullet.as_ref().map(|bullet| BulletInfo {
                list_id: bullet.list_id.clone(),
                nesting_level: bullet.nesting_level,
            });
        }

        if let Some(text_style) = first_run.and_then(|run| run.text_style.as_ref()) {
            snapshot.font_family = text_style
                .weighted_font_family
                .as_ref()
                .map(|family| family.font_family.clone())
                .filter(|family| !family.is_empty());
            snapshot.font_size = text_style.font_size.as_ref().map(|d| d.magnitude);
            snapshot.bold = text_style.bold;
            snapshot.italic = text_style.italic;
            snapshot.underline = text_style.underline;
            snapshot.color = text_style
                .foreground_color
                .as_ref()
                .and_then(|color| color.rgb_color())
                .map(|rgb| Rgb {
                    red: rgb.red * 255.0,
                    green: rgb.green * 255.0,
                    blue: rgb.blue * 255.0,
                });
        }

        snapshot
    }

    /// Whether the snapshot carries any paragraph-level attribute
    pub fn has_paragraph_style(&self) -> bool {
        self.alignment.is_some()
            || self.first_line_indent.is_some()
            || self.left_indent.is_some()
            || self.right_indent.is_some()
            || self.bullet.is_some()
    }

    /// Whether the snapshot carries any character-level attribute
    pub fn has_text_style(&self) -> bool {
        self.font_family.is_some()
            || self.font_size.is_some()
            || self.bold
            || self.italic
            || self.underline
            || self.color.is_some()
    }
}

/// First run with non-whitespace content
pub fn first_text_run(paragraph: &Paragraph) -> Option<&TextRun> {
    paragraph
        .text_runs()
        .find(|run| !run.content.trim().is_empty())
}

/// Count the tabs leading a paragraph
///
/// Tabs inside whitespace-only runs before the first non-blank run count, as
/// do the consecutive tabs the first non-blank run starts with.
pub fn leading_tabs(paragraph: &Paragraph) -> usize {
    let mut tabs = 0;
    for run in paragraph.text_runs() {
        if run.content.trim().is_empty() {
            tabs += run.content.matches('\t').count();
            continue;
        }
        return tabs + run.content.chars().take_while(|&ch| ch == '\t').count();
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{
        Bullet, Dimension, OptionalColor, ParagraphStyle, TextStyle, WeightedFontFamily,
    };

    fn styled_paragraph() -> Paragraph {
        Paragraph::from_runs(vec![
            TextRun::new("\t"),
            TextRun::new("\tHeading").with_style(TextStyle {
                bold: true,
                font_size: Some(Dimension::points(18.0)),
                weighted_font_family: Some(WeightedFontFamily {
                    font_family: "Georgia".to_string(),
                    weight: None,
                }),
                foreground_color: Some(OptionalColor::rgb(1.0, 0.0, 0.5)),
                ..TextStyle::default()
            }),
            TextRun::new(" rest\n"),
        ])
        .with_style(ParagraphStyle {
            alignment: None,
            indent_start: Some(Dimension::points(36.0)),
            ..ParagraphStyle::default()
        })
        .with_bullet(Bullet {
            list_id: "kix.list".to_string(),
            nesting_level: 2,
        })
    }

    #[test]
    fn test_capture_full_style() {
        let snapshot = StyleSnapshot::capture(&styled_paragraph());

        assert_eq!(snapshot.alignment, Some(Alignment::Start));
        assert_eq!(snapshot.left_indent, Some(36.0));
        assert_eq!(snapshot.first_line_indent, None);
        assert_eq!(snapshot.font_family.as_deref(), Some("Georgia"));
        assert_eq!(snapshot.font_size, Some(18.0));
        assert!(snapshot.bold);
        assert!(!snapshot.italic);
        assert_eq!(
            snapshot.color,
            Some(Rgb {
                red: 255.0,
                green: 0.0,
                blue: 127.5
            })
        );
        assert_eq!(snapshot.bullet.as_ref().unwrap().nesting_level, 2);
        assert_eq!(snapshot.leading_tabs, 2);
        assert!(snapshot.has_paragraph_style());
        assert!(snapshot.has_text_style());
    }

    #[test]
    fn test_capture_unstyled_paragraph() {
        let snapshot = StyleSnapshot::capture(&Paragraph::new("Plain line"));

        assert_eq!(snapshot, StyleSnapshot::default());
        assert!(!snapshot.has_paragraph_style());
        assert!(!snapshot.has_text_style());
    }

    #[test]
    fn test_leading_tabs() {
        assert_eq!(leading_tabs(&Paragraph::new("\t\tIndented")), 2);
        assert_eq!(leading_tabs(&Paragraph::new(" \tNot leading")), 0);
        assert_eq!(leading_tabs(&Paragraph::new("\t\t\n")), 0);
        assert_eq!(leading_tabs(&Paragraph::new("No tabs")), 0);
    }
}
