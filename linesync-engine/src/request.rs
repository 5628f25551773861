//! Batch edit requests
//!
//! Requests follow the shape of a field-masked batch update API: every update
//! carries a comma separated `fields` mask naming the attributes it sets, and
//! attributes outside the mask are left untouched.

use crate::document::{
    Dimension, OptionalColor, ParagraphStyle, TextRange, TextStyle, WeightedFontFamily,
};
use crate::style::StyleSnapshot;
use serde::{Deserialize, Serialize};

/// Bullet preset used for checkbox lists
pub const CHECKBOX_PRESET: &str = "BULLET_CHECKBOX";

/// One edit in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    /// Set paragraph attributes over a range
    UpdateParagraphStyle(UpdateParagraphStyleRequest),
    /// Set character attributes over a range
    UpdateTextStyle(UpdateTextStyleRequest),
    /// Insert text at an index
    InsertText(InsertTextRequest),
    /// Remove a range of content
    DeleteContentRange(DeleteContentRangeRequest),
    /// Turn the paragraphs of a range into list items
    CreateParagraphBullets(CreateParagraphBulletsRequest),
}

/// Paragraph style update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyleRequest {
    /// Affected range
    pub range: TextRange,
    /// New attribute values
    pub paragraph_style: ParagraphStyle,
    /// Attributes to set
    pub fields: String,
}

/// Text style update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyleRequest {
    /// Affected range
    pub range: TextRange,
    /// New attribute values
    pub text_style: TextStyle,
    /// Attributes to set
    pub fields: String,
}

/// Insertion point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// UTF-16 index
    pub index: i64,
}

/// Text insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertTextRequest {
    /// Where to insert
    pub location: Location,
    /// Inserted text
    pub text: String,
}

/// Content deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteContentRangeRequest {
    /// Removed range
    pub range: TextRange,
}

/// Bullet creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParagraphBulletsRequest {
    /// Paragraphs to convert
    pub range: TextRange,
    /// Bullet preset name
    pub bullet_preset: String,
}

impl Request {
    /// Insert `text` at `index`
    pub fn insert_text(index: i64, text: impl Into<String>) -> Self {
        Request::InsertText(InsertTextRequest {
            location: Location { index },
            text: text.into(),
        })
    }

    /// Delete `range`
    pub fn delete_range(range: TextRange) -> Self {
        Request::DeleteContentRange(DeleteContentRangeRequest { range })
    }

    /// Checkbox bullets over `range`
    pub fn checkbox_bullets(range: TextRange) -> Self {
        Request::CreateParagraphBullets(CreateParagraphBulletsRequest {
            range,
            bullet_preset: CHECKBOX_PRESET.to_string(),
        })
    }

    /// Short name of the request kind
    pub fn kind(&self) -> &'static str {
        match self {
            Request::UpdateParagraphStyle(_) => "updateParagraphStyle",
            Request::UpdateTextStyle(_) => "updateTextStyle",
            Request::InsertText(_) => "insertText",
            Request::DeleteContentRange(_) => "deleteContentRange",
            Request::CreateParagraphBullets(_) => "createParagraphBullets",
        }
    }
}

impl StyleSnapshot {
    /// Requests that stamp this snapshot onto `range`
    ///
    /// Yields at most one paragraph style update and one text style update.
    /// Zero indents and font sizes are skipped, and boolean attributes are
    /// only set when true.
    pub fn to_requests(&self, range: TextRange) -> Vec<Request> {
        let mut requests = Vec::with_capacity(2);

        if self.has_paragraph_style() {
            let mut style = ParagraphStyle::default();
            let mut fields = Vec::new();

            if let Some(alignment) = self.alignment {
                style.alignment = Some(alignment);
                fields.push("alignment");
            }
            if let Some(indent) = non_zero(self.first_line_indent) {
                style.indent_first_line = Some(Dimension::points(indent));
                fields.push("indentFirstLine");
            }
            if let Some(indent) = non_zero(self.left_indent) {
                style.indent_start = Some(Dimension::points(indent));
                fields.push("indentStart");
            }
            if let Some(indent) = non_zero(self.right_indent) {
                style.indent_end = Some(Dimension::points(indent));
                fields.push("indentEnd");
            }

            if !fields.is_empty() {
                requests.push(Request::UpdateParagraphStyle(UpdateParagraphStyleRequest {
                    range,
                    paragraph_style: style,
                    fields: fields.join(","),
                }));
            }
        }

        if self.has_text_style() {
            let mut style = TextStyle::default();
            let mut fields = Vec::new();

            if let Some(family) = &self.font_family {
                style.weighted_font_family = Some(WeightedFontFamily {
                    font_family: family.clone(),
                    weight: None,
                });
                fields.push("weightedFontFamily");
            }
            if let Some(size) = non_zero(self.font_size) {
                style.font_size = Some(Dimension::points(size));
                fields.push("fontSize");
            }
            if self.bold {
                style.bold = true;
                fields.push("bold");
            }
            if self.italic {
                style.italic = true;
                fields.push("italic");
            }
            if self.underline {
                style.underline = true;
                fields.push("underline");
            }
            if let Some(color) = self.color {
                style.foreground_color = Some(OptionalColor::rgb(
                    color.red / 255.0,
                    color.green / 255.0,
                    color.blue / 255.0,
                ));
                fields.push("foregroundColor");
            }

            if !fields.is_empty() {
                requests.push(Request::UpdateTextStyle(UpdateTextStyleRequest {
                    range,
                    text_style: style,
                    fields: fields.join(","),
                }));
            }
        }

        requests
    }
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Alignment;
    use crate::style::Rgb;

    #[test]
    fn test_paragraph_and_text_requests() {
        let snapshot = StyleSnapshot {
            alignment: Some(Alignment::Center),
            first_line_indent: Some(0.0),
            left_indent: Some(18.0),
            font_family: Some("Arial".to_string()),
            font_size: Some(12.0),
            italic: true,
            color: Some(Rgb {
                red: 255.0,
                green: 0.0,
                blue: 51.0,
            }),
            ..StyleSnapshot::default()
        };

        let requests = snapshot.to_requests(TextRange::new(4, 9));
        assert_eq!(requests.len(), 2);

        match &requests[0] {
            Request::UpdateParagraphStyle(update) => {
                assert_eq!(update.fields, "alignment,indentStart");
                assert_eq!(update.range, TextRange::new(4, 9));
                assert_eq!(update.paragraph_style.indent_first_line, None);
            }
            other => panic!("unexpected request {other:?}"),
        }
        match &requests[1] {
            Request::UpdateTextStyle(update) => {
                assert_eq!(update.fields, "weightedFontFamily,fontSize,italic,foregroundColor");
                let rgb = update
                    .text_style
                    .foreground_color
                    .as_ref()
                    .and_then(|c| c.rgb_color())
                    .unwrap();
                assert_eq!(rgb.red, 1.0);
                assert_eq!(rgb.blue, 0.2);
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn test_empty_snapshot_yields_nothing() {
        assert!(StyleSnapshot::default()
            .to_requests(TextRange::new(1, 2))
            .is_empty());
    }

    #[test]
    fn test_bullet_only_snapshot_yields_nothing() {
        let snapshot = StyleSnapshot {
            bullet: Some(crate::style::BulletInfo {
                list_id: "kix.a".to_string(),
                nesting_level: 0,
            }),
            ..StyleSnapshot::default()
        };
        assert!(snapshot.to_requests(TextRange::new(1, 2)).is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(Request::insert_text(12, "\t\t")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"insertText": {"location": {"index": 12}, "text": "\t\t"}})
        );

        let json = serde_json::to_value(Request::checkbox_bullets(TextRange::new(1, 5))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"createParagraphBullets": {
                "range": {"startIndex": 1, "endIndex": 5},
                "bulletPreset": "BULLET_CHECKBOX"
            }})
        );
    }
}
