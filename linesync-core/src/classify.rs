//! Line classification by script
//!
//! A target line is either an anchor in the primary script (Latin), a
//! translation in the secondary script (CJK Unified Ideographs), a mix of both,
//! or carries no letters at all.

use crate::key;

/// First code point of the secondary script range (CJK Unified Ideographs)
pub const SECONDARY_SCRIPT_START: char = '\u{4E00}';

/// Last code point of the secondary script range
pub const SECONDARY_SCRIPT_END: char = '\u{9FFF}';

/// Kind of content carried by a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LineType {
    /// Primary script only; expected to match a source line
    Primary,
    /// Secondary script only
    Secondary,
    /// Both scripts present
    Mixed,
    /// No letters of either script
    Empty,
}

impl LineType {
    /// Secondary and mixed lines have no counterpart in the source document
    #[inline]
    pub fn is_translation(self) -> bool {
        matches!(self, LineType::Secondary | LineType::Mixed)
    }

    /// Stable label used in logs and reports
    pub fn strategy_name(self) -> &'static str {
        match self {
            LineType::Primary => "primary_match",
            LineType::Secondary => "secondary_translation",
            LineType::Mixed => "mixed_content",
            LineType::Empty => "empty_line",
        }
    }
}

impl std::fmt::Display for LineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.strategy_name())
    }
}

/// Check whether a character belongs to the secondary script
#[inline]
pub fn is_secondary_char(ch: char) -> bool {
    (SECONDARY_SCRIPT_START..=SECONDARY_SCRIPT_END).contains(&ch)
}

/// Check whether any character of the text is in the secondary script
pub fn contains_secondary(text: &str) -> bool {
    text.chars().any(is_secondary_char)
}

/// Check whether the first non-whitespace character is in the secondary script
pub fn starts_with_secondary(text: &str) -> bool {
    text.chars()
        .find(|&ch| !matches!(ch, ' ' | '\t' | '\n' | '\r'))
        .is_some_and(is_secondary_char)
}

/// Classify a line by the scripts it contains
pub fn classify(text: &str) -> LineType {
    if text.trim().is_empty() {
        return LineType::Empty;
    }

    let has_secondary = contains_secondary(text);
    let has_primary = key::is_primary(text);

    match (has_primary, has_secondary) {
        (true, true) => LineType::Mixed,
        (false, true) => LineType::Secondary,
        (true, false) => LineType::Primary,
        (false, false) => LineType::Empty,
    }
}
