//! Per-line match decisions
//!
//! [`decide`] is a pure function of the two line texts plus the two pieces of
//! state the driver carries between iterations: the last applicable style and
//! whether the previous target line was a translation.

use crate::classify::{classify, LineType};
use crate::key::normalize;

/// Everything the driver needs to know about one target line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchDecision {
    /// Classification of the target line
    pub line_type: LineType,
    /// Mirrors the caller's "previous line was a translation" flag
    pub should_advance_source: bool,
    /// Translation line with a retained style to copy
    pub should_follow_previous_style: bool,
    /// Source and target keys are equal
    pub lines_match: bool,
    /// A spacer line belongs after this line
    pub should_insert_spacer: bool,
}

/// Decide how to handle a target line against the current source line
///
/// `should_advance_source` is a pass-through of `last_was_secondary`. The
/// source cursor moves one iteration after the translation line that caused
/// it, never on the translation line itself.
pub fn decide<S>(
    source_text: &str,
    target_text: &str,
    previous_style: Option<&S>,
    last_was_secondary: bool,
) -> MatchDecision {
    let line_type = classify(target_text);
    let source_key = normalize(source_text);
    let target_key = normalize(target_text);

    MatchDecision {
        line_type,
        should_advance_source: last_was_secondary,
        should_follow_previous_style: line_type.is_translation() && previous_style.is_some(),
        lines_match: source_key == target_key,
        should_insert_spacer: line_type.is_translation(),
    }
}
