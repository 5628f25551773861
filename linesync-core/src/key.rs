//! Comparison keys for anchor lines
//!
//! A key is the part of a line that must survive verbatim between the source
//! and the target document. It starts at the first ASCII letter, drops all
//! whitespace and folds ASCII case. Punctuation and digits after the first
//! letter are kept, so `"Title: \"X\""` and `"Title: X"` never collide.

/// Whitespace characters removed from keys
#[inline]
fn is_key_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Build the normalized comparison key for a line
///
/// Returns an empty string when the line has no ASCII letter at all, which is
/// also how the classifier decides that a line carries no primary script.
///
/// A single character followed by a dot at the start of the key (`a.`, `b.`)
/// is treated as an enumeration marker and dropped.
pub fn normalize(text: &str) -> String {
    let Some(start) = text.find(|ch: char| ch.is_ascii_alphabetic()) else {
        return String::new();
    };

    let mut key: String = text[start..]
        .chars()
        .filter(|&ch| !is_key_whitespace(ch))
        .collect();
    key.make_ascii_lowercase();

    // The first char is an ASCII letter, so byte index 1 is a char boundary
    if key.as_bytes().get(1) == Some(&b'.') {
        key.drain(..2);
    }

    key
}

/// Whether a line contains primary-script content
///
/// Shared by the classifier so both agree on what "primary" means.
#[inline]
pub fn is_primary(text: &str) -> bool {
    !normalize(text).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_text() {
        assert_eq!(normalize("Heritage Baptist Church"), "heritagebaptistchurch");
    }

    #[test]
    fn test_punctuation_is_kept() {
        assert_eq!(
            normalize("Title: \"Jesus Christ, the Same\""),
            "title:\"jesuschrist,thesame\""
        );
    }

    #[test]
    fn test_enumeration_prefixes() {
        assert_eq!(normalize("1. First Point"), "firstpoint");
        assert_eq!(normalize("a. Point One"), "pointone");
        assert_eq!(normalize("1. Point One"), "pointone");
        assert_eq!(normalize("First Point"), "firstpoint");
    }

    #[test]
    fn test_leading_secondary_script_is_ignored() {
        assert_eq!(normalize("遗产 Heritage Baptist"), "heritagebaptist");
    }

    #[test]
    fn test_no_primary_letters() {
        assert_eq!(normalize("遗产浸信会"), "");
        assert_eq!(normalize("123. 456"), "");
        assert_eq!(normalize(""), "");
        assert!(!is_primary("。，！"));
    }

    #[test]
    fn test_mixed_spacing() {
        assert_eq!(
            normalize("Heritage   Baptist \t Church\r\n"),
            "heritagebaptistchurch"
        );
    }

    #[test]
    fn test_trailing_secondary_script_is_kept() {
        // Only the prefix before the first letter is dropped
        assert_eq!(normalize("Pastor 牧师"), "pastor牧师");
    }

    #[test]
    fn test_single_letter_line() {
        assert_eq!(normalize("A"), "a");
        assert_eq!(normalize("A."), "");
    }
}
