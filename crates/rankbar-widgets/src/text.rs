#![forbid(unsafe_code)]

//! Text truncation and width estimation.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Names longer than this many graphemes are truncated.
pub const NAME_MAX_CHARS: usize = 8;

/// Suffix appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Advance of one terminal column relative to the font size. Wide (CJK)
/// graphemes occupy two columns.
pub const COLUMN_ADVANCE: f64 = 0.55;

/// Keep at most `max_graphemes` graphemes, appending [`ELLIPSIS`] when
/// anything was cut.
///
/// ```
/// use rankbar_widgets::text::ellipsize;
///
/// assert_eq!(ellipsize("short", 8), "short");
/// assert_eq!(ellipsize("a rather long name", 8), "a rather...");
/// ```
pub fn ellipsize(text: &str, max_graphemes: usize) -> Cow<'_, str> {
    match text.grapheme_indices(true).nth(max_graphemes) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len());
            out.push_str(&text[..cut]);
            out.push_str(ELLIPSIS);
            Cow::Owned(out)
        }
    }
}

/// Whether [`ellipsize`] would shorten `text`.
pub fn is_truncated(text: &str, max_graphemes: usize) -> bool {
    text.graphemes(true).nth(max_graphemes).is_some()
}

/// Estimated rendered width of `text` at `font_size`.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.width() as f64 * font_size * COLUMN_ADVANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_borrowed() {
        assert!(matches!(ellipsize("12345678", 8), Cow::Borrowed("12345678")));
        assert!(!is_truncated("12345678", 8));
    }

    #[test]
    fn long_text_is_cut_at_limit() {
        assert_eq!(ellipsize("123456789", 8), "12345678...");
        assert!(is_truncated("123456789", 8));
    }

    #[test]
    fn cuts_on_grapheme_boundaries() {
        let name = "北京市朝阳区望京街道办事处";
        assert_eq!(ellipsize(name, 8), "北京市朝阳区望京...");

        // "e" + combining acute accent stays one grapheme.
        let accented = "e\u{301}e\u{301}e\u{301}";
        assert_eq!(ellipsize(accented, 2), "e\u{301}e\u{301}...");
    }

    #[test]
    fn empty_text() {
        assert_eq!(ellipsize("", 8), "");
        assert_eq!(ellipsize("abc", 0), "...");
    }

    #[test]
    fn wide_characters_measure_double() {
        let narrow = text_width("ab", 10.0);
        let wide = text_width("北", 10.0);
        assert!((narrow - wide).abs() < 1e-9);
        assert!((narrow - 11.0).abs() < 1e-9);
    }
}
