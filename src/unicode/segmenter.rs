//! Grapheme-cluster and word boundary predicates (§6 "Segmenter", UAX#29).
//!
//! Grounded in `original_source/src/boundaries.cpp`/`grapheme.cpp`: a
//! table-driven predicate over adjacent `Grapheme_Cluster_Break`/
//! `Word_Break` values, taken verbatim from the locale's table rather
//! than re-derived heuristically (Design Notes' Hangul caveat).

use crate::locale::{CodePoint, GraphemeClusterBreak as GCB, Locale, WordBreak as WB};

/// The collaborator contract `\b`, `\B`, and `^`/`$` under `Multiline`
/// consult (§6 "Segmenter").
pub trait Segmenter {
    fn is_grapheme_break(&self, at: usize, begin: usize, end: usize, text: &str) -> bool;
    fn is_word_break(&self, at: usize, begin: usize, end: usize, text: &str) -> bool;
    fn is_line_break(&self, at: usize, begin: usize, end: usize, text: &str) -> bool;
}

pub struct LocaleSegmenter<'l> {
    locale: &'l Locale,
}

impl<'l> LocaleSegmenter<'l> {
    pub fn new(locale: &'l Locale) -> Self {
        LocaleSegmenter { locale }
    }

    fn gcb_at(&self, text: &str, byte_pos: usize) -> Option<GCB> {
        text[byte_pos..]
            .chars()
            .next()
            .map(|c| self.locale.get_info(CodePoint::from_char(c)).grapheme_cluster_break)
    }

    fn wb_at(&self, text: &str, byte_pos: usize) -> Option<WB> {
        text[byte_pos..]
            .chars()
            .next()
            .map(|c| self.locale.get_info(CodePoint::from_char(c)).word_break)
    }
}

impl<'l> Segmenter for LocaleSegmenter<'l> {
    fn is_grapheme_break(&self, at: usize, begin: usize, end: usize, text: &str) -> bool {
        if at <= begin || at >= end {
            return true;
        }
        let prev_pos = prev_char_boundary(text, at);
        let (Some(prev), Some(next)) = (self.gcb_at(text, prev_pos), self.gcb_at(text, at)) else {
            return true;
        };
        use GCB::*;
        match (prev, next) {
            (CR, LF) => false,                                      // GB3
            (CR | LF | Control, _) | (_, CR | LF | Control) => true, // GB4, GB5
            (L, L | V | LV | LVT) => false,                         // GB6
            (LV | V, V | T) => false,                                // GB7
            (LVT | T, T) => false,                                   // GB8
            (_, Extend | ZWJ) => false,                              // GB9
            (_, SpacingMark) => false,                                // GB9a
            (Prepend, _) => false,                                    // GB9b
            (RegionalIndicator, RegionalIndicator) => false,          // GB12/13 (approximate, no odd/even count tracking)
            _ => true,
        }
    }

    fn is_word_break(&self, at: usize, begin: usize, end: usize, text: &str) -> bool {
        if at <= begin || at >= end {
            return true;
        }
        let prev_pos = prev_char_boundary(text, at);
        let (Some(prev), Some(next)) = (self.wb_at(text, prev_pos), self.wb_at(text, at)) else {
            return true;
        };
        use WB::*;
        match (prev, next) {
            (CR, LF) => false,
            (Newline | CR | LF, _) | (_, Newline | CR | LF) => true,
            (ALetter | HebrewLetter, ALetter | HebrewLetter) => false,
            (Numeric, Numeric) => false,
            (ALetter | HebrewLetter, Numeric) | (Numeric, ALetter | HebrewLetter) => false,
            (Katakana, Katakana) => false,
            (_, Extend | ZWJ | Format) => false,
            (ExtendNumLet, ALetter | HebrewLetter | Numeric | Katakana | ExtendNumLet) => false,
            (ALetter | HebrewLetter | Numeric | Katakana, ExtendNumLet) => false,
            (RegionalIndicator, RegionalIndicator) => false,
            _ => true,
        }
    }

    fn is_line_break(&self, at: usize, begin: usize, end: usize, text: &str) -> bool {
        if at <= begin || at >= end {
            return true;
        }
        let prev_pos = prev_char_boundary(text, at);
        matches!(
            text[prev_pos..].chars().next(),
            Some('\n') | Some('\r') | Some('\u{2028}') | Some('\u{2029}')
        )
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    let mut i = pos;
    loop {
        i -= 1;
        if text.is_char_boundary(i) {
            return i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::curated_latin_locale;

    #[test]
    fn crlf_is_not_a_grapheme_break() {
        let locale = curated_latin_locale();
        let seg = LocaleSegmenter::new(&locale);
        let text = "a\r\nb";
        assert!(!seg.is_grapheme_break(2, 0, text.len(), text));
    }

    #[test]
    fn combining_mark_does_not_break_grapheme() {
        let locale = curated_latin_locale();
        let seg = LocaleSegmenter::new(&locale);
        let text = "e\u{0301}x"; // e + combining acute + x
        assert!(!seg.is_grapheme_break(1, 0, text.len(), text));
        assert!(seg.is_grapheme_break(3, 0, text.len(), text));
    }

    #[test]
    fn letters_do_not_word_break_between_them() {
        let locale = curated_latin_locale();
        let seg = LocaleSegmenter::new(&locale);
        let text = "hello world";
        assert!(!seg.is_word_break(1, 0, text.len(), text));
        assert!(seg.is_word_break(5, 0, text.len(), text));
    }
}
