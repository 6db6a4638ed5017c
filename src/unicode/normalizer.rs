//! NFC/NFD transforms and quick-check (§6 "Normalizer").
//!
//! Grounded in `original_source/src/normalizer.cpp` and
//! `include/unicode/normalizer.hpp`: recursive canonical decomposition,
//! canonical ordering by combining class, then (for NFC) greedy
//! recomposition against the locale's composition table.

use crate::locale::{CodePoint, Locale};

/// The collaborator contract the regex engine and the case-conversion
/// pre-pass rely on (§6).
pub trait Normalizer {
    fn to_nfc(&self, text: &str) -> String;
    fn to_nfd(&self, text: &str) -> String;
    fn is_nfc(&self, text: &str) -> bool;
    fn is_nfd(&self, text: &str) -> bool;
}

/// The default normalizer, driven entirely off a [`Locale`]'s
/// decomposition/composition tables.
pub struct LocaleNormalizer<'l> {
    locale: &'l Locale,
}

impl<'l> LocaleNormalizer<'l> {
    pub fn new(locale: &'l Locale) -> Self {
        LocaleNormalizer { locale }
    }

    fn decompose(&self, text: &str) -> Vec<CodePoint> {
        let mut out = Vec::with_capacity(text.len());
        for c in text.chars() {
            self.decompose_recursive(CodePoint::from_char(c), &mut out);
        }
        canonical_order(self.locale, &mut out);
        out
    }

    fn decompose_recursive(&self, cp: CodePoint, out: &mut Vec<CodePoint>) {
        let info = self.locale.get_info(cp);
        if info.decomposition.is_empty() {
            out.push(cp);
        } else {
            for &d in &info.decomposition {
                self.decompose_recursive(d, out);
            }
        }
    }

    fn compose(&self, decomposed: &[CodePoint]) -> Vec<CodePoint> {
        if decomposed.is_empty() {
            return Vec::new();
        }
        let mut out: Vec<CodePoint> = Vec::with_capacity(decomposed.len());
        out.push(decomposed[0]);
        let mut last_starter_idx = if self.locale.get_info(decomposed[0]).is_starter() {
            Some(0usize)
        } else {
            None
        };
        let mut blocking_class: Option<u8> = None;

        for &cp in &decomposed[1..] {
            let info = self.locale.get_info(cp);
            let composed_with_starter = last_starter_idx.and_then(|idx| {
                if blocking_class.is_none() {
                    self.locale.get_composition(out[idx], cp)
                } else {
                    None
                }
            });
            if let Some(composed) = composed_with_starter {
                out[last_starter_idx.unwrap()] = composed;
                continue;
            }
            if info.is_starter() {
                out.push(cp);
                last_starter_idx = Some(out.len() - 1);
                blocking_class = None;
            } else {
                if let Some(prev_class) = blocking_class {
                    if prev_class >= info.combining_class {
                        blocking_class = Some(info.combining_class.max(prev_class));
                    }
                } else {
                    blocking_class = Some(info.combining_class);
                }
                out.push(cp);
            }
        }
        out
    }
}

impl<'l> Normalizer for LocaleNormalizer<'l> {
    fn to_nfd(&self, text: &str) -> String {
        self.decompose(text).into_iter().map(CodePoint::as_char).collect()
    }

    fn to_nfc(&self, text: &str) -> String {
        let decomposed = self.decompose(text);
        self.compose(&decomposed)
            .into_iter()
            .map(CodePoint::as_char)
            .collect()
    }

    fn is_nfd(&self, text: &str) -> bool {
        // Conservative quick-check (§4 "quick-check is a conservative
        // approximation"): a text is already NFD iff decomposing it is a
        // no-op and combining classes are non-decreasing.
        let mut last_class = 0u8;
        for c in text.chars() {
            let cp = CodePoint::from_char(c);
            let info = self.locale.get_info(cp);
            if !info.decomposition.is_empty() {
                return false;
            }
            if info.combining_class != 0 && info.combining_class < last_class {
                return false;
            }
            last_class = info.combining_class;
        }
        true
    }

    fn is_nfc(&self, text: &str) -> bool {
        self.to_nfc(text) == text
    }
}

/// Canonical ordering: a stable sort of each maximal run of non-starters
/// by combining class (UAX#15's canonical ordering algorithm).
fn canonical_order(locale: &Locale, buf: &mut [CodePoint]) {
    let mut i = 0;
    while i < buf.len() {
        if locale.get_info(buf[i]).is_starter() {
            i += 1;
            continue;
        }
        let start = i;
        while i < buf.len() && !locale.get_info(buf[i]).is_starter() {
            i += 1;
        }
        buf[start..i].sort_by_key(|&cp| locale.get_info(cp).combining_class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::curated_latin_locale;

    #[test]
    fn nfd_decomposes_precomposed_letters() {
        let locale = curated_latin_locale();
        let n = LocaleNormalizer::new(&locale);
        assert_eq!(n.to_nfd("caf\u{00E9}"), "cafe\u{0301}");
    }

    #[test]
    fn nfc_recomposes_decomposed_letters() {
        let locale = curated_latin_locale();
        let n = LocaleNormalizer::new(&locale);
        assert_eq!(n.to_nfc("cafe\u{0301}"), "caf\u{00E9}");
    }

    #[test]
    fn normalizer_is_idempotent() {
        let locale = curated_latin_locale();
        let n = LocaleNormalizer::new(&locale);
        for text in ["caf\u{00E9}", "cafe\u{0301}", "hello", ""] {
            let nfc_once = n.to_nfc(text);
            let nfc_twice = n.to_nfc(&nfc_once);
            assert_eq!(nfc_once, nfc_twice);
            let nfd_once = n.to_nfd(text);
            let nfd_twice = n.to_nfd(&nfd_once);
            assert_eq!(nfd_once, nfd_twice);
        }
    }

    #[test]
    fn quick_check_matches_full_normalization() {
        let locale = curated_latin_locale();
        let n = LocaleNormalizer::new(&locale);
        assert!(n.is_nfc("caf\u{00E9}"));
        assert!(!n.is_nfc("cafe\u{0301}"));
        assert!(n.is_nfd("cafe\u{0301}"));
        assert!(!n.is_nfd("caf\u{00E9}"));
    }
}
