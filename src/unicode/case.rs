//! Simple and full case conversion (§6 "CaseConverter").
//!
//! Grounded in `original_source/include/unicode/caseconverter.hpp`: a
//! conditional full mapping is a list of (condition-set, replacement)
//! pairs evaluated in order against the surrounding context; the first
//! whose conditions all hold wins, and the simple mapping is the
//! fallback when no full mapping is present.

use crate::locale::{CaseCondition, CodePoint, FullCaseMapping, Locale};

/// Which case transform to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseKind {
    Lower,
    Title,
    Upper,
    Fold,
}

/// The surrounding context a full mapping's conditions may consult:
/// the code points before and after the one being converted, plus the
/// locale's language tag.
#[derive(Clone, Copy)]
pub struct CaseContext<'a> {
    pub before: &'a [CodePoint],
    pub after: &'a [CodePoint],
    pub language: &'a str,
}

impl<'a> CaseContext<'a> {
    pub fn root() -> CaseContext<'static> {
        CaseContext { before: &[], after: &[], language: "" }
    }
}

/// The collaborator contract the regex engine's `IgnoreCase` handling
/// relies on (§6 "CaseConverter").
pub trait CaseConverter {
    fn fold(&self, cp: CodePoint, ctx: CaseContext<'_>) -> Vec<CodePoint>;
    fn convert(&self, cp: CodePoint, kind: CaseKind, ctx: CaseContext<'_>) -> Vec<CodePoint>;

    fn fold_str(&self, text: &str) -> String {
        self.convert_str(text, CaseKind::Fold)
    }

    fn convert_str(&self, text: &str, kind: CaseKind) -> String {
        let cps: Vec<CodePoint> = text.chars().map(CodePoint::from_char).collect();
        let mut out = String::new();
        for i in 0..cps.len() {
            let ctx = CaseContext {
                before: &cps[..i],
                after: &cps[i + 1..],
                language: "",
            };
            for r in self.convert(cps[i], kind, ctx) {
                out.push(r.as_char());
            }
        }
        out
    }
}

pub struct LocaleCaseConverter<'l> {
    locale: &'l Locale,
}

impl<'l> LocaleCaseConverter<'l> {
    pub fn new(locale: &'l Locale) -> Self {
        LocaleCaseConverter { locale }
    }

    fn mappings_for<'i>(&self, info: &'i crate::locale::CodePointInfo, kind: CaseKind) -> &'i [FullCaseMapping] {
        match kind {
            CaseKind::Lower => &info.full_lower,
            CaseKind::Title => &info.full_title,
            CaseKind::Upper => &info.full_upper,
            CaseKind::Fold => &info.full_fold,
        }
    }

    fn simple_for(&self, info: &crate::locale::CodePointInfo, kind: CaseKind) -> Option<CodePoint> {
        match kind {
            CaseKind::Lower => info.simple_lower,
            CaseKind::Title => info.simple_title,
            CaseKind::Upper => info.simple_upper,
            CaseKind::Fold => info.simple_fold,
        }
    }

    fn condition_holds(&self, cond: &CaseCondition, cp: CodePoint, ctx: CaseContext<'_>) -> bool {
        match cond {
            CaseCondition::Always => true,
            CaseCondition::Locale(tag) => ctx.language == tag,
            CaseCondition::FollowsCasedLetter => ctx
                .before
                .iter()
                .rev()
                .find(|&&b| !self.is_case_ignorable(b))
                .map(|&b| self.locale.get_info(b).flags.contains(crate::locale::CodePointFlags::CASED))
                .unwrap_or(false),
            CaseCondition::NotFollowedByCasedLetter => !ctx
                .after
                .iter()
                .find(|&&a| !self.is_case_ignorable(a))
                .map(|&a| self.locale.get_info(a).flags.contains(crate::locale::CodePointFlags::CASED))
                .unwrap_or(false),
            CaseCondition::Not(inner) => !self.condition_holds(inner, cp, ctx),
        }
    }

    fn is_case_ignorable(&self, cp: CodePoint) -> bool {
        self.locale
            .get_info(cp)
            .flags
            .contains(crate::locale::CodePointFlags::CASE_IGNORABLE)
    }
}

impl<'l> CaseConverter for LocaleCaseConverter<'l> {
    fn fold(&self, cp: CodePoint, ctx: CaseContext<'_>) -> Vec<CodePoint> {
        self.convert(cp, CaseKind::Fold, ctx)
    }

    fn convert(&self, cp: CodePoint, kind: CaseKind, ctx: CaseContext<'_>) -> Vec<CodePoint> {
        let info = self.locale.get_info(cp);
        for mapping in self.mappings_for(&info, kind) {
            if mapping
                .conditions
                .iter()
                .all(|c| self.condition_holds(c, cp, ctx))
            {
                return mapping.replacement.iter().map(|&c| CodePoint::from_char(c)).collect();
            }
        }
        vec![self.simple_for(&info, kind).unwrap_or(cp)]
    }
}

/// Compares two code points under simple case folding, as the engine's
/// `IgnoreCase` literal/range/backreference matching requires (§4.3).
pub fn simple_fold_eq(locale: &Locale, a: CodePoint, b: CodePoint) -> bool {
    if a == b {
        return true;
    }
    let fold_a = locale.get_info(a).simple_fold.unwrap_or(a);
    let fold_b = locale.get_info(b).simple_fold.unwrap_or(b);
    fold_a == fold_b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::curated_latin_locale;

    #[test]
    fn simple_fold_matches_ascii_case_insensitively() {
        let locale = curated_latin_locale();
        assert!(simple_fold_eq(
            &locale,
            CodePoint::from_char('A'),
            CodePoint::from_char('a')
        ));
        assert!(!simple_fold_eq(
            &locale,
            CodePoint::from_char('A'),
            CodePoint::from_char('b')
        ));
    }

    #[test]
    fn sharp_s_uppercases_to_ss() {
        let locale = curated_latin_locale();
        let conv = LocaleCaseConverter::new(&locale);
        assert_eq!(conv.convert_str("stra\u{00DF}e", CaseKind::Upper), "STRASSE");
    }

    #[test]
    fn final_sigma_lowercases_contextually() {
        let locale = curated_latin_locale();
        let conv = LocaleCaseConverter::new(&locale);
        // ODYSSEUS (no trailing letter after final Sigma) -> ὀδυσσεύς-style final sigma
        assert_eq!(conv.convert_str("\u{03A3}", CaseKind::Lower), "\u{03C2}");
        assert_eq!(conv.convert_str("A\u{03A3}A", CaseKind::Lower), "a\u{03C3}a");
    }
}
