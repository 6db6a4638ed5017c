//! The `Locale` bundle (§3) and the process-wide current-locale cell
//! (§4.2, §5, §9 "Process-wide current locale").

pub mod codepoint;
pub mod collation;
pub mod composition;

pub use codepoint::{
    CaseCondition, CodePoint, CodePointFlags, CodePointInfo, FullCaseMapping, GeneralCategory,
    GraphemeClusterBreak, LineBreak, NumericType, WordBreak,
};
pub use collation::{CollationElement, CollationTable, CollationTableEntry};
pub use composition::CompositionTable;

use once_cell::sync::{Lazy, OnceCell};
use std::sync::{Arc, RwLock};

/// A bundle of everything the engine and its collaborators need to
/// interpret code points for one language/region (§3 "Locale").
///
/// `Locale` only carries a curated override table for code points whose
/// properties can't be derived from `char`'s own (fairly complete)
/// Unicode awareness; everything else is computed on the fly by
/// [`Locale::get_info`]. A full product would instead load a generated
/// UCD table here — that generation step is out of scope (§1, §6).
#[derive(Clone, Debug)]
pub struct Locale {
    pub language: String,
    overrides: Vec<CodePointInfo>, // sorted by code_point
    compositions: CompositionTable,
    collation: CollationTable,
    pub digits: Vec<CodePoint>,
    pub default_base: u32,
    pub negative_sign: CodePoint,
    pub backwards_accents: bool,
}

impl Locale {
    pub fn new(
        language: impl Into<String>,
        mut overrides: Vec<CodePointInfo>,
        compositions: CompositionTable,
        collation: CollationTable,
        digits: Vec<CodePoint>,
        default_base: u32,
        negative_sign: CodePoint,
        backwards_accents: bool,
    ) -> Self {
        overrides.sort_by_key(|info| info.code_point);
        Locale {
            language: language.into(),
            overrides,
            compositions,
            collation,
            digits,
            default_base,
            negative_sign,
            backwards_accents,
        }
    }

    /// Binary-search the sorted override table, falling back to a
    /// `char`-derived computation of the record (§6 "Locale: `get_info`").
    pub fn get_info(&self, code_point: CodePoint) -> CodePointInfo {
        if let Ok(idx) = self
            .overrides
            .binary_search_by_key(&code_point, |info| info.code_point)
        {
            return self.overrides[idx].clone();
        }
        computed_info(code_point)
    }

    pub fn get_composition(&self, starter: CodePoint, combiner: CodePoint) -> Option<CodePoint> {
        self.compositions.compose(starter, combiner)
    }

    pub fn collation_table(&self) -> &CollationTable {
        &self.collation
    }
}

/// Derive a [`CodePointInfo`] purely from `char`'s own Unicode tables,
/// for any code point the locale's curated override table doesn't cover.
fn computed_info(code_point: CodePoint) -> CodePointInfo {
    let c = code_point.as_char();
    let mut info = CodePointInfo::unassigned(code_point);

    info.category = guess_category(c);
    info.simple_lower = single_char(c.to_lowercase());
    info.simple_upper = single_char(c.to_uppercase());
    info.simple_title = info.simple_upper;
    info.simple_fold = single_char(c.to_lowercase());

    if c.is_whitespace() {
        info.flags |= CodePointFlags::WHITE_SPACE;
    }
    if c.is_alphabetic() {
        info.flags |= CodePointFlags::ALPHABETIC;
    }
    if c.is_uppercase() || c.is_lowercase() {
        info.flags |= CodePointFlags::CASED;
    }
    if c.is_ascii_hexdigit() {
        info.flags |= CodePointFlags::HEX_DIGIT;
    }

    if let Some(d) = c.to_digit(10) {
        info.numeric_type = NumericType::Decimal;
        info.numeric_value = Some(d as f64);
    } else if c.is_numeric() {
        info.numeric_type = NumericType::Numeric;
    }

    info.word_break = guess_word_break(c, &info);
    info.grapheme_cluster_break = guess_grapheme_break(c);
    info.line_break = guess_line_break(c);

    info
}

fn single_char(mut it: impl Iterator<Item = char>) -> Option<CodePoint> {
    let first = it.next()?;
    if it.next().is_some() {
        None
    } else {
        Some(CodePoint::from_char(first))
    }
}

fn guess_category(c: char) -> GeneralCategory {
    use GeneralCategory::*;
    if c.is_control() {
        return Cc;
    }
    if c.is_uppercase() {
        return Lu;
    }
    if c.is_lowercase() {
        return Ll;
    }
    if c.is_alphabetic() {
        return Lo;
    }
    if c.is_ascii_digit() || (c.is_numeric() && c.to_digit(10).is_some()) {
        return Nd;
    }
    if c.is_numeric() {
        return No;
    }
    if c == '_' {
        return Pc;
    }
    if c.is_ascii_punctuation() {
        match c {
            '(' | '[' | '{' => return Ps,
            ')' | ']' | '}' => return Pe,
            _ => return Po,
        }
    }
    if c.is_whitespace() {
        return if c == '\n' || c == '\r' || c == '\u{2028}' || c == '\u{2029}' {
            Zl
        } else {
            Zs
        };
    }
    So
}

fn guess_word_break(c: char, info: &CodePointInfo) -> WordBreak {
    match c {
        '\r' => WordBreak::CR,
        '\n' => WordBreak::LF,
        '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}' => WordBreak::Newline,
        '\'' => WordBreak::SingleQuote,
        '"' => WordBreak::DoubleQuote,
        '.' | ',' | ';' => WordBreak::MidNumLet,
        _ if info.is_word_char() && c.is_numeric() => WordBreak::Numeric,
        _ if info.is_word_char() => WordBreak::ALetter,
        _ => WordBreak::Other,
    }
}

fn guess_grapheme_break(c: char) -> GraphemeClusterBreak {
    match c {
        '\r' => GraphemeClusterBreak::CR,
        '\n' => GraphemeClusterBreak::LF,
        '\u{200D}' => GraphemeClusterBreak::ZWJ,
        c if ('\u{0300}'..='\u{036F}').contains(&c) => GraphemeClusterBreak::Extend,
        c if c.is_control() => GraphemeClusterBreak::Control,
        c if ('\u{1F1E6}'..='\u{1F1FF}').contains(&c) => {
            GraphemeClusterBreak::RegionalIndicator
        }
        c if ('\u{1100}'..='\u{1112}').contains(&c) => GraphemeClusterBreak::L,
        c if ('\u{1161}'..='\u{1175}').contains(&c) => GraphemeClusterBreak::V,
        c if ('\u{11A8}'..='\u{11C2}').contains(&c) => GraphemeClusterBreak::T,
        _ => GraphemeClusterBreak::Other,
    }
}

fn guess_line_break(c: char) -> LineBreak {
    match c {
        '\n' => LineBreak::LineFeed,
        '\r' => LineBreak::CarriageReturn,
        '\u{85}' | '\u{2028}' | '\u{2029}' => LineBreak::Mandatory,
        '\u{0B}' | '\u{0C}' => LineBreak::NextLine,
        c if c.is_whitespace() => LineBreak::Space,
        _ => LineBreak::Other,
    }
}

/// A small, hand-curated table of precomposed-letter decompositions and
/// compositions, enough to exercise NFC/NFD faithfully for the common
/// Latin letters used in tests and in the corpus's own worked examples.
/// Grounded in `original_source/src/normalizer.cpp`'s recursive
/// decomposition + canonical-ordering + recomposition algorithm shape.
pub fn curated_latin_locale() -> Locale {
    let mut overrides = Vec::new();
    let mut compositions = Vec::new();

    let vowel_accents: &[(char, char, char)] = &[
        ('a', '\u{0300}', '\u{00E0}'), // à
        ('a', '\u{0301}', '\u{00E1}'), // á
        ('a', '\u{0302}', '\u{00E2}'), // â
        ('a', '\u{0303}', '\u{00E3}'), // ã
        ('a', '\u{0308}', '\u{00E4}'), // ä
        ('a', '\u{030A}', '\u{00E5}'), // å
        ('e', '\u{0300}', '\u{00E8}'), // è
        ('e', '\u{0301}', '\u{00E9}'), // é
        ('e', '\u{0302}', '\u{00EA}'), // ê
        ('e', '\u{0308}', '\u{00EB}'), // ë
        ('i', '\u{0301}', '\u{00ED}'), // í
        ('o', '\u{0301}', '\u{00F3}'), // ó
        ('o', '\u{0303}', '\u{00F5}'), // õ
        ('o', '\u{0308}', '\u{00F6}'), // ö
        ('u', '\u{0301}', '\u{00FA}'), // ú
        ('u', '\u{0308}', '\u{00FC}'), // ü
        ('n', '\u{0303}', '\u{00F1}'), // ñ
        ('c', '\u{0327}', '\u{00E7}'), // ç
        ('y', '\u{0301}', '\u{00FD}'), // ý
    ];

    for &(base, combining, composed) in vowel_accents {
        let base_cp = CodePoint::from_char(base);
        let combining_cp = CodePoint::from_char(combining);
        let composed_cp = CodePoint::from_char(composed);

        compositions.push((base_cp, combining_cp, composed_cp));

        let mut decomposed = computed_info(composed_cp);
        decomposed.decomposition = vec![base_cp, combining_cp];
        overrides.push(decomposed);

        // Combining marks themselves: not starters, category Mn.
        let mut mark = computed_info(combining_cp);
        mark.category = GeneralCategory::Mn;
        mark.combining_class = 230;
        mark.grapheme_cluster_break = GraphemeClusterBreak::Extend;
        overrides.push(mark);

        // Uppercase composed letter simple-cases to/from the lowercase one.
        let upper_composed = CodePoint::from_char(
            composed.to_uppercase().next().unwrap_or(composed),
        );
        if upper_composed != composed_cp {
            let mut upper = computed_info(upper_composed);
            upper.simple_lower = Some(composed_cp);
            upper.simple_fold = Some(composed_cp);
            overrides.push(upper);
        }
    }

    // German sharp s: full-uppercase maps to "SS" (an unconditional,
    // one-to-many full mapping; no simple uppercase exists).
    let mut sharp_s = computed_info(CodePoint::from_char('\u{00DF}'));
    sharp_s.simple_upper = None;
    sharp_s.full_upper = vec![FullCaseMapping {
        conditions: vec![CaseCondition::Always],
        replacement: vec!['S', 'S'],
    }];
    overrides.push(sharp_s);

    // Greek final sigma: lowercasing Sigma is conditional on position.
    let mut capital_sigma = computed_info(CodePoint::from_char('\u{03A3}'));
    capital_sigma.simple_lower = Some(CodePoint::from_char('\u{03C3}'));
    capital_sigma.full_lower = vec![
        FullCaseMapping {
            conditions: vec![
                CaseCondition::FollowsCasedLetter,
                CaseCondition::NotFollowedByCasedLetter,
            ],
            replacement: vec!['\u{03C2}'], // final sigma ς
        },
        FullCaseMapping {
            conditions: vec![CaseCondition::Always],
            replacement: vec!['\u{03C3}'], // medial sigma σ
        },
    ];
    overrides.push(capital_sigma);

    let mut final_sigma = computed_info(CodePoint::from_char('\u{03C2}'));
    final_sigma.simple_upper = Some(CodePoint::from_char('\u{03A3}'));
    final_sigma.simple_fold = Some(CodePoint::from_char('\u{03C3}'));
    overrides.push(final_sigma);

    // Turkish dotted/dotless I: only relevant under a `tr`/`az` locale
    // condition; the base locale keeps the default (non-Turkic) simple
    // mapping and records the Turkic alternative as a conditional.
    let mut cap_i = computed_info(CodePoint::from_char('I'));
    cap_i.full_lower = vec![
        FullCaseMapping {
            conditions: vec![CaseCondition::Locale("tr".into())],
            replacement: vec!['\u{0131}'], // dotless i
        },
        FullCaseMapping {
            conditions: vec![CaseCondition::Locale("az".into())],
            replacement: vec!['\u{0131}'],
        },
        FullCaseMapping {
            conditions: vec![CaseCondition::Always],
            replacement: vec!['i'],
        },
    ];
    overrides.push(cap_i);

    Locale::new(
        "en",
        overrides,
        CompositionTable::new(compositions),
        CollationTable::default(),
        ('0'..='9').map(CodePoint::from_char).collect(),
        10,
        CodePoint::from_char('-'),
        false,
    )
}

static DEFAULT_LOCALE: Lazy<Arc<Locale>> = Lazy::new(|| Arc::new(curated_latin_locale()));

static CURRENT_LOCALE: OnceCell<RwLock<Arc<Locale>>> = OnceCell::new();

/// The process-wide current locale (§3 "Locale", §9). Thread-safe: reads
/// take a read lock, `set_current` takes a write lock, matching the
/// original's atomic-pointer contract without the caller-managed
/// unsafe lifetime (Design Notes).
pub fn current() -> Arc<Locale> {
    CURRENT_LOCALE
        .get_or_init(|| RwLock::new(DEFAULT_LOCALE.clone()))
        .read()
        .expect("current locale lock poisoned")
        .clone()
}

/// Sets the process-wide current locale. The caller's `Arc` keeps the
/// locale alive for as long as any regex holds a reference to it.
pub fn set_current(locale: Arc<Locale>) {
    let cell = CURRENT_LOCALE.get_or_init(|| RwLock::new(DEFAULT_LOCALE.clone()));
    *cell.write().expect("current locale lock poisoned") = locale;
    log::debug!("installed new current locale");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_letters_round_trip_case() {
        let locale = curated_latin_locale();
        let info = locale.get_info(CodePoint::from_char('A'));
        assert_eq!(info.simple_lower, Some(CodePoint::from_char('a')));
        assert_eq!(info.category, GeneralCategory::Lu);
    }

    #[test]
    fn composition_and_decomposition_are_inverse() {
        let locale = curated_latin_locale();
        let e_acute = CodePoint::from_char('\u{00E9}');
        let info = locale.get_info(e_acute);
        assert_eq!(
            info.decomposition,
            vec![CodePoint::from_char('e'), CodePoint::from_char('\u{0301}')]
        );
        let composed = locale.get_composition(
            CodePoint::from_char('e'),
            CodePoint::from_char('\u{0301}'),
        );
        assert_eq!(composed, Some(e_acute));
    }

    #[test]
    fn default_locale_handles_unlisted_code_points() {
        let locale = curated_latin_locale();
        let info = locale.get_info(CodePoint::from_char('7'));
        assert_eq!(info.numeric_type, NumericType::Decimal);
        assert_eq!(info.numeric_value, Some(7.0));
    }
}
