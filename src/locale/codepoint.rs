//! The `CodePoint` entity (§3) and the aggregate `CodePointInfo` record
//! that a [`Locale`](super::Locale) indexes.

use std::convert::TryFrom;
use std::fmt;

/// A Unicode scalar value: an integer in `0..=0x10FFFF`, excluding the
/// UTF-16 surrogate range `0xD800..=0xDFFF`.
///
/// This is a thin newtype over `char` (which already enforces the same
/// invariant) kept distinct so the Locale/UCD-facing API reads in the
/// vocabulary of §3 rather than leaking an incidental Rust type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodePoint(char);

impl CodePoint {
    pub const MAX: CodePoint = CodePoint('\u{10FFFF}');

    pub fn from_char(c: char) -> Self {
        CodePoint(c)
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn value(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Debug for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.value())
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<char> for CodePoint {
    fn from(c: char) -> Self {
        CodePoint(c)
    }
}

impl From<CodePoint> for char {
    fn from(cp: CodePoint) -> Self {
        cp.0
    }
}

impl TryFrom<u32> for CodePoint {
    type Error = TryFromIntError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        char::from_u32(value).map(CodePoint).ok_or(TryFromIntError(()))
    }
}

/// The value was out of range or fell in the UTF-16 surrogate gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TryFromIntError(());

impl fmt::Display for TryFromIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value is not a valid Unicode code point")
    }
}

impl std::error::Error for TryFromIntError {}

/// General category, the 30-value enumeration from §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum GeneralCategory {
    Lu,
    Ll,
    Lt,
    Lm,
    Lo,
    Mn,
    Mc,
    Me,
    Nd,
    Nl,
    No,
    Pc,
    Pd,
    Ps,
    Pe,
    Pi,
    Pf,
    Po,
    Sm,
    Sc,
    Sk,
    So,
    Zs,
    Zl,
    Zp,
    Cc,
    Cf,
    Cs,
    Co,
    Cn,
}

impl GeneralCategory {
    /// The super-category letter a `\p{L}`-style query tests against
    /// (`L`, `M`, `N`, `P`, `S`, `Z`, `C`).
    pub fn super_category(self) -> char {
        use GeneralCategory::*;
        match self {
            Lu | Ll | Lt | Lm | Lo => 'L',
            Mn | Mc | Me => 'M',
            Nd | Nl | No => 'N',
            Pc | Pd | Ps | Pe | Pi | Pf | Po => 'P',
            Sm | Sc | Sk | So => 'S',
            Zs | Zl | Zp => 'Z',
            Cc | Cf | Cs | Co | Cn => 'C',
        }
    }

    pub fn short_name(self) -> &'static str {
        use GeneralCategory::*;
        match self {
            Lu => "Lu",
            Ll => "Ll",
            Lt => "Lt",
            Lm => "Lm",
            Lo => "Lo",
            Mn => "Mn",
            Mc => "Mc",
            Me => "Me",
            Nd => "Nd",
            Nl => "Nl",
            No => "No",
            Pc => "Pc",
            Pd => "Pd",
            Ps => "Ps",
            Pe => "Pe",
            Pi => "Pi",
            Pf => "Pf",
            Po => "Po",
            Sm => "Sm",
            Sc => "Sc",
            Sk => "Sk",
            So => "So",
            Zs => "Zs",
            Zl => "Zl",
            Zp => "Zp",
            Cc => "Cc",
            Cf => "Cf",
            Cs => "Cs",
            Co => "Co",
            Cn => "Cn",
        }
    }

    pub fn parse(name: &str) -> Option<GeneralCategory> {
        use GeneralCategory::*;
        Some(match name {
            "Lu" => Lu,
            "Ll" => Ll,
            "Lt" => Lt,
            "Lm" => Lm,
            "Lo" => Lo,
            "Mn" => Mn,
            "Mc" => Mc,
            "Me" => Me,
            "Nd" => Nd,
            "Nl" => Nl,
            "No" => No,
            "Pc" => Pc,
            "Pd" => Pd,
            "Ps" => Ps,
            "Pe" => Pe,
            "Pi" => Pi,
            "Pf" => Pf,
            "Po" => Po,
            "Sm" => Sm,
            "Sc" => Sc,
            "Sk" => Sk,
            "So" => So,
            "Zs" => Zs,
            "Zl" => Zl,
            "Zp" => Zp,
            "Cc" => Cc,
            "Cf" => Cf,
            "Cs" => Cs,
            "Co" => Co,
            "Cn" => Cn,
            _ => return None,
        })
    }
}

/// `Grapheme_Cluster_Break` values used by the segmenter (UAX#29).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphemeClusterBreak {
    Other,
    CR,
    LF,
    Control,
    Extend,
    ZWJ,
    RegionalIndicator,
    Prepend,
    SpacingMark,
    L,
    V,
    T,
    LV,
    LVT,
    ExtendedPictographic,
}

/// `Word_Break` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordBreak {
    Other,
    CR,
    LF,
    Newline,
    Extend,
    ZWJ,
    RegionalIndicator,
    Format,
    Katakana,
    HebrewLetter,
    ALetter,
    SingleQuote,
    DoubleQuote,
    MidNumLet,
    MidLetter,
    MidNum,
    Numeric,
    ExtendNumLet,
    WSegSpace,
}

/// `Line_Break` values (only the ones the collaborators need to expose;
/// a full implementation is out of scope per §1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineBreak {
    Mandatory,
    CarriageReturn,
    LineFeed,
    NextLine,
    Space,
    Other,
}

/// Numeric type, per §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericType {
    Decimal,
    Digit,
    Numeric,
    None,
}

/// A predicate over locale + surrounding context, ANDed together with
/// other conditions to guard a full case mapping (§3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseCondition {
    /// Always satisfied; used for the unconditional, locale-invariant
    /// branch of a full mapping list.
    Always,
    /// Satisfied only for the given language tag (e.g. Turkish `tr`).
    Locale(String),
    /// The code point is preceded by a cased letter, with no
    /// intervening case-ignorable code points (`Final_Sigma`'s
    /// "before" half expressed as a single condition).
    FollowsCasedLetter,
    /// The code point is not followed by a cased letter, skipping
    /// case-ignorable code points (`Final_Sigma`'s "after" half).
    NotFollowedByCasedLetter,
    /// Negates the wrapped condition (`Not_Final_Sigma`, etc.).
    Not(Box<CaseCondition>),
}

/// One (condition-set, replacement) entry in a full case mapping list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullCaseMapping {
    pub conditions: Vec<CaseCondition>,
    pub replacement: Vec<char>,
}

bitflags::bitflags! {
    /// Boolean Unicode properties consulted by the engine (§3).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CodePointFlags: u16 {
        const WHITE_SPACE    = 1 << 0;
        const ALPHABETIC     = 1 << 1;
        const CASED          = 1 << 2;
        const CASE_IGNORABLE = 1 << 3;
        const SOFT_DOTTED    = 1 << 4;
        const HEX_DIGIT      = 1 << 5;
        const MIRRORED       = 1 << 6;
    }
}

/// The per-code-point aggregate described in §3. Read-only once a
/// [`Locale`](super::Locale) has been constructed.
#[derive(Clone, Debug)]
pub struct CodePointInfo {
    pub code_point: CodePoint,
    pub category: GeneralCategory,
    pub combining_class: u8,
    pub decomposition: Vec<CodePoint>,
    pub simple_lower: Option<CodePoint>,
    pub simple_title: Option<CodePoint>,
    pub simple_upper: Option<CodePoint>,
    pub simple_fold: Option<CodePoint>,
    pub full_lower: Vec<FullCaseMapping>,
    pub full_title: Vec<FullCaseMapping>,
    pub full_upper: Vec<FullCaseMapping>,
    pub full_fold: Vec<FullCaseMapping>,
    pub numeric_type: NumericType,
    pub numeric_value: Option<f64>,
    pub flags: CodePointFlags,
    pub grapheme_cluster_break: GraphemeClusterBreak,
    pub word_break: WordBreak,
    pub line_break: LineBreak,
    pub script: &'static str,
    pub block: &'static str,
}

impl CodePointInfo {
    /// A minimal, correct-by-default record for a code point this
    /// locale's table has no specific entry for.
    pub fn unassigned(code_point: CodePoint) -> Self {
        CodePointInfo {
            code_point,
            category: GeneralCategory::Cn,
            combining_class: 0,
            decomposition: Vec::new(),
            simple_lower: None,
            simple_title: None,
            simple_upper: None,
            simple_fold: None,
            full_lower: Vec::new(),
            full_title: Vec::new(),
            full_upper: Vec::new(),
            full_fold: Vec::new(),
            numeric_type: NumericType::None,
            numeric_value: None,
            flags: CodePointFlags::empty(),
            grapheme_cluster_break: GraphemeClusterBreak::Other,
            word_break: WordBreak::Other,
            line_break: LineBreak::Other,
            script: "Unknown",
            block: "",
        }
    }

    pub fn is_starter(&self) -> bool {
        self.combining_class == 0
    }

    /// Word code point per §4.3's `\b` definition: category in
    /// `{Ll,Lu,Lt,Lo,Lm,Nd,Pc}`.
    pub fn is_word_char(&self) -> bool {
        matches!(
            self.category,
            GeneralCategory::Ll
                | GeneralCategory::Lu
                | GeneralCategory::Lt
                | GeneralCategory::Lo
                | GeneralCategory::Lm
                | GeneralCategory::Nd
                | GeneralCategory::Pc
        )
    }
}
