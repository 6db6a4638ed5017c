//! Error types for compilation and for the collaborator interfaces the
//! regex engine depends on (§7 of the design).

use std::fmt;

/// The kind of mistake the compiler found in a pattern or replacement
/// string, independent of *where* it was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegexErrorKind {
    UnterminatedGroup,
    UnterminatedLookaround,
    UnterminatedAtomic,
    UnterminatedConditional,
    UnterminatedCharacterClass,
    UnterminatedComment,
    UnterminatedRecursion,
    EmptyGroupSpecification,
    UnknownOptionCharacter(char),
    InvalidQuantifier,
    QuantifierWithoutOperand,
    ReversedRange,
    EqualEndpointRange,
    UnknownUnicodeProperty(String),
    UnknownBackreference(String),
    RelativeRecursionOutOfRange,
    EmptyRecursion,
    OrphanAlternation,
    InfiniteRecursion,
    DuplicateGroupName(String),
    Other(String),
}

impl fmt::Display for RegexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegexErrorKind::UnterminatedGroup => write!(f, "unterminated group"),
            RegexErrorKind::UnterminatedLookaround => write!(f, "unterminated lookaround"),
            RegexErrorKind::UnterminatedAtomic => write!(f, "unterminated atomic group"),
            RegexErrorKind::UnterminatedConditional => write!(f, "unterminated conditional"),
            RegexErrorKind::UnterminatedCharacterClass => {
                write!(f, "unterminated character class")
            }
            RegexErrorKind::UnterminatedComment => write!(f, "unterminated comment"),
            RegexErrorKind::UnterminatedRecursion => write!(f, "unterminated recursion"),
            RegexErrorKind::EmptyGroupSpecification => write!(f, "empty group specification"),
            RegexErrorKind::UnknownOptionCharacter(c) => {
                write!(f, "unknown option character '{}'", c)
            }
            RegexErrorKind::InvalidQuantifier => write!(f, "invalid quantifier"),
            RegexErrorKind::QuantifierWithoutOperand => {
                write!(f, "quantifier without a preceding element")
            }
            RegexErrorKind::ReversedRange => write!(f, "range endpoints are reversed"),
            RegexErrorKind::EqualEndpointRange => write!(f, "range endpoints are equal"),
            RegexErrorKind::UnknownUnicodeProperty(name) => {
                write!(f, "unknown Unicode property '{}'", name)
            }
            RegexErrorKind::UnknownBackreference(key) => {
                write!(f, "backreference to nonexistent group '{}'", key)
            }
            RegexErrorKind::RelativeRecursionOutOfRange => {
                write!(f, "relative recursion crosses the pattern boundary")
            }
            RegexErrorKind::EmptyRecursion => write!(f, "empty recursion specification"),
            RegexErrorKind::OrphanAlternation => {
                write!(f, "'|' not enclosed in a group")
            }
            RegexErrorKind::InfiniteRecursion => {
                write!(f, "recursion can be reached without consuming input")
            }
            RegexErrorKind::DuplicateGroupName(name) => {
                write!(f, "duplicate capture group name '{}'", name)
            }
            RegexErrorKind::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// An error produced while compiling a pattern or a replacement string.
///
/// Carries the byte offset into the source string at which the problem
/// was detected, mirroring the original library's `RegexError`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegexError {
    pub position: usize,
    pub kind: RegexErrorKind,
}

impl RegexError {
    pub fn new(position: usize, kind: RegexErrorKind) -> Self {
        RegexError { position, kind }
    }
}

impl fmt::Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "regex error at position {}: {}", self.position, self.kind)
    }
}

impl std::error::Error for RegexError {}

/// An error produced by a collaborator converting between representations
/// (e.g. case folding or normalization) it cannot carry through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionError {
    pub message: String,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conversion error: {}", self.message)
    }
}

impl std::error::Error for ConversionError {}

/// An error produced by an encoding collaborator. The regex engine itself
/// never raises this; it is surfaced only by codec collaborators invoked
/// outside the engine's core match loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodingError {
    pub message: String,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encoding error: {}", self.message)
    }
}

impl std::error::Error for EncodingError {}
