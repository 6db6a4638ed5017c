//! Replacement strings (§4.5): compiling `$`-substitution syntax into
//! [`ReplacementElement`]s and evaluating them against a completed
//! match.

pub mod ast;
pub mod compiler;

pub use ast::ReplacementElement;

use crate::error::RegexError;
use crate::parser::replacement_registry::DEFAULT_REPLACEMENT_REGISTRY;
use crate::pattern::MatchRecord;

/// A compiled replacement string: an ordered list of elements to
/// concatenate for each match (§4.5).
#[derive(Clone, Debug)]
pub struct Replacement {
    elements: Vec<ReplacementElement>,
}

impl Replacement {
    pub fn compile(source: &str) -> Result<Replacement, RegexError> {
        let chars: Vec<char> = source.chars().collect();
        let mut elements = Vec::new();
        let mut pos = 0;
        while pos < chars.len() {
            let mut advanced = false;
            for parser in DEFAULT_REPLACEMENT_REGISTRY.iter() {
                if parser.recognizes(&chars, pos) {
                    let (element, next) = parser.parse(&chars, pos)?;
                    elements.push(element);
                    pos = next;
                    advanced = true;
                    break;
                }
            }
            debug_assert!(advanced, "the fallback literal parser recognizes everything");
        }
        Ok(Replacement { elements })
    }

    /// Expands this replacement against one match, appending the result
    /// to `out` (§4.5 "Evaluation").
    pub fn expand(&self, out: &mut String, text: &str, record: &MatchRecord) {
        for element in &self.elements {
            match element {
                ReplacementElement::Literal(chars) => out.extend(chars.iter()),
                ReplacementElement::Group(key) => {
                    if let Some(capture) = record.last(key) {
                        out.push_str(capture.as_str(text));
                    }
                }
                ReplacementElement::WholeMatch => out.push_str(&text[record.begin..record.end]),
                ReplacementElement::BeforeMatch => out.push_str(&text[..record.begin]),
                ReplacementElement::AfterMatch => out.push_str(&text[record.end..]),
                ReplacementElement::EntireInput => out.push_str(text),
                ReplacementElement::LastCapturedGroup => {
                    if let Some(capture) = record.last_captured_group() {
                        out.push_str(capture.as_str(text));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{Capture, CaptureKey};

    fn record_with(begin: usize, end: usize, numbered: &[(u32, Capture)]) -> MatchRecord {
        let mut record = MatchRecord::new(begin, end);
        for (n, capture) in numbered {
            record.push(&CaptureKey::Number(*n), *capture);
        }
        record
    }

    #[test]
    fn dollar_escape_and_specials() {
        let r = Replacement::compile("$$$&-$`-$'-$_-$+").unwrap();
        let record = record_with(2, 5, &[]);
        let mut out = String::new();
        r.expand(&mut out, "aaBBBbb", &record);
        assert_eq!(out, "$BBB-aa-bb-aaBBBbb-");
    }

    #[test]
    fn numbered_and_braced_group_references() {
        let r = Replacement::compile("<$1><${2}>").unwrap();
        let record = record_with(0, 6, &[(1, Capture::new(0, 2)), (2, Capture::new(3, 6))]);
        let mut out = String::new();
        r.expand(&mut out, "aabbbb", &record);
        assert_eq!(out, "<aa><bbb>");
    }

    #[test]
    fn named_group_reference() {
        let r = Replacement::compile("${year}").unwrap();
        let mut record = MatchRecord::new(0, 4);
        record.push(&CaptureKey::Name("year".to_string()), Capture::new(0, 4));
        let mut out = String::new();
        r.expand(&mut out, "1990", &record);
        assert_eq!(out, "1990");
    }

    #[test]
    fn missing_group_expands_to_nothing() {
        let r = Replacement::compile("[$5]").unwrap();
        let record = record_with(0, 0, &[]);
        let mut out = String::new();
        r.expand(&mut out, "", &record);
        assert_eq!(out, "[]");
    }

    #[test]
    fn empty_braced_group_is_an_error() {
        assert!(Replacement::compile("${}").is_err());
    }

    #[test]
    fn unterminated_braced_group_is_an_error() {
        assert!(Replacement::compile("${name").is_err());
    }

    #[test]
    fn literal_text_passes_through() {
        let r = Replacement::compile("no substitutions here").unwrap();
        let record = record_with(0, 0, &[]);
        let mut out = String::new();
        r.expand(&mut out, "", &record);
        assert_eq!(out, "no substitutions here");
    }
}
