//! The replacement-string compiler (§4.5): tokenizes a replacement
//! source into [`ReplacementElement`]s via the same priority-ordered
//! plug-in registry shape the pattern compiler uses (§4.1).

use crate::error::{RegexError, RegexErrorKind};
use crate::parser::replacement_registry::{ReplacementParser, ReplacementParserRegistry};
use crate::pattern::CaptureKey;
use crate::replace::ReplacementElement;

/// `$$` — an escaped dollar sign, the one case where `$` is not the
/// start of a substitution.
struct DollarEscapeParser;

impl ReplacementParser for DollarEscapeParser {
    fn recognizes(&self, chars: &[char], pos: usize) -> bool {
        chars.get(pos) == Some(&'$') && chars.get(pos + 1) == Some(&'$')
    }

    fn parse(&self, _chars: &[char], pos: usize) -> Result<(ReplacementElement, usize), RegexError> {
        Ok((ReplacementElement::Literal(vec!['$']), pos + 2))
    }
}

/// `$&`, `` $` ``, `$'`, `$_`, `$+` — the fixed single-character
/// substitutions (§4.5).
struct SpecialParser;

impl ReplacementParser for SpecialParser {
    fn recognizes(&self, chars: &[char], pos: usize) -> bool {
        chars.get(pos) == Some(&'$')
            && matches!(chars.get(pos + 1), Some('&') | Some('`') | Some('\'') | Some('_') | Some('+'))
    }

    fn parse(&self, chars: &[char], pos: usize) -> Result<(ReplacementElement, usize), RegexError> {
        let element = match chars[pos + 1] {
            '&' => ReplacementElement::WholeMatch,
            '`' => ReplacementElement::BeforeMatch,
            '\'' => ReplacementElement::AfterMatch,
            '_' => ReplacementElement::EntireInput,
            '+' => ReplacementElement::LastCapturedGroup,
            _ => unreachable!("recognizes() restricts the marker character"),
        };
        Ok((element, pos + 2))
    }
}

/// `$1`, `${1}`, `${name}` — a numbered or named group reference
/// (§4.5).
struct GroupParser;

impl ReplacementParser for GroupParser {
    fn recognizes(&self, chars: &[char], pos: usize) -> bool {
        if chars.get(pos) != Some(&'$') {
            return false;
        }
        match chars.get(pos + 1) {
            Some('{') => true,
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    fn parse(&self, chars: &[char], pos: usize) -> Result<(ReplacementElement, usize), RegexError> {
        if chars.get(pos + 1) == Some(&'{') {
            let name_start = pos + 2;
            let mut end = name_start;
            while chars.get(end).map_or(false, |&c| c != '}') {
                end += 1;
            }
            if chars.get(end) != Some(&'}') {
                return Err(RegexError::new(pos, RegexErrorKind::UnknownBackreference(
                    chars[name_start..end].iter().collect(),
                )));
            }
            let name: String = chars[name_start..end].iter().collect();
            if name.is_empty() {
                return Err(RegexError::new(pos, RegexErrorKind::UnknownBackreference(name)));
            }
            Ok((ReplacementElement::Group(CaptureKey::parse(&name)), end + 1))
        } else {
            let digit_start = pos + 1;
            let mut end = digit_start;
            while chars.get(end).map_or(false, |c| c.is_ascii_digit()) {
                end += 1;
            }
            let digits: String = chars[digit_start..end].iter().collect();
            Ok((ReplacementElement::Group(CaptureKey::parse(&digits)), end))
        }
    }
}

/// The fallback: a maximal run of characters with no `$` substitution
/// in it, including a lone `$` that no other parser recognized (taken
/// as a literal dollar sign, matching the source's treatment of an
/// unrecognized escape).
struct LiteralParser;

impl ReplacementParser for LiteralParser {
    fn recognizes(&self, _chars: &[char], _pos: usize) -> bool {
        true
    }

    fn parse(&self, chars: &[char], pos: usize) -> Result<(ReplacementElement, usize), RegexError> {
        let mut end = pos + 1;
        while end < chars.len() && chars[end] != '$' {
            end += 1;
        }
        Ok((ReplacementElement::Literal(chars[pos..end].to_vec()), end))
    }
}

pub fn register_all(registry: &mut ReplacementParserRegistry) {
    registry.register(Box::new(DollarEscapeParser));
    registry.register(Box::new(SpecialParser));
    registry.register(Box::new(GroupParser));
    registry.register(Box::new(LiteralParser));
}
