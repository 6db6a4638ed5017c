//! `[...]` character classes (§4.3 "CharacterClass"): a possibly
//! negated set of literal characters, ranges, and nested categories.

use super::escapes;
use crate::compiler::driver::ParseContext;
use crate::error::{RegexError, RegexErrorKind};
use crate::parser::pattern_registry::{ClassContext, ElementParser};
use crate::pattern::{ElementId, PatternElement};

pub struct CharacterClassParser;

impl ElementParser for CharacterClassParser {
    fn class_context(&self) -> ClassContext {
        ClassContext::Outside
    }

    fn recognizes(&self, ctx: &ParseContext<'_>, _inside_class: bool) -> bool {
        ctx.driver.peek() == Some('[')
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, _inside_class: bool) -> Result<ElementId, RegexError> {
        let start = ctx.driver.position();
        ctx.driver.advance(); // [
        let negated = ctx.driver.consume('^');
        let ignore_case = ctx.driver.options.ignore_case();

        let mut children = Vec::new();
        let mut first = true;
        loop {
            if ctx.driver.peek() == Some(']') && !first {
                ctx.driver.advance();
                break;
            }
            if ctx.driver.is_at_end() {
                return Err(ctx.driver.error_at(start, RegexErrorKind::UnterminatedCharacterClass));
            }
            first = false;

            if ctx.driver.peek() == Some('\\')
                && matches!(
                    ctx.driver.peek_at(1),
                    Some('d') | Some('D') | Some('w') | Some('W') | Some('s') | Some('S') | Some('p') | Some('P')
                )
            {
                let member = crate::compiler::compile_class_member(ctx)?;
                children.push(member);
                continue;
            }

            let Some(lo) = try_read_class_literal_char(ctx) else {
                return Err(ctx.driver.error(RegexErrorKind::Other("malformed character class member".into())));
            };

            if ctx.driver.peek() == Some('-') && ctx.driver.peek_at(1) != Some(']') && ctx.driver.peek_at(1).is_some() {
                let dash_pos = ctx.driver.position();
                ctx.driver.advance(); // -
                if let Some(hi) = try_read_class_literal_char(ctx) {
                    if hi < lo {
                        return Err(ctx.driver.error_at(dash_pos, RegexErrorKind::ReversedRange));
                    }
                    if hi == lo {
                        return Err(ctx.driver.error_at(dash_pos, RegexErrorKind::EqualEndpointRange));
                    }
                    children.push(ctx.push(PatternElement::Range { low: lo, high: hi, ignore_case }));
                } else {
                    children.push(ctx.push(PatternElement::Literal { text: vec![lo], ignore_case }));
                    children.push(ctx.push(PatternElement::Literal { text: vec!['-'], ignore_case }));
                }
            } else {
                children.push(ctx.push(PatternElement::Literal { text: vec![lo], ignore_case }));
            }
        }

        Ok(ctx.push(PatternElement::CharacterClass { children, negated }))
    }
}

/// Reads one literal character out of a class body, resolving a
/// backslash escape if present. Returns `None` at `]`, end of input,
/// or a `\d`/`\p{...}`-style category escape (which is not a valid
/// range endpoint and is handled by the caller as its own member).
fn try_read_class_literal_char(ctx: &mut ParseContext<'_>) -> Option<char> {
    match ctx.driver.peek() {
        Some(']') | None => None,
        Some('\\') => {
            if matches!(
                ctx.driver.peek_at(1),
                Some('d') | Some('D') | Some('w') | Some('W') | Some('s') | Some('S') | Some('p') | Some('P')
            ) {
                return None;
            }
            ctx.driver.advance(); // backslash
            if let Some(ch) = escapes::parse_hex_escape(ctx) {
                return Some(ch);
            }
            let c = ctx.driver.peek()?;
            if let Some(resolved) = escapes::simple_escape(c) {
                ctx.driver.advance();
                return Some(resolved);
            }
            ctx.driver.advance();
            Some(c)
        }
        Some(c) => {
            ctx.driver.advance();
            Some(c)
        }
    }
}
