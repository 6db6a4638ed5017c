//! Backreferences (§4.3 "Backreference"): `\1`, `\k<name>`, `\k'name'`,
//! `\g{name}`.

use crate::compiler::driver::ParseContext;
use crate::error::RegexError;
use crate::parser::pattern_registry::{ClassContext, ElementParser};
use crate::pattern::{CaptureKey, ElementId, PatternElement};

pub struct BackreferenceParser;

impl ElementParser for BackreferenceParser {
    fn class_context(&self) -> ClassContext {
        ClassContext::Outside
    }

    fn recognizes(&self, ctx: &ParseContext<'_>, _inside_class: bool) -> bool {
        if ctx.driver.peek() != Some('\\') {
            return false;
        }
        match ctx.driver.peek_at(1) {
            Some(c) if c.is_ascii_digit() && c != '0' => true,
            Some('k') | Some('g') => true,
            _ => false,
        }
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, _inside_class: bool) -> Result<ElementId, RegexError> {
        ctx.driver.advance(); // backslash
        let letter = ctx.driver.peek().unwrap();
        let ignore_case = ctx.driver.options.ignore_case();

        if letter.is_ascii_digit() {
            let start = ctx.driver.position();
            while ctx.driver.peek().map_or(false, |c| c.is_ascii_digit()) {
                ctx.driver.advance();
            }
            let text = ctx.driver.chars_slice(start, ctx.driver.position());
            let key = CaptureKey::parse(&text);
            return Ok(ctx.push(PatternElement::Backreference { key, ignore_case }));
        }

        ctx.driver.advance(); // k or g
        let (open, close) = match ctx.driver.peek() {
            Some('<') => ('<', '>'),
            Some('\'') => ('\'', '\''),
            Some('{') => ('{', '}'),
            _ => ('<', '>'),
        };
        ctx.driver.consume(open);
        let name_start = ctx.driver.position();
        while ctx.driver.peek().map_or(false, |c| c != close) {
            ctx.driver.advance();
        }
        let name = ctx.driver.chars_slice(name_start, ctx.driver.position());
        ctx.driver.consume(close);
        let key = CaptureKey::parse(&name);
        Ok(ctx.push(PatternElement::Backreference { key, ignore_case }))
    }
}
