//! `\K` (reset-match) and `\X` (extended grapheme cluster), §4.3.

use crate::compiler::driver::ParseContext;
use crate::error::RegexError;
use crate::parser::pattern_registry::{ClassContext, ElementParser};
use crate::pattern::{ElementId, PatternElement};

pub struct ResetMatchParser;

impl ElementParser for ResetMatchParser {
    fn class_context(&self) -> ClassContext {
        ClassContext::Outside
    }

    fn recognizes(&self, ctx: &ParseContext<'_>, _inside_class: bool) -> bool {
        ctx.driver.peek() == Some('\\') && ctx.driver.peek_at(1) == Some('K')
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, _inside_class: bool) -> Result<ElementId, RegexError> {
        ctx.driver.advance();
        ctx.driver.advance();
        Ok(ctx.push(PatternElement::ResetMatch))
    }
}

pub struct ValidUnicodeParser;

impl ElementParser for ValidUnicodeParser {
    fn class_context(&self) -> ClassContext {
        ClassContext::Outside
    }

    fn recognizes(&self, ctx: &ParseContext<'_>, _inside_class: bool) -> bool {
        ctx.driver.peek() == Some('\\') && ctx.driver.peek_at(1) == Some('X')
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, _inside_class: bool) -> Result<ElementId, RegexError> {
        ctx.driver.advance();
        ctx.driver.advance();
        Ok(ctx.push(PatternElement::ValidUnicode))
    }
}
