//! `.` (§4.3 "Wildcard"): any code point, or any except line terminators
//! unless `Singleline` is active.

use crate::compiler::driver::ParseContext;
use crate::error::RegexError;
use crate::parser::pattern_registry::{ClassContext, ElementParser};
use crate::pattern::{ElementId, PatternElement};

pub struct WildcardParser;

impl ElementParser for WildcardParser {
    fn class_context(&self) -> ClassContext {
        ClassContext::Outside
    }

    fn recognizes(&self, ctx: &ParseContext<'_>, _inside_class: bool) -> bool {
        ctx.driver.peek() == Some('.')
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, _inside_class: bool) -> Result<ElementId, RegexError> {
        ctx.driver.advance();
        let single_line = ctx.driver.options.singleline();
        Ok(ctx.push(PatternElement::Wildcard { single_line }))
    }
}
