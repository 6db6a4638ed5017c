//! The fallback parser: any plain character becomes a one-character
//! literal, with `IgnoreCase` baked in from the active options.

use crate::compiler::driver::ParseContext;
use crate::error::RegexError;
use crate::parser::pattern_registry::{ClassContext, ElementParser};
use crate::pattern::{ElementId, PatternElement};

pub struct LiteralParser;

impl ElementParser for LiteralParser {
    fn class_context(&self) -> ClassContext {
        ClassContext::Both
    }

    fn recognizes(&self, ctx: &ParseContext<'_>, _inside_class: bool) -> bool {
        !ctx.driver.is_at_end()
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, _inside_class: bool) -> Result<ElementId, RegexError> {
        let c = ctx.driver.advance().expect("recognizes() guarantees a character");
        let ignore_case = ctx.driver.options.ignore_case();
        Ok(ctx.push(PatternElement::Literal { text: vec![c], ignore_case }))
    }
}
