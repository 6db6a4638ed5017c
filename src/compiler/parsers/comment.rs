//! `(?#...)` inline comments (§4.3 "Comment"): consumed and discarded,
//! contributing nothing to the compiled pattern.

use crate::compiler::driver::ParseContext;
use crate::error::{RegexError, RegexErrorKind};
use crate::parser::pattern_registry::{ClassContext, ElementParser};
use crate::pattern::{ElementId, PatternElement};

pub struct CommentParser;

impl ElementParser for CommentParser {
    fn class_context(&self) -> ClassContext {
        ClassContext::Outside
    }

    fn recognizes(&self, ctx: &ParseContext<'_>, _inside_class: bool) -> bool {
        ctx.driver.peek() == Some('(') && ctx.driver.peek_at(1) == Some('?') && ctx.driver.peek_at(2) == Some('#')
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, _inside_class: bool) -> Result<ElementId, RegexError> {
        let start = ctx.driver.position();
        ctx.driver.advance(); // (
        ctx.driver.advance(); // ?
        ctx.driver.advance(); // #
        loop {
            match ctx.driver.peek() {
                Some(')') => {
                    ctx.driver.advance();
                    break;
                }
                Some(_) => {
                    ctx.driver.advance();
                }
                None => return Err(ctx.driver.error_at(start, RegexErrorKind::UnterminatedComment)),
            }
        }
        Ok(ctx.push(PatternElement::Concat(Vec::new())))
    }
}
