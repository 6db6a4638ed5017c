//! Zero-width assertions (§4.3 "Anchors"): `^`, `$`, `\A`, `\z`, `\Z`,
//! `\G`, `\b`, `\B`.

use crate::compiler::driver::ParseContext;
use crate::error::RegexError;
use crate::parser::pattern_registry::{ClassContext, ElementParser};
use crate::pattern::{AnchorKind, ElementId, PatternElement};

pub struct AnchorParser;

impl ElementParser for AnchorParser {
    fn class_context(&self) -> ClassContext {
        ClassContext::Outside
    }

    fn recognizes(&self, ctx: &ParseContext<'_>, _inside_class: bool) -> bool {
        match ctx.driver.peek() {
            Some('^') | Some('$') => true,
            Some('\\') => matches!(
                ctx.driver.peek_at(1),
                Some('A') | Some('z') | Some('Z') | Some('G') | Some('b') | Some('B')
            ),
            _ => false,
        }
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, _inside_class: bool) -> Result<ElementId, RegexError> {
        let multiline = ctx.driver.options.multiline();
        let kind = match ctx.driver.peek().unwrap() {
            '^' => {
                ctx.driver.advance();
                AnchorKind::LineStart { multiline }
            }
            '$' => {
                ctx.driver.advance();
                AnchorKind::LineEnd { multiline }
            }
            '\\' => {
                ctx.driver.advance();
                let c = ctx.driver.advance().unwrap();
                match c {
                    'A' => AnchorKind::TextStart,
                    'z' => AnchorKind::TextEnd,
                    'Z' => AnchorKind::TextEndOrTrailingNewline,
                    'G' => AnchorKind::PreviousMatchEnd,
                    'b' => AnchorKind::WordBoundary,
                    'B' => AnchorKind::NotWordBoundary,
                    _ => unreachable!("recognizes() restricts the escaped anchor letters"),
                }
            }
            _ => unreachable!("recognizes() restricts the leading character"),
        };
        Ok(ctx.push(PatternElement::Anchor(kind)))
    }
}
