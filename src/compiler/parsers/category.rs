//! Unicode property and POSIX-style classes (§4.3 "Category"): `\d \D
//! \w \W \s \S`, and `\p{Name}` / `\P{Name}` / `\pL` general-category,
//! script, and block tests.

use crate::compiler::driver::ParseContext;
use crate::error::{RegexError, RegexErrorKind};
use crate::locale::GeneralCategory;
use crate::parser::pattern_registry::{ClassContext, ElementParser};
use crate::pattern::{CategoryKind, ElementId, PatternElement};

pub struct CategoryParser;

impl ElementParser for CategoryParser {
    fn class_context(&self) -> ClassContext {
        ClassContext::Both
    }

    fn recognizes(&self, ctx: &ParseContext<'_>, _inside_class: bool) -> bool {
        ctx.driver.peek() == Some('\\')
            && matches!(
                ctx.driver.peek_at(1),
                Some('d') | Some('D') | Some('w') | Some('W') | Some('s') | Some('S') | Some('p') | Some('P')
            )
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, _inside_class: bool) -> Result<ElementId, RegexError> {
        let start = ctx.driver.position();
        ctx.driver.advance(); // backslash
        let letter = ctx.driver.advance().unwrap();

        let (kind, negated) = match letter {
            'd' => (CategoryKind::General(GeneralCategory::Nd), false),
            'D' => (CategoryKind::General(GeneralCategory::Nd), true),
            'w' => (CategoryKind::WordChar, false),
            'W' => (CategoryKind::WordChar, true),
            's' => (CategoryKind::WhiteSpace, false),
            'S' => (CategoryKind::WhiteSpace, true),
            'p' | 'P' => {
                let negated = letter == 'P';
                let name = if ctx.driver.consume('{') {
                    let name_start = ctx.driver.position();
                    while ctx.driver.peek().map_or(false, |c| c != '}') {
                        ctx.driver.advance();
                    }
                    let name = ctx.driver.chars_slice(name_start, ctx.driver.position());
                    if !ctx.driver.consume('}') {
                        return Err(ctx.driver.error_at(start, RegexErrorKind::UnknownUnicodeProperty(name)));
                    }
                    name
                } else {
                    match ctx.driver.advance() {
                        Some(c) => c.to_string(),
                        None => return Err(ctx.driver.error_at(start, RegexErrorKind::UnknownUnicodeProperty(String::new()))),
                    }
                };
                (category_kind_from_name(&name).ok_or_else(|| {
                    ctx.driver.error_at(start, RegexErrorKind::UnknownUnicodeProperty(name.clone()))
                })?, negated)
            }
            _ => unreachable!("recognizes() restricts the category letter"),
        };

        Ok(ctx.push(PatternElement::Category { kind, negated }))
    }
}

fn category_kind_from_name(name: &str) -> Option<CategoryKind> {
    if let Some(gc) = GeneralCategory::parse(name) {
        return Some(CategoryKind::General(gc));
    }
    if name.len() == 1 {
        let c = name.chars().next().unwrap();
        if matches!(c, 'L' | 'M' | 'N' | 'P' | 'S' | 'Z' | 'C') {
            return Some(CategoryKind::Super(c));
        }
    }
    if let Some(script) = name.strip_prefix("Is") {
        return Some(CategoryKind::Script(script.to_string()));
    }
    if let Some(block) = name.strip_prefix("In") {
        return Some(CategoryKind::Block(block.to_string()));
    }
    // Treat any other bare identifier as a script name, consistent with
    // `\p{Greek}`/`\p{Han}`-style usage.
    Some(CategoryKind::Script(name.to_string()))
}
