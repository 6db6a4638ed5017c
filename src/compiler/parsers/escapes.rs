//! Shared escape-sequence resolution, plus the catch-all parser for
//! backslash escapes that resolve to a single literal character (or a
//! short literal run, for `\Q...\E`). More specific escapes — anchors,
//! categories, backreferences, `\K`, `\X` — are claimed first by their
//! own parsers; this one only fires once those have passed.

use crate::compiler::driver::ParseContext;
use crate::error::{RegexError, RegexErrorKind};
use crate::parser::pattern_registry::{ClassContext, ElementParser};
use crate::pattern::{ElementId, PatternElement};

/// Resolves a single-character escape (`\n`, `\t`, `\0`, …) to its
/// literal code point. Returns `None` for escapes handled elsewhere
/// (backreferences, categories, anchors).
pub fn simple_escape(c: char) -> Option<char> {
    Some(match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'f' => '\u{0C}',
        'v' => '\u{0B}',
        'a' => '\u{07}',
        'e' => '\u{1B}',
        '0' => '\0',
        _ => return None,
    })
}

/// `\xHH`, `\x{HHHHHH}`, `\uHHHH` hexadecimal code point escapes.
/// Consumes from `ctx.driver` on success, leaves position untouched on
/// failure to parse a well-formed escape of the requested shape.
pub fn parse_hex_escape(ctx: &mut ParseContext<'_>) -> Option<char> {
    let save = ctx.driver.position();
    match ctx.driver.peek() {
        Some('x') => {
            ctx.driver.advance();
            if ctx.driver.consume('{') {
                let start = ctx.driver.position();
                while ctx.driver.peek().map_or(false, |c| c.is_ascii_hexdigit()) {
                    ctx.driver.advance();
                }
                let text = ctx.driver.chars_slice(start, ctx.driver.position());
                if ctx.driver.consume('}') {
                    if let Ok(v) = u32::from_str_radix(&text, 16) {
                        if let Some(c) = char::from_u32(v) {
                            return Some(c);
                        }
                    }
                }
            } else {
                let start = ctx.driver.position();
                for _ in 0..2 {
                    if ctx.driver.peek().map_or(false, |c| c.is_ascii_hexdigit()) {
                        ctx.driver.advance();
                    }
                }
                let text = ctx.driver.chars_slice(start, ctx.driver.position());
                if !text.is_empty() {
                    if let Ok(v) = u32::from_str_radix(&text, 16) {
                        if let Some(c) = char::from_u32(v) {
                            return Some(c);
                        }
                    }
                }
            }
        }
        Some('u') => {
            ctx.driver.advance();
            let start = ctx.driver.position();
            for _ in 0..4 {
                if ctx.driver.peek().map_or(false, |c| c.is_ascii_hexdigit()) {
                    ctx.driver.advance();
                }
            }
            let text = ctx.driver.chars_slice(start, ctx.driver.position());
            if text.len() == 4 {
                if let Ok(v) = u32::from_str_radix(&text, 16) {
                    if let Some(c) = char::from_u32(v) {
                        return Some(c);
                    }
                }
            }
        }
        _ => {}
    }
    ctx.driver.set_position(save);
    None
}

pub struct EscapeLiteralParser;

impl ElementParser for EscapeLiteralParser {
    fn class_context(&self) -> ClassContext {
        ClassContext::Both
    }

    fn recognizes(&self, ctx: &ParseContext<'_>, _inside_class: bool) -> bool {
        ctx.driver.peek() == Some('\\')
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, _inside_class: bool) -> Result<ElementId, RegexError> {
        let start = ctx.driver.position();
        ctx.driver.advance();
        let Some(c) = ctx.driver.peek() else {
            return Err(ctx.driver.error_at(start, RegexErrorKind::Other("trailing backslash".into())));
        };

        if c == 'Q' {
            ctx.driver.advance();
            let mut literal = Vec::new();
            loop {
                match (ctx.driver.peek(), ctx.driver.peek_at(1)) {
                    (Some('\\'), Some('E')) => {
                        ctx.driver.advance();
                        ctx.driver.advance();
                        break;
                    }
                    (Some(ch), _) => {
                        literal.push(ch);
                        ctx.driver.advance();
                    }
                    (None, _) => break,
                }
            }
            let ignore_case = ctx.driver.options.ignore_case();
            return Ok(ctx.push(PatternElement::Literal { text: literal, ignore_case }));
        }

        if let Some(ch) = parse_hex_escape(ctx) {
            let ignore_case = ctx.driver.options.ignore_case();
            return Ok(ctx.push(PatternElement::Literal { text: vec![ch], ignore_case }));
        }

        if c == 'c' {
            ctx.driver.advance();
            if let Some(letter) = ctx.driver.advance() {
                let control = ((letter.to_ascii_uppercase() as u8) ^ 0x40) as char;
                let ignore_case = ctx.driver.options.ignore_case();
                return Ok(ctx.push(PatternElement::Literal { text: vec![control], ignore_case }));
            }
            return Err(ctx.driver.error_at(start, RegexErrorKind::Other("incomplete control escape".into())));
        }

        if let Some(resolved) = simple_escape(c) {
            ctx.driver.advance();
            let ignore_case = ctx.driver.options.ignore_case();
            return Ok(ctx.push(PatternElement::Literal { text: vec![resolved], ignore_case }));
        }

        // Any other escaped character (punctuation, etc.) is simply
        // that character, literally.
        ctx.driver.advance();
        let ignore_case = ctx.driver.options.ignore_case();
        Ok(ctx.push(PatternElement::Literal { text: vec![c], ignore_case }))
    }
}
