//! `(...)` and every `(?...)` variant (§4.3 "Group", "Capturing",
//! "Balancing", "Recursion", "Conditional", "Lookaround", "Atomic"),
//! plus inline option groups.
//!
//! Grounded in `original_source/src/regexgroup.cpp`,
//! `regexconditional.cpp`, `regexlookaround.cpp`, `regexatomic.cpp`,
//! and `regexrecursegroup.cpp`: each construct is its own element kind
//! sharing one opening-paren dispatch.

use crate::compiler::driver::{ParseContext, RecursionTarget};
use crate::compiler::options::RegexOptions;
use crate::compiler::{compile_alternation, compile_sequence};
use crate::error::{RegexError, RegexErrorKind};
use crate::parser::pattern_registry::{ClassContext, ElementParser};
use crate::pattern::{CaptureKey, ConditionKind, ElementId, PatternElement};

pub struct GroupParser;

impl ElementParser for GroupParser {
    fn class_context(&self) -> ClassContext {
        ClassContext::Outside
    }

    fn recognizes(&self, ctx: &ParseContext<'_>, _inside_class: bool) -> bool {
        ctx.driver.peek() == Some('(')
    }

    fn parse(&self, ctx: &mut ParseContext<'_>, _inside_class: bool) -> Result<ElementId, RegexError> {
        let start = ctx.driver.position();
        ctx.driver.advance(); // (

        if ctx.driver.peek() != Some('?') {
            return parse_capturing(ctx, start, None);
        }
        ctx.driver.advance(); // ?

        match ctx.driver.peek() {
            Some(':') => {
                ctx.driver.advance();
                let child = close_group(ctx, start)?;
                Ok(ctx.push(PatternElement::Group(child)))
            }
            Some('>') => {
                ctx.driver.advance();
                let child = close_group_as(ctx, start, RegexErrorKind::UnterminatedAtomic)?;
                Ok(ctx.push(PatternElement::Atomic(child)))
            }
            Some('=') => {
                ctx.driver.advance();
                let child = close_group_as(ctx, start, RegexErrorKind::UnterminatedLookaround)?;
                Ok(ctx.push(PatternElement::Lookaround { child, behind: false, negate: false }))
            }
            Some('!') => {
                ctx.driver.advance();
                let child = close_group_as(ctx, start, RegexErrorKind::UnterminatedLookaround)?;
                Ok(ctx.push(PatternElement::Lookaround { child, behind: false, negate: true }))
            }
            Some('(') => parse_conditional(ctx, start),
            Some('R') => {
                ctx.driver.advance();
                expect_close_paren_as(ctx, start, RegexErrorKind::UnterminatedRecursion)?;
                push_recursion(ctx, RecursionTarget::Whole)
            }
            Some('&') => {
                ctx.driver.advance();
                let name = read_until(ctx, ')');
                expect_close_paren_as(ctx, start, RegexErrorKind::UnterminatedRecursion)?;
                push_recursion(ctx, RecursionTarget::Named(name))
            }
            Some(c) if c == '-' || c == '+' || c.is_ascii_digit() => {
                let (sign, explicit_sign) = match c {
                    '-' => {
                        ctx.driver.advance();
                        (-1i64, true)
                    }
                    '+' => {
                        ctx.driver.advance();
                        (1i64, true)
                    }
                    _ => (1i64, false),
                };
                let digits = read_digits(ctx);
                if digits.is_empty() {
                    return Err(ctx.driver.error_at(start, RegexErrorKind::EmptyRecursion));
                }
                expect_close_paren_as(ctx, start, RegexErrorKind::UnterminatedRecursion)?;
                let n: i64 = digits.parse().unwrap_or(0);
                let target = if explicit_sign {
                    RecursionTarget::Relative(sign * n)
                } else if n == 0 {
                    RecursionTarget::Whole
                } else {
                    RecursionTarget::Absolute(n as u32)
                };
                push_recursion(ctx, target)
            }
            Some('\'') => {
                ctx.driver.advance();
                let first = read_until_one_of(ctx, &['\'', '-']);
                if ctx.driver.peek() == Some('-') {
                    ctx.driver.advance();
                    let second = read_until(ctx, '\'');
                    ctx.driver.consume('\'');
                    let child = close_group(ctx, start)?;
                    Ok(ctx.push(PatternElement::Balancing {
                        push_key: CaptureKey::parse(&first),
                        pop_key: CaptureKey::parse(&second),
                        child,
                    }))
                } else {
                    ctx.driver.consume('\'');
                    parse_capturing(ctx, start, Some(first))
                }
            }
            Some('<') => match ctx.driver.peek_at(1) {
                Some('=') => {
                    ctx.driver.advance();
                    ctx.driver.advance();
                    let child = close_group_as(ctx, start, RegexErrorKind::UnterminatedLookaround)?;
                    Ok(ctx.push(PatternElement::Lookaround { child, behind: true, negate: false }))
                }
                Some('!') => {
                    ctx.driver.advance();
                    ctx.driver.advance();
                    let child = close_group_as(ctx, start, RegexErrorKind::UnterminatedLookaround)?;
                    Ok(ctx.push(PatternElement::Lookaround { child, behind: true, negate: true }))
                }
                _ => {
                    ctx.driver.advance(); // <
                    let first = read_until_one_of(ctx, &['>', '-']);
                    if ctx.driver.peek() == Some('-') {
                        ctx.driver.advance();
                        let second = read_until(ctx, '>');
                        ctx.driver.consume('>');
                        let child = close_group(ctx, start)?;
                        Ok(ctx.push(PatternElement::Balancing {
                            push_key: CaptureKey::parse(&first),
                            pop_key: CaptureKey::parse(&second),
                            child,
                        }))
                    } else {
                        ctx.driver.consume('>');
                        parse_capturing(ctx, start, Some(first))
                    }
                }
            },
            Some('P') => {
                ctx.driver.advance();
                if ctx.driver.consume('<') {
                    let name = read_until(ctx, '>');
                    ctx.driver.consume('>');
                    parse_capturing(ctx, start, Some(name))
                } else if ctx.driver.consume('>') {
                    let name = read_until(ctx, ')');
                    expect_close_paren_as(ctx, start, RegexErrorKind::UnterminatedRecursion)?;
                    push_recursion(ctx, RecursionTarget::Named(name))
                } else {
                    Err(ctx.driver.error_at(start, RegexErrorKind::EmptyGroupSpecification))
                }
            }
            Some(c) if "imsx-".contains(c) => parse_inline_options(ctx, start),
            _ => Err(ctx.driver.error_at(start, RegexErrorKind::UnknownOptionCharacter(ctx.driver.peek().unwrap_or('\0')))),
        }
    }
}

fn push_recursion(ctx: &mut ParseContext<'_>, target: RecursionTarget) -> Result<ElementId, RegexError> {
    let id = ctx.push(PatternElement::Recursion { target: 0 });
    ctx.state.pending_recursions.push((id, target));
    Ok(id)
}

fn parse_capturing(ctx: &mut ParseContext<'_>, start: usize, name: Option<String>) -> Result<ElementId, RegexError> {
    if ctx.driver.options.explicit_capture() && name.is_none() {
        let child = close_group(ctx, start)?;
        return Ok(ctx.push(PatternElement::Group(child)));
    }
    let key = ctx.state.allocate_group(name).map_err(|k| ctx.driver.error_at(start, k))?;
    let child = close_group(ctx, start)?;
    let elem = ctx.push(PatternElement::Capturing { key: key.clone(), child });
    ctx.state.register_group_element(&key, elem);
    Ok(elem)
}

fn parse_conditional(ctx: &mut ParseContext<'_>, start: usize) -> Result<ElementId, RegexError> {
    ctx.driver.advance(); // second (

    let condition = if ctx.driver.peek().map_or(false, |c| c.is_ascii_digit()) {
        let text = read_until(ctx, ')');
        ConditionKind::CaptureTaken(CaptureKey::parse(&text))
    } else if ctx.driver.peek() == Some('<') || ctx.driver.peek() == Some('\'') {
        let delim_open = ctx.driver.advance().unwrap();
        let delim_close = if delim_open == '<' { '>' } else { '\'' };
        let name = read_until(ctx, delim_close);
        ctx.driver.consume(delim_close);
        ConditionKind::CaptureTaken(CaptureKey::parse(&name))
    } else {
        let pattern = compile_alternation(ctx)?;
        ConditionKind::Pattern(pattern)
    };
    if !ctx.driver.consume(')') {
        return Err(ctx.driver.error_at(start, RegexErrorKind::UnterminatedConditional));
    }

    let yes = compile_sequence(ctx)?;
    let no = if ctx.driver.peek() == Some('|') {
        ctx.driver.advance();
        Some(compile_sequence(ctx)?)
    } else {
        None
    };
    if ctx.driver.peek() == Some('|') {
        return Err(ctx.driver.error(RegexErrorKind::OrphanAlternation));
    }
    expect_close_paren_as(ctx, start, RegexErrorKind::UnterminatedConditional)?;
    Ok(ctx.push(PatternElement::Conditional { condition, yes, no }))
}

fn parse_inline_options(ctx: &mut ParseContext<'_>, start: usize) -> Result<ElementId, RegexError> {
    let mut add = RegexOptions::empty();
    let mut remove = RegexOptions::empty();
    let mut removing = false;
    loop {
        match ctx.driver.peek() {
            Some('-') => {
                removing = true;
                ctx.driver.advance();
            }
            Some('i') => {
                set_bit(&mut add, &mut remove, removing, RegexOptions::IGNORE_CASE);
                ctx.driver.advance();
            }
            Some('m') => {
                set_bit(&mut add, &mut remove, removing, RegexOptions::MULTILINE);
                ctx.driver.advance();
            }
            Some('s') => {
                set_bit(&mut add, &mut remove, removing, RegexOptions::SINGLELINE);
                ctx.driver.advance();
            }
            Some('x') => {
                set_bit(&mut add, &mut remove, removing, RegexOptions::IGNORE_PATTERN_WHITESPACE);
                ctx.driver.advance();
            }
            Some(':') => {
                ctx.driver.advance();
                let saved = ctx.driver.options;
                ctx.driver.options = (ctx.driver.options | add) & !remove;
                let child = close_group(ctx, start)?;
                ctx.driver.options = saved;
                return Ok(ctx.push(PatternElement::Group(child)));
            }
            Some(')') => {
                ctx.driver.advance();
                ctx.driver.options = (ctx.driver.options | add) & !remove;
                return Ok(ctx.push(PatternElement::Concat(Vec::new())));
            }
            _ => return Err(ctx.driver.error_at(start, RegexErrorKind::UnknownOptionCharacter(ctx.driver.peek().unwrap_or('\0')))),
        }
    }
}

fn set_bit(add: &mut RegexOptions, remove: &mut RegexOptions, removing: bool, bit: RegexOptions) {
    if removing {
        remove.insert(bit);
    } else {
        add.insert(bit);
    }
}

fn close_group(ctx: &mut ParseContext<'_>, start: usize) -> Result<ElementId, RegexError> {
    close_group_as(ctx, start, RegexErrorKind::UnterminatedGroup)
}

/// Like [`close_group`], but reports `kind` instead of
/// [`RegexErrorKind::UnterminatedGroup`] if the closing `)` is missing —
/// lookaround, atomic, and recursion groups each have their own
/// unterminated-construct error (§6).
fn close_group_as(ctx: &mut ParseContext<'_>, start: usize, kind: RegexErrorKind) -> Result<ElementId, RegexError> {
    let child = compile_alternation(ctx)?;
    expect_close_paren_as(ctx, start, kind)?;
    Ok(child)
}

fn expect_close_paren_as(ctx: &mut ParseContext<'_>, start: usize, kind: RegexErrorKind) -> Result<(), RegexError> {
    if ctx.driver.consume(')') {
        Ok(())
    } else {
        Err(ctx.driver.error_at(start, kind))
    }
}

fn read_until(ctx: &mut ParseContext<'_>, terminator: char) -> String {
    read_until_one_of(ctx, &[terminator])
}

fn read_until_one_of(ctx: &mut ParseContext<'_>, terminators: &[char]) -> String {
    let start = ctx.driver.position();
    while ctx.driver.peek().map_or(false, |c| !terminators.contains(&c)) {
        ctx.driver.advance();
    }
    ctx.driver.chars_slice(start, ctx.driver.position())
}

fn read_digits(ctx: &mut ParseContext<'_>) -> String {
    let start = ctx.driver.position();
    while ctx.driver.peek().map_or(false, |c| c.is_ascii_digit()) {
        ctx.driver.advance();
    }
    ctx.driver.chars_slice(start, ctx.driver.position())
}
