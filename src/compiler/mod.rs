//! The regex compiler (§4.2): turns a pattern string plus
//! [`RegexOptions`] into a compiled [`Pattern`], via the [`Driver`]
//! cursor and the pattern-element parser registry (§4.1).

pub mod driver;
pub mod options;
pub mod parsers;

pub use driver::{CompileState, Driver, ParseContext};
pub use options::RegexOptions;

use crate::error::{RegexError, RegexErrorKind};
use crate::pattern::{ElementId, Pattern, PatternElement, QuantifierMode};
use crate::parser::pattern_registry::DEFAULT_PATTERN_REGISTRY;

/// Compiles a pattern source string under the given options into a
/// [`Pattern`] (§4.2 "Driver: top-level entry point").
pub fn compile(source: &str, options: RegexOptions) -> Result<Pattern, RegexError> {
    let driver = Driver::new(source, options);
    let mut state = CompileState::new();
    let root = {
        let mut ctx = ParseContext { driver, state: &mut state };
        let root = compile_alternation(&mut ctx)?;
        if !ctx.driver.is_at_end() {
            return Err(ctx.driver.error(RegexErrorKind::Other("unmatched ')'".into())));
        }
        root
    };
    let group_count = state.next_group_number - 1;
    resolve_recursions(&mut state, root)?;
    check_infinite_recursion(&state, root)?;
    Ok(state.builder.finish(root, group_count))
}

/// Resolves every `(?R)`/`(?1)`/`(?-1)`/`(?&name)` node to the real
/// [`ElementId`] of the group (or the whole pattern) it re-enters
/// (§4.3 "Recursion"). Must run after the whole pattern has been
/// parsed, since a recursion can refer to a group defined later in the
/// source or to the pattern's own root.
fn resolve_recursions(state: &mut CompileState, root: ElementId) -> Result<(), RegexError> {
    let pending = std::mem::take(&mut state.pending_recursions);
    for (id, target) in pending {
        let resolved = match target {
            driver::RecursionTarget::Whole => root,
            driver::RecursionTarget::Absolute(n) => *state
                .group_elements_by_number
                .get(&n)
                .ok_or_else(|| RegexError::new(0, RegexErrorKind::UnknownBackreference(n.to_string())))?,
            driver::RecursionTarget::Relative(offset) => {
                let current_max = state.next_group_number as i64 - 1;
                let n = current_max + offset;
                if n < 1 {
                    return Err(RegexError::new(0, RegexErrorKind::RelativeRecursionOutOfRange));
                }
                *state
                    .group_elements_by_number
                    .get(&(n as u32))
                    .ok_or(RegexError::new(0, RegexErrorKind::RelativeRecursionOutOfRange))?
            }
            driver::RecursionTarget::Named(name) => *state
                .group_elements_by_name
                .get(&name)
                .ok_or_else(|| RegexError::new(0, RegexErrorKind::UnknownBackreference(name.clone())))?,
        };
        if let PatternElement::Recursion { target } = state.builder.get_mut(id) {
            *target = resolved;
        }
    }
    Ok(())
}

/// `a|b|c` — an ordered list of alternatives, tried left to right
/// (§4.3 "Alternation").
pub fn compile_alternation(ctx: &mut ParseContext<'_>) -> Result<ElementId, RegexError> {
    let mut branches = vec![compile_sequence(ctx)?];
    while ctx.driver.peek() == Some('|') {
        ctx.driver.advance();
        branches.push(compile_sequence(ctx)?);
    }
    if branches.len() == 1 {
        Ok(branches.pop().unwrap())
    } else {
        Ok(ctx.push(PatternElement::Alternation(branches)))
    }
}

/// A run of atoms (each possibly quantified), stopping at end of
/// input, `|`, or a `)` closing an enclosing group. Every `(` is
/// handled by recursing straight back into [`compile_alternation`], so
/// a `)` reached here can only be the one matching the group that
/// called us — ordinary recursive-descent paren matching, no separate
/// terminator plumbing required.
pub fn compile_sequence(ctx: &mut ParseContext<'_>) -> Result<ElementId, RegexError> {
    let mut seq = Vec::new();
    loop {
        skip_insignificant(ctx);
        match ctx.driver.peek() {
            None | Some('|') | Some(')') => break,
            _ => {}
        }
        if matches!(ctx.driver.peek(), Some('*') | Some('+') | Some('?')) {
            return Err(ctx.driver.error(RegexErrorKind::QuantifierWithoutOperand));
        }
        let atom = compile_atom(ctx)?;
        let quantified = compile_quantifier(ctx, atom)?;
        seq.push(quantified);
    }
    Ok(ctx.push(PatternElement::Concat(seq)))
}

/// Skips whitespace and `#`-comments when `IgnorePatternWhiteSpace` is
/// active (§4.2). A backslash-escaped whitespace character is never
/// skipped.
fn skip_insignificant(ctx: &mut ParseContext<'_>) {
    if !ctx.driver.options.ignore_pattern_whitespace() {
        return;
    }
    loop {
        match ctx.driver.peek() {
            Some(c) if c.is_whitespace() => {
                ctx.driver.advance();
            }
            Some('#') => {
                while !ctx.driver.is_at_end() && ctx.driver.peek() != Some('\n') {
                    ctx.driver.advance();
                }
            }
            _ => break,
        }
    }
}

fn compile_atom(ctx: &mut ParseContext<'_>) -> Result<ElementId, RegexError> {
    for parser in DEFAULT_PATTERN_REGISTRY.iter_for(false) {
        if parser.recognizes(ctx, false) {
            return parser.parse(ctx, false);
        }
    }
    Err(ctx.driver.error(RegexErrorKind::Other("no parser recognized the input".into())))
}

/// Parses a single character-class member, used by
/// [`parsers::character_class::CharacterClassParser`] for the contents
/// of `[...]`.
pub(crate) fn compile_class_member(ctx: &mut ParseContext<'_>) -> Result<ElementId, RegexError> {
    for parser in DEFAULT_PATTERN_REGISTRY.iter_for(true) {
        if parser.recognizes(ctx, true) {
            return parser.parse(ctx, true);
        }
    }
    Err(ctx.driver.error(RegexErrorKind::Other("no parser recognized the input".into())))
}

fn compile_quantifier(ctx: &mut ParseContext<'_>, operand: ElementId) -> Result<ElementId, RegexError> {
    let bounds = match ctx.driver.peek() {
        Some('*') => {
            ctx.driver.advance();
            Some((0, None))
        }
        Some('+') => {
            ctx.driver.advance();
            Some((1, None))
        }
        Some('?') => {
            ctx.driver.advance();
            Some((0, Some(1)))
        }
        Some('{') => parse_braced_bounds(&mut ctx.driver),
        _ => None,
    };
    let Some((min, max)) = bounds else {
        return Ok(operand);
    };
    if let Some(max) = max {
        if max < min {
            return Err(ctx.driver.error(RegexErrorKind::InvalidQuantifier));
        }
    }
    let mode = match ctx.driver.peek() {
        Some('?') => {
            ctx.driver.advance();
            QuantifierMode::Lazy
        }
        Some('+') => {
            ctx.driver.advance();
            QuantifierMode::Possessive
        }
        _ => QuantifierMode::Greedy,
    };
    Ok(ctx.push(PatternElement::Multiple { child: operand, min, max, mode }))
}

fn parse_braced_bounds(driver: &mut Driver) -> Option<(u32, Option<u32>)> {
    let save = driver.position();
    if !driver.consume('{') {
        return None;
    }
    let min_start = driver.position();
    while driver.peek().map_or(false, |c| c.is_ascii_digit()) {
        driver.advance();
    }
    let min_str = driver.chars_slice(min_start, driver.position());
    let has_comma = driver.consume(',');
    let max_start = driver.position();
    if has_comma {
        while driver.peek().map_or(false, |c| c.is_ascii_digit()) {
            driver.advance();
        }
    }
    let max_str = driver.chars_slice(max_start, driver.position());
    if !driver.consume('}') || (min_str.is_empty() && !has_comma) {
        driver.set_position(save);
        return None;
    }
    let min: u32 = min_str.parse().unwrap_or(0);
    let max: Option<u32> = if has_comma {
        if max_str.is_empty() {
            None
        } else {
            match max_str.parse() {
                Ok(n) => Some(n),
                Err(_) => {
                    driver.set_position(save);
                    return None;
                }
            }
        }
    } else {
        Some(min)
    };
    Some((min, max))
}

/// Rejects patterns where a [`PatternElement::Recursion`] can be
/// reached, from its own target's start, through a path of elements
/// that all admit a zero-width match — an infinite loop the explicit
/// backtracking executor would otherwise only discover by exhausting
/// the call stack (§9 Open Questions: "Left recursion").
fn check_infinite_recursion(state: &CompileState, root: ElementId) -> Result<(), RegexError> {
    use std::collections::HashSet;

    fn nullable(builder: &crate::pattern::PatternBuilder, id: ElementId, visiting: &mut HashSet<ElementId>, recursion_targets: &mut Vec<ElementId>) -> bool {
        if !visiting.insert(id) {
            return true;
        }
        let result = match builder.get(id) {
            PatternElement::Concat(items) => items.iter().all(|&c| nullable(builder, c, visiting, recursion_targets)),
            PatternElement::Alternation(items) => items.iter().any(|&c| nullable(builder, c, visiting, recursion_targets)),
            PatternElement::Group(child) | PatternElement::Atomic(child) => nullable(builder, *child, visiting, recursion_targets),
            PatternElement::Capturing { child, .. } => nullable(builder, *child, visiting, recursion_targets),
            PatternElement::Balancing { child, .. } => nullable(builder, *child, visiting, recursion_targets),
            PatternElement::Multiple { child, min, .. } => *min == 0 || nullable(builder, *child, visiting, recursion_targets),
            PatternElement::Lookaround { .. } | PatternElement::Anchor(_) | PatternElement::ResetMatch => true,
            PatternElement::Conditional { yes, no, .. } => {
                nullable(builder, *yes, visiting, recursion_targets) || no.map_or(true, |n| nullable(builder, n, visiting, recursion_targets))
            }
            PatternElement::Recursion { target } => {
                recursion_targets.push(*target);
                false
            }
            _ => false,
        };
        visiting.remove(&id);
        result
    }

    fn find_recursions(builder: &crate::pattern::PatternBuilder, id: ElementId, out: &mut Vec<ElementId>, seen: &mut HashSet<ElementId>) {
        if !seen.insert(id) {
            return;
        }
        match builder.get(id) {
            PatternElement::Recursion { target } => out.push(*target),
            PatternElement::Concat(items) | PatternElement::Alternation(items) => {
                for &c in items {
                    find_recursions(builder, c, out, seen);
                }
            }
            PatternElement::Group(child) | PatternElement::Atomic(child) => find_recursions(builder, *child, out, seen),
            PatternElement::Capturing { child, .. } => find_recursions(builder, *child, out, seen),
            PatternElement::Balancing { child, .. } => find_recursions(builder, *child, out, seen),
            PatternElement::Multiple { child, .. } => find_recursions(builder, *child, out, seen),
            PatternElement::Conditional { yes, no, .. } => {
                find_recursions(builder, *yes, out, seen);
                if let Some(n) = no {
                    find_recursions(builder, *n, out, seen);
                }
            }
            _ => {}
        }
    }

    let mut recursion_targets = Vec::new();
    find_recursions(&state.builder, root, &mut recursion_targets, &mut HashSet::new());
    for target in recursion_targets {
        let mut visiting = HashSet::new();
        let mut discovered = Vec::new();
        if nullable(&state.builder, target, &mut visiting, &mut discovered) {
            return Err(RegexError::new(0, RegexErrorKind::InfiniteRecursion));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegexErrorKind;

    fn compile_ok(source: &str) -> Pattern {
        compile(source, RegexOptions::empty()).unwrap_or_else(|e| panic!("{} failed to compile: {}", source, e))
    }

    #[test]
    fn counts_capturing_groups() {
        let pattern = compile_ok(r"(a)(b(c))");
        assert_eq!(pattern.capturing_group_count, 3);
    }

    #[test]
    fn explicit_capture_ignores_unnamed_groups() {
        let pattern = compile(r"(a)(?<x>b)", RegexOptions::EXPLICIT_CAPTURE).unwrap();
        assert_eq!(pattern.capturing_group_count, 1);
    }

    #[test]
    fn unterminated_group_is_an_error() {
        let err = compile("(a", RegexOptions::empty()).unwrap_err();
        assert_eq!(err.kind, RegexErrorKind::UnterminatedGroup);
    }

    #[test]
    fn reversed_char_range_is_an_error() {
        let err = compile("[z-a]", RegexOptions::empty()).unwrap_err();
        assert_eq!(err.kind, RegexErrorKind::ReversedRange);
    }

    #[test]
    fn equal_endpoint_range_is_an_error() {
        let err = compile("[a-a]", RegexOptions::empty()).unwrap_err();
        assert_eq!(err.kind, RegexErrorKind::EqualEndpointRange);
    }

    #[test]
    fn backwards_quantifier_bounds_are_an_error() {
        let err = compile("a{3,1}", RegexOptions::empty()).unwrap_err();
        assert_eq!(err.kind, RegexErrorKind::InvalidQuantifier);
    }

    #[test]
    fn duplicate_group_name_is_an_error() {
        let err = compile(r"(?<x>a)(?<x>b)", RegexOptions::empty()).unwrap_err();
        assert_eq!(err.kind, RegexErrorKind::DuplicateGroupName("x".to_string()));
    }

    #[test]
    fn self_recursing_nullable_group_is_rejected() {
        // Group 1 matches zero-width on its own, so recursing into it
        // can never make progress.
        let err = compile(r"(a?)(?1)", RegexOptions::empty()).unwrap_err();
        assert_eq!(err.kind, RegexErrorKind::InfiniteRecursion);
    }

    #[test]
    fn bounded_recursion_compiles() {
        // Each recursive call is gated behind consuming one 'a' first,
        // so the target is not nullable.
        compile_ok(r"(a(?1)?)");
    }

    #[test]
    fn unterminated_lookaround_is_an_error() {
        let err = compile("(?=a", RegexOptions::empty()).unwrap_err();
        assert_eq!(err.kind, RegexErrorKind::UnterminatedLookaround);
    }

    #[test]
    fn unterminated_atomic_group_is_an_error() {
        let err = compile("(?>a", RegexOptions::empty()).unwrap_err();
        assert_eq!(err.kind, RegexErrorKind::UnterminatedAtomic);
    }

    #[test]
    fn unterminated_recursion_is_an_error() {
        let err = compile("(a)(?1", RegexOptions::empty()).unwrap_err();
        assert_eq!(err.kind, RegexErrorKind::UnterminatedRecursion);
    }

    #[test]
    fn quantifier_without_operand_is_an_error() {
        let err = compile("*a", RegexOptions::empty()).unwrap_err();
        assert_eq!(err.kind, RegexErrorKind::QuantifierWithoutOperand);
    }

    #[test]
    fn orphan_alternation_in_conditional_is_an_error() {
        let err = compile("(?(1)a|b|c)", RegexOptions::empty()).unwrap_err();
        assert_eq!(err.kind, RegexErrorKind::OrphanAlternation);
    }
}
