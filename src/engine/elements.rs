//! Pattern-element match semantics (§4.3): one function per
//! [`PatternElement`] variant, each taking the element's own fields, the
//! running [`Engine`], and a success continuation `k`.
//!
//! Every one of these functions upholds one invariant that lets them
//! compose without a separate "rewind hook" object: **on a `false`
//! return, `eng`'s cursor position and match-record captures are
//! restored to exactly what they were on entry.** A construct that
//! commits irrevocably (atomic, possessive) is the only kind that
//! breaks this for its own *internal* attempts, by design — but it
//! still restores on overall failure, so the invariant holds one level
//! up. This is the tree-walking analogue of §3's "state frame with a
//! rewind hook": the frame is just the enclosing Rust call, and
//! rewinding is whatever that call does right before returning `false`.

use crate::locale::{CodePoint, CodePointFlags, Locale};
use crate::pattern::{
    AnchorKind, CaptureKey, CategoryKind, ConditionKind, ElementId, Pattern, PatternElement,
    QuantifierMode, Capture,
};
use crate::unicode::case::simple_fold_eq;

use super::cursor::Direction;
use super::Engine;

pub type Cont<'k, 'x> = dyn FnMut(&mut Engine<'x>) -> bool + 'k;

/// The entry point every construct (`Concat`'s members, group bodies,
/// alternatives, quantifier children, ...) calls back into.
pub fn match_element<'x>(id: ElementId, eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let pattern = eng.pattern;
    match pattern.get(id) {
        PatternElement::Concat(items) => match_concat(items, 0, eng, k),
        PatternElement::Literal { text, ignore_case } => match_literal(text, *ignore_case, eng, k),
        PatternElement::Range { low, high, ignore_case } => {
            match_range(*low, *high, *ignore_case, eng, k)
        }
        PatternElement::CharacterClass { children, negated } => {
            match_character_class(children, *negated, eng, k)
        }
        PatternElement::Category { kind, negated } => match_category(kind, *negated, eng, k),
        PatternElement::Wildcard { single_line } => match_wildcard(*single_line, eng, k),
        PatternElement::Anchor(kind) => match_anchor(*kind, eng, k),
        PatternElement::Group(child) => match_element(*child, eng, k),
        PatternElement::Capturing { key, child } => match_capturing(key.clone(), *child, eng, k),
        PatternElement::Balancing { push_key, pop_key, child } => {
            match_balancing(push_key.clone(), pop_key.clone(), *child, eng, k)
        }
        PatternElement::Backreference { key, ignore_case } => {
            match_backreference(key, *ignore_case, eng, k)
        }
        PatternElement::Recursion { target } => match_recursion(*target, eng, k),
        PatternElement::Conditional { condition, yes, no } => {
            match_conditional(condition, *yes, *no, eng, k)
        }
        PatternElement::Lookaround { child, behind, negate } => {
            match_lookaround(*child, *behind, *negate, eng, k)
        }
        PatternElement::Atomic(child) => match_atomic(*child, eng, k),
        PatternElement::Multiple { child, min, max, mode } => {
            match_multiple(*child, *min, *max, *mode, eng, k)
        }
        PatternElement::Alternation(branches) => match_alternation(branches, eng, k),
        PatternElement::ResetMatch => match_reset(eng, k),
        PatternElement::ValidUnicode => match_valid_unicode(eng, k),
    }
}

fn chars_match(locale: &Locale, a: char, b: char, ignore_case: bool) -> bool {
    if a == b {
        return true;
    }
    if !ignore_case {
        return false;
    }
    simple_fold_eq(locale, CodePoint::from_char(a), CodePoint::from_char(b))
}

/// A run of sibling elements matched in order (the compiler's output is
/// always rooted at one of these). `idx` is where we are in the walk;
/// recursion unwinds the sequence one element at a time through `k`.
///
/// `items` is always stored in source (left-to-right) order, but a
/// reverse-mode cursor (lookbehind's sub-engine, or `RightToLeft`)
/// consumes input from the high end down — so the element *nearest*
/// the anchor must be tried first. `idx` still counts up from `0`; we
/// just map it onto `items` back-to-front when the cursor is backward.
fn match_concat<'x>(items: &'x [ElementId], idx: usize, eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    if idx >= items.len() {
        return k(eng);
    }
    let real_idx = match eng.cursor.direction() {
        Direction::Forward => idx,
        Direction::Backward => items.len() - 1 - idx,
    };
    match_element(items[real_idx], eng, &mut |eng| match_concat(items, idx + 1, eng, k))
}

fn match_literal<'x>(text: &[char], ignore_case: bool, eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let start = eng.cursor.position();
    // Same reversal as `match_concat`: a multi-char literal under a
    // backward cursor must be compared rightmost-code-point-first.
    let sequence: Vec<char> = match eng.cursor.direction() {
        Direction::Forward => text.to_vec(),
        Direction::Backward => text.iter().rev().copied().collect(),
    };
    for expected in sequence {
        match eng.cursor.advance() {
            Some(actual) if chars_match(eng.locale, actual, expected, ignore_case) => {}
            _ => {
                eng.cursor.set_position(start);
                return false;
            }
        }
    }
    if k(eng) {
        true
    } else {
        eng.cursor.set_position(start);
        false
    }
}

fn match_range<'x>(low: char, high: char, ignore_case: bool, eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let start = eng.cursor.position();
    let Some(c) = eng.cursor.peek() else { return false };
    if !range_matches(eng.locale, low, high, ignore_case, c) {
        return false;
    }
    eng.cursor.advance();
    if k(eng) {
        true
    } else {
        eng.cursor.set_position(start);
        false
    }
}

fn range_matches(locale: &Locale, low: char, high: char, ignore_case: bool, c: char) -> bool {
    let in_range = |x: char| x >= low && x <= high;
    if !ignore_case {
        return in_range(c);
    }
    let folded = locale
        .get_info(CodePoint::from_char(c))
        .simple_fold
        .map(CodePoint::as_char)
        .unwrap_or(c);
    in_range(c) || in_range(folded)
}

/// The predicate a Unicode property/category test applies to one code
/// point (§4.3 "Category"), shared between the standalone `Category`
/// element and character-class membership tests.
pub fn category_matches(kind: &CategoryKind, c: char, locale: &Locale) -> bool {
    let info = locale.get_info(CodePoint::from_char(c));
    match kind {
        CategoryKind::General(gc) => info.category == *gc,
        CategoryKind::Super(s) => info.category.super_category() == *s,
        CategoryKind::Script(name) => info.script.eq_ignore_ascii_case(name),
        CategoryKind::Block(name) => info.block.eq_ignore_ascii_case(name),
        CategoryKind::WordChar => info.is_word_char(),
        CategoryKind::WhiteSpace => info.flags.contains(CodePointFlags::WHITE_SPACE),
    }
}

fn match_category<'x>(kind: &CategoryKind, negated: bool, eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let start = eng.cursor.position();
    let Some(c) = eng.cursor.peek() else { return false };
    if category_matches(kind, c, eng.locale) == negated {
        return false;
    }
    eng.cursor.advance();
    if k(eng) {
        true
    } else {
        eng.cursor.set_position(start);
        false
    }
}

/// Whether `c` is accepted by one character-class member (§4.3
/// "Range / character class"): a literal, a range, a category test, or
/// a nested class — recursively, with no cursor movement.
fn char_matches_element(pattern: &Pattern, id: ElementId, c: char, locale: &Locale) -> bool {
    match pattern.get(id) {
        PatternElement::Literal { text, ignore_case } => {
            text.len() == 1 && chars_match(locale, c, text[0], *ignore_case)
        }
        PatternElement::Range { low, high, ignore_case } => range_matches(locale, *low, *high, *ignore_case, c),
        PatternElement::Category { kind, negated } => category_matches(kind, c, locale) != *negated,
        PatternElement::CharacterClass { children, negated } => {
            let any = children.iter().any(|&ch| char_matches_element(pattern, ch, c, locale));
            any != *negated
        }
        _ => false,
    }
}

fn match_character_class<'x>(
    children: &[ElementId],
    negated: bool,
    eng: &mut Engine<'x>,
    k: &mut Cont<'_, 'x>,
) -> bool {
    let start = eng.cursor.position();
    let Some(c) = eng.cursor.peek() else { return false };
    let is_member = children.iter().any(|&ch| char_matches_element(eng.pattern, ch, c, eng.locale));
    if is_member == negated {
        return false;
    }
    eng.cursor.advance();
    if k(eng) {
        true
    } else {
        eng.cursor.set_position(start);
        false
    }
}

fn match_wildcard<'x>(single_line: bool, eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let start = eng.cursor.position();
    match eng.cursor.peek() {
        Some(c) if single_line || c != '\n' => {
            eng.cursor.advance();
            if k(eng) {
                true
            } else {
                eng.cursor.set_position(start);
                false
            }
        }
        _ => false,
    }
}

fn match_valid_unicode<'x>(eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let start = eng.cursor.position();
    if eng.cursor.peek().is_none() {
        return false;
    }
    eng.cursor.advance();
    if k(eng) {
        true
    } else {
        eng.cursor.set_position(start);
        false
    }
}

fn is_line_break_char(c: Option<char>) -> bool {
    matches!(c, Some('\n') | Some('\r') | Some('\u{2028}') | Some('\u{2029}'))
}

fn is_word_boundary(eng: &Engine<'_>) -> bool {
    let word_at = |c: Option<char>| {
        c.map(|c| eng.locale.get_info(CodePoint::from_char(c)).is_word_char())
            .unwrap_or(false)
    };
    word_at(eng.cursor.real_prev_char()) != word_at(eng.cursor.real_next_char())
}

/// Anchors never consume and never offer a second alternative — they
/// either gate `k` or fail outright (§4.3 "Anchors").
fn match_anchor<'x>(kind: AnchorKind, eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let len = eng.cursor.text().len();
    let pos = eng.cursor.position();
    let ok = match kind {
        AnchorKind::LineStart { multiline } => {
            pos == 0 || (multiline && is_line_break_char(eng.cursor.real_prev_char()))
        }
        AnchorKind::LineEnd { multiline } => {
            pos == len
                || (pos + 1 == len && eng.cursor.real_next_char() == Some('\n'))
                || (multiline && is_line_break_char(eng.cursor.real_next_char()))
        }
        AnchorKind::TextStart => pos == 0,
        AnchorKind::TextEnd => pos == len,
        AnchorKind::TextEndOrTrailingNewline => {
            pos == len || (pos + 1 == len && eng.cursor.real_next_char() == Some('\n'))
        }
        AnchorKind::PreviousMatchEnd => pos == eng.last,
        AnchorKind::WordBoundary => is_word_boundary(eng),
        AnchorKind::NotWordBoundary => !is_word_boundary(eng),
    };
    if ok {
        k(eng)
    } else {
        false
    }
}

fn match_capturing<'x>(key: CaptureKey, child: ElementId, eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let begin = eng.cursor.position();
    match_element(child, eng, &mut |eng| {
        let end = eng.cursor.position();
        eng.record.push(&key, Capture::new(begin, end));
        if k(eng) {
            true
        } else {
            eng.record.pop(&key);
            false
        }
    })
}

/// `(?'name1-name2'pattern)` (§4.3 "Balancing group"): pop `pop_key`'s
/// last capture, push a new `push_key` capture spanning from its
/// nearer endpoint to here, then run `pattern`. Rewinding restores both
/// lists to their pre-frame contents, in that order.
fn match_balancing<'x>(
    push_key: CaptureKey,
    pop_key: CaptureKey,
    child: ElementId,
    eng: &mut Engine<'x>,
    k: &mut Cont<'_, 'x>,
) -> bool {
    let Some(popped) = eng.record.last(&pop_key) else { return false };
    eng.record.pop(&pop_key);
    let cur = eng.cursor.position();
    let near = if cur >= popped.end { popped.end } else { popped.begin };
    eng.record.push(&push_key, Capture::new(near, cur));

    if match_element(child, eng, k) {
        true
    } else {
        eng.record.pop(&push_key);
        eng.record.push(&pop_key, popped);
        false
    }
}

fn match_backreference<'x>(
    key: &CaptureKey,
    ignore_case: bool,
    eng: &mut Engine<'x>,
    k: &mut Cont<'_, 'x>,
) -> bool {
    let Some(cap) = eng.record.last(key) else { return false };
    if cap.is_empty() {
        return false;
    }
    let text = cap.as_str(eng.cursor.text()).to_string();
    let start = eng.cursor.position();
    let sequence: Vec<char> = match eng.cursor.direction() {
        Direction::Forward => text.chars().collect(),
        Direction::Backward => text.chars().rev().collect(),
    };
    for expected in sequence {
        match eng.cursor.advance() {
            Some(actual) if chars_match(eng.locale, actual, expected, ignore_case) => {}
            _ => {
                eng.cursor.set_position(start);
                return false;
            }
        }
    }
    if k(eng) {
        true
    } else {
        eng.cursor.set_position(start);
        false
    }
}

/// `(?N)`/`(?&name)`/... (§4.3 "Recursion"): delegate straight to the
/// resolved target element using the engine's current state, guarded
/// against runaway depth (§8 "Maximum nesting").
fn match_recursion<'x>(target: ElementId, eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    const MAX_RECURSION_DEPTH: u32 = 4096;
    if eng.recursion_depth >= MAX_RECURSION_DEPTH {
        return false;
    }
    eng.recursion_depth += 1;
    let ok = match_element(target, eng, k);
    eng.recursion_depth -= 1;
    ok
}

fn match_conditional<'x>(
    condition: &ConditionKind,
    yes: ElementId,
    no: Option<ElementId>,
    eng: &mut Engine<'x>,
    k: &mut Cont<'_, 'x>,
) -> bool {
    let take_yes = match condition {
        ConditionKind::CaptureTaken(key) => eng.record.has_captured(key),
        ConditionKind::Pattern(cond_id) => {
            // "Runs it in a throwaway lookahead" (§4.3): the probe never
            // consumes input or leaves captures behind, win or lose.
            let entry = eng.cursor.position();
            let entry_record = eng.record.clone();
            let matched = match_element(*cond_id, eng, &mut |_eng| true);
            eng.cursor.set_position(entry);
            *eng.record = entry_record;
            matched
        }
    };
    if take_yes {
        match_element(yes, eng, k)
    } else {
        match no {
            Some(branch) => match_element(branch, eng, k),
            None => k(eng),
        }
    }
}

/// `(?=p)`/`(?!p)`/`(?<=p)`/`(?<!p)` (§4.3 "Lookaround"): runs `p`
/// zero-width by saving and restoring the cursor regardless of
/// outcome. Lookbehind flips the cursor's direction for the probe
/// rather than rewriting any element's logic (Design Notes
/// "Reverse-iteration abstraction").
fn match_lookaround<'x>(
    child: ElementId,
    behind: bool,
    negate: bool,
    eng: &mut Engine<'x>,
    k: &mut Cont<'_, 'x>,
) -> bool {
    let saved_cursor = eng.cursor;
    if behind {
        eng.cursor = eng.cursor.with_direction(eng.cursor.direction().flip());
    }
    let entry_record = eng.record.clone();
    let matched = match_element(child, eng, &mut |_eng| true);
    eng.cursor = saved_cursor;

    let outcome = matched != negate;
    if !outcome {
        *eng.record = entry_record;
        return false;
    }
    if k(eng) {
        true
    } else {
        *eng.record = entry_record;
        false
    }
}

/// `(?>p)` (§4.3 "Atomic group"): `p` backtracks freely to find its
/// first match, but once found, that choice is final — the frame
/// itself never offers the engine a second alternative.
fn match_atomic<'x>(child: ElementId, eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let entry = eng.cursor.position();
    let entry_record = eng.record.clone();
    if !match_element(child, eng, &mut |_eng| true) {
        return false;
    }
    if k(eng) {
        true
    } else {
        eng.cursor.set_position(entry);
        *eng.record = entry_record;
        false
    }
}

fn match_multiple<'x>(
    child: ElementId,
    min: u32,
    max: Option<u32>,
    mode: QuantifierMode,
    eng: &mut Engine<'x>,
    k: &mut Cont<'_, 'x>,
) -> bool {
    match mode {
        QuantifierMode::Greedy => match_greedy(child, min, max, 0, eng, k),
        QuantifierMode::Lazy => match_lazy(child, min, max, 0, eng, k),
        QuantifierMode::Possessive => match_possessive(child, min, max, eng, k),
    }
}

/// Greedy repetition (§4.3 "Multiple"): try one more iteration before
/// settling for `count` — recursion order is what makes this greedy,
/// since the deeper (longer) match is always attempted first.
fn match_greedy<'x>(
    child: ElementId,
    min: u32,
    max: Option<u32>,
    count: u32,
    eng: &mut Engine<'x>,
    k: &mut Cont<'_, 'x>,
) -> bool {
    if max.map_or(true, |m| count < m) {
        let save = eng.cursor.position();
        let extended = match_element(child, eng, &mut |eng| {
            if eng.cursor.position() == save {
                // A zero-width iteration can't be repeated without
                // looping forever; every further repetition would be
                // identical, so jump straight to the highest count the
                // bounds still allow instead of stopping short of `min`
                // (e.g. `(?:){3}` must still reach 3, not bail at 1).
                let reached = max.map_or(min.max(count + 1), |m| m.min(min.max(count + 1)));
                if reached >= min { k(eng) } else { false }
            } else {
                match_greedy(child, min, max, count + 1, eng, k)
            }
        });
        if extended {
            return true;
        }
    }
    if count >= min {
        k(eng)
    } else {
        false
    }
}

/// Lazy repetition: the symmetric twin of [`match_greedy`] — settle for
/// `count` first, extend only once that fails.
fn match_lazy<'x>(
    child: ElementId,
    min: u32,
    max: Option<u32>,
    count: u32,
    eng: &mut Engine<'x>,
    k: &mut Cont<'_, 'x>,
) -> bool {
    if count >= min && k(eng) {
        return true;
    }
    if max.map_or(true, |m| count < m) {
        let save = eng.cursor.position();
        return match_element(child, eng, &mut |eng| {
            if eng.cursor.position() == save {
                // Same zero-width reasoning as `match_greedy`: jump to
                // the highest count the bounds allow rather than
                // bailing out before `min` is reached.
                let reached = max.map_or(min.max(count + 1), |m| m.min(min.max(count + 1)));
                if reached >= min { k(eng) } else { false }
            } else {
                match_lazy(child, min, max, count + 1, eng, k)
            }
        });
    }
    false
}

/// Possessive repetition: greedy, but the frame commits the moment it
/// stops extending — `k`'s failure unwinds the whole quantifier, not
/// one iteration at a time (§4.3 "Multiple").
fn match_possessive<'x>(child: ElementId, min: u32, max: Option<u32>, eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let entry = eng.cursor.position();
    let entry_record = eng.record.clone();
    let mut count = 0u32;
    loop {
        if max.map_or(false, |m| count >= m) {
            break;
        }
        let save = eng.cursor.position();
        if !match_element(child, eng, &mut |_eng| true) {
            break;
        }
        count += 1;
        if eng.cursor.position() == save {
            break; // zero-width iteration: stop rather than loop forever
        }
    }
    if count < min {
        eng.cursor.set_position(entry);
        *eng.record = entry_record;
        return false;
    }
    if k(eng) {
        true
    } else {
        eng.cursor.set_position(entry);
        *eng.record = entry_record;
        false
    }
}

fn match_alternation<'x>(branches: &[ElementId], eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let start = eng.cursor.position();
    for &branch in branches {
        eng.cursor.set_position(start);
        if match_element(branch, eng, k) {
            return true;
        }
    }
    false
}

/// `\K` (§4.3 "Reset-match"): records where the eventual match should
/// *start* (or *end*, in reverse mode) if this frame is never rewound.
fn match_reset<'x>(eng: &mut Engine<'x>, k: &mut Cont<'_, 'x>) -> bool {
    let pos = eng.cursor.position();
    let previous = eng.reset_mark;
    eng.reset_mark = Some(pos);
    if k(eng) {
        true
    } else {
        eng.reset_mark = previous;
        false
    }
}
