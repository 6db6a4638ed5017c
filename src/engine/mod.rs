//! The backtracking matcher (§4.3, §4.4): a tree walk over the compiled
//! [`Pattern`], written continuation-passing style so Rust's own call
//! stack plays the role of the "explicit state-frame stack" the source
//! keeps by hand. A group really does own a nested invocation of the
//! same walk; an alternation really does hold an iterator into its
//! alternatives — they just live as local variables in a Rust stack
//! frame instead of as a heap object with a rewind method.

pub mod cursor;
pub mod elements;

pub use cursor::{Cursor, Direction, TextBuffer};

use crate::compiler::options::RegexOptions;
use crate::locale::Locale;
use crate::pattern::{MatchRecord, Pattern};

/// Everything one match attempt threads through the tree walk: the
/// immutable compiled pattern and locale, the live cursor, the capture
/// bookkeeping, and the handful of cross-cutting bits a few element
/// kinds consult (`\G`'s anchor, `\K`'s mark, recursion depth).
pub struct Engine<'x> {
    pub pattern: &'x Pattern,
    pub locale: &'x Locale,
    pub options: RegexOptions,
    pub cursor: Cursor<'x, 'x>,
    pub record: &'x mut MatchRecord,
    /// Where the previous match in an iteration ended — what `\G`
    /// compares against (§4.3 "Anchors").
    pub last: usize,
    /// The position `\K` last marked, if any (§4.3 "Reset-match").
    pub reset_mark: Option<usize>,
    pub recursion_depth: u32,
}

/// Attempts the whole pattern anchored at exactly `start`, in
/// `direction`. Returns the final [`MatchRecord`] on success, with
/// `begin`/`end` set from `start`, the walk's final cursor position,
/// and any `\K` mark — `None` leaves no trace of the attempt.
pub fn try_match_at<'x>(
    pattern: &'x Pattern,
    locale: &'x Locale,
    options: RegexOptions,
    buf: &'x TextBuffer<'x>,
    start: usize,
    last: usize,
    direction: Direction,
) -> Option<MatchRecord> {
    let mut record = MatchRecord::new(start, start);
    let matched;
    let final_pos;
    let reset_mark;
    {
        let mut eng = Engine {
            pattern,
            locale,
            options,
            cursor: Cursor::new(buf, direction, start),
            record: &mut record,
            last,
            reset_mark: None,
            recursion_depth: 0,
        };
        matched = elements::match_element(pattern.root, &mut eng, &mut |_eng| true);
        final_pos = eng.cursor.position();
        reset_mark = eng.reset_mark;
    }
    if !matched {
        return None;
    }
    let (begin, end) = match direction {
        Direction::Forward => (reset_mark.unwrap_or(start), final_pos),
        Direction::Backward => (final_pos, reset_mark.unwrap_or(start)),
    };
    record.begin = begin;
    record.end = end;
    Some(record)
}

/// Tries every start position from `from` toward the scan's far end,
/// in `direction`, returning the first successful [`MatchRecord`]
/// (§4.4 "Forward mode"/"Reverse mode"). `from` is the position to try
/// first — callers scanning right-to-left pass the buffer's length.
pub fn search<'x>(
    pattern: &'x Pattern,
    locale: &'x Locale,
    options: RegexOptions,
    buf: &'x TextBuffer<'x>,
    from: usize,
    last: usize,
) -> Option<MatchRecord> {
    let direction = if options.right_to_left() { Direction::Backward } else { Direction::Forward };
    let mut pos = from;
    loop {
        if let Some(record) = try_match_at(pattern, locale, options, buf, pos, last, direction) {
            return Some(record);
        }
        match direction {
            Direction::Forward => {
                if pos >= buf.len() {
                    return None;
                }
                pos = buf.next_boundary(pos);
            }
            Direction::Backward => {
                if pos == 0 {
                    return None;
                }
                pos = buf.prev_boundary(pos);
            }
        }
    }
}
