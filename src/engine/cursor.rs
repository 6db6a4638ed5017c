//! The bidirectional input cursor (§4.4): a single iterator type
//! parameterized by [`Direction`], so every pattern element is written
//! once against a uniform interface and lookbehind/`RightToLeft` simply
//! flip which way `advance` travels (Design Notes "Reverse-iteration
//! abstraction").
//!
//! Positions are always true byte offsets into the scanned `&str`,
//! regardless of direction — only `advance`/`peek` change which
//! neighbor they look at. This is what lets `^`, `$`, `\b`, and capture
//! bookkeeping stay direction-agnostic: they read the real document
//! order around `position()` directly.

/// Which way an [`Engine`](super::Engine) steps through the input.
/// `RegexOptions::RightToLeft` and lookbehind both select `Backward`
/// for their (sub-)engine (§4.2, §4.3 "Lookaround").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn flip(self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// The scanned text plus a precomputed table of every char boundary in
/// it (including the final one, at `text.len()`), so stepping forward
/// or backward by one code point is an O(log n) lookup rather than a
/// rescan from either end.
pub struct TextBuffer<'t> {
    text: &'t str,
    boundaries: Vec<usize>,
}

impl<'t> TextBuffer<'t> {
    pub fn new(text: &'t str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        TextBuffer { text, boundaries }
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn char_at(&self, byte_pos: usize) -> Option<char> {
        self.text[byte_pos..].chars().next()
    }

    /// The byte offset one code point after `byte_pos` (saturating at
    /// `text.len()`).
    pub fn next_boundary(&self, byte_pos: usize) -> usize {
        match self.boundaries.binary_search(&byte_pos) {
            Ok(idx) if idx + 1 < self.boundaries.len() => self.boundaries[idx + 1],
            _ => self.text.len(),
        }
    }

    /// The byte offset one code point before `byte_pos` (saturating at
    /// `0`).
    pub fn prev_boundary(&self, byte_pos: usize) -> usize {
        match self.boundaries.binary_search(&byte_pos) {
            Ok(idx) if idx > 0 => self.boundaries[idx - 1],
            _ => 0,
        }
    }
}

/// A position-tracking cursor over one [`TextBuffer`] (§4.4 "Forward
/// mode"/"Reverse mode"). `lo`/`hi` are always the buffer's true
/// extremes (`0` and `text.len()`) — a sub-engine for a group or
/// quantifier iteration narrows nothing; only `position` moves.
/// Lookaround's nested engine reuses the same `lo`/`hi` so a lookbehind
/// can always see all the way back to the start of the whole input.
#[derive(Clone, Copy)]
pub struct Cursor<'t, 'b> {
    buf: &'b TextBuffer<'t>,
    direction: Direction,
    pos: usize,
    lo: usize,
    hi: usize,
}

impl<'t, 'b> Cursor<'t, 'b> {
    pub fn new(buf: &'b TextBuffer<'t>, direction: Direction, start: usize) -> Self {
        Cursor { buf, direction, pos: start, lo: 0, hi: buf.len() }
    }

    pub fn with_direction(&self, direction: Direction) -> Self {
        Cursor { buf: self.buf, direction, pos: self.pos, lo: self.lo, hi: self.hi }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// The bound the element sees as "begin": the lower index in
    /// forward mode, the higher index in reverse mode (§4.4).
    pub fn begin(&self) -> usize {
        match self.direction {
            Direction::Forward => self.lo,
            Direction::Backward => self.hi,
        }
    }

    pub fn end(&self) -> usize {
        match self.direction {
            Direction::Forward => self.hi,
            Direction::Backward => self.lo,
        }
    }

    pub fn at_begin(&self) -> bool {
        self.pos == self.begin()
    }

    pub fn at_end(&self) -> bool {
        self.pos == self.end()
    }

    /// The code point `advance` would consume, without moving.
    pub fn peek(&self) -> Option<char> {
        match self.direction {
            Direction::Forward => {
                if self.pos < self.hi {
                    self.buf.char_at(self.pos)
                } else {
                    None
                }
            }
            Direction::Backward => {
                if self.pos > self.lo {
                    self.buf.char_at(self.buf.prev_boundary(self.pos))
                } else {
                    None
                }
            }
        }
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos = match self.direction {
            Direction::Forward => self.buf.next_boundary(self.pos),
            Direction::Backward => self.buf.prev_boundary(self.pos),
        };
        Some(c)
    }

    /// The real, document-order code point immediately before
    /// `position()` — independent of scanning direction. `^`, `$`,
    /// `\b`, and `\B` all reason in true document order even while a
    /// reverse-mode engine is stepping backward through it.
    pub fn real_prev_char(&self) -> Option<char> {
        if self.pos == 0 {
            None
        } else {
            self.buf.char_at(self.buf.prev_boundary(self.pos))
        }
    }

    /// The real, document-order code point at-or-after `position()`.
    pub fn real_next_char(&self) -> Option<char> {
        self.buf.char_at(self.pos)
    }

    pub fn text(&self) -> &'t str {
        self.buf.text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_step_by_code_point_not_byte() {
        let buf = TextBuffer::new("a\u{00e9}b"); // 'a', 'é' (2 bytes), 'b'
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.next_boundary(0), 1);
        assert_eq!(buf.next_boundary(1), 3);
        assert_eq!(buf.next_boundary(3), 4);
        assert_eq!(buf.next_boundary(4), 4);
        assert_eq!(buf.prev_boundary(4), 3);
        assert_eq!(buf.prev_boundary(3), 1);
        assert_eq!(buf.prev_boundary(1), 0);
        assert_eq!(buf.prev_boundary(0), 0);
    }

    #[test]
    fn forward_cursor_advances_one_code_point_at_a_time() {
        let buf = TextBuffer::new("a\u{00e9}b");
        let mut cursor = Cursor::new(&buf, Direction::Forward, 0);
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), Some('\u{00e9}'));
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.advance(), None);
        assert!(cursor.at_end());
    }

    #[test]
    fn backward_cursor_reads_the_same_text_in_reverse() {
        let buf = TextBuffer::new("abc");
        let mut cursor = Cursor::new(&buf, Direction::Backward, 3);
        assert_eq!(cursor.advance(), Some('c'));
        assert_eq!(cursor.advance(), Some('b'));
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.advance(), None);
        assert!(cursor.at_end());
    }

    #[test]
    fn real_prev_and_next_char_ignore_scan_direction() {
        let buf = TextBuffer::new("abc");
        let mut cursor = Cursor::new(&buf, Direction::Backward, 3);
        cursor.advance(); // now positioned after consuming 'c', pos == 2
        assert_eq!(cursor.real_prev_char(), Some('b'));
        assert_eq!(cursor.real_next_char(), Some('c'));
    }

    #[test]
    fn with_direction_flips_without_moving_position() {
        let buf = TextBuffer::new("abc");
        let cursor = Cursor::new(&buf, Direction::Forward, 1);
        let flipped = cursor.with_direction(Direction::Backward);
        assert_eq!(flipped.position(), 1);
        assert_eq!(flipped.direction(), Direction::Backward);
    }
}
