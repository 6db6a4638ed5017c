//! A Unicode-aware regular expression engine with full backtracking
//! semantics (§1): lookaround, backreferences, atomic and balancing
//! groups, conditionals, and pattern recursion, matched against
//! canonically-equivalence-aware Unicode collaborators (§3) rather than
//! raw bytes.
//!
//! The crate is layered the way the Design Notes describe: a compiler
//! (`compiler`, `parser`) turns pattern source into an immutable
//! [`pattern::Pattern`] tree; the `engine` walks that tree against an
//! input string; `replace` compiles and evaluates `$`-substitution
//! strings against a finished match. [`Regex`] is the façade tying all
//! of that together.

pub mod compiler;
pub mod engine;
pub mod error;
pub mod locale;
pub mod parser;
pub mod pattern;
pub mod replace;
pub mod unicode;

use std::ops::{Index, Range};
use std::sync::Arc;

use engine::{Direction, TextBuffer};
use locale::Locale;
use pattern::{CaptureKey, MatchRecord, Pattern};
use replace::Replacement;

pub use compiler::options::RegexOptions;
pub use error::{RegexError, RegexErrorKind};

/// A compiled regular expression (§4.2, §6).
///
/// Cloning a `Regex` is cheap: the compiled [`Pattern`] is reference
/// counted, so clones share the same compiled form.
#[derive(Clone, Debug)]
pub struct Regex {
    source: String,
    options: RegexOptions,
    pattern: Arc<Pattern>,
}

impl Regex {
    /// Compiles `source` under the default options (§4.2).
    pub fn new(source: &str) -> Result<Regex, RegexError> {
        Regex::with_options(source, RegexOptions::empty())
    }

    /// Compiles `source` under the given [`RegexOptions`] (§4.2).
    pub fn with_options(source: &str, options: RegexOptions) -> Result<Regex, RegexError> {
        let pattern = compiler::compile(source, options)?;
        Ok(Regex { source: source.to_string(), options, pattern: Arc::new(pattern) })
    }

    /// The pattern source this `Regex` was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The number of capturing groups in the pattern, not counting the
    /// whole match (group 0).
    pub fn captures_count(&self) -> u32 {
        self.pattern.capturing_group_count
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    /// The first match at or after byte offset `0` (§4.4 "Forward
    /// mode"/"Reverse mode" — reverse mode starts from the end under
    /// `RightToLeft`).
    pub fn find<'t>(&self, text: &'t str) -> Option<Match<'t>> {
        self.find_at(text, self.search_start(text))
    }

    /// The first match at or after `start` (or, under `RightToLeft`, at
    /// or before `start`).
    pub fn find_at<'t>(&self, text: &'t str, start: usize) -> Option<Match<'t>> {
        let buf = TextBuffer::new(text);
        let locale = locale::current();
        let record = engine::search(&self.pattern, &locale, self.options, &buf, start, start)?;
        Some(Match { text, begin: record.begin, end: record.end })
    }

    pub fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.captures_at(text, self.search_start(text))
    }

    pub fn captures_at<'t>(&self, text: &'t str, start: usize) -> Option<Captures<'t>> {
        let buf = TextBuffer::new(text);
        let locale = locale::current();
        let record = engine::search(&self.pattern, &locale, self.options, &buf, start, start)?;
        Some(Captures { text, record })
    }

    fn search_start(&self, text: &str) -> usize {
        if self.options.right_to_left() {
            text.len()
        } else {
            0
        }
    }

    /// Every non-overlapping match, in scan order (§4.4).
    pub fn matches<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        Matches { raw: self.raw_matches(text) }
    }

    /// Every non-overlapping match's captures, in scan order.
    pub fn captures_iter<'r, 't>(&'r self, text: &'t str) -> CapturesIter<'r, 't> {
        CapturesIter { raw: self.raw_matches(text) }
    }

    fn raw_matches<'r, 't>(&'r self, text: &'t str) -> RawMatches<'r, 't> {
        let direction = if self.options.right_to_left() { Direction::Backward } else { Direction::Forward };
        RawMatches {
            pattern: &self.pattern,
            locale: locale::current(),
            options: self.options,
            text,
            buf: TextBuffer::new(text),
            direction,
            next_pos: self.search_start(text),
            last: self.search_start(text),
            done: false,
        }
    }

    /// Replaces the first match with `replacement`, which may contain
    /// `$`-substitutions (§4.5).
    pub fn replace(&self, text: &str, replacement: &str) -> Result<String, RegexError> {
        self.replacen(text, 1, replacement)
    }

    /// Replaces every non-overlapping match with `replacement`.
    pub fn replace_all(&self, text: &str, replacement: &str) -> Result<String, RegexError> {
        self.replacen(text, 0, replacement)
    }

    /// Replaces at most `limit` matches (`0` means unlimited) with
    /// `replacement`.
    pub fn replacen(&self, text: &str, limit: usize, replacement: &str) -> Result<String, RegexError> {
        let compiled = Replacement::compile(replacement)?;
        Ok(self.replace_with(text, limit, |caps| {
            let mut out = String::new();
            compiled.expand(&mut out, caps.text, &caps.record);
            out
        }))
    }

    /// Replaces at most `limit` matches (`0` means unlimited) with the
    /// result of calling `replacer` on each match's captures.
    pub fn replace_with<F>(&self, text: &str, limit: usize, mut replacer: F) -> String
    where
        F: FnMut(&Captures<'_>) -> String,
    {
        let mut result = String::with_capacity(text.len());
        let mut last_written = 0usize;
        let mut count = 0usize;
        for caps in self.captures_iter(text) {
            if limit != 0 && count >= limit {
                break;
            }
            let m = caps.whole_match();
            if m.begin() < last_written {
                // Overlapping with already-emitted text can only happen
                // in reverse mode; matches still arrive in scan order,
                // so skip rather than double-emit.
                continue;
            }
            result.push_str(&text[last_written..m.begin()]);
            result.push_str(&replacer(&caps));
            last_written = m.end();
            count += 1;
        }
        result.push_str(&text[last_written..]);
        result
    }

    /// Splits `text` on every non-overlapping match (§4.4, analogous to
    /// `str::split` but pattern-driven).
    pub fn split<'r, 't>(&'r self, text: &'t str) -> Split<'r, 't> {
        Split { matches: self.matches(text), text, last_end: 0, done: false }
    }

    /// Escapes every metacharacter in `text` so the result matches
    /// `text` literally when compiled as a pattern.
    pub fn escape(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if matches!(
                c,
                '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '#'
            ) || c.is_whitespace()
            {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }
}

/// One match: the span it occupies in the original text (§3 "Match
/// record").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match<'t> {
    text: &'t str,
    begin: usize,
    end: usize,
}

impl<'t> Match<'t> {
    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }

    pub fn as_str(&self) -> &'t str {
        &self.text[self.begin..self.end]
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// One match's full capture bookkeeping (§3 "Match record").
#[derive(Clone, Debug)]
pub struct Captures<'t> {
    text: &'t str,
    record: MatchRecord,
}

impl<'t> Captures<'t> {
    pub fn whole_match(&self) -> Match<'t> {
        Match { text: self.text, begin: self.record.begin, end: self.record.end }
    }

    /// Group `0` is the whole match; any other number looks up the
    /// numbered group's last capture, if it captured anything.
    pub fn get_number(&self, n: u32) -> Option<Match<'t>> {
        if n == 0 {
            return Some(self.whole_match());
        }
        self.record
            .last(&CaptureKey::Number(n))
            .map(|c| Match { text: self.text, begin: c.begin, end: c.end })
    }

    pub fn get_name(&self, name: &str) -> Option<Match<'t>> {
        self.record
            .last(&CaptureKey::Name(name.to_string()))
            .map(|c| Match { text: self.text, begin: c.begin, end: c.end })
    }

    pub fn get(&self, key: &CaptureKey) -> Option<Match<'t>> {
        match key {
            CaptureKey::Number(n) => self.get_number(*n),
            CaptureKey::Name(name) => self.get_name(name),
        }
    }

    /// `$+` (§4.5): the group with the latest-starting capture among
    /// every group's current last capture.
    pub fn last_captured_group(&self) -> Option<Match<'t>> {
        self.record
            .last_captured_group()
            .map(|c| Match { text: self.text, begin: c.begin, end: c.end })
    }

    pub fn iter_numbered(&self) -> impl Iterator<Item = (u32, Match<'t>)> + '_ {
        self.record.numbered_keys().filter_map(move |n| self.get_number(n).map(|m| (n, m)))
    }

    pub fn iter_named(&self) -> impl Iterator<Item = (&str, Match<'t>)> + '_ {
        self.record.named_keys().filter_map(move |name| self.get_name(name).map(|m| (name, m)))
    }
}

impl<'t> Index<u32> for Captures<'t> {
    type Output = str;

    fn index(&self, n: u32) -> &str {
        self.get_number(n).unwrap_or_else(|| panic!("no capture group numbered {}", n)).as_str()
    }
}

impl<'t> Index<&str> for Captures<'t> {
    type Output = str;

    fn index(&self, name: &str) -> &str {
        self.get_name(name).unwrap_or_else(|| panic!("no capture group named '{}'", name)).as_str()
    }
}

/// Drives repeated calls to [`engine::search`], threading `\G`'s anchor
/// (`last`) and the next start position between attempts (§4.4).
struct RawMatches<'r, 't> {
    pattern: &'r Pattern,
    locale: Arc<Locale>,
    options: RegexOptions,
    text: &'t str,
    buf: TextBuffer<'t>,
    direction: Direction,
    next_pos: usize,
    last: usize,
    done: bool,
}

impl<'r, 't> Iterator for RawMatches<'r, 't> {
    type Item = MatchRecord;

    fn next(&mut self) -> Option<MatchRecord> {
        if self.done {
            return None;
        }
        let record = engine::search(self.pattern, &self.locale, self.options, &self.buf, self.next_pos, self.last);
        let Some(record) = record else {
            self.done = true;
            return None;
        };
        self.last = record.end;
        self.next_pos = match self.direction {
            Direction::Forward => {
                if record.end > record.begin {
                    record.end
                } else if record.end == self.buf.len() {
                    // Force termination: there is no position further
                    // right to retry a zero-width match from.
                    self.buf.len() + 1
                } else {
                    self.buf.next_boundary(record.end)
                }
            }
            Direction::Backward => {
                if record.end > record.begin {
                    record.begin
                } else if record.begin == 0 {
                    // Force termination: there is no position further
                    // left to retry a zero-width match from.
                    self.buf.len() + 1
                } else {
                    self.buf.prev_boundary(record.begin)
                }
            }
        };
        if self.next_pos > self.buf.len() {
            self.done = true;
        }
        Some(record)
    }
}

/// An iterator over every match in scan order (§4.4).
pub struct Matches<'r, 't> {
    raw: RawMatches<'r, 't>,
}

impl<'r, 't> Iterator for Matches<'r, 't> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Match<'t>> {
        let record = self.raw.next()?;
        Some(Match { text: self.raw.text, begin: record.begin, end: record.end })
    }
}

/// An iterator over every match's captures, in scan order (§4.4).
pub struct CapturesIter<'r, 't> {
    raw: RawMatches<'r, 't>,
}

impl<'r, 't> Iterator for CapturesIter<'r, 't> {
    type Item = Captures<'t>;

    fn next(&mut self) -> Option<Captures<'t>> {
        let record = self.raw.next()?;
        Some(Captures { text: self.raw.text, record })
    }
}

/// An iterator over the substrings between matches (§4.4, analogous to
/// `str::split`).
pub struct Split<'r, 't> {
    matches: Matches<'r, 't>,
    text: &'t str,
    last_end: usize,
    done: bool,
}

impl<'r, 't> Iterator for Split<'r, 't> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        if self.done {
            return None;
        }
        match self.matches.next() {
            Some(m) => {
                let piece = &self.text[self.last_end..m.begin()];
                self.last_end = m.end();
                Some(piece)
            }
            None => {
                self.done = true;
                Some(&self.text[self.last_end..])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_match_and_find() {
        let re = Regex::new("a+b").unwrap();
        assert!(re.is_match("xxaaabxx"));
        let m = re.find("xxaaabxx").unwrap();
        assert_eq!(m.as_str(), "aaab");
        assert_eq!(m.range(), 2..6);
    }

    #[test]
    fn captures_numbered_and_named() {
        let re = Regex::new(r"(?<year>\d{4})-(\d{2})-(\d{2})").unwrap();
        let caps = re.captures("born 1990-04-12 today").unwrap();
        assert_eq!(&caps[0], "1990-04-12");
        assert_eq!(&caps["year"], "1990");
        assert_eq!(&caps[2], "04");
        assert_eq!(&caps[3], "12");
    }

    #[test]
    fn matches_iterator_is_non_overlapping() {
        let re = Regex::new(r"\d+").unwrap();
        let found: Vec<&str> = re.matches("a1 bb22 ccc333").map(|m| m.as_str()).collect();
        assert_eq!(found, vec!["1", "22", "333"]);
    }

    #[test]
    fn split_on_pattern() {
        let re = Regex::new(r"\s*,\s*").unwrap();
        let pieces: Vec<&str> = re.split("a, b,c ,  d").collect();
        assert_eq!(pieces, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn escape_is_a_fixed_point() {
        let raw = "a.b*c(d)[e]";
        let escaped = Regex::escape(raw);
        let re = Regex::new(&escaped).unwrap();
        let m = re.find(raw).unwrap();
        assert_eq!(m.as_str(), raw);
    }

    /// §8 concrete scenario 1: anchor + multiline yields one empty match
    /// per line start.
    #[test]
    fn multiline_caret_matches_every_line_start() {
        let re = Regex::with_options("^", RegexOptions::MULTILINE).unwrap();
        let positions: Vec<usize> = re.matches("a\nb\nc\n").map(|m| m.begin()).collect();
        assert_eq!(positions, vec![0, 2, 4, 6]);
        assert!(re.matches("a\nb\nc\n").all(|m| m.is_empty()));
    }

    /// §8 concrete scenario 2: a balancing group counting matched
    /// bracket-like pairs, with a conditional final assertion that the
    /// opening stack emptied out.
    #[test]
    fn balancing_group_tracks_close_spans() {
        let re = Regex::with_options(
            r"^[^<>]*(((?'Open'<)[^<>]*)+((?'Close-Open'>)[^<>]*)+)*(?(Open)(?!))$",
            RegexOptions::EXPLICIT_CAPTURE,
        )
        .unwrap();
        let caps = re.captures("<abc><mno<xyz>>").unwrap();
        assert_eq!(caps.whole_match().as_str(), "<abc><mno<xyz>>");
        assert!(caps.get_name("Open").is_none());
        // `Captures::get_name` surfaces only the last of a repeated
        // group's captures; the balancing-group alternation visits
        // "abc", then "xyz", then "mno<xyz>" last.
        assert_eq!(caps.get_name("Close").unwrap().as_str(), "mno<xyz>");
    }

    /// §8 concrete scenario 3: greedy `a*` must backtrack one `a` to let
    /// the trailing `a` in the pattern succeed.
    #[test]
    fn greedy_quantifier_backtracks() {
        let re = Regex::new("a*a").unwrap();
        let m = re.find("aaaaa").unwrap();
        assert_eq!(m.as_str(), "aaaaa");
    }

    /// §8 concrete scenario 4: variable-width lookbehind.
    #[test]
    fn variable_width_lookbehind() {
        let re = Regex::new(r"(?<=a.*?)a").unwrap();
        let m = re.find("abbbba").unwrap();
        assert_eq!(m.begin(), 5);
        assert_eq!(m.as_str(), "a");
    }

    /// §8 concrete scenario 5: `$&` replacement.
    #[test]
    fn replace_all_wraps_words_in_quotes() {
        let re = Regex::new(r"\w+").unwrap();
        let replaced = re.replace_all(" hello world ", "\"$&\"").unwrap();
        assert_eq!(replaced, " \"hello\" \"world\" ");
    }

    /// §8 concrete scenario 6: an RFC-5322-ish address pattern compiled
    /// under `IgnorePatternWhitespace | IgnoreCase`.
    #[test]
    fn email_like_pattern_under_free_spacing() {
        let pattern = r"
            ^ [a-z0-9!#$%&'*+/=?^_`{|}~-]+
                (?: \. [a-z0-9!#$%&'*+/=?^_`{|}~-]+ )*
            @
            (?: [a-z0-9] (?: [a-z0-9-]* [a-z0-9] )? \. )+
            [a-z0-9] (?: [a-z0-9-]* [a-z0-9] )? $
        ";
        let re = Regex::with_options(
            pattern,
            RegexOptions::IGNORE_PATTERN_WHITESPACE | RegexOptions::IGNORE_CASE,
        )
        .unwrap();
        assert!(re.is_match("rleahy@rleahy.ca"));
        assert!(!re.is_match("John..Doe@example.com"));
        assert!(!re.is_match(".John.Doe@example.com"));
    }

    #[test]
    fn backreference_requires_exact_repeat() {
        let re = Regex::new(r"(\w+) \1").unwrap();
        assert!(re.is_match("abab abab"));
        assert!(!re.is_match("abab baba"));
    }

    #[test]
    fn atomic_group_does_not_give_back_on_backtrack() {
        let re = Regex::new(r"(?>a+)a").unwrap();
        assert!(!re.is_match("aaaa"));
    }

    #[test]
    fn zero_width_matches_still_advance() {
        let re = Regex::new(r"a*").unwrap();
        let found: Vec<&str> = re.matches("baab").map(|m| m.as_str()).collect();
        assert_eq!(found, vec!["", "aa", "", ""]);
    }

    /// A multi-element sequence under `RightToLeft` must still match
    /// its literal text in forward reading order, not reversed —
    /// `RightToLeft` only changes which end of the input scanning
    /// starts from and which match is returned first.
    #[test]
    fn right_to_left_matches_literal_in_document_order() {
        let re = Regex::with_options("ab", RegexOptions::RIGHT_TO_LEFT).unwrap();
        let m = re.find("xxabxxab").unwrap();
        assert_eq!(m.as_str(), "ab");
        assert_eq!(m.begin(), 6);
    }

    /// Same bug class as the lookbehind case: a capturing group (a
    /// `Concat` of two elements) evaluated under a backward cursor must
    /// match its children nearest-to-anchor-first.
    #[test]
    fn right_to_left_multi_element_group_matches_in_order() {
        let re = Regex::with_options(r"(a)(b)", RegexOptions::RIGHT_TO_LEFT).unwrap();
        let caps = re.captures("xxabxx").unwrap();
        assert_eq!(&caps[0], "ab");
        assert_eq!(&caps[1], "a");
        assert_eq!(&caps[2], "b");
    }

    /// A quantifier whose body can only match zero-width on this input
    /// must still reach a `min` greater than 1 instead of bailing out
    /// after one virtual iteration.
    #[test]
    fn zero_width_body_quantifier_reaches_its_minimum() {
        let re = Regex::new(r"^(?:a?){3}$").unwrap();
        assert!(re.is_match(""));
        let lazy = Regex::new(r"^(?:a?){3}?$").unwrap();
        assert!(lazy.is_match(""));
    }
}
