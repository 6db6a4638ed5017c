//! Capture and match-record bookkeeping (§3 "Capture", "Match record").

use std::collections::HashMap;

/// A capture key: either the automatically- or explicitly-assigned
/// numeric slot, or an explicit name. A decimal-integer-looking group
/// name is folded into a numeric key at parse time (§4.3 "Group keys"),
/// so by the time a [`CaptureKey`] reaches the engine the split is
/// already final.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaptureKey {
    Number(u32),
    Name(String),
}

impl CaptureKey {
    pub fn parse(text: &str) -> CaptureKey {
        match text.parse::<u32>() {
            Ok(n) => CaptureKey::Number(n),
            Err(_) => CaptureKey::Name(text.to_string()),
        }
    }
}

impl std::fmt::Display for CaptureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureKey::Number(n) => write!(f, "{}", n),
            CaptureKey::Name(s) => write!(f, "{}", s),
        }
    }
}

/// A pair of positions into the input, normalized so `begin <= end`
/// (§3 "Capture"). Positions are byte offsets into the matched `&str`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capture {
    pub begin: usize,
    pub end: usize,
}

impl Capture {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Capture { begin: a, end: b }
        } else {
            Capture { begin: b, end: a }
        }
    }

    pub fn as_str<'t>(&self, text: &'t str) -> &'t str {
        &text[self.begin..self.end]
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// The running record of a single match attempt: overall bounds plus
/// per-key capture lists (§3 "Match record").
///
/// Captures obey strict stack discipline (§5): the most recent append
/// under a key is the first one a rewind removes.
#[derive(Clone, Debug, Default)]
pub struct MatchRecord {
    pub begin: usize,
    pub end: usize,
    numbered: HashMap<u32, Vec<Capture>>,
    named: HashMap<String, Vec<Capture>>,
}

impl MatchRecord {
    pub fn new(begin: usize, end: usize) -> Self {
        MatchRecord { begin, end, numbered: HashMap::new(), named: HashMap::new() }
    }

    pub fn push(&mut self, key: &CaptureKey, capture: Capture) {
        match key {
            CaptureKey::Number(n) => self.numbered.entry(*n).or_default().push(capture),
            CaptureKey::Name(s) => self.named.entry(s.clone()).or_default().push(capture),
        }
    }

    /// Undoes the most recent [`MatchRecord::push`] for `key`. Used by a
    /// frame's rewind hook.
    pub fn pop(&mut self, key: &CaptureKey) -> Option<Capture> {
        match key {
            CaptureKey::Number(n) => self.numbered.get_mut(n).and_then(|v| v.pop()),
            CaptureKey::Name(s) => self.named.get_mut(s).and_then(|v| v.pop()),
        }
    }

    pub fn captures(&self, key: &CaptureKey) -> &[Capture] {
        match key {
            CaptureKey::Number(n) => self.numbered.get(n).map(|v| v.as_slice()).unwrap_or(&[]),
            CaptureKey::Name(s) => self.named.get(s).map(|v| v.as_slice()).unwrap_or(&[]),
        }
    }

    pub fn last(&self, key: &CaptureKey) -> Option<Capture> {
        self.captures(key).last().copied()
    }

    /// True iff the most recent capture under `key` exists and is
    /// non-empty — the predicate the capture-presence conditional
    /// (§4.3 "Conditional") and `\k`/`\N` backreferences use.
    pub fn has_captured(&self, key: &CaptureKey) -> bool {
        self.last(key).map(|c| !c.is_empty()).unwrap_or(false)
    }

    pub fn numbered_keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.numbered.keys().copied()
    }

    pub fn named_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.named.keys().map(|s| s.as_str())
    }

    /// The capture with the greatest `begin` (ties broken by greater
    /// `end`) among every group's *current* last capture — the
    /// semantics `$+` (§4.5) needs.
    pub fn last_captured_group(&self) -> Option<Capture> {
        self.numbered
            .values()
            .chain(self.named.values())
            .filter_map(|v| v.last().copied())
            .max_by_key(|c| (c.begin, c.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_new_normalizes_order() {
        assert_eq!(Capture::new(5, 2), Capture { begin: 2, end: 5 });
        assert_eq!(Capture::new(2, 5), Capture { begin: 2, end: 5 });
    }

    #[test]
    fn capture_key_parse_splits_numeric_from_named() {
        assert_eq!(CaptureKey::parse("12"), CaptureKey::Number(12));
        assert_eq!(CaptureKey::parse("name"), CaptureKey::Name("name".to_string()));
    }

    #[test]
    fn push_pop_obeys_stack_discipline() {
        let mut record = MatchRecord::new(0, 0);
        let key = CaptureKey::Number(1);
        record.push(&key, Capture::new(0, 1));
        record.push(&key, Capture::new(2, 4));
        assert_eq!(record.last(&key), Some(Capture::new(2, 4)));
        assert_eq!(record.pop(&key), Some(Capture::new(2, 4)));
        assert_eq!(record.last(&key), Some(Capture::new(0, 1)));
        assert_eq!(record.pop(&key), Some(Capture::new(0, 1)));
        assert_eq!(record.pop(&key), None);
    }

    #[test]
    fn has_captured_is_false_for_empty_capture() {
        let mut record = MatchRecord::new(0, 0);
        let key = CaptureKey::Name("x".to_string());
        assert!(!record.has_captured(&key));
        record.push(&key, Capture::new(3, 3));
        assert!(!record.has_captured(&key));
        record.pop(&key);
        record.push(&key, Capture::new(3, 5));
        assert!(record.has_captured(&key));
    }

    #[test]
    fn last_captured_group_picks_the_latest_starting_capture() {
        let mut record = MatchRecord::new(0, 10);
        record.push(&CaptureKey::Number(1), Capture::new(0, 3));
        record.push(&CaptureKey::Name("tail".to_string()), Capture::new(7, 10));
        assert_eq!(record.last_captured_group(), Some(Capture::new(7, 10)));
    }
}
