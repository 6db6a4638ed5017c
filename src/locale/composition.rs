//! The NFC composition table (§3 "Composition table").

use super::codepoint::CodePoint;

/// Ordered mapping from `(starter, combiner) -> composed` used only
/// during NFC. Immutable once built; looked up by binary search, same
/// discipline as [`super::Locale::get_info`].
#[derive(Clone, Debug, Default)]
pub struct CompositionTable {
    // Sorted lexicographically on (starter, combiner).
    entries: Vec<(CodePoint, CodePoint, CodePoint)>,
}

impl CompositionTable {
    pub fn new(mut entries: Vec<(CodePoint, CodePoint, CodePoint)>) -> Self {
        entries.sort_by_key(|&(starter, combiner, _)| (starter, combiner));
        CompositionTable { entries }
    }

    pub fn compose(&self, starter: CodePoint, combiner: CodePoint) -> Option<CodePoint> {
        self.entries
            .binary_search_by_key(&(starter, combiner), |&(s, c, _)| (s, c))
            .ok()
            .map(|idx| self.entries[idx].2)
    }
}
