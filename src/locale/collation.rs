//! The DUCET-flavored collation table (§3 "Collation table entry").
//!
//! Collation *sorting* is explicitly out of scope (§1 Non-goals); this
//! module only carries the data shape so a [`Locale`](super::Locale) can
//! be built faithfully and so a future sort routine has something to
//! consult. Nothing in the regex engine reads from it.

use super::codepoint::CodePoint;

/// A single collation element: a variable-weight flag plus a weight
/// vector (primary/secondary/tertiary, as DUCET entries carry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollationElement {
    pub variable: bool,
    pub weights: Vec<u32>,
}

/// One entry of the collation table: a code-point sequence mapped to
/// the collation elements it produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollationTableEntry {
    pub sequence: Vec<CodePoint>,
    pub elements: Vec<CollationElement>,
}

/// Ordered (lexicographic on `sequence`) collation table.
#[derive(Clone, Debug, Default)]
pub struct CollationTable {
    entries: Vec<CollationTableEntry>,
}

impl CollationTable {
    pub fn new(mut entries: Vec<CollationTableEntry>) -> Self {
        entries.sort_by(|a, b| a.sequence.cmp(&b.sequence));
        CollationTable { entries }
    }

    pub fn lookup(&self, sequence: &[CodePoint]) -> Option<&[CollationElement]> {
        self.entries
            .binary_search_by(|entry| entry.sequence.as_slice().cmp(sequence))
            .ok()
            .map(|idx| entry_elements(&self.entries, idx))
    }
}

fn entry_elements(entries: &[CollationTableEntry], idx: usize) -> &[CollationElement] {
    &entries[idx].elements
}
