//! The pattern-element tagged union (§3 "Pattern element", §4.3) and
//! the arena that stores it.
//!
//! Design Notes call for replacing the source's virtual dispatch with a
//! tagged variant, and for resolving the source's potentially-cyclic
//! owning pointers (recursion refers back to an already-compiled
//! element) as an arena plus index cross-references. [`Pattern`] is
//! that arena: every element lives in `Pattern::elements`, addressed by
//! an [`ElementId`], and a child relationship is just one `ElementId`
//! stored inside a parent — including a [`PatternElement::Recursion`]'s
//! non-owning reference back into the same arena.

use crate::locale::GeneralCategory;
use crate::pattern::capture::CaptureKey;

/// An index into a [`Pattern`]'s element arena.
pub type ElementId = usize;

/// Quantifier greediness (§4.3 "Multiple").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuantifierMode {
    Greedy,
    Lazy,
    Possessive,
}

/// One Unicode-property test a [`PatternElement::Category`] performs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CategoryKind {
    General(GeneralCategory),
    /// A super-category letter: `L`, `M`, `N`, `P`, `S`, `Z`, `C`.
    Super(char),
    Script(String),
    Block(String),
    /// `\w`'s word-character test (§4.3 "Anchors": the same predicate
    /// `\b` uses), not a general-category test.
    WordChar,
    /// `\s`'s `White_Space` property test — broader than the `Zs`/`Zl`/`Zp`
    /// general-category Separator super-class that `\p{Z}` queries.
    WhiteSpace,
}

/// What a [`PatternElement::Conditional`] tests before choosing a
/// branch (§4.3 "Conditional").
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConditionKind {
    CaptureTaken(CaptureKey),
    Pattern(ElementId),
}

/// The zero-width assertions of §4.3 "Anchors". Each variant already
/// bakes in the compile-time option state (e.g. whether `Multiline` was
/// active at this point in the pattern) that affects its semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorKind {
    /// `^`
    LineStart { multiline: bool },
    /// `$`
    LineEnd { multiline: bool },
    /// `\A`
    TextStart,
    /// `\z`
    TextEnd,
    /// `\Z`
    TextEndOrTrailingNewline,
    /// `\G`
    PreviousMatchEnd,
    /// `\b`
    WordBoundary,
    /// `\B`
    NotWordBoundary,
}

/// A node in the compiled pattern tree (§3 "Pattern element"). Once
/// produced by the compiler the tree is immutable (§3 Invariants).
#[derive(Clone, Debug)]
pub enum PatternElement {
    /// An ordered sequence of sibling elements matched one after
    /// another. The compiler's output is always rooted at a `Concat`
    /// (possibly of length 0 or 1).
    Concat(Vec<ElementId>),
    Literal {
        text: Vec<char>,
        ignore_case: bool,
    },
    Range {
        low: char,
        high: char,
        ignore_case: bool,
    },
    CharacterClass {
        children: Vec<ElementId>,
        negated: bool,
    },
    Category {
        kind: CategoryKind,
        negated: bool,
    },
    Wildcard {
        single_line: bool,
    },
    Anchor(AnchorKind),
    /// A non-capturing group: purely a grouping boundary for
    /// quantifiers and alternation precedence.
    Group(ElementId),
    Capturing {
        key: CaptureKey,
        child: ElementId,
    },
    Balancing {
        push_key: CaptureKey,
        pop_key: CaptureKey,
        child: ElementId,
    },
    Backreference {
        key: CaptureKey,
        ignore_case: bool,
    },
    /// A non-owning reference to another element, resolved at compile
    /// time (§4.3 "Recursion", Design Notes).
    Recursion {
        target: ElementId,
    },
    Conditional {
        condition: ConditionKind,
        yes: ElementId,
        no: Option<ElementId>,
    },
    Lookaround {
        child: ElementId,
        behind: bool,
        negate: bool,
    },
    Atomic(ElementId),
    Multiple {
        child: ElementId,
        min: u32,
        max: Option<u32>,
        mode: QuantifierMode,
    },
    Alternation(Vec<ElementId>),
    /// `\K`
    ResetMatch,
    /// `\X`
    ValidUnicode,
}

/// A compiled pattern: an arena of [`PatternElement`]s plus the id of
/// the root element (always a [`PatternElement::Concat`]).
#[derive(Clone, Debug)]
pub struct Pattern {
    elements: Vec<PatternElement>,
    pub root: ElementId,
    pub capturing_group_count: u32,
}

impl Pattern {
    pub fn new(elements: Vec<PatternElement>, root: ElementId, capturing_group_count: u32) -> Self {
        Pattern { elements, root, capturing_group_count }
    }

    pub fn get(&self, id: ElementId) -> &PatternElement {
        &self.elements[id]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

/// A builder used by the compiler while assembling a [`Pattern`]'s
/// arena; the compiler appends elements and receives back stable ids
/// it can store in parents (or recursion/conditional cross-references).
#[derive(Default)]
pub struct PatternBuilder {
    elements: Vec<PatternElement>,
}

impl PatternBuilder {
    pub fn new() -> Self {
        PatternBuilder { elements: Vec::new() }
    }

    pub fn push(&mut self, element: PatternElement) -> ElementId {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn get(&self, id: ElementId) -> &PatternElement {
        &self.elements[id]
    }

    pub fn get_mut(&mut self, id: ElementId) -> &mut PatternElement {
        &mut self.elements[id]
    }

    pub fn next_id(&self) -> ElementId {
        self.elements.len()
    }

    pub fn finish(self, root: ElementId, capturing_group_count: u32) -> Pattern {
        Pattern::new(self.elements, root, capturing_group_count)
    }
}
