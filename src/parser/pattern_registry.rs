//! The pattern-element parser registry (§4.1).

use crate::compiler::driver::ParseContext;
use crate::error::RegexError;
use crate::pattern::ElementId;
use once_cell::sync::Lazy;

/// Whether a parser may fire outside a character class, inside one, or
/// both (§4.1 "ClassContext"). A range parser and a literal-escape
/// parser both want to fire inside `[...]`, but a quantifier parser
/// must never be offered a turn there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassContext {
    Outside,
    Inside,
    Both,
}

impl ClassContext {
    pub fn allows(self, inside_class: bool) -> bool {
        match self {
            ClassContext::Both => true,
            ClassContext::Outside => !inside_class,
            ClassContext::Inside => inside_class,
        }
    }
}

/// One pluggable pattern-element parser. The driver offers its current
/// position to every registered parser, in priority order, until one
/// claims it.
pub trait ElementParser: Sync + Send {
    /// Whether the parser's class context allows it to run at this
    /// position.
    fn class_context(&self) -> ClassContext;

    /// Peeks at the driver's current position (without mutating it)
    /// and returns `true` if this parser would claim the input here.
    fn recognizes(&self, ctx: &ParseContext<'_>, inside_class: bool) -> bool;

    /// Consumes whatever this parser claims, appends the resulting
    /// element(s) to the arena, and returns the id of the element
    /// representing what was just parsed.
    fn parse(&self, ctx: &mut ParseContext<'_>, inside_class: bool) -> Result<ElementId, RegexError>;
}

/// A priority-ordered, append-only list of [`ElementParser`]s (§4.1
/// "registries are append-only, consulted in priority order").
pub struct PatternParserRegistry {
    parsers: Vec<Box<dyn ElementParser>>,
}

impl PatternParserRegistry {
    pub fn new() -> Self {
        PatternParserRegistry { parsers: Vec::new() }
    }

    pub fn register(&mut self, parser: Box<dyn ElementParser>) {
        self.parsers.push(parser);
    }

    pub fn iter_for(&self, inside_class: bool) -> impl Iterator<Item = &dyn ElementParser> {
        self.parsers
            .iter()
            .map(|p| p.as_ref())
            .filter(move |p| p.class_context().allows(inside_class))
    }
}

/// The default registry: every built-in pattern-element parser,
/// registered in the priority order the compiler relies on (more
/// specific escapes before the generic literal fallback, quantifiers
/// offered only once an operand exists).
pub static DEFAULT_PATTERN_REGISTRY: Lazy<PatternParserRegistry> = Lazy::new(|| {
    let mut registry = PatternParserRegistry::new();
    crate::compiler::parsers::register_all(&mut registry);
    registry
});
