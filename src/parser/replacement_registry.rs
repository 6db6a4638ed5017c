//! The replacement-element parser registry (§4.1, §4.5): the same
//! priority-ordered plug-in shape as [`super::pattern_registry`],
//! specialized to replacement-string syntax (`$1`, `${name}`, `$$`, …).

use crate::error::RegexError;
use crate::replace::ReplacementElement;
use once_cell::sync::Lazy;

pub trait ReplacementParser: Sync + Send {
    fn recognizes(&self, chars: &[char], pos: usize) -> bool;

    /// Consumes whatever this parser claims starting at `pos`, returning
    /// the produced element and the new position.
    fn parse(&self, chars: &[char], pos: usize) -> Result<(ReplacementElement, usize), RegexError>;
}

pub struct ReplacementParserRegistry {
    parsers: Vec<Box<dyn ReplacementParser>>,
}

impl ReplacementParserRegistry {
    pub fn new() -> Self {
        ReplacementParserRegistry { parsers: Vec::new() }
    }

    pub fn register(&mut self, parser: Box<dyn ReplacementParser>) {
        self.parsers.push(parser);
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ReplacementParser> {
        self.parsers.iter().map(|p| p.as_ref())
    }
}

pub static DEFAULT_REPLACEMENT_REGISTRY: Lazy<ReplacementParserRegistry> = Lazy::new(|| {
    let mut registry = ReplacementParserRegistry::new();
    crate::replace::compiler::register_all(&mut registry);
    registry
});
