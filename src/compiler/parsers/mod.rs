//! Built-in pattern-element (atom) parsers (§4.3), each registered into
//! the shared [`crate::parser::PatternParserRegistry`] in priority
//! order: more specific escapes and group syntaxes before the generic
//! literal-character fallback.

mod anchor;
mod backreference;
mod category;
mod character_class;
mod comment;
mod escapes;
mod group;
mod literal;
mod misc;
mod wildcard;

use crate::parser::PatternParserRegistry;

pub fn register_all(registry: &mut PatternParserRegistry) {
    registry.register(Box::new(comment::CommentParser));
    registry.register(Box::new(group::GroupParser));
    registry.register(Box::new(character_class::CharacterClassParser));
    registry.register(Box::new(anchor::AnchorParser));
    registry.register(Box::new(backreference::BackreferenceParser));
    registry.register(Box::new(category::CategoryParser));
    registry.register(Box::new(misc::ResetMatchParser));
    registry.register(Box::new(misc::ValidUnicodeParser));
    registry.register(Box::new(wildcard::WildcardParser));
    registry.register(Box::new(escapes::EscapeLiteralParser));
    registry.register(Box::new(literal::LiteralParser));
}
