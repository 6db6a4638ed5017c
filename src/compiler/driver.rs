//! The compiler driver (§4.2), grounded in
//! `original_source/include/unicode/regexcompilerbase.hpp` /
//! `regexcompiler.hpp`: a cursor over the pattern's characters that
//! exposes stepping, peeking, literal consumption, element
//! append/pop, and position-tagged error raising, with nested drivers
//! for groups/classes/quantifier arguments that override when parsing
//! should stop.

use crate::error::{RegexError, RegexErrorKind};
use crate::pattern::{CaptureKey, ElementId, PatternBuilder, PatternElement};
use std::collections::HashMap;
use std::rc::Rc;

use super::options::RegexOptions;

/// What a `(?R)`/`(?1)`/`(?-1)`/`(?&name)` recursion node refers to,
/// before the post-compile pass resolves it to a real [`ElementId`]
/// (§4.3 "Recursion" — the target may be defined later in the pattern,
/// or be the pattern's own root, so it cannot be resolved inline).
#[derive(Clone, Debug)]
pub enum RecursionTarget {
    Whole,
    Absolute(u32),
    Relative(i64),
    Named(String),
}

/// Compile-wide state shared by every nested [`Driver`]: the pattern
/// arena under construction and the capturing-group namespace.
pub struct CompileState {
    pub builder: PatternBuilder,
    pub next_group_number: u32,
    pub group_names: HashMap<String, CaptureKey>,
    pub group_elements_by_number: HashMap<u32, ElementId>,
    pub group_elements_by_name: HashMap<String, ElementId>,
    pub pending_recursions: Vec<(ElementId, RecursionTarget)>,
}

impl CompileState {
    pub fn new() -> Self {
        CompileState {
            builder: PatternBuilder::new(),
            next_group_number: 1,
            group_names: HashMap::new(),
            group_elements_by_number: HashMap::new(),
            group_elements_by_name: HashMap::new(),
            pending_recursions: Vec::new(),
        }
    }

    /// Allocates the next implicit (or explicit, numbered) capture key
    /// and records a name if one was given.
    pub fn allocate_group(&mut self, name: Option<String>) -> Result<CaptureKey, RegexErrorKind> {
        let number = self.next_group_number;
        self.next_group_number += 1;
        let key = match name {
            Some(n) => {
                let key = CaptureKey::parse(&n);
                if self.group_names.contains_key(&n) {
                    return Err(RegexErrorKind::DuplicateGroupName(n));
                }
                self.group_names.insert(n, key.clone());
                key
            }
            None => CaptureKey::Number(number),
        };
        Ok(key)
    }

    /// Records the arena id of a just-compiled capturing group so a
    /// later recursion into it can be resolved.
    pub fn register_group_element(&mut self, key: &CaptureKey, id: ElementId) {
        match key {
            CaptureKey::Number(n) => {
                self.group_elements_by_number.insert(*n, id);
            }
            CaptureKey::Name(s) => {
                self.group_elements_by_name.insert(s.clone(), id);
            }
        }
    }
}

/// A predicate deciding whether a nested driver has reached the end of
/// its scope (e.g. an unescaped `)` closing a group, or plain
/// end-of-input for the top-level driver).
pub type DoneFn = Rc<dyn Fn(&[char], usize) -> bool>;

/// A cursor over the pattern source plus the option state active at
/// this point (§4.2 "option scoping": inline `(?i)`-style modifiers
/// affect only the remainder of the enclosing group).
#[derive(Clone)]
pub struct Driver {
    chars: Rc<[char]>,
    pos: usize,
    pub options: RegexOptions,
    done: DoneFn,
}

impl Driver {
    pub fn new(pattern: &str, options: RegexOptions) -> Self {
        let chars: Rc<[char]> = pattern.chars().collect::<Vec<_>>().into();
        Driver {
            chars,
            pos: 0,
            options,
            done: Rc::new(|chars, pos| pos >= chars.len()),
        }
    }

    /// A nested driver sharing this driver's source and position but
    /// stopping at its own terminator, used for groups/classes/braced
    /// quantifier arguments.
    pub fn nested(&self, done: DoneFn) -> Driver {
        Driver {
            chars: self.chars.clone(),
            pos: self.pos,
            options: self.options,
            done,
        }
    }

    /// Synchronizes this driver's position back from a nested driver
    /// once the nested parse has consumed its scope.
    pub fn resume_from(&mut self, nested: &Driver) {
        self.pos = nested.pos;
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn chars_slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    pub fn is_done(&self) -> bool {
        (self.done)(&self.chars, self.pos)
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub fn retreat(&mut self) {
        if self.pos > 0 {
            self.pos -= 1;
        }
    }

    pub fn consume(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn consume_str(&mut self, expected: &str) -> bool {
        let save = self.pos;
        for c in expected.chars() {
            if !self.consume(c) {
                self.pos = save;
                return false;
            }
        }
        true
    }

    pub fn error(&self, kind: RegexErrorKind) -> RegexError {
        RegexError::new(self.pos, kind)
    }

    pub fn error_at(&self, pos: usize, kind: RegexErrorKind) -> RegexError {
        RegexError::new(pos, kind)
    }
}

/// The per-call context an [`crate::parser::ElementParser`] receives:
/// the positional cursor plus the shared arena/group-namespace state.
pub struct ParseContext<'s> {
    pub driver: Driver,
    pub state: &'s mut CompileState,
}

impl<'s> ParseContext<'s> {
    pub fn push(&mut self, element: PatternElement) -> ElementId {
        self.state.builder.push(element)
    }
}
