//! The replacement-element tagged union (§4.5): what a compiled
//! replacement string is made of once `$`-substitutions have been
//! recognized.

use crate::pattern::CaptureKey;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplacementElement {
    /// A run of characters copied verbatim.
    Literal(Vec<char>),
    /// `$1`, `${1}`, `${name}` — the named or numbered group's last
    /// capture, or nothing if that group never captured.
    Group(CaptureKey),
    /// `$&` — the whole match.
    WholeMatch,
    /// `` $` `` — everything in the input before the match.
    BeforeMatch,
    /// `$'` — everything in the input after the match.
    AfterMatch,
    /// `$_` — the entire input, unchanged.
    EntireInput,
    /// `$+` — the last group that captured anything, across the whole
    /// pattern (§3 "Match record").
    LastCapturedGroup,
}
