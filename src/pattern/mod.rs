//! The compiled pattern representation (§3, §4.3).

pub mod ast;
pub mod capture;

pub use ast::{
    AnchorKind, CategoryKind, ConditionKind, ElementId, Pattern, PatternBuilder, PatternElement,
    QuantifierMode,
};
pub use capture::{Capture, CaptureKey, MatchRecord};
