//! The collaborator interfaces the regex core depends on but does not
//! implement in full (§1, §6): normalization, case conversion, and
//! segmentation. Encoding/decoding and collation *sorting* are named in
//! §6 as interface-only too, but nothing in the engine calls them, so no
//! Rust trait is declared for them here.

pub mod case;
pub mod normalizer;
pub mod segmenter;

pub use case::{CaseContext, CaseConverter, CaseKind, LocaleCaseConverter, simple_fold_eq};
pub use normalizer::{LocaleNormalizer, Normalizer};
pub use segmenter::{LocaleSegmenter, Segmenter};
