//! `RegexOptions` (§4.2), modeled as a `bitflags!` set mirroring
//! `original_source/include/unicode/regexoptions.hpp`'s flat bitmask
//! enum: every option defaults off, and `CultureInvariant` is its own
//! independent bit rather than folded into `IgnoreCase`.

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct RegexOptions: u32 {
        const IGNORE_CASE               = 1 << 0;
        const MULTILINE                 = 1 << 1;
        const SINGLELINE                = 1 << 2;
        const EXPLICIT_CAPTURE          = 1 << 3;
        const IGNORE_PATTERN_WHITESPACE = 1 << 4;
        const RIGHT_TO_LEFT             = 1 << 5;
        const CULTURE_INVARIANT         = 1 << 6;
    }
}

impl RegexOptions {
    pub fn ignore_case(self) -> bool {
        self.contains(RegexOptions::IGNORE_CASE)
    }

    pub fn multiline(self) -> bool {
        self.contains(RegexOptions::MULTILINE)
    }

    pub fn singleline(self) -> bool {
        self.contains(RegexOptions::SINGLELINE)
    }

    pub fn explicit_capture(self) -> bool {
        self.contains(RegexOptions::EXPLICIT_CAPTURE)
    }

    pub fn ignore_pattern_whitespace(self) -> bool {
        self.contains(RegexOptions::IGNORE_PATTERN_WHITESPACE)
    }

    pub fn right_to_left(self) -> bool {
        self.contains(RegexOptions::RIGHT_TO_LEFT)
    }

    pub fn culture_invariant(self) -> bool {
        self.contains(RegexOptions::CULTURE_INVARIANT)
    }
}
