//! RegExp flag parsing
//!
//! The flag alphabet is a static table: each letter names the bits it sets and
//! the bits it clears. Adding a flag is a table row, not a new branch.

use bitflags::bitflags;
use std::str::FromStr;

use crate::error::FlagError;
use crate::string::JsString;

bitflags! {
    /// Parsed RegExp flags.
    ///
    /// The low eight bits mirror the script-visible flag letters. `STATEFUL`
    /// and `SCAN` are engine bits never reported through accessors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FlagSet: u16 {
        /// `d`
        const HAS_INDICES = 1 << 0;
        /// `g`
        const GLOBAL = 1 << 1;
        /// `i`
        const IGNORE_CASE = 1 << 2;
        /// `m`
        const MULTILINE = 1 << 3;
        /// `s`
        const DOT_ALL = 1 << 4;
        /// `u`
        const UNICODE = 1 << 5;
        /// `v`
        const UNICODE_SETS = 1 << 6;
        /// `y`
        const STICKY = 1 << 7;
        /// Matching tracks `lastIndex` between calls (`g` and `y`)
        const STATEFUL = 1 << 8;
        /// Matching may start anywhere in the input; on unless `y` is given
        const SCAN = 1 << 9;
    }
}

impl FlagSet {
    /// Flags of a RegExp created with an empty flag string
    pub const DEFAULT: Self = Self::SCAN;

    /// Bits that correspond to flag letters
    pub const EXPOSED: Self = Self::HAS_INDICES
        .union(Self::GLOBAL)
        .union(Self::IGNORE_CASE)
        .union(Self::MULTILINE)
        .union(Self::DOT_ALL)
        .union(Self::UNICODE)
        .union(Self::UNICODE_SETS)
        .union(Self::STICKY);

    /// Only the letter bits
    pub fn exposed(self) -> Self {
        self & Self::EXPOSED
    }

    /// Either Unicode mode (`u` or `v`)
    pub fn is_unicode_mode(self) -> bool {
        self.intersects(Self::UNICODE | Self::UNICODE_SETS)
    }

    /// Canonical flag string, in `RegExp.prototype.flags` order (`dgimsuvy`)
    pub fn to_flags_string(self) -> String {
        FLAG_TABLE
            .iter()
            .filter(|rule| self.contains(rule.bit))
            .map(|rule| rule.letter)
            .collect()
    }
}

impl Default for FlagSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for FlagSet {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_flags(&JsString::new(s))
    }
}

struct FlagRule {
    letter: char,
    /// The letter's own bit, used for canonical ordering
    bit: FlagSet,
    sets: FlagSet,
    clears: FlagSet,
}

const fn rule(letter: char, bit: FlagSet) -> FlagRule {
    FlagRule {
        letter,
        bit,
        sets: bit,
        clears: FlagSet::empty(),
    }
}

/// Indexed by position for duplicate tracking; order is `RegExp.prototype.flags` order.
static FLAG_TABLE: [FlagRule; 8] = [
    rule('d', FlagSet::HAS_INDICES),
    FlagRule {
        letter: 'g',
        bit: FlagSet::GLOBAL,
        sets: FlagSet::GLOBAL.union(FlagSet::STATEFUL),
        clears: FlagSet::empty(),
    },
    rule('i', FlagSet::IGNORE_CASE),
    rule('m', FlagSet::MULTILINE),
    rule('s', FlagSet::DOT_ALL),
    rule('u', FlagSet::UNICODE),
    rule('v', FlagSet::UNICODE_SETS),
    // Sticky implies per-call state like `g`, but anchors at lastIndex and is not global.
    FlagRule {
        letter: 'y',
        bit: FlagSet::STICKY,
        sets: FlagSet::STICKY.union(FlagSet::STATEFUL),
        clears: FlagSet::SCAN,
    },
];

/// Parse a flag string.
///
/// Scans left to right and stops at the first repeated or unknown letter.
/// `u` and `v` together are accepted here; that conflict belongs to pattern
/// normalization.
pub fn parse_flags(flags: &JsString) -> Result<FlagSet, FlagError> {
    let mut flag_set = FlagSet::DEFAULT;
    let mut seen = 0u8;

    for decoded in char::decode_utf16(flags.as_utf16().iter().copied()) {
        let ch = decoded.unwrap_or(char::REPLACEMENT_CHARACTER);
        let Some(index) = FLAG_TABLE.iter().position(|rule| rule.letter == ch) else {
            return Err(FlagError::Unknown(ch));
        };

        let mask = 1u8 << index;
        if seen & mask != 0 {
            return Err(FlagError::Duplicate(ch));
        }
        seen |= mask;

        let rule = &FLAG_TABLE[index];
        flag_set.remove(rule.clears);
        flag_set.insert(rule.sets);
    }

    Ok(flag_set)
}
