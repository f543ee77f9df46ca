//! Pattern normalization
//!
//! Script patterns are UTF-16, the engine reads code points. In a Unicode mode
//! (`u` or `v`) surrogate pairs are joined into one code point. Otherwise every
//! code unit stays its own atom: ASCII passes through, anything above 0x7F is
//! written as a `\u{xxxx}` escape so the engine never sees a raw non-ASCII unit
//! it could fold into a larger character.

use std::fmt;

use crate::error::PatternError;
use crate::string::JsString;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Length of a legacy escape: `\u{` + 4 hex digits + `}`
const ESCAPE_LEN: usize = 8;

/// Engine input: a code point sequence.
///
/// Unpaired surrogates from Unicode-mode patterns are kept as their own
/// values, so this cannot be a Rust `String`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedPattern {
    code_points: Vec<u32>,
}

impl NormalizedPattern {
    /// The empty pattern
    pub fn empty() -> Self {
        Self::default()
    }

    /// The code points handed to the engine
    pub fn code_points(&self) -> &[u32] {
        &self.code_points
    }

    /// Number of code points
    pub fn len(&self) -> usize {
        self.code_points.len()
    }

    /// Check if the pattern is empty
    pub fn is_empty(&self) -> bool {
        self.code_points.is_empty()
    }
}

/// Lossy: surrogate code points render as U+FFFD.
impl fmt::Display for NormalizedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &cp in &self.code_points {
            let ch = char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER);
            fmt::Write::write_char(f, ch)?;
        }
        Ok(())
    }
}

/// Re-encode `text` for the regex engine.
///
/// `u` together with `v` is rejected before the text is looked at, so an
/// empty pattern still reports the conflict.
pub fn normalize_pattern(
    text: &JsString,
    unicode_mode: bool,
    unicode_sets_mode: bool,
) -> Result<NormalizedPattern, PatternError> {
    if unicode_mode && unicode_sets_mode {
        return Err(PatternError::IncompatibleUnicodeFlags);
    }

    let units = text.as_utf16();
    if units.is_empty() {
        return Ok(NormalizedPattern::empty());
    }

    tracing::trace!(
        target: "otter::regexp",
        units = units.len(),
        unicode = unicode_mode || unicode_sets_mode,
        "Normalizing pattern"
    );

    let mut code_points = Vec::new();
    code_points.try_reserve(units.len())?;

    if unicode_mode || unicode_sets_mode {
        // Never more code points than units, so the reservation above suffices.
        code_points.extend(char::decode_utf16(units.iter().copied()).map(|decoded| {
            decoded
                .map(u32::from)
                .unwrap_or_else(|err| u32::from(err.unpaired_surrogate()))
        }));
    } else {
        for &unit in units {
            if unit <= 0x7F {
                push(&mut code_points, u32::from(unit))?;
            } else {
                push_escape(&mut code_points, unit)?;
            }
        }
    }

    Ok(NormalizedPattern { code_points })
}

fn push(out: &mut Vec<u32>, cp: u32) -> Result<(), PatternError> {
    if out.len() == out.capacity() {
        out.try_reserve(1)?;
    }
    out.push(cp);
    Ok(())
}

/// Append `\u{xxxx}`: four lowercase, zero-padded hex digits.
fn push_escape(out: &mut Vec<u32>, unit: u16) -> Result<(), PatternError> {
    out.try_reserve(ESCAPE_LEN)?;
    out.extend(['\\', 'u', '{'].map(u32::from));
    for shift in [12u16, 8, 4, 0] {
        let nibble = usize::from((unit >> shift) & 0xF);
        out.push(u32::from(HEX_DIGITS[nibble]));
    }
    out.push(u32::from('}'));
    Ok(())
}
