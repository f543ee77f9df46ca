//! UTF-16 JavaScript strings
//!
//! Pattern and flag text are kept as UTF-16 code units rather than Rust
//! `str`, so unpaired surrogates survive until the normalizer decides how to
//! encode them.

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An immutable JavaScript string
#[derive(Clone)]
pub struct JsString {
    /// UTF-16 code units
    units: Arc<[u16]>,
    /// Precomputed hash for fast comparison
    hash: u64,
}

impl JsString {
    /// Create from a Rust string
    pub fn new(s: &str) -> Self {
        Self::from_utf16(s.encode_utf16().collect::<Vec<_>>())
    }

    /// The empty string
    pub fn empty() -> Self {
        Self::from_utf16(Vec::new())
    }

    /// Create from raw code units (lone surrogates allowed)
    pub fn from_utf16(units: impl Into<Arc<[u16]>>) -> Self {
        let units = units.into();
        let hash = Self::compute_hash(&units);
        Self { units, hash }
    }

    /// The UTF-16 code units
    #[inline]
    pub fn as_utf16(&self) -> &[u16] {
        &self.units
    }

    /// Length in UTF-16 code units
    #[inline]
    pub fn len_utf16(&self) -> usize {
        self.units.len()
    }

    /// Check if string is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Concatenate two strings
    pub fn concat(&self, other: &JsString) -> Self {
        let mut units = Vec::with_capacity(self.units.len() + other.units.len());
        units.extend_from_slice(&self.units);
        units.extend_from_slice(&other.units);
        Self::from_utf16(units)
    }

    fn compute_hash(units: &[u16]) -> u64 {
        let mut hasher = FxHasher::default();
        units.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for JsString {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for JsString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JsString({:?})", String::from_utf16_lossy(&self.units))
    }
}

/// Lossy: unpaired surrogates render as U+FFFD.
impl std::fmt::Display for JsString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf16_lossy(&self.units))
    }
}

impl PartialEq for JsString {
    fn eq(&self, other: &Self) -> bool {
        if self.hash != other.hash {
            return false;
        }
        self.units == other.units
    }
}

impl Eq for JsString {}

impl Hash for JsString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl PartialEq<str> for JsString {
    fn eq(&self, other: &str) -> bool {
        self.units.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for JsString {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl From<&str> for JsString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for JsString {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<Vec<u16>> for JsString {
    fn from(units: Vec<u16>) -> Self {
        Self::from_utf16(units)
    }
}
