//! RegExp error types
//!
//! Every fallible step (flag parsing, pattern normalization, compilation)
//! reports a tagged [`RegExpError`]. The object lifecycle converts the first
//! one it meets into a [`VmError::SyntaxError`], which keeps the tag next to
//! the message so callers can still tell the kinds apart.

use std::collections::TryReserveError;

use crate::value::Value;
use thiserror::Error;

/// Malformed flag string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    /// The same flag letter appeared twice
    #[error("Repeated RegExp flag '{0}'")]
    Duplicate(char),

    /// A character outside the flag alphabet
    #[error("Invalid RegExp flag '{0}'")]
    Unknown(char),
}

/// Pattern normalization failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Both `u` and `v` were requested
    #[error("RegExp flags 'u' and 'v' cannot be combined")]
    IncompatibleUnicodeFlags,

    /// The normalized pattern buffer could not grow
    #[error("Out of memory")]
    OutOfMemory,
}

impl From<TryReserveError> for PatternError {
    fn from(_: TryReserveError) -> Self {
        PatternError::OutOfMemory
    }
}

/// The regex engine rejected a normalized pattern.
///
/// `diagnostic` is the engine's own text and is surfaced to scripts verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{diagnostic}")]
pub struct CompileError {
    /// Engine diagnostic
    pub diagnostic: String,
}

impl CompileError {
    /// Create a compile error from an engine diagnostic
    pub fn new(diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: diagnostic.into(),
        }
    }
}

/// Any failure produced while preparing a RegExp
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegExpError {
    /// Flag string rejected
    #[error(transparent)]
    Flag(#[from] FlagError),

    /// Pattern could not be normalized
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Engine rejected the pattern
    #[error("RegExp compile error: {0}")]
    Compile(#[from] CompileError),
}

/// Discriminant of a [`RegExpError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegExpErrorKind {
    /// `FlagError::Duplicate`
    DuplicateFlag,
    /// `FlagError::Unknown`
    UnknownFlag,
    /// `PatternError::IncompatibleUnicodeFlags`
    IncompatibleUnicodeFlags,
    /// `PatternError::OutOfMemory`
    OutOfMemory,
    /// `CompileError`
    Compile,
}

impl RegExpError {
    /// The error discriminant
    pub fn kind(&self) -> RegExpErrorKind {
        match self {
            Self::Flag(FlagError::Duplicate(_)) => RegExpErrorKind::DuplicateFlag,
            Self::Flag(FlagError::Unknown(_)) => RegExpErrorKind::UnknownFlag,
            Self::Pattern(PatternError::IncompatibleUnicodeFlags) => {
                RegExpErrorKind::IncompatibleUnicodeFlags
            }
            Self::Pattern(PatternError::OutOfMemory) => RegExpErrorKind::OutOfMemory,
            Self::Compile(_) => RegExpErrorKind::Compile,
        }
    }
}

/// Errors surfaced to the host runtime
#[derive(Debug, Error)]
pub enum VmError {
    /// Type error (e.g. assigning a read-only `lastIndex`)
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Syntax error raised while constructing a RegExp
    #[error("SyntaxError: {0}")]
    SyntaxError(#[from] RegExpError),

    /// Value thrown by a host hook (e.g. a throwing `toString`)
    #[error("Uncaught exception: {0}")]
    Exception(Box<ThrownValue>),
}

/// A thrown JavaScript value
#[derive(Debug)]
pub struct ThrownValue {
    /// The thrown value
    pub value: Value,
    /// The thrown value (as a string representation)
    pub message: String,
}

impl std::fmt::Display for ThrownValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl VmError {
    /// Create a type error
    pub fn type_error(msg: impl Into<String>) -> Self {
        Self::TypeError(msg.into())
    }

    /// Create a syntax error from a RegExp preparation failure
    pub fn syntax_error(err: impl Into<RegExpError>) -> Self {
        Self::SyntaxError(err.into())
    }

    /// Create an exception from a thrown JS value
    pub fn exception(value: Value) -> Self {
        let message = match value.as_string() {
            Some(s) => s.to_string(),
            None => format!("{:?}", value),
        };
        Self::Exception(Box::new(ThrownValue { message, value }))
    }

    /// The RegExp error behind a `SyntaxError`, if any
    pub fn regexp_error(&self) -> Option<&RegExpError> {
        match self {
            Self::SyntaxError(err) => Some(err),
            _ => None,
        }
    }

    /// Discriminant of the RegExp error behind a `SyntaxError`, if any
    pub fn regexp_error_kind(&self) -> Option<RegExpErrorKind> {
        self.regexp_error().map(RegExpError::kind)
    }
}

/// Result type for host-facing operations
pub type VmResult<T> = std::result::Result<T, VmError>;
