//! # Otter RegExp
//!
//! The RegExp object model for the Otter JavaScript runtime.
//!
//! ## Components
//!
//! - **Flag parser** ([`flags`]): validates `dgimsuvy` flag strings into a [`FlagSet`]
//! - **Pattern normalizer** ([`pattern`]): re-encodes UTF-16 pattern text for the engine
//! - **Object lifecycle** ([`regexp`]): RegExpAlloc, RegExpInitialize, EscapeRegExpPattern
//!
//! The regex engine sits behind [`RegExpCompiler`]; [`RegressCompiler`] is the
//! default. Matching itself is not part of this crate.

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod compiler;
pub mod config;
pub mod context;
pub mod error;
pub mod flags;
pub mod object;
pub mod pattern;
pub mod realm;
pub mod regexp;
pub mod string;
pub mod value;

pub use compiler::{Matcher, RegExpCompiler, RegressCompiler, RegressMatcher};
pub use config::RegExpConfig;
pub use context::Context;
pub use error::{
    CompileError, FlagError, PatternError, RegExpError, RegExpErrorKind, VmError, VmResult,
};
pub use flags::{FlagSet, parse_flags};
pub use object::{JsObject, PropertyAttributes, PropertyDescriptor, PropertyKey};
pub use pattern::{NormalizedPattern, normalize_pattern};
pub use realm::{RealmId, RealmRecord, RealmRegistry};
pub use regexp::{CompiledState, RegExpObject};
pub use string::JsString;
pub use value::Value;
