//! Regex engine seam
//!
//! The object lifecycle only needs "compile this normalized pattern with these
//! flags, or tell me why not". [`RegressCompiler`] answers that with regress;
//! hosts with a different engine implement [`RegExpCompiler`] themselves.

use std::any::Any;
use std::fmt;

use regress::Regex;

use crate::config::RegExpConfig;
use crate::error::CompileError;
use crate::flags::FlagSet;
use crate::pattern::NormalizedPattern;

/// A compiled, executable pattern. Owned exclusively by one RegExp object.
pub trait Matcher: fmt::Debug + Send + Sync {
    /// Flags the matcher was compiled with
    fn flags(&self) -> FlagSet;

    /// Downcast support for engine specific execution
    fn as_any(&self) -> &dyn Any;
}

/// Pattern compiler capability
pub trait RegExpCompiler: Send + Sync {
    /// Compile `pattern`. A rejection carries the engine's diagnostic text.
    fn compile(
        &self,
        pattern: &NormalizedPattern,
        flags: FlagSet,
    ) -> Result<Box<dyn Matcher>, CompileError>;
}

/// [`RegExpCompiler`] backed by the regress engine
#[derive(Debug, Clone)]
pub struct RegressCompiler {
    optimize: bool,
}

impl RegressCompiler {
    /// Create a compiler honoring `config`
    pub fn new(config: &RegExpConfig) -> Self {
        Self {
            optimize: config.optimize,
        }
    }

    /// Translate a flag set into regress flags.
    ///
    /// Only `i`, `m`, `s`, `u` and `v` change how regress parses and matches;
    /// `d`, `g` and `y` are driven by the caller through `lastIndex`.
    pub fn engine_flags(&self, flags: FlagSet) -> regress::Flags {
        let letters: String = [
            (FlagSet::IGNORE_CASE, 'i'),
            (FlagSet::MULTILINE, 'm'),
            (FlagSet::DOT_ALL, 's'),
            (FlagSet::UNICODE, 'u'),
            (FlagSet::UNICODE_SETS, 'v'),
        ]
        .into_iter()
        .filter(|(bit, _)| flags.contains(*bit))
        .map(|(_, letter)| letter)
        .collect();

        let mut engine_flags = regress::Flags::from(letters.as_str());
        engine_flags.no_opt = !self.optimize;
        engine_flags
    }
}

impl Default for RegressCompiler {
    fn default() -> Self {
        Self::new(&RegExpConfig::default())
    }
}

impl RegExpCompiler for RegressCompiler {
    fn compile(
        &self,
        pattern: &NormalizedPattern,
        flags: FlagSet,
    ) -> Result<Box<dyn Matcher>, CompileError> {
        let regex = Regex::from_unicode(
            pattern.code_points().iter().copied(),
            self.engine_flags(flags),
        )
        .map_err(|err| CompileError::new(err.text))?;

        Ok(Box::new(RegressMatcher { regex, flags }))
    }
}

/// A pattern compiled by regress
pub struct RegressMatcher {
    regex: Regex,
    flags: FlagSet,
}

impl RegressMatcher {
    /// The compiled regress program
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl fmt::Debug for RegressMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegressMatcher")
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl Matcher for RegressMatcher {
    fn flags(&self) -> FlagSet {
        self.flags
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_flags_ignore_stateful_letters() {
        let compiler = RegressCompiler::default();
        let flags = compiler.engine_flags("dgimsy".parse().unwrap());
        assert!(flags.icase);
        assert!(flags.multiline);
        assert!(flags.dot_all);
        assert!(!flags.unicode);
        assert!(!flags.no_opt);
    }

    #[test]
    fn test_engine_flags_without_optimizer() {
        let compiler = RegressCompiler::new(&RegExpConfig {
            optimize: false,
            ..RegExpConfig::default()
        });
        assert!(compiler.engine_flags(FlagSet::DEFAULT).no_opt);
    }
}
