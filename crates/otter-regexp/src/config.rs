//! RegExp configuration.
//!
//! Hosts embed this in their own settings document; keys are camelCase so a
//! JSON `"regexp": { "optimize": false }` block deserializes directly.

use serde::{Deserialize, Serialize};

/// Main RegExp configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegExpConfig {
    /// Let the regex engine run its pattern optimizer
    pub optimize: bool,

    /// Expose Annex B `RegExp.prototype.compile`
    pub annex_b: bool,
}

impl Default for RegExpConfig {
    fn default() -> Self {
        Self {
            optimize: true,
            annex_b: true,
        }
    }
}

impl RegExpConfig {
    /// Parse a JSON configuration document. Missing keys keep their defaults.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegExpConfig::default();
        assert!(config.optimize);
        assert!(config.annex_b);
    }

    #[test]
    fn test_partial_document() {
        let config = RegExpConfig::from_json(r#"{ "annexB": false }"#).unwrap();
        assert!(config.optimize);
        assert!(!config.annex_b);
    }

    #[test]
    fn test_unknown_shape_is_error() {
        assert!(RegExpConfig::from_json(r#"{ "optimize": "yes" }"#).is_err());
    }
}
