//! Execution context
//!
//! The slice of host state the RegExp constructor path reads: the current
//! realm, `ToString`, the pattern compiler and configuration.

use std::sync::Arc;

use crate::compiler::{RegExpCompiler, RegressCompiler};
use crate::config::RegExpConfig;
use crate::error::VmResult;
use crate::realm::{RealmRecord, RealmRegistry};
use crate::string::JsString;
use crate::value::{Value, number_to_string};

/// Host context for RegExp operations
pub struct Context {
    realms: Arc<RealmRegistry>,
    current_realm: Arc<RealmRecord>,
    compiler: Box<dyn RegExpCompiler>,
    config: RegExpConfig,
}

impl Context {
    /// Create a context with default configuration and the regress compiler
    pub fn new() -> Self {
        Self::with_config(RegExpConfig::default())
    }

    /// Create a context with custom configuration
    pub fn with_config(config: RegExpConfig) -> Self {
        let realms = RealmRegistry::new();
        let current_realm = realms.create_realm();
        Self {
            compiler: Box::new(RegressCompiler::new(&config)),
            realms,
            current_realm,
            config,
        }
    }

    /// Replace the pattern compiler
    pub fn with_compiler(mut self, compiler: impl RegExpCompiler + 'static) -> Self {
        self.compiler = Box::new(compiler);
        self
    }

    /// The current realm
    pub fn realm(&self) -> &Arc<RealmRecord> {
        &self.current_realm
    }

    /// The realm registry
    pub fn realms(&self) -> &Arc<RealmRegistry> {
        &self.realms
    }

    /// Create a new realm in this context's registry (does not enter it)
    pub fn create_realm(&self) -> Arc<RealmRecord> {
        self.realms.create_realm()
    }

    /// Make `realm` current, returning the previous one
    pub fn enter_realm(&mut self, realm: Arc<RealmRecord>) -> Arc<RealmRecord> {
        std::mem::replace(&mut self.current_realm, realm)
    }

    /// The pattern compiler
    pub fn compiler(&self) -> &dyn RegExpCompiler {
        self.compiler.as_ref()
    }

    /// Configuration
    pub fn config(&self) -> &RegExpConfig {
        &self.config
    }

    /// ToString(argument) §7.1.17
    ///
    /// Objects go through their host coercion hook, which may throw.
    pub fn to_js_string(&mut self, value: &Value) -> VmResult<JsString> {
        Ok(match value {
            Value::Undefined => JsString::new("undefined"),
            Value::Null => JsString::new("null"),
            Value::Boolean(b) => JsString::new(if *b { "true" } else { "false" }),
            Value::Number(n) => JsString::new(&number_to_string(*n)),
            Value::String(s) => s.clone(),
            Value::Object(obj) => match obj.to_string_hook() {
                Some(hook) => hook()?,
                None => JsString::new("[object Object]"),
            },
        })
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("realm", &self.current_realm.id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
