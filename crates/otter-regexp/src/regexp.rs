//! RegExp objects (ES2026 §22.2.3)
//!
//! Lifecycle: [`RegExpObject::alloc`] (RegExpAlloc) produces an object with no
//! matcher; [`RegExpObject::initialize`] (RegExpInitialize) compiles a pattern
//! into it and may be called again later to recompile. Each initialization
//! builds a complete [`CompiledState`] first and only then swaps it in, so a
//! rejected pattern leaves the previous state untouched.

use std::sync::Arc;

use crate::compiler::Matcher;
use crate::context::Context;
use crate::error::{RegExpError, VmError, VmResult};
use crate::flags::{FlagSet, parse_flags};
use crate::object::{JsObject, PropertyAttributes, PropertyDescriptor, PropertyKey};
use crate::pattern::normalize_pattern;
use crate::realm::RealmId;
use crate::string::JsString;
use crate::value::Value;

const LAST_INDEX: &str = "lastIndex";

/// Placeholder source for the empty pattern: `//` would lex as a comment
const EMPTY_PATTERN_SOURCE: &str = "(?:)";

const LINE_FEED: u16 = 0x000A;
const CARRIAGE_RETURN: u16 = 0x000D;
const LINE_SEPARATOR: u16 = 0x2028;
const PARAGRAPH_SEPARATOR: u16 = 0x2029;

/// The products of one successful initialization
#[derive(Debug)]
pub struct CompiledState {
    /// [[OriginalSource]]
    source: JsString,
    /// [[OriginalFlags]]
    flags: JsString,
    flag_set: FlagSet,
    /// [[RegExpMatcher]]
    matcher: Box<dyn Matcher>,
}

impl CompiledState {
    /// The pattern exactly as given
    pub fn source(&self) -> &JsString {
        &self.source
    }

    /// The flags exactly as given
    pub fn flags(&self) -> &JsString {
        &self.flags
    }

    /// The parsed flags
    pub fn flag_set(&self) -> FlagSet {
        self.flag_set
    }

    /// The compiled matcher
    pub fn matcher(&self) -> &dyn Matcher {
        self.matcher.as_ref()
    }
}

/// JavaScript RegExp object
#[derive(Debug)]
pub struct RegExpObject {
    /// The ordinary object part (prototype, `lastIndex`)
    object: Arc<JsObject>,
    /// [[Realm]]
    realm: RealmId,
    /// [[LegacyFeaturesEnabled]]
    legacy_features_enabled: bool,
    /// None until the first successful initialization
    state: Option<CompiledState>,
}

impl RegExpObject {
    /// RegExpAlloc(newTarget) §22.2.3.2, with the legacy features proposal's
    /// [[Realm]] and [[LegacyFeaturesEnabled]] slots.
    pub fn alloc(ctx: &Context, new_target: &Arc<JsObject>) -> VmResult<Self> {
        let realm = ctx.realm();

        // 1. OrdinaryCreateFromConstructor(newTarget, "%RegExp.prototype%"). A
        // non-object "prototype" falls back to newTarget's realm, not the current one.
        let prototype = match new_target.get(&PropertyKey::string("prototype")) {
            Some(Value::Object(proto)) => proto,
            _ => ctx
                .realms()
                .function_realm(new_target, realm)
                .intrinsics
                .regexp_prototype
                .clone(),
        };
        let object = Arc::new(JsObject::new(Some(prototype)));

        // 4-5. Legacy features only for the realm's own %RegExp%, never a subclass
        let legacy_features_enabled =
            Arc::ptr_eq(new_target, &realm.intrinsics.regexp_constructor);

        // 6. DefinePropertyOrThrow(obj, "lastIndex", { [[Writable]]: true, [[Enumerable]]: false, [[Configurable]]: false })
        object.define_property_or_throw(
            PropertyKey::string(LAST_INDEX),
            PropertyDescriptor::data_with_attrs(
                Value::undefined(),
                PropertyAttributes::writable_hidden(),
            ),
        )?;

        tracing::debug!(
            target: "otter::regexp",
            realm = realm.id,
            legacy_features_enabled,
            "RegExp allocated"
        );

        Ok(Self {
            object,
            realm: realm.id,
            legacy_features_enabled,
            state: None,
        })
    }

    /// RegExpCreate(P, F) §22.2.3.1
    pub fn create(ctx: &mut Context, pattern: &Value, flags: &Value) -> VmResult<Self> {
        let constructor = ctx.realm().intrinsics.regexp_constructor.clone();
        let mut regexp = Self::alloc(ctx, &constructor)?;
        regexp.initialize(ctx, pattern, flags)?;
        Ok(regexp)
    }

    /// RegExpInitialize(obj, pattern, flags) §22.2.3.3
    ///
    /// Either the pattern, flags and matcher are all replaced, or (on a
    /// `SyntaxError` or coercion failure) none of them are.
    pub fn initialize(
        &mut self,
        ctx: &mut Context,
        pattern: &Value,
        flags: &Value,
    ) -> VmResult<&mut Self> {
        // 1-4. undefined becomes "" without calling ToString
        let pattern = coerce_or_empty(ctx, pattern)?;
        let flags = coerce_or_empty(ctx, flags)?;
        self.initialize_text(ctx, pattern, flags)
    }

    fn initialize_text(
        &mut self,
        ctx: &Context,
        pattern: JsString,
        flags: JsString,
    ) -> VmResult<&mut Self> {
        let state = match compile_state(ctx, pattern, flags) {
            Ok(state) => state,
            Err(error) => {
                tracing::debug!(
                    target: "otter::regexp",
                    kind = ?error.kind(),
                    %error,
                    "RegExp initialization rejected"
                );
                return Err(VmError::syntax_error(error));
            }
        };

        tracing::debug!(
            target: "otter::regexp",
            source = %state.source,
            flags = %state.flags,
            "RegExp compiled"
        );

        // 16-21. Install [[OriginalSource]], [[OriginalFlags]] and [[RegExpMatcher]] together
        self.state = Some(state);

        // 22. Perform ? Set(obj, "lastIndex", +0, true). Runs after the swap, as specified.
        self.object
            .set(PropertyKey::string(LAST_INDEX), Value::number(0.0))?;

        // 23. Return obj.
        Ok(self)
    }

    /// RegExp.prototype.compile(pattern, flags) §B.2.4.1
    ///
    /// Re-initializes a RegExp created by the canonical constructor of the
    /// current realm. Subclass instances and cross-realm receivers throw.
    pub fn compile(
        &mut self,
        ctx: &mut Context,
        pattern: &Value,
        flags: &Value,
    ) -> VmResult<&mut Self> {
        self.check_legacy_compile(ctx)?;
        self.initialize(ctx, pattern, flags)
    }

    /// RegExp.prototype.compile with a RegExp as the pattern argument.
    ///
    /// Reuses `other`'s original source and flags; supplying flags as well is a
    /// `TypeError`.
    pub fn compile_from(
        &mut self,
        ctx: &mut Context,
        other: &RegExpObject,
        flags: &Value,
    ) -> VmResult<&mut Self> {
        self.check_legacy_compile(ctx)?;
        if !flags.is_undefined() {
            return Err(VmError::type_error(
                "Cannot supply flags when constructing one RegExp from another",
            ));
        }
        let (pattern, flags) = match &other.state {
            Some(state) => (state.source.clone(), state.flags.clone()),
            None => (JsString::empty(), JsString::empty()),
        };
        self.initialize_text(ctx, pattern, flags)
    }

    fn check_legacy_compile(&self, ctx: &Context) -> VmResult<()> {
        if !ctx.config().annex_b {
            return Err(VmError::type_error(
                "RegExp.prototype.compile is not available",
            ));
        }
        if ctx.realm().id != self.realm {
            return Err(VmError::type_error(
                "RegExp.prototype.compile called on a RegExp from another realm",
            ));
        }
        if !self.legacy_features_enabled {
            return Err(VmError::type_error(
                "RegExp.prototype.compile called on subclass instance",
            ));
        }
        Ok(())
    }

    /// EscapeRegExpPattern(P, F) §22.2.6.13.1
    ///
    /// Line terminators are escaped; `/` is not, so a pattern containing one
    /// does not survive being wrapped in `/.../` unchanged.
    pub fn escape_pattern(&self) -> JsString {
        let source = match &self.state {
            Some(state) if !state.source.is_empty() => &state.source,
            _ => return JsString::new(EMPTY_PATTERN_SOURCE),
        };

        let units = source.as_utf16();
        let mut escaped = Vec::with_capacity(units.len());
        for &unit in units {
            let replacement = match unit {
                LINE_FEED => "\\n",
                CARRIAGE_RETURN => "\\r",
                LINE_SEPARATOR => "\\u2028",
                PARAGRAPH_SEPARATOR => "\\u2029",
                _ => {
                    escaped.push(unit);
                    continue;
                }
            };
            escaped.extend(replacement.encode_utf16());
        }
        JsString::from_utf16(escaped)
    }

    /// get RegExp.prototype.source
    pub fn source(&self) -> JsString {
        self.escape_pattern()
    }

    /// get RegExp.prototype.flags: canonical `dgimsuvy` order
    pub fn flags(&self) -> JsString {
        JsString::new(&self.flag_set().exposed().to_flags_string())
    }

    /// RegExp.prototype.toString(): `/source/flags`
    pub fn to_js_string(&self) -> JsString {
        JsString::new("/")
            .concat(&self.source())
            .concat(&JsString::new("/"))
            .concat(&self.flags())
    }

    /// The installed state, if initialized
    pub fn state(&self) -> Option<&CompiledState> {
        self.state.as_ref()
    }

    /// Whether an initialization has succeeded
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// [[OriginalSource]]
    pub fn original_source(&self) -> Option<&JsString> {
        self.state.as_ref().map(|state| &state.source)
    }

    /// [[OriginalFlags]]
    pub fn original_flags(&self) -> Option<&JsString> {
        self.state.as_ref().map(|state| &state.flags)
    }

    /// [[RegExpMatcher]]
    pub fn matcher(&self) -> Option<&dyn Matcher> {
        self.state.as_ref().map(CompiledState::matcher)
    }

    /// Parsed flags; [`FlagSet::DEFAULT`] before initialization
    pub fn flag_set(&self) -> FlagSet {
        self.state
            .as_ref()
            .map_or(FlagSet::DEFAULT, CompiledState::flag_set)
    }

    /// [[LegacyFeaturesEnabled]]
    pub fn legacy_features_enabled(&self) -> bool {
        self.legacy_features_enabled
    }

    /// [[Realm]]
    pub fn realm(&self) -> RealmId {
        self.realm
    }

    /// The ordinary object part
    pub fn object(&self) -> &Arc<JsObject> {
        &self.object
    }

    /// Current `lastIndex` value
    pub fn last_index(&self) -> Value {
        self.object
            .get(&PropertyKey::string(LAST_INDEX))
            .unwrap_or_default()
    }

    /// get RegExp.prototype.hasIndices
    pub fn has_indices(&self) -> bool {
        self.flag_set().contains(FlagSet::HAS_INDICES)
    }

    /// get RegExp.prototype.global
    pub fn global(&self) -> bool {
        self.flag_set().contains(FlagSet::GLOBAL)
    }

    /// get RegExp.prototype.ignoreCase
    pub fn ignore_case(&self) -> bool {
        self.flag_set().contains(FlagSet::IGNORE_CASE)
    }

    /// get RegExp.prototype.multiline
    pub fn multiline(&self) -> bool {
        self.flag_set().contains(FlagSet::MULTILINE)
    }

    /// get RegExp.prototype.dotAll
    pub fn dot_all(&self) -> bool {
        self.flag_set().contains(FlagSet::DOT_ALL)
    }

    /// get RegExp.prototype.unicode
    pub fn unicode(&self) -> bool {
        self.flag_set().contains(FlagSet::UNICODE)
    }

    /// get RegExp.prototype.unicodeSets
    pub fn unicode_sets(&self) -> bool {
        self.flag_set().contains(FlagSet::UNICODE_SETS)
    }

    /// get RegExp.prototype.sticky
    pub fn sticky(&self) -> bool {
        self.flag_set().contains(FlagSet::STICKY)
    }
}

fn coerce_or_empty(ctx: &mut Context, value: &Value) -> VmResult<JsString> {
    if value.is_undefined() {
        Ok(JsString::empty())
    } else {
        ctx.to_js_string(value)
    }
}

/// Steps 5-21 of RegExpInitialize, without touching the object
fn compile_state(
    ctx: &Context,
    pattern: JsString,
    flags: JsString,
) -> Result<CompiledState, RegExpError> {
    let flag_set = parse_flags(&flags)?;

    // The u/v conflict is checked before the empty-pattern shortcut inside
    // normalize_pattern, so `new RegExp("", "uv")` still throws.
    let normalized = normalize_pattern(
        &pattern,
        flag_set.contains(FlagSet::UNICODE),
        flag_set.contains(FlagSet::UNICODE_SETS),
    )?;

    let matcher = ctx.compiler().compile(&normalized, flag_set)?;

    Ok(CompiledState {
        source: pattern,
        flags,
        flag_set,
        matcher,
    })
}
