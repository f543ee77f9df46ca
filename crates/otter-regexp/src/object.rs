//! Host objects backing RegExp instances
//!
//! A deliberately small slice of the ordinary object model: a prototype link,
//! an own data property table, extensibility, and an optional coercion hook
//! standing in for a user-defined `toString`. The RegExp lifecycle only needs
//! `DefinePropertyOrThrow` and strict-mode `Set` from it.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{VmError, VmResult};
use crate::realm::RealmId;
use crate::string::JsString;
use crate::value::Value;

/// Property key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyKey(JsString);

impl PropertyKey {
    /// Create a string property key
    pub fn string(s: &str) -> Self {
        Self(JsString::new(s))
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Property attributes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropertyAttributes {
    /// Property is writable
    pub writable: bool,
    /// Property is enumerable
    pub enumerable: bool,
    /// Property is configurable
    pub configurable: bool,
}

impl PropertyAttributes {
    /// Default data property attributes
    pub const fn data() -> Self {
        Self {
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Writable, non-enumerable, non-configurable (`lastIndex`)
    pub const fn writable_hidden() -> Self {
        Self {
            writable: true,
            enumerable: false,
            configurable: false,
        }
    }

    /// Non-writable, non-enumerable, non-configurable
    pub const fn frozen() -> Self {
        Self {
            writable: false,
            enumerable: false,
            configurable: false,
        }
    }
}

/// Data property descriptor
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDescriptor {
    /// The value
    pub value: Value,
    /// Attributes
    pub attributes: PropertyAttributes,
}

impl PropertyDescriptor {
    /// Create a data property
    pub fn data(value: Value) -> Self {
        Self {
            value,
            attributes: PropertyAttributes::data(),
        }
    }

    /// Create a data property with specific attributes
    pub fn data_with_attrs(value: Value, attributes: PropertyAttributes) -> Self {
        Self { value, attributes }
    }

    /// Check if writable
    pub fn is_writable(&self) -> bool {
        self.attributes.writable
    }
}

/// Host coercion hook, called by `ToString` on objects. May throw.
pub type ToStringHook = Arc<dyn Fn() -> VmResult<JsString> + Send + Sync>;

/// A JavaScript object
///
/// Thread-safe with interior mutability.
pub struct JsObject {
    /// Properties storage
    properties: RwLock<FxHashMap<PropertyKey, PropertyDescriptor>>,
    /// Prototype (None for the root prototype)
    prototype: Option<Arc<JsObject>>,
    /// [[Extensible]]
    extensible: AtomicBool,
    /// Host `toString` stand-in
    to_string_hook: Option<ToStringHook>,
    /// [[Realm]] of a function object; None for ordinary objects
    realm: Option<RealmId>,
}

impl JsObject {
    /// Create a new empty object
    pub fn new(prototype: Option<Arc<JsObject>>) -> Self {
        Self {
            properties: RwLock::new(FxHashMap::default()),
            prototype,
            extensible: AtomicBool::new(true),
            to_string_hook: None,
            realm: None,
        }
    }

    /// Mark this object as a function created in `realm`
    pub fn with_realm(mut self, realm: RealmId) -> Self {
        self.realm = Some(realm);
        self
    }

    /// [[Realm]] of a function object
    pub fn function_realm(&self) -> Option<RealmId> {
        self.realm
    }

    /// Attach a coercion hook used when this object is converted to text
    pub fn with_to_string(mut self, hook: ToStringHook) -> Self {
        self.to_string_hook = Some(hook);
        self
    }

    /// Get the coercion hook
    pub fn to_string_hook(&self) -> Option<&ToStringHook> {
        self.to_string_hook.as_ref()
    }

    /// Get prototype
    pub fn prototype(&self) -> Option<&Arc<JsObject>> {
        self.prototype.as_ref()
    }

    /// Get property value, walking the prototype chain
    pub fn get(&self, key: &PropertyKey) -> Option<Value> {
        if let Some(desc) = self.properties.read().get(key) {
            return Some(desc.value.clone());
        }
        self.prototype.as_ref().and_then(|proto| proto.get(key))
    }

    /// Get own property descriptor
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        self.properties.read().get(key).cloned()
    }

    /// Find a property descriptor along the prototype chain
    fn lookup_property(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        if let Some(desc) = self.get_own_property(key) {
            return Some(desc);
        }
        self.prototype
            .as_ref()
            .and_then(|proto| proto.lookup_property(key))
    }

    /// Check [[Extensible]]
    pub fn is_extensible(&self) -> bool {
        self.extensible.load(Ordering::Acquire)
    }

    /// [[PreventExtensions]]
    pub fn prevent_extensions(&self) {
        self.extensible.store(false, Ordering::Release);
    }

    /// Object.freeze: non-extensible, every own property read-only
    pub fn freeze(&self) {
        self.prevent_extensions();
        for desc in self.properties.write().values_mut() {
            desc.attributes.writable = false;
            desc.attributes.configurable = false;
        }
    }

    /// [[DefineOwnProperty]] with ValidateAndApplyPropertyDescriptor rules (§10.1.6.3)
    ///
    /// Returns false when the definition is rejected.
    pub fn define_own_property(&self, key: PropertyKey, desc: PropertyDescriptor) -> bool {
        let mut props = self.properties.write();
        let Some(current) = props.get(&key) else {
            if !self.is_extensible() {
                return false;
            }
            props.insert(key, desc);
            return true;
        };

        if !current.attributes.configurable {
            if desc.attributes.configurable
                || desc.attributes.enumerable != current.attributes.enumerable
            {
                return false;
            }
            if !current.attributes.writable
                && (desc.attributes.writable || !desc.value.same_value(&current.value))
            {
                return false;
            }
        }

        props.insert(key, desc);
        true
    }

    /// DefinePropertyOrThrow(O, P, desc) §7.3.8
    pub fn define_property_or_throw(
        &self,
        key: PropertyKey,
        desc: PropertyDescriptor,
    ) -> VmResult<()> {
        let name = key.to_string();
        if self.define_own_property(key, desc) {
            Ok(())
        } else {
            Err(VmError::type_error(format!(
                "Cannot redefine property: {}",
                name
            )))
        }
    }

    /// Set(O, P, V, true) §7.3.4: ordinary [[Set]] in strict mode
    pub fn set(&self, key: PropertyKey, value: Value) -> VmResult<()> {
        match self.lookup_property(&key) {
            Some(desc) if !desc.is_writable() => {
                return Err(VmError::type_error(format!(
                    "Cannot assign to read only property '{}' of object",
                    key
                )));
            }
            _ => {}
        }

        let mut props = self.properties.write();
        if let Some(existing) = props.get_mut(&key) {
            existing.value = value;
            return Ok(());
        }
        if !self.is_extensible() {
            return Err(VmError::type_error(format!(
                "Cannot add property {}, object is not extensible",
                key
            )));
        }
        props.insert(key, PropertyDescriptor::data(value));
        Ok(())
    }
}

impl std::fmt::Debug for JsObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let props = self.properties.read();
        f.debug_struct("JsObject")
            .field("properties", &props.len())
            .field("extensible", &self.is_extensible())
            .finish()
    }
}
