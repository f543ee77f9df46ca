//! Realm registry and the RegExp intrinsics.
//!
//! A RegExp instance only keeps its realm's id; the intrinsics are reached
//! through the registry or the current [`Context`](crate::Context).

use parking_lot::RwLock;
use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use crate::object::{JsObject, PropertyAttributes, PropertyDescriptor, PropertyKey};
use crate::value::Value;

/// Unique realm identifier.
pub type RealmId = u32;

/// The intrinsics the RegExp constructor path consults.
#[derive(Clone, Debug)]
pub struct Intrinsics {
    /// %Object.prototype%
    pub object_prototype: Arc<JsObject>,
    /// %RegExp.prototype%
    pub regexp_prototype: Arc<JsObject>,
    /// %RegExp%
    pub regexp_constructor: Arc<JsObject>,
}

impl Intrinsics {
    fn new(realm: RealmId) -> Self {
        let object_prototype = Arc::new(JsObject::new(None));
        let regexp_prototype = Arc::new(JsObject::new(Some(object_prototype.clone())));
        let regexp_constructor =
            Arc::new(JsObject::new(Some(object_prototype.clone())).with_realm(realm));
        // RegExp.prototype is { [[Writable]]: false, [[Enumerable]]: false, [[Configurable]]: false }
        regexp_constructor.define_own_property(
            PropertyKey::string("prototype"),
            PropertyDescriptor::data_with_attrs(
                Value::object(regexp_prototype.clone()),
                PropertyAttributes::frozen(),
            ),
        );
        Self {
            object_prototype,
            regexp_prototype,
            regexp_constructor,
        }
    }
}

/// Stored realm record.
#[derive(Clone, Debug)]
pub struct RealmRecord {
    /// Realm id
    pub id: RealmId,
    /// Per-realm intrinsics
    pub intrinsics: Intrinsics,
}

impl RealmRecord {
    /// Create a realm record with fresh intrinsics
    pub fn new(id: RealmId) -> Arc<Self> {
        Arc::new(Self {
            id,
            intrinsics: Intrinsics::new(id),
        })
    }

    /// Create a constructor object deriving from this realm's %RegExp%,
    /// the way `class R extends RegExp {}` would.
    pub fn create_regexp_subclass(&self) -> Arc<JsObject> {
        let prototype = Arc::new(JsObject::new(Some(
            self.intrinsics.regexp_prototype.clone(),
        )));
        let constructor = Arc::new(
            JsObject::new(Some(self.intrinsics.regexp_constructor.clone())).with_realm(self.id),
        );
        constructor.define_own_property(
            PropertyKey::string("prototype"),
            PropertyDescriptor::data_with_attrs(
                Value::object(prototype),
                PropertyAttributes {
                    writable: true,
                    enumerable: false,
                    configurable: false,
                },
            ),
        );
        constructor
    }
}

/// Registry of all realms created by a runtime.
pub struct RealmRegistry {
    realms: RwLock<Vec<Arc<RealmRecord>>>,
    next_id: AtomicU32,
}

impl RealmRegistry {
    /// Create an empty registry
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            realms: RwLock::new(Vec::new()),
            next_id: AtomicU32::new(0),
        })
    }

    fn allocate_id(&self) -> RealmId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Create and register a new realm.
    pub fn create_realm(&self) -> Arc<RealmRecord> {
        let record = RealmRecord::new(self.allocate_id());
        self.realms.write().push(record.clone());
        record
    }

    /// Lookup a realm record by id.
    pub fn get(&self, id: RealmId) -> Option<Arc<RealmRecord>> {
        self.realms.read().iter().find(|r| r.id == id).cloned()
    }

    /// GetFunctionRealm(obj) §7.3.24
    ///
    /// The realm a constructor was created in, or `fallback` (the current
    /// realm) for objects without a [[Realm]] slot.
    pub fn function_realm(
        &self,
        constructor: &JsObject,
        fallback: &Arc<RealmRecord>,
    ) -> Arc<RealmRecord> {
        constructor
            .function_realm()
            .and_then(|id| self.get(id))
            .unwrap_or_else(|| fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_resolves_constructor_realm() {
        let registry = RealmRegistry::new();
        let first = registry.create_realm();
        let second = registry.create_realm();
        assert_ne!(first.id, second.id);

        let resolved = registry.function_realm(&second.intrinsics.regexp_constructor, &first);
        assert!(Arc::ptr_eq(&resolved, &second));

        let subclass = second.create_regexp_subclass();
        let resolved = registry.function_realm(&subclass, &first);
        assert!(Arc::ptr_eq(&resolved, &second));
    }

    #[test]
    fn test_plain_object_uses_fallback_realm() {
        let registry = RealmRegistry::new();
        let current = registry.create_realm();
        let plain = JsObject::new(None);
        assert!(Arc::ptr_eq(
            &registry.function_realm(&plain, &current),
            &current
        ));

        // a realm id the registry never issued
        let stray = JsObject::new(None).with_realm(99);
        assert!(Arc::ptr_eq(
            &registry.function_realm(&stray, &current),
            &current
        ));
    }
}
