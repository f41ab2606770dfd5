use crate::{schema::Schema, traits::ObjectIdentity, value::Json};
use std::{collections::HashMap, sync::RwLock};

///
/// CacheKey
///
/// Composite per-field cache key. Freshness is encoded in the key itself:
/// bumping the object version orphans every entry for the old version, so
/// there is no explicit eviction.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CacheKey {
    type_path: &'static str,
    id: String,
    version: u64,
    field: String,
}

impl CacheKey {
    #[must_use]
    pub fn new(schema: &Schema, identity: &ObjectIdentity, field: &str) -> Self {
        Self {
            type_path: schema.type_path(),
            id: identity.id.clone(),
            version: identity.version,
            field: field.to_string(),
        }
    }
}

///
/// FieldCache
///
/// Storage collaborator for resolved field values. The core owns only the
/// caching policy; any key-value store can sit behind this trait.
///
/// Contract: concurrent get/set for the same key must never observe a
/// partial value. No cross-key ordering is required.
///

pub trait FieldCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Json>;
    fn set(&self, key: CacheKey, value: Json);
}

///
/// MemoryCache
///
/// Process-local store behind an `RwLock`; suitable default for engines
/// shared across request threads.
///

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, Json>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FieldCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<Json> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: CacheKey, value: Json) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, value);
        }
    }
}

///
/// TESTS
///
