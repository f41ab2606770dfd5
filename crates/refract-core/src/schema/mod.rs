mod builder;
mod registry;


use crate::{traits::FieldCx, value::FieldValue};
use std::{any::Any, collections::HashMap, collections::HashSet, sync::Arc};

// re-exports
pub use builder::SchemaBuilder;
pub use registry::SchemaRegistry;

///
/// Type Aliases
///
/// Resolvers and predicates are registered against a concrete type by the
/// builder and stored type-erased; the builder's wrappers own the downcast.
///

pub type FieldResolver = Arc<dyn Fn(&dyn Any, &FieldCx<'_>) -> Option<FieldValue> + Send + Sync>;
pub type PermissionFn = Arc<dyn Fn(&dyn Any, &FieldCx<'_>) -> bool + Send + Sync>;

///
/// Schema
///
/// Immutable per-type projection rules, built once at registration time by
/// [`SchemaBuilder`] and looked up by type identity. Declaration order of
/// every field class is retained; selection order depends on it.
///

#[derive(Clone)]
pub struct Schema {
    pub(crate) type_path: &'static str,
    pub(crate) base: Vec<String>,
    pub(crate) optional: Vec<String>,
    pub(crate) associations: Vec<String>,
    pub(crate) default_associations: Vec<String>,
    pub(crate) resolvers: HashMap<String, FieldResolver>,
    pub(crate) permissions: HashMap<String, PermissionFn>,
    pub(crate) cacheable: HashSet<String>,
    pub(crate) key: Option<PayloadKey>,
}

impl Schema {
    /// Concrete Rust type path this schema projects (diagnostics and cache
    /// key scope).
    #[must_use]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Base attributes in declaration order; always eligible unless
    /// filtered out.
    #[must_use]
    pub fn base(&self) -> &[String] {
        &self.base
    }

    /// Optional attributes; eligible only when explicitly requested.
    #[must_use]
    pub fn optional(&self) -> &[String] {
        &self.optional
    }

    /// Associations; eligible when requested or defaulted.
    #[must_use]
    pub fn associations(&self) -> &[String] {
        &self.associations
    }

    /// Subset of `associations` included without being asked for.
    #[must_use]
    pub fn default_associations(&self) -> &[String] {
        &self.default_associations
    }

    #[must_use]
    pub fn is_association(&self, name: &str) -> bool {
        self.associations.iter().any(|a| a == name)
    }

    #[must_use]
    pub fn is_optional(&self, name: &str) -> bool {
        self.optional.iter().any(|o| o == name)
    }

    #[must_use]
    pub fn is_cacheable(&self, name: &str) -> bool {
        self.cacheable.contains(name)
    }

    #[must_use]
    pub(crate) fn resolver(&self, name: &str) -> Option<&FieldResolver> {
        self.resolvers.get(name)
    }

    #[must_use]
    pub(crate) fn permission(&self, name: &str) -> Option<&PermissionFn> {
        self.permissions.get(name)
    }

    #[must_use]
    pub const fn payload_key(&self) -> Option<&PayloadKey> {
        self.key.as_ref()
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("type_path", &self.type_path)
            .field("base", &self.base)
            .field("optional", &self.optional)
            .field("associations", &self.associations)
            .field("default_associations", &self.default_associations)
            .field("cacheable", &self.cacheable)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

///
/// PayloadKey
///
/// Static wrapping keys declared on a schema: `single` wraps one object,
/// `multiple` wraps a collection. An explicit per-request key always wins.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayloadKey {
    pub single: String,
    pub multiple: String,
}

impl PayloadKey {
    #[must_use]
    pub fn new(single: impl Into<String>, multiple: impl Into<String>) -> Self {
        Self {
            single: single.into(),
            multiple: multiple.into(),
        }
    }
}

///
/// CacheSpec
///
/// Declaration form for cacheable fields. Class-level specs expand against
/// the declared field groups at build time; `Field` names one field of any
/// class.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CacheSpec {
    All,
    Fields,
    OptionalFields,
    Associations,
    Field(String),
}

impl From<&str> for CacheSpec {
    fn from(name: &str) -> Self {
        Self::Field(name.to_string())
    }
}
