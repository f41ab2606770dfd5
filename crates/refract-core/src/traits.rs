use crate::value::{FieldValue, Json};
use std::any::Any;

///
/// Projectable
///
/// Capability interface for domain objects that can be projected. Dispatch
/// is by concrete type through [`crate::schema::SchemaRegistry`], never by
/// probing for method presence.
///

pub trait Projectable: Any + Send + Sync {
    /// Read a named field from the underlying object.
    ///
    /// Returns `None` when the object has no such accessor; whether that is
    /// an error is decided by the caller (a selected field without an
    /// accessor or schema resolver is `Error::InvalidField`).
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// The object's own structural JSON shape, used whenever no schema
    /// applies (unregistered types, plain nested values).
    fn raw_json(&self) -> Json;

    /// Identity used for per-field caching. Objects that return `None` are
    /// never cached; the version is expected to change whenever the object
    /// does, so stale entries die by key.
    fn identity(&self) -> Option<ObjectIdentity> {
        None
    }
}

///
/// ObjectIdentity
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ObjectIdentity {
    pub id: String,
    pub version: u64,
}

impl ObjectIdentity {
    #[must_use]
    pub fn new(id: impl Into<String>, version: u64) -> Self {
        Self {
            id: id.into(),
            version,
        }
    }
}

///
/// FieldCx
///
/// Per-invocation context handed to schema resolvers and permission
/// predicates. The principal is opaque to the engine; typed access goes
/// through [`FieldCx::principal`].
///

#[derive(Clone, Copy)]
pub struct FieldCx<'a> {
    principal: Option<&'a dyn Any>,
}

impl<'a> FieldCx<'a> {
    #[must_use]
    pub const fn new(principal: Option<&'a dyn Any>) -> Self {
        Self { principal }
    }

    /// Downcast the current principal, if one was supplied.
    #[must_use]
    pub fn principal<P: Any>(&self) -> Option<&'a P> {
        self.principal.and_then(<dyn Any>::downcast_ref)
    }

    #[must_use]
    pub const fn has_principal(&self) -> bool {
        self.principal.is_some()
    }
}
