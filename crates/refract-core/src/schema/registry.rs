use crate::{schema::Schema, traits::Projectable};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

///
/// SchemaRegistry
///
/// Serializer dispatch: schemas keyed by concrete type, populated once at
/// startup. Values that never registered a schema fall back to their
/// structural JSON shape.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<TypeId, Arc<Schema>>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `schema` for the concrete type `T`. Re-registering a type
    /// replaces its schema; registration is a startup-time activity.
    pub fn register<T: Projectable>(&mut self, schema: Schema) {
        self.schemas.insert(TypeId::of::<T>(), Arc::new(schema));
    }

    /// Look up the schema declared for `T`.
    #[must_use]
    pub fn schema_of<T: Projectable>(&self) -> Option<&Schema> {
        self.schemas.get(&TypeId::of::<T>()).map(Arc::as_ref)
    }

    /// Dispatch: find the schema for a value's concrete type, if any.
    #[must_use]
    pub fn schema_for(&self, object: &dyn Projectable) -> Option<&Schema> {
        let any: &dyn Any = object;
        self.schemas.get(&any.type_id()).map(Arc::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
