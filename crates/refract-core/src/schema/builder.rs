use crate::{
    error::SchemaError,
    schema::{CacheSpec, FieldResolver, PayloadKey, PermissionFn, Schema},
    traits::{FieldCx, Projectable},
    value::FieldValue,
};
use std::{
    any::Any,
    collections::{HashMap, HashSet},
    marker::PhantomData,
    sync::Arc,
};

///
/// SchemaBuilder
///
/// Declares the projection rules for one concrete type. `build` enforces
/// the schema invariants; a failed build is a programming error surfaced at
/// registration time, never at request time.
///

pub struct SchemaBuilder<T> {
    base: Vec<String>,
    optional: Vec<String>,
    associations: Vec<String>,
    default_associations: Vec<String>,
    resolvers: HashMap<String, FieldResolver>,
    permissions: HashMap<String, PermissionFn>,
    cache_specs: Vec<CacheSpec>,
    key: Option<PayloadKey>,
    _marker: PhantomData<fn(&T)>,
}

impl<T: Projectable> SchemaBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Vec::new(),
            optional: Vec::new(),
            associations: Vec::new(),
            default_associations: Vec::new(),
            resolvers: HashMap::new(),
            permissions: HashMap::new(),
            cache_specs: Vec::new(),
            key: None,
            _marker: PhantomData,
        }
    }

    /// Base attributes, in emission order.
    #[must_use]
    pub fn attributes<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Optional attributes; emitted only when explicitly requested.
    #[must_use]
    pub fn optional<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Associations; emitted when requested or defaulted, recursing through
    /// the associated value's own schema.
    #[must_use]
    pub fn associations<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.associations.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Associations included without being asked for. Must be declared
    /// associations.
    #[must_use]
    pub fn default_associations<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_associations
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// Register a computed resolver for `field`, consulted before the
    /// object's own accessor.
    #[must_use]
    pub fn resolve_with<F>(mut self, field: impl Into<String>, resolve: F) -> Self
    where
        F: Fn(&T, &FieldCx<'_>) -> FieldValue + Send + Sync + 'static,
    {
        let erased = move |object: &dyn Any, cx: &FieldCx<'_>| {
            object.downcast_ref::<T>().map(|typed| resolve(typed, cx))
        };
        self.resolvers.insert(field.into(), Arc::new(erased));
        self
    }

    /// Gate `field` behind a permission predicate. Anything but `true`
    /// omits the field from the output entirely.
    #[must_use]
    pub fn permission<F>(mut self, field: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T, &FieldCx<'_>) -> bool + Send + Sync + 'static,
    {
        let erased = move |object: &dyn Any, cx: &FieldCx<'_>| {
            object
                .downcast_ref::<T>()
                .is_some_and(|typed| check(typed, cx))
        };
        self.permissions.insert(field.into(), Arc::new(erased));
        self
    }

    /// Declare cacheable fields. Specs expand at build time; see
    /// [`CacheSpec`].
    #[must_use]
    pub fn caches<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CacheSpec>,
    {
        self.cache_specs.extend(specs.into_iter().map(Into::into));
        self
    }

    /// Static payload keys: `single` for one object, `multiple` for a
    /// collection.
    #[must_use]
    pub fn key(mut self, single: impl Into<String>, multiple: impl Into<String>) -> Self {
        self.key = Some(PayloadKey::new(single, multiple));
        self
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        let type_path = std::any::type_name::<T>();

        // A name may appear in exactly one field class.
        let mut seen: HashSet<&str> = HashSet::new();
        for name in self
            .base
            .iter()
            .chain(&self.optional)
            .chain(&self.associations)
        {
            if !seen.insert(name) {
                return Err(SchemaError::DuplicateField {
                    type_path,
                    name: name.clone(),
                });
            }
        }

        for name in &self.default_associations {
            if !self.associations.contains(name) {
                return Err(SchemaError::UnknownDefaultAssociation {
                    type_path,
                    name: name.clone(),
                });
            }
        }

        for (name, target) in self
            .permissions
            .keys()
            .map(|n| (n, "permission"))
            .chain(self.resolvers.keys().map(|n| (n, "resolver")))
        {
            if !seen.contains(name.as_str()) {
                return Err(SchemaError::UnknownFieldTarget {
                    type_path,
                    name: name.clone(),
                    target,
                });
            }
        }

        let cacheable = Self::expand_cache_specs(
            type_path,
            &self.cache_specs,
            &self.base,
            &self.optional,
            &self.associations,
            &seen,
        )?;

        Ok(Schema {
            type_path,
            base: self.base,
            optional: self.optional,
            associations: self.associations,
            default_associations: self.default_associations,
            resolvers: self.resolvers,
            permissions: self.permissions,
            cacheable,
            key: self.key,
        })
    }

    fn expand_cache_specs(
        type_path: &'static str,
        specs: &[CacheSpec],
        base: &[String],
        optional: &[String],
        associations: &[String],
        declared: &HashSet<&str>,
    ) -> Result<HashSet<String>, SchemaError> {
        let mut cacheable = HashSet::new();

        for spec in specs {
            match spec {
                CacheSpec::All => {
                    cacheable.extend(base.iter().cloned());
                    cacheable.extend(optional.iter().cloned());
                    cacheable.extend(associations.iter().cloned());
                }
                CacheSpec::Fields => cacheable.extend(base.iter().cloned()),
                CacheSpec::OptionalFields => cacheable.extend(optional.iter().cloned()),
                CacheSpec::Associations => cacheable.extend(associations.iter().cloned()),
                CacheSpec::Field(name) => {
                    if !declared.contains(name.as_str()) {
                        return Err(SchemaError::UnknownFieldTarget {
                            type_path,
                            name: name.clone(),
                            target: "caches",
                        });
                    }
                    cacheable.insert(name.clone());
                }
            }
        }

        Ok(cacheable)
    }
}

impl<T: Projectable> Default for SchemaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
