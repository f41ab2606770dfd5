use crate::{
    cache::{FieldCache, MemoryCache},
    config::EngineConfig,
    error::Error,
    obs::{self, Event},
    options::{OptionValue, RawOptions, RawParams, RequestOptions},
    resolve::Walk,
    response::{Serialized, Warning},
    schema::{Schema, SchemaRegistry},
    traits::Projectable,
    value::Json,
};
use std::{any::Any, sync::Arc};

///
/// Engine
///
/// Top-level entry point: schema registry, behavior switches, and the cache
/// collaborator, assembled once at startup and shared across request
/// threads.
///

pub struct Engine {
    registry: SchemaRegistry,
    config: EngineConfig,
    cache: Arc<dyn FieldCache>,
}

impl Engine {
    #[must_use]
    pub fn new(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            config: EngineConfig::new(),
            cache: Arc::new(MemoryCache::new()),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap in an external field-cache store.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn FieldCache>) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Project one object.
    ///
    /// Objects whose type never registered a schema pass through as their
    /// structural JSON shape, unfiltered.
    pub fn serialize(
        &self,
        object: &dyn Projectable,
        options: &SerializeOptions<'_>,
    ) -> Result<Serialized, Error> {
        let Some(schema) = self.registry.schema_for(object) else {
            obs::record(Event::SerializeCall);
            let payload = wrap(options.key.clone(), object.raw_json());
            return Ok(Serialized::new(payload, Vec::new()));
        };

        self.serialize_with(object, schema, options)
    }

    /// Project one object through an explicit schema, bypassing registry
    /// dispatch.
    pub fn serialize_with(
        &self,
        object: &dyn Projectable,
        schema: &Schema,
        options: &SerializeOptions<'_>,
    ) -> Result<Serialized, Error> {
        obs::record(Event::SerializeCall);

        let resolved = RequestOptions::resolve(schema, &options.raw);
        let warnings = self.warnings(schema, &resolved);

        let map = self
            .walk(options.principal)
            .project(object, schema, &resolved)?;

        let key = options
            .key
            .clone()
            .or_else(|| schema.payload_key().map(|key| key.single.clone()));

        Ok(Serialized::new(wrap(key, Json::Object(map)), warnings))
    }

    /// Project a homogeneous collection: every element is field-selected
    /// independently under the same options, and the collection wraps under
    /// the schema's `multiple` key (unless overridden).
    pub fn serialize_many<T: Projectable>(
        &self,
        objects: &[T],
        options: &SerializeOptions<'_>,
    ) -> Result<Serialized, Error> {
        obs::record(Event::SerializeCall);

        let Some(schema) = self.registry.schema_of::<T>() else {
            let items = objects.iter().map(Projectable::raw_json).collect();
            let payload = wrap(options.key.clone(), Json::Array(items));
            return Ok(Serialized::new(payload, Vec::new()));
        };

        let resolved = RequestOptions::resolve(schema, &options.raw);
        let warnings = self.warnings(schema, &resolved);
        let walk = self.walk(options.principal);

        let mut items = Vec::with_capacity(objects.len());
        for object in objects {
            items.push(Json::Object(walk.project(object, schema, &resolved)?));
        }

        let key = options
            .key
            .clone()
            .or_else(|| schema.payload_key().map(|key| key.multiple.clone()));

        Ok(Serialized::new(wrap(key, Json::Array(items)), warnings))
    }

    fn walk<'a>(&'a self, principal: Option<&'a dyn Any>) -> Walk<'a> {
        Walk {
            registry: &self.registry,
            config: &self.config,
            cache: self.cache.as_ref(),
            principal,
        }
    }

    /// Top-level-only warning policy: one warning per requested optional
    /// field the schema does not declare.
    fn warnings(&self, schema: &Schema, options: &RequestOptions) -> Vec<Warning> {
        if !self.config.warn_invalid_fields {
            return Vec::new();
        }

        options
            .extra_fields()
            .iter()
            .filter(|name| !schema.is_optional(name))
            .map(|name| {
                obs::record(Event::WarningEmitted);
                Warning::invalid_optional_field(name)
            })
            .collect()
    }
}

fn wrap(key: Option<String>, payload: Json) -> Json {
    match key {
        Some(key) if !key.is_empty() => {
            let mut map = crate::value::JsonMap::with_capacity(1);
            map.insert(key, payload);
            Json::Object(map)
        }
        _ => payload,
    }
}

///
/// SerializeOptions
///
/// Per-request configuration for one top-level invocation: the raw
/// parameter bag, direct option lists, the current principal, and an
/// optional payload key override.
///

#[derive(Default)]
pub struct SerializeOptions<'a> {
    pub raw: RawOptions,
    pub principal: Option<&'a dyn Any>,
    pub key: Option<String>,
}

impl<'a> SerializeOptions<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the raw parameter bag.
    #[must_use]
    pub fn params(mut self, params: RawParams) -> Self {
        self.raw.params = params;
        self
    }

    /// Set one raw parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.raw.params.set(key, value);
        self
    }

    #[must_use]
    pub fn only<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw.only.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn except<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw.except.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn extra_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw
            .extra_fields
            .extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn associations<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw
            .associations
            .extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn principal<P: Any>(mut self, principal: &'a P) -> Self {
        self.principal = Some(principal);
        self
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

///
/// TESTS
///
