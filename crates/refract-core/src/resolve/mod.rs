
use crate::{
    cache::{CacheKey, FieldCache},
    config::EngineConfig,
    error::Error,
    obs::{self, Event},
    options::{RequestOptions, SubOptions},
    schema::{Schema, SchemaRegistry},
    select::select,
    traits::{FieldCx, Projectable},
    value::{FieldValue, Json, JsonMap},
};
use std::any::Any;

///
/// Walk
///
/// One depth-first projection pass. Holds the per-invocation collaborators;
/// recursion re-enters `project` with a child schema and freshly derived
/// options, never with the parent's.
///

pub(crate) struct Walk<'a> {
    pub registry: &'a SchemaRegistry,
    pub config: &'a EngineConfig,
    pub cache: &'a dyn FieldCache,
    pub principal: Option<&'a dyn Any>,
}

impl Walk<'_> {
    /// Project one object through `schema` into an ordered field map.
    ///
    /// Association validation is all-or-nothing per level: it runs before
    /// any field of this level resolves.
    pub(crate) fn project(
        &self,
        object: &dyn Projectable,
        schema: &Schema,
        options: &RequestOptions,
    ) -> Result<JsonMap, Error> {
        self.validate_associations(schema, options)?;

        let selection = select(schema, options);
        let mut out = JsonMap::with_capacity(selection.len());

        for field in &selection {
            let is_association = schema.is_association(field);
            if let Some(value) = self.resolve_field(object, schema, options, field, is_association)?
            {
                out.insert(field.clone(), value);
            }
        }

        Ok(out)
    }

    fn validate_associations(
        &self,
        schema: &Schema,
        options: &RequestOptions,
    ) -> Result<(), Error> {
        if !self.config.validate_associations {
            return Ok(());
        }

        let offending: Vec<String> = options
            .associations()
            .iter()
            .filter(|name| !schema.is_association(name))
            .cloned()
            .collect();

        if offending.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_associations(offending))
        }
    }

    /// Resolve one selected field. `Ok(None)` means the permission
    /// predicate withheld it: the key is omitted entirely, never nulled.
    fn resolve_field(
        &self,
        object: &dyn Projectable,
        schema: &Schema,
        options: &RequestOptions,
        field: &str,
        is_association: bool,
    ) -> Result<Option<Json>, Error> {
        obs::record(Event::FieldResolved);

        let identity = object.identity();
        let cacheable = schema.is_cacheable(field) && identity.is_some();

        // Cached values were permission-filtered when written; the
        // predicate is intentionally skipped on a hit.
        if cacheable {
            if let Some(identity) = &identity {
                let key = CacheKey::new(schema, identity, field);
                if let Some(cached) = self.cache.get(&key) {
                    obs::record(Event::CacheHit);
                    return Ok(Some(cached));
                }
                obs::record(Event::CacheMiss);
            }
        }

        let cx = FieldCx::new(self.principal);

        if let Some(check) = schema.permission(field) {
            let any: &dyn Any = object;
            if !check(any, &cx) {
                obs::record(Event::PermissionDenied);
                return Ok(None);
            }
        }

        let raw = self.raw_value(object, schema, field, &cx)?;

        let value = if is_association {
            self.resolve_association(raw, options.sub_options(field))?
        } else {
            structural(raw)
        };

        if cacheable {
            if let Some(identity) = &identity {
                self.cache
                    .set(CacheKey::new(schema, identity, field), value.clone());
            }
        }

        Ok(Some(value))
    }

    /// Raw value for a field: the schema's resolver override wins over the
    /// object's own accessor; neither existing is `InvalidField`.
    fn raw_value(
        &self,
        object: &dyn Projectable,
        schema: &Schema,
        field: &str,
        cx: &FieldCx<'_>,
    ) -> Result<FieldValue, Error> {
        if let Some(resolver) = schema.resolver(field) {
            let any: &dyn Any = object;
            if let Some(value) = resolver(any, cx) {
                return Ok(value);
            }
        }

        object
            .field(field)
            .ok_or_else(|| Error::invalid_field(field))
    }

    /// Recurse into an association value. Collections map every element
    /// through its own element schema with the same sub-options; values
    /// with no registered schema fall back to their structural shape.
    fn resolve_association(
        &self,
        value: FieldValue,
        sub: Option<&SubOptions>,
    ) -> Result<Json, Error> {
        match value {
            FieldValue::Json(json) => Ok(json),
            FieldValue::One(object) => self.project_nested(object.as_ref(), sub),
            FieldValue::Many(objects) => objects
                .iter()
                .map(|object| self.project_nested(object.as_ref(), sub))
                .collect::<Result<Vec<_>, _>>()
                .map(Json::Array),
        }
    }

    fn project_nested(
        &self,
        object: &dyn Projectable,
        sub: Option<&SubOptions>,
    ) -> Result<Json, Error> {
        match self.registry.schema_for(object) {
            Some(schema) => {
                let options = RequestOptions::for_association(schema, sub);
                self.project(object, schema, &options).map(Json::Object)
            }
            None => Ok(object.raw_json()),
        }
    }
}

/// Generic structural projection for non-association values that carry
/// projectable objects anyway.
fn structural(value: FieldValue) -> Json {
    match value {
        FieldValue::Json(json) => json,
        FieldValue::One(object) => object.raw_json(),
        FieldValue::Many(objects) => {
            Json::Array(objects.iter().map(|object| object.raw_json()).collect())
        }
    }
}
