use crate::{
    options::{OptionValue, RawOptions, RawParams, RequestOptions, SubOptions, push_unique, tokens},
    schema::Schema,
};
use std::collections::HashMap;

impl RequestOptions {
    /// Normalize raw request options against `schema`.
    ///
    /// Never fails: unknown parameter keys are ignored and malformed values
    /// degrade to empty sets. Unknown association/optional names survive
    /// normalization so the validation and warning policies can see them.
    #[must_use]
    pub fn resolve(schema: &Schema, raw: &RawOptions) -> Self {
        // `fields` is an accepted alias of `only` in the parameter bag.
        let only = merged(&raw.only, &raw.params, &["only", "fields"]);
        let except = merged(&raw.except, &raw.params, &["except"]);
        let mut extra_fields = merged(&raw.extra_fields, &raw.params, &["extra_fields"]);
        let mut associations = merged(&raw.associations, &raw.params, &["associations"]);

        // Naming an association or optional field inside the inclusion
        // filter implicitly requests it.
        for name in &only {
            if schema.is_association(name) {
                push_unique(&mut associations, name);
            } else if schema.is_optional(name) {
                push_unique(&mut extra_fields, name);
            }
        }

        // Default associations always ride along; an inclusive filter
        // narrows base attributes, not defaults.
        for name in schema.default_associations() {
            push_unique(&mut associations, name);
        }

        let sub = sub_options(schema, &raw.params);

        Self {
            only,
            except,
            extra_fields,
            associations,
            sub,
        }
    }

    /// Derive the option set for recursing into one association. Only the
    /// matching sub-option bag (if any) and the child schema's own defaults
    /// apply; nothing else is inherited from the parent level.
    #[must_use]
    pub(crate) fn for_association(schema: &Schema, sub: Option<&SubOptions>) -> Self {
        let raw = sub.map_or_else(RawOptions::default, |sub| RawOptions {
            params: RawParams::new(),
            only: sub.fields.clone(),
            except: Vec::new(),
            extra_fields: sub.extra_fields.clone(),
            associations: sub.associations.clone(),
        });

        Self::resolve(schema, &raw)
    }
}

/// Union of a direct option list and its parameter-bag spellings, order
/// preserved, first occurrence wins.
fn merged(direct: &[String], params: &RawParams, keys: &[&str]) -> Vec<String> {
    let mut out = Vec::new();

    for entry in direct {
        for name in tokens(entry) {
            push_unique(&mut out, &name);
        }
    }

    for key in keys {
        if let Some(value) = params.get(key) {
            for name in value.names() {
                push_unique(&mut out, &name);
            }
        }
    }

    out
}

/// Scan the parameter bag for `<assoc>_fields` / `<assoc>_associations` /
/// `<assoc>_extra_fields` siblings of each declared association. A bag is
/// built only when at least one of the three is present and non-empty.
fn sub_options(schema: &Schema, params: &RawParams) -> HashMap<String, SubOptions> {
    let mut sub = HashMap::new();

    for name in schema.associations() {
        let bag = SubOptions {
            fields: names_for(params, &format!("{name}_fields")),
            associations: names_for(params, &format!("{name}_associations")),
            extra_fields: names_for(params, &format!("{name}_extra_fields")),
        };

        if !bag.is_empty() {
            sub.insert(name.clone(), bag);
        }
    }

    sub
}

fn names_for(params: &RawParams, key: &str) -> Vec<String> {
    params.get(key).map_or_else(Vec::new, OptionValue::names)
}
