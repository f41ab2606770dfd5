use crate::{options::RequestOptions, schema::Schema};
use derive_more::Deref;

///
/// FieldSelection
///
/// Ordered list of field names to emit for one invocation level, enforcing
/// uniqueness on insertion. Deterministic order is first-seen insertion
/// order. Derived once per level, never mutated afterwards.
///

#[repr(transparent)]
#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct FieldSelection(Vec<String>);

impl FieldSelection {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append `name` unless already present; returns whether it was added.
    pub fn push(&mut self, name: &str) -> bool {
        if self.0.iter().any(|existing| existing == name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FieldSelection {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Compute the fields to emit for one level. Pure and deterministic.
///
/// Order: base attributes (filtered by `only`, or else `except`), then
/// eligible optional attributes in declaration order, then eligible
/// associations in declaration order. Unknown names in any filter drop out
/// silently; policy errors are the caller's concern.
#[must_use]
pub fn select(schema: &Schema, options: &RequestOptions) -> FieldSelection {
    let mut selection = FieldSelection::new();

    for name in schema.base() {
        let keep = if options.has_only() {
            options.only().contains(name)
        } else {
            !options.except().contains(name)
        };
        if keep {
            selection.push(name);
        }
    }

    for name in schema.optional() {
        if options.extra_fields().contains(name) {
            selection.push(name);
        }
    }

    for name in schema.associations() {
        if options.associations().contains(name) {
            selection.push(name);
        }
    }

    selection
}

///
/// TESTS
///
