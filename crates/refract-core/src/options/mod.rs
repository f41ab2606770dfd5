mod resolve;


use std::collections::{BTreeMap, HashMap};

///
/// OptionValue
///
/// One raw request-parameter value. Inbound field lists arrive either as a
/// single comma-delimited string or as a repeated list; both normalize to
/// the same name tokens.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OptionValue {
    Text(String),
    List(Vec<String>),
}

impl OptionValue {
    /// Normalize to name tokens: split on `,`, trim, drop empties.
    pub(crate) fn names(&self) -> Vec<String> {
        match self {
            Self::Text(text) => tokens(text).collect(),
            Self::List(items) => items.iter().flat_map(|item| tokens(item)).collect(),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

///
/// RawParams
///
/// The inbound request-parameter bag. Keys the resolver does not recognize
/// are ignored; nothing in here can fail an invocation by itself.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawParams {
    entries: BTreeMap<String, OptionValue>,
}

impl RawParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for RawParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

///
/// RawOptions
///
/// Direct options plus the raw parameter bag, as handed to the resolver.
/// Params merge into the direct lists (a request may supply either or
/// both).
///

#[derive(Clone, Debug, Default)]
pub struct RawOptions {
    pub params: RawParams,
    pub only: Vec<String>,
    pub except: Vec<String>,
    pub extra_fields: Vec<String>,
    pub associations: Vec<String>,
}

///
/// SubOptions
///
/// Per-association overrides lifted from `<assoc>_fields`,
/// `<assoc>_associations`, and `<assoc>_extra_fields` sibling parameters.
/// Consumed only when recursing into that association.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubOptions {
    pub fields: Vec<String>,
    pub associations: Vec<String>,
    pub extra_fields: Vec<String>,
}

impl SubOptions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.associations.is_empty() && self.extra_fields.is_empty()
    }
}

///
/// RequestOptions
///
/// Normalized option sets for one invocation level. Constructed fresh at
/// the top level and re-derived at every association recursion from the
/// matching `sub` entry; parent filters never leak into children.
///

#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    pub(crate) only: Vec<String>,
    pub(crate) except: Vec<String>,
    pub(crate) extra_fields: Vec<String>,
    pub(crate) associations: Vec<String>,
    pub(crate) sub: HashMap<String, SubOptions>,
}

impl RequestOptions {
    /// Inclusive filter over base attributes. Wins over `except`.
    #[must_use]
    pub fn only(&self) -> &[String] {
        &self.only
    }

    /// Exclusive filter over base attributes; ignored while `only` is
    /// non-empty.
    #[must_use]
    pub fn except(&self) -> &[String] {
        &self.except
    }

    /// Requested optional attributes, including names implied by `only`.
    /// May contain names unknown to the schema (warning material).
    #[must_use]
    pub fn extra_fields(&self) -> &[String] {
        &self.extra_fields
    }

    /// Requested associations: explicit, implied by `only`, and defaults.
    /// May contain names unknown to the schema (validation material).
    #[must_use]
    pub fn associations(&self) -> &[String] {
        &self.associations
    }

    #[must_use]
    pub fn sub_options(&self, association: &str) -> Option<&SubOptions> {
        self.sub.get(association)
    }

    #[must_use]
    pub fn has_only(&self) -> bool {
        !self.only.is_empty()
    }
}

// shared normalization helpers

pub(crate) fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

pub(crate) fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|existing| existing == name) {
        list.push(name.to_string());
    }
}
