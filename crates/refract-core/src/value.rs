use crate::traits::Projectable;

///
/// Type Aliases
///
/// `Json` maps preserve insertion order (the `preserve_order` feature of
/// `serde_json` is mandatory); field emission order is part of the
/// projection contract.
///

pub type Json = serde_json::Value;
pub type JsonMap = serde_json::Map<String, Json>;

///
/// FieldValue
///
/// The raw value an accessor or resolver hands back for one field.
/// `One`/`Many` carry projectable objects that may recurse through their own
/// schemas; `Json` is emitted as-is.
///

pub enum FieldValue {
    Json(Json),
    One(Box<dyn Projectable>),
    Many(Vec<Box<dyn Projectable>>),
}

impl FieldValue {
    /// Wrap a single projectable object.
    pub fn one(object: impl Projectable) -> Self {
        Self::One(Box::new(object))
    }

    /// Wrap a homogeneous collection of projectable objects.
    pub fn many<T, I>(objects: I) -> Self
    where
        T: Projectable,
        I: IntoIterator<Item = T>,
    {
        Self::Many(
            objects
                .into_iter()
                .map(|object| Box::new(object) as Box<dyn Projectable>)
                .collect(),
        )
    }
}

impl From<Json> for FieldValue {
    fn from(value: Json) -> Self {
        Self::Json(value)
    }
}

impl std::fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(json) => f.debug_tuple("Json").field(json).finish(),
            Self::One(_) => f.write_str("One(..)"),
            Self::Many(objects) => write!(f, "Many(len={})", objects.len()),
        }
    }
}
