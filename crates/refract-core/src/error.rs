use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Runtime failure surface of a projection. The core performs no
/// translation to status codes or user envelopes; that belongs to the
/// hosting layer.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    /// A selected field has no schema resolver and no object accessor.
    /// Indicates a schema/implementation bug, not a bad request.
    #[error("the '{field}' field could not be found")]
    InvalidField { field: String },

    /// The caller requested associations unknown to the schema while
    /// association validation is enabled. Carries every offending name.
    #[error("{}", association_sentence(associations))]
    InvalidAssociation { associations: Vec<String> },
}

impl Error {
    pub(crate) fn invalid_field(field: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid_associations(associations: Vec<String>) -> Self {
        Self::InvalidAssociation { associations }
    }

    /// Return a stable error kind independent of message text.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidField { .. } => ErrorKind::InvalidField,
            Self::InvalidAssociation { .. } => ErrorKind::InvalidAssociation,
        }
    }
}

fn association_sentence(associations: &[String]) -> String {
    let quoted: Vec<String> = associations.iter().map(|a| format!("'{a}'")).collect();

    let listed = match quoted.as_slice() {
        [] => String::from("(none)"),
        [one] => one.clone(),
        [left, right] => format!("{left} and {right}"),
        [head @ .., last] => format!("{}, and {last}", head.join(", ")),
    };

    if associations.len() == 1 {
        format!("The {listed} association does not exist")
    } else {
        format!("The {listed} associations do not exist")
    }
}

///
/// ErrorKind
///
/// Stable taxonomy for boundary layers that map failures to response codes.
/// `InvalidField` is a server-side bug; `InvalidAssociation` is a client
/// error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidField,
    InvalidAssociation,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidField => "invalid_field",
            Self::InvalidAssociation => "invalid_association",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// SchemaError
///
/// Declaration-time invariant violations raised by the schema builder.
/// These never occur at request time; registration happens once at startup.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("field '{name}' is declared more than once on {type_path}")]
    DuplicateField {
        type_path: &'static str,
        name: String,
    },

    #[error("default association '{name}' is not a declared association on {type_path}")]
    UnknownDefaultAssociation {
        type_path: &'static str,
        name: String,
    },

    #[error("'{name}' targets no declared field on {type_path} ({target})")]
    UnknownFieldTarget {
        type_path: &'static str,
        name: String,
        /// What pointed at the missing field: "permission", "resolver",
        /// or "caches".
        target: &'static str,
    },
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_field_names_the_field() {
        let err = Error::invalid_field("shoe_size");
        assert_eq!(err.to_string(), "the 'shoe_size' field could not be found");
        assert_eq!(err.kind(), ErrorKind::InvalidField);
        assert_eq!(err.kind().as_str(), "invalid_field");
    }

    #[test]
    fn invalid_association_single_name() {
        let err = Error::invalid_associations(vec!["ghost".to_string()]);
        assert_eq!(err.to_string(), "The 'ghost' association does not exist");
    }

    #[test]
    fn invalid_association_combines_all_names() {
        let err =
            Error::invalid_associations(vec!["ghost".to_string(), "phantom".to_string()]);
        assert_eq!(
            err.to_string(),
            "The 'ghost' and 'phantom' associations do not exist"
        );

        let err = Error::invalid_associations(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "The 'a', 'b', and 'c' associations do not exist"
        );
    }
}
