use crate::value::Json;
use serde::Serialize;
use std::fmt;

///
/// Warning
///
/// Advisory notice about a request (currently: unknown optional fields).
/// Warnings never abort resolution and never appear inside the payload.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Warning {
    pub field: String,
    pub message: String,
}

impl Warning {
    #[must_use]
    pub(crate) fn invalid_optional_field(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("The '{field}' field is not a valid optional field"),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

///
/// Serialized
///
/// Result of one top-level invocation: the (possibly key-wrapped) payload
/// plus the warning side-channel.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Serialized {
    pub payload: Json,
    pub warnings: Vec<Warning>,
}

impl Serialized {
    #[must_use]
    pub(crate) const fn new(payload: Json, warnings: Vec<Warning>) -> Self {
        Self { payload, warnings }
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Final response body: the payload with `warnings` appended as a
    /// sibling string array. Non-object payloads cannot carry a sibling
    /// key; their warnings stay on this struct only.
    #[must_use]
    pub fn into_body(self) -> Json {
        let Self { payload, warnings } = self;

        match payload {
            Json::Object(mut map) if !warnings.is_empty() => {
                let listed = warnings
                    .iter()
                    .map(|warning| Json::String(warning.message.clone()))
                    .collect();
                map.insert("warnings".to_string(), Json::Array(listed));
                Json::Object(map)
            }
            other => other,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn warnings_append_as_a_sibling_array() {
        let serialized = Serialized::new(
            json!({ "id": 1 }),
            vec![Warning::invalid_optional_field("asdfg")],
        );

        assert!(serialized.has_warnings());
        assert_eq!(
            serialized.into_body(),
            json!({
                "id": 1,
                "warnings": ["The 'asdfg' field is not a valid optional field"]
            })
        );
    }

    #[test]
    fn clean_results_pass_the_payload_through() {
        let serialized = Serialized::new(json!({ "id": 1 }), Vec::new());
        assert!(!serialized.has_warnings());
        assert_eq!(serialized.into_body(), json!({ "id": 1 }));
    }

    #[test]
    fn non_object_payloads_are_left_alone() {
        let serialized = Serialized::new(
            json!([1, 2, 3]),
            vec![Warning::invalid_optional_field("x")],
        );
        assert_eq!(serialized.into_body(), json!([1, 2, 3]));
    }
}
