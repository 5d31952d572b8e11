use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Values of one SAML `Attribute`, shaped by how many values it carries.
///
/// Serializes untagged: `null`, a string, or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// The attribute is present but has no values.
    Absent,
    Single(String),
    Multiple(Vec<String>),
}

impl AttributeValue {
    pub fn from_values(mut values: Vec<String>) -> Self {
        match values.len() {
            0 => Self::Absent,
            1 => Self::Single(values.remove(0)),
            _ => Self::Multiple(values),
        }
    }

    /// All values regardless of shape.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Absent => Vec::new(),
            Self::Single(value) => vec![value.as_str()],
            Self::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values().contains(&value)
    }
}

/// Normalized view of a SAML Response.
///
/// Every field is optional: elements missing from the document are reported
/// as absent rather than as errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamlRecord {
    pub issuer: Option<String>,
    pub name_id: Option<String>,
    /// Keyed by `Name`, in document order.
    pub attributes: IndexMap<String, AttributeValue>,
    pub status_code: Option<String>,
    pub destination: Option<String>,
    pub id: Option<String>,
    pub in_response_to: Option<String>,
    pub issue_instant: Option<String>,
}

/// Outcome of parsing a SAML Response for display.
///
/// Parse failures are data, so a caller can always render something.
/// Serializes as either the record itself or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParsedResponse {
    Record(SamlRecord),
    Error { error: String },
}

impl ParsedResponse {
    pub fn record(&self) -> Option<&SamlRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Record(_) => None,
            Self::Error { error } => Some(error),
        }
    }
}

impl From<Result<SamlRecord>> for ParsedResponse {
    fn from(result: Result<SamlRecord>) -> Self {
        match result {
            Ok(record) => Self::Record(record),
            Err(e) => Self::Error {
                error: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_values_is_absent() {
        assert_eq!(AttributeValue::from_values(vec![]), AttributeValue::Absent);
    }

    #[test]
    fn one_value_is_single() {
        assert_eq!(
            AttributeValue::from_values(vec!["a".to_string()]),
            AttributeValue::Single("a".to_string())
        );
    }

    #[test]
    fn many_values_keep_order() {
        let value = AttributeValue::from_values(vec!["b".to_string(), "a".to_string()]);
        assert_eq!(
            value,
            AttributeValue::Multiple(vec!["b".to_string(), "a".to_string()])
        );
        assert_eq!(value.values(), vec!["b", "a"]);
    }

    #[test]
    fn attribute_values_serialize_by_shape() {
        assert_eq!(serde_json::to_value(AttributeValue::Absent).unwrap(), json!(null));
        assert_eq!(
            serde_json::to_value(AttributeValue::Single("x".into())).unwrap(),
            json!("x")
        );
        assert_eq!(
            serde_json::to_value(AttributeValue::Multiple(vec!["x".into(), "y".into()])).unwrap(),
            json!(["x", "y"])
        );
    }

    #[test]
    fn attribute_values_deserialize_by_shape() {
        let absent: AttributeValue = serde_json::from_value(json!(null)).unwrap();
        let single: AttributeValue = serde_json::from_value(json!("x")).unwrap();
        let multiple: AttributeValue = serde_json::from_value(json!(["x", "y"])).unwrap();

        assert_eq!(absent, AttributeValue::Absent);
        assert!(single.contains("x"));
        assert!(multiple.contains("y"));
    }

    #[test]
    fn record_serializes_absent_fields_as_null() {
        let json = serde_json::to_value(SamlRecord::default()).unwrap();

        assert_eq!(json["issuer"], json!(null));
        assert_eq!(json["status_code"], json!(null));
        assert_eq!(json["attributes"], json!({}));
    }

    #[test]
    fn error_outcome_serializes_as_error_field() {
        let outcome = ParsedResponse::Error {
            error: "failed to parse XML: boom".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json, json!({ "error": "failed to parse XML: boom" }));
        assert!(outcome.record().is_none());
    }
}
