//! Result records returned to callers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Search type used when the caller does not pick one.
pub const DEFAULT_SEARCH_TYPE: &str = "hybrid";

/// One normalized result.
///
/// `content` and `score` are lifted out when they have the expected JSON
/// type; everything else, including a `content` that is not a string, stays
/// in `metadata` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl ResultRecord {
    /// Build a record from one element of a result array.
    ///
    /// Fails unless the element is a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut metadata = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::malformed(format!(
                    "result record must be a JSON object, got {}",
                    json_kind(&other)
                )));
            }
        };

        let content = match metadata.remove("content") {
            Some(Value::String(text)) => Some(text),
            Some(Value::Null) | None => None,
            Some(other) => {
                metadata.insert("content".to_string(), other);
                None
            }
        };

        let score = match metadata.remove("score") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::Null) | None => None,
            Some(other) => {
                metadata.insert("score".to_string(), other);
                None
            }
        };

        Ok(Self {
            content,
            score,
            metadata,
        })
    }

    /// Look up an additional field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Additional field as a string, if it is one.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

impl TryFrom<Value> for ResultRecord {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl<'de> Deserialize<'de> for ResultRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ResultRecord::from_value(value).map_err(serde::de::Error::custom)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_lifts_content_and_score() {
        let record =
            ResultRecord::from_value(json!({"content": "hello", "score": 0.9, "source": "a.md"}))
                .unwrap();

        assert_eq!(record.content.as_deref(), Some("hello"));
        assert_eq!(record.score, Some(0.9));
        assert_eq!(record.get_str("source"), Some("a.md"));
        assert_eq!(record.metadata.len(), 1);
    }

    #[test]
    fn test_keeps_unexpected_types_in_metadata() {
        let record = ResultRecord::from_value(json!({
            "content": [{"type": "text", "text": "x"}],
            "score": "high"
        }))
        .unwrap();

        assert!(record.content.is_none());
        assert!(record.score.is_none());
        assert_eq!(record.get("score"), Some(&json!("high")));
        assert!(record.get("content").unwrap().is_array());
    }

    #[test]
    fn test_rejects_non_objects() {
        let err = ResultRecord::from_value(json!("just text")).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn test_serializes_flat() {
        let record =
            ResultRecord::from_value(json!({"content": "c", "score": 1, "id": 3})).unwrap();
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"content": "c", "score": 1.0, "id": 3})
        );

        let empty = ResultRecord::default();
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({}));
    }

    #[test]
    fn test_deserialize_goes_through_from_value() {
        let records: Vec<ResultRecord> =
            serde_json::from_str(r#"[{"content":"a"},{"score":0.5}]"#).unwrap();
        assert_eq!(records[0].content.as_deref(), Some("a"));
        assert_eq!(records[1].score, Some(0.5));

        assert!(serde_json::from_str::<Vec<ResultRecord>>("[1]").is_err());
    }
}
