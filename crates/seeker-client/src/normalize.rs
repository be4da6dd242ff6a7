//! Response classification and result extraction.
//!
//! The service answers `tools/call` in several dialects:
//!
//! ```text
//! {"jsonrpc":"2.0","id":1,"result":{"results":[...]}}          plain envelope
//! {"jsonrpc":"2.0","id":1,"error":{"code":7,"message":"bad"}}   error envelope
//! event: message                                                event stream
//! data: {"result":{"content":[{"type":"text","text":"{\"results\":[...]}"}]}}
//! ```
//!
//! Normalization runs in three steps: [`classify`] the body into a
//! [`RawResponse`], [`resolve_payload`] to the tool's payload value, and
//! [`extract_results`] to records. The extraction precedence is a
//! compatibility policy; a payload matching no rule yields an empty list.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::protocol::JsonRpcError;
use crate::types::{ResultRecord, json_kind};

/// The server's answer before unwrapping.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// Structured JSON value without an `error` member.
    Plain(Value),
    /// Unstructured text, expected to carry `data:` lines.
    Stream(String),
    /// Structured JSON-RPC error envelope.
    Error(JsonRpcError),
}

impl RawResponse {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RawResponse::Plain(_) => "plain",
            RawResponse::Stream(_) => "stream",
            RawResponse::Error(_) => "error",
        }
    }
}

/// Which extraction rule a payload falls under, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// Top-level `results` array.
    Results,
    /// Nested `data.results` array.
    DataResults,
    /// The payload is itself an array.
    List,
    /// A single record carrying `content`.
    Single,
    /// Nothing recognizable.
    Unrecognized,
}

impl PayloadShape {
    pub fn of(payload: &Value) -> Self {
        if payload.get("results").is_some_and(Value::is_array) {
            PayloadShape::Results
        } else if payload.pointer("/data/results").is_some_and(Value::is_array) {
            PayloadShape::DataResults
        } else if payload.is_array() {
            PayloadShape::List
        } else if member(payload, "content").is_some() {
            PayloadShape::Single
        } else {
            PayloadShape::Unrecognized
        }
    }
}

/// Sort a response body into one of the known dialects.
pub fn classify(body: &str) -> RawResponse {
    match serde_json::from_str::<Value>(body) {
        // A JSON string is still text; the stream parser looks inside it.
        Ok(Value::String(text)) => RawResponse::Stream(text),
        Ok(value) => match member(&value, "error") {
            Some(error) => RawResponse::Error(JsonRpcError::from_value(error)),
            None => RawResponse::Plain(value),
        },
        Err(_) => RawResponse::Stream(body.to_string()),
    }
}

/// Unwrap a classified response to the tool's payload.
pub fn resolve_payload(raw: RawResponse) -> Result<Value> {
    match raw {
        RawResponse::Error(error) => Err(error.into()),
        RawResponse::Plain(value) => Ok(unwrap_result(value)),
        RawResponse::Stream(text) => resolve_stream(&text),
    }
}

/// Turn a payload into records using the first matching [`PayloadShape`].
pub fn extract_results(payload: Value) -> Result<Vec<ResultRecord>> {
    let shape = PayloadShape::of(&payload);
    tracing::debug!(?shape, "extracting results");

    match shape {
        PayloadShape::Results => records(take_array(payload, "/results")),
        PayloadShape::DataResults => records(take_array(payload, "/data/results")),
        PayloadShape::List => records(take_array(payload, "")),
        PayloadShape::Single => Ok(vec![ResultRecord::from_value(payload)?]),
        PayloadShape::Unrecognized => {
            tracing::debug!(
                kind = json_kind(&payload),
                "payload matched no result shape, returning no results"
            );
            Ok(Vec::new())
        }
    }
}

/// Classify, resolve and extract in one go.
pub fn normalize(body: &str) -> Result<Vec<ResultRecord>> {
    extract_results(resolve_payload(classify(body))?)
}

/// Payload of the first `data:` line of an event stream.
///
/// One space after the colon is stripped.
pub fn first_sse_data(text: &str) -> Option<&str> {
    text.lines()
        .find_map(|line| line.strip_prefix("data:"))
        .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
}

fn resolve_stream(text: &str) -> Result<Value> {
    let data = first_sse_data(text)
        .ok_or_else(|| Error::malformed("response is neither JSON nor an event stream with a data line"))?;

    let envelope: Value = serde_json::from_str(data)
        .map_err(|e| Error::malformed(format!("event data is not valid JSON: {}", e)))?;

    if let Some(error) = member(&envelope, "error") {
        return Err(JsonRpcError::from_value(error).into());
    }

    // Tool output is often JSON serialized into the first text content item.
    if let Some(text) = envelope
        .pointer("/result/content/0/text")
        .and_then(Value::as_str)
    {
        return serde_json::from_str(text)
            .map_err(|e| Error::malformed(format!("tool text content is not valid JSON: {}", e)));
    }

    Ok(unwrap_result(envelope))
}

/// `result` when present and non-null, else the whole value.
fn unwrap_result(mut value: Value) -> Value {
    match value.get_mut("result") {
        Some(result) if !result.is_null() => result.take(),
        _ => value,
    }
}

/// A non-null object member.
fn member<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

fn take_array(mut payload: Value, pointer: &str) -> Vec<Value> {
    match payload.pointer_mut(pointer).map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn records(items: Vec<Value>) -> Result<Vec<ResultRecord>> {
    items.into_iter().map(ResultRecord::from_value).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> ResultRecord {
        ResultRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_classify_plain_error_and_stream() {
        assert!(matches!(
            classify(r#"{"jsonrpc":"2.0","id":1,"result":{}}"#),
            RawResponse::Plain(_)
        ));
        assert!(matches!(classify("[1, 2]"), RawResponse::Plain(_)));

        match classify(r#"{"error":{"code":7,"message":"bad"}}"#) {
            RawResponse::Error(e) => assert_eq!(e.code, 7),
            other => panic!("expected error, got {:?}", other),
        }

        assert_eq!(
            classify("event: message\ndata: {}\n\n"),
            RawResponse::Stream("event: message\ndata: {}\n\n".to_string())
        );
        assert_eq!(
            classify(r#""data: {}""#),
            RawResponse::Stream("data: {}".to_string())
        );
    }

    #[test]
    fn test_null_error_is_not_an_error() {
        let raw = classify(r#"{"result":{"results":[]},"error":null}"#);
        assert_eq!(raw.kind(), "plain");
    }

    #[test]
    fn test_plain_result_results() {
        let records = normalize(
            r#"{"jsonrpc":"2.0","id":1,"result":{"results":[{"content":"a"},{"content":"b"},{"content":"c"}]}}"#,
        )
        .unwrap();
        let contents: Vec<_> = records.iter().map(|r| r.content.as_deref()).collect();
        assert_eq!(contents, vec![Some("a"), Some("b"), Some("c")]);
    }

    #[test]
    fn test_plain_without_result_uses_whole_object() {
        let records = normalize(r#"{"results":[{"content":"x","score":1.5}]}"#).unwrap();
        assert_eq!(records, vec![record(json!({"content": "x", "score": 1.5}))]);
    }

    #[test]
    fn test_plain_error_envelope() {
        let err = normalize(r#"{"jsonrpc":"2.0","id":1,"error":{"code":7,"message":"bad"}}"#)
            .unwrap_err();
        match err {
            Error::RemoteTool { code, message, .. } => {
                assert_eq!(code, 7);
                assert_eq!(message, "bad");
            }
            other => panic!("expected RemoteTool, got {:?}", other),
        }
    }

    #[test]
    fn test_stream_double_encoded_results() {
        let inner = json!({"results": [{"content": "one", "score": 0.8}, {"content": "two"}]});
        let envelope = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"content": [{"type": "text", "text": inner.to_string()}]}
        });
        let body = format!("event: message\ndata: {}\n\n", envelope);

        let records = normalize(&body).unwrap();
        assert_eq!(
            records,
            vec![
                record(json!({"content": "one", "score": 0.8})),
                record(json!({"content": "two"})),
            ]
        );
    }

    #[test]
    fn test_stream_without_text_content_uses_result() {
        let body = "data: {\"result\":{\"data\":{\"results\":[{\"content\":\"n\"}]}}}\n";
        let records = normalize(body).unwrap();
        assert_eq!(records, vec![record(json!({"content": "n"}))]);
    }

    #[test]
    fn test_stream_without_result_uses_whole_object() {
        let records = normalize("data: [{\"content\":\"a\"}]\r\n\r\n").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_stream_takes_first_data_line_only() {
        let body = "data: {\"results\":[{\"content\":\"first\"}]}\n\ndata: {\"results\":[]}\n\n";
        let records = normalize(body).unwrap();
        assert_eq!(records[0].content.as_deref(), Some("first"));
    }

    #[test]
    fn test_stream_error_envelope() {
        let err = normalize("event: message\ndata: {\"error\":{\"code\":7,\"message\":\"bad\"}}\n")
            .unwrap_err();
        assert!(matches!(err, Error::RemoteTool { code: 7, .. }));
    }

    #[test]
    fn test_text_without_data_line_is_malformed() {
        let err = normalize("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));

        let err = normalize("").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_invalid_data_json_is_malformed() {
        let err = normalize("data: {not json\n").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_invalid_double_encoded_text_is_malformed() {
        let body = "data: {\"result\":{\"content\":[{\"type\":\"text\",\"text\":\"No matches\"}]}}\n";
        let err = normalize(body).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn test_first_sse_data() {
        assert_eq!(first_sse_data("event: x\ndata: {}\n"), Some("{}"));
        assert_eq!(first_sse_data("data:{}"), Some("{}"));
        assert_eq!(first_sse_data("event: x\n\n"), None);
    }

    #[test]
    fn test_payload_shape_precedence() {
        assert_eq!(
            PayloadShape::of(&json!({"results": [], "data": {"results": []}, "content": "c"})),
            PayloadShape::Results
        );
        assert_eq!(
            PayloadShape::of(&json!({"data": {"results": []}, "content": "c"})),
            PayloadShape::DataResults
        );
        assert_eq!(PayloadShape::of(&json!([])), PayloadShape::List);
        assert_eq!(PayloadShape::of(&json!({"content": "c"})), PayloadShape::Single);
        assert_eq!(
            PayloadShape::of(&json!({"results": "not an array"})),
            PayloadShape::Unrecognized
        );
        assert_eq!(PayloadShape::of(&json!({"content": null})), PayloadShape::Unrecognized);
    }

    #[test]
    fn test_single_payload_fallback() {
        let records = extract_results(json!({"content": "hello", "score": 0.9})).unwrap();
        assert_eq!(records, vec![record(json!({"content": "hello", "score": 0.9}))]);
    }

    #[test]
    fn test_unrecognized_payload_is_empty() {
        assert!(extract_results(json!({"status": "ok"})).unwrap().is_empty());
        assert!(extract_results(json!(42)).unwrap().is_empty());
    }

    #[test]
    fn test_non_object_element_is_malformed() {
        let err = extract_results(json!({"results": [{"content": "ok"}, 3]})).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
