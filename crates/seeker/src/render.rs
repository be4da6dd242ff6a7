//! Plain-text rendering of result records.

use std::fmt::Write as _;

use seeker_client::ResultRecord;
use serde_json::Value;

const INDENT: &str = "   ";

/// Render records as a numbered list: score, content, then remaining fields.
pub fn render_results(records: &[ResultRecord]) -> String {
    if records.is_empty() {
        return "No results.\n".to_string();
    }

    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }

        let _ = write!(out, "{}.", i + 1);
        if let Some(score) = record.score {
            let _ = write!(out, " [{:.3}]", score);
        }

        match record.content.as_deref() {
            Some(content) => {
                let mut lines = content.lines();
                let _ = writeln!(out, " {}", lines.next().unwrap_or(""));
                for line in lines {
                    let _ = writeln!(out, "{}{}", INDENT, line);
                }
            }
            None => out.push_str(" (no content)\n"),
        }

        for (key, value) in &record.metadata {
            let _ = writeln!(out, "{}{}: {}", INDENT, key, display_value(value));
        }
    }
    out
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> ResultRecord {
        ResultRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_empty() {
        assert_eq!(render_results(&[]), "No results.\n");
    }

    #[test]
    fn test_score_content_and_metadata() {
        let rendered = render_results(&[record(json!({
            "content": "hello",
            "score": 0.9,
            "source": "wiki",
            "page": 3
        }))]);

        assert!(rendered.starts_with("1. [0.900] hello\n"));
        assert!(rendered.contains("   page: 3\n"));
        assert!(rendered.contains("   source: wiki\n"));
        assert_eq!(rendered.lines().count(), 3);
    }

    #[test]
    fn test_numbering_and_missing_fields() {
        let rendered = render_results(&[
            record(json!({"content": "first"})),
            record(json!({"id": "b"})),
        ]);

        assert_eq!(rendered, "1. first\n\n2. (no content)\n   id: b\n");
    }

    #[test]
    fn test_multiline_content_is_indented() {
        let rendered = render_results(&[record(json!({"content": "line one\nline two"}))]);
        assert_eq!(rendered, "1. line one\n   line two\n");
    }

    #[test]
    fn test_non_string_content_stays_metadata() {
        let rendered = render_results(&[record(json!({"content": {"k": 1}}))]);
        assert_eq!(rendered, "1. (no content)\n   content: {\"k\":1}\n");
    }
}
