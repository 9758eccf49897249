// src/document.rs
// Atlassian Document Format (ADF) helpers

use serde_json::{Value, json};

/// Coerce a description/comment body into ADF.
///
/// Plain strings are wrapped into a single-paragraph document; values that
/// already look like an ADF document pass through unchanged. Idempotent on
/// wrapped input.
pub fn to_adf(value: Value) -> Value {
    match value {
        Value::String(text) => text_to_adf(&text),
        Value::Object(ref obj) if obj.get("type").and_then(|t| t.as_str()) == Some("doc") => value,
        other => other,
    }
}

/// Wrap plain text into a one-paragraph ADF document
pub fn text_to_adf(text: &str) -> Value {
    json!({
        "type": "doc",
        "version": 1,
        "content": [
            {
                "type": "paragraph",
                "content": [
                    {
                        "type": "text",
                        "text": text,
                    }
                ]
            }
        ]
    })
}

/// Extract plain text from an ADF tree.
///
/// Walks text nodes depth-first and joins them with spaces.
pub fn extract_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(arr) => {
            let parts: Vec<String> = arr.iter().filter_map(extract_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(" "))
            }
        }
        Value::Object(obj) => {
            if obj.get("type").and_then(|v| v.as_str()) == Some("text") {
                return obj.get("text").and_then(|v| v.as_str()).map(String::from);
            }
            if let Some(content) = obj.get("content") {
                return extract_text(content);
            }
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string_wrapped() {
        let doc = to_adf(json!("hello world"));
        assert_eq!(doc["type"], "doc");
        assert_eq!(doc["version"], 1);
        assert_eq!(doc["content"][0]["type"], "paragraph");
        assert_eq!(doc["content"][0]["content"][0]["text"], "hello world");
    }

    #[test]
    fn test_wrapping_is_idempotent() {
        let once = to_adf(json!("hello"));
        let twice = to_adf(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_preformed_document_passes_through() {
        let doc = json!({
            "type": "doc",
            "version": 1,
            "content": [{"type": "codeBlock", "content": [{"type": "text", "text": "let x = 1;"}]}]
        });
        assert_eq!(to_adf(doc.clone()), doc);
    }

    #[test]
    fn test_extract_text_from_document() {
        let doc = text_to_adf("first paragraph");
        assert_eq!(extract_text(&doc).as_deref(), Some("first paragraph"));
    }

    #[test]
    fn test_extract_text_joins_nodes() {
        let doc = json!({
            "type": "doc",
            "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "one"}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "two"}]}
            ]
        });
        assert_eq!(extract_text(&doc).as_deref(), Some("one two"));
    }

    #[test]
    fn test_extract_text_null() {
        assert_eq!(extract_text(&Value::Null), None);
    }
}
