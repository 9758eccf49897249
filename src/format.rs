// src/format.rs
// Output renderers: pretty JSON blocks and fixed-column Markdown tables

use serde_json::Value;

/// Notice appended when output is cut at the response character limit
const TRUNCATION_NOTICE: &str = "\n... (output truncated)";

/// Render a value as pretty-printed JSON, capped at `limit` characters
pub fn json_block(value: &Value, limit: usize) -> String {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    truncate(&rendered, limit)
}

/// Truncate at a char boundary, appending a notice when anything was cut
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(limit).collect();
    format!("{}{}", kept, TRUNCATION_NOTICE)
}

/// Render a fixed-column Markdown table.
///
/// Rows shorter than the header are padded with empty cells; cell content
/// is escaped so pipes and newlines cannot break the table shape.
pub fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();

    out.push_str("| ");
    out.push_str(&headers.join(" | "));
    out.push_str(" |\n|");
    for _ in headers {
        out.push_str(" --- |");
    }
    out.push('\n');

    for row in rows {
        out.push('|');
        for i in 0..headers.len() {
            let cell = row.get(i).map(|c| escape_cell(c)).unwrap_or_default();
            out.push(' ');
            out.push_str(&cell);
            out.push_str(" |");
        }
        out.push('\n');
    }

    out
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Pull a stringy field out of a JSON object for table cells, tolerating
/// missing fields and non-string scalars.
pub fn field_str(value: &Value, path: &[&str]) -> String {
    let mut current = value;
    for key in path {
        match current.get(key) {
            Some(v) => current = v,
            None => return String::new(),
        }
    }
    match current {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(|i| match i {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_block_under_limit() {
        let value = json!({"key": "value"});
        let out = json_block(&value, 1000);
        assert!(out.contains("\"key\": \"value\""));
        assert!(!out.contains("truncated"));
    }

    #[test]
    fn test_truncate_cuts_and_notes() {
        let out = truncate("abcdefghij", 4);
        assert!(out.starts_with("abcd"));
        assert!(out.ends_with("(output truncated)"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "äöüß".repeat(10);
        let out = truncate(&text, 5);
        assert!(out.starts_with("äöüßä"));
    }

    #[test]
    fn test_truncate_exact_fit_untouched() {
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn test_markdown_table_shape() {
        let rows = vec![
            vec!["PROJ-1".to_string(), "Fix the bug".to_string()],
            vec!["PROJ-2".to_string(), "Ship it".to_string()],
        ];
        let table = markdown_table(&["Key", "Summary"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "| Key | Summary |");
        assert_eq!(lines[1], "| --- | --- |");
        assert_eq!(lines[2], "| PROJ-1 | Fix the bug |");
        assert_eq!(lines[3], "| PROJ-2 | Ship it |");
    }

    #[test]
    fn test_markdown_table_escapes_pipes_and_newlines() {
        let rows = vec![vec!["a|b\nc".to_string()]];
        let table = markdown_table(&["Cell"], &rows);
        assert!(table.contains("a\\|b c"));
    }

    #[test]
    fn test_markdown_table_pads_short_rows() {
        let rows = vec![vec!["only".to_string()]];
        let table = markdown_table(&["A", "B"], &rows);
        assert!(table.contains("| only |  |"));
    }

    #[test]
    fn test_field_str_nested() {
        let value = json!({"fields": {"status": {"name": "In Progress"}}});
        assert_eq!(field_str(&value, &["fields", "status", "name"]), "In Progress");
    }

    #[test]
    fn test_field_str_missing_is_empty() {
        let value = json!({"fields": {}});
        assert_eq!(field_str(&value, &["fields", "status", "name"]), "");
    }

    #[test]
    fn test_field_str_scalars_and_arrays() {
        let value = json!({"id": 42, "labels": ["infra", "urgent"]});
        assert_eq!(field_str(&value, &["id"]), "42");
        assert_eq!(field_str(&value, &["labels"]), "infra, urgent");
    }
}
