// src/mcp/tools/mod.rs
// Tool implementations, grouped by Jira domain

pub mod agile;
pub mod comments;
pub mod filters;
pub mod issues;
pub mod metadata;
pub mod projects;
pub mod users;
pub mod worklogs;

use crate::client::Page;
use crate::format;
use crate::mcp::requests::OutputFormat;
use serde_json::Value;

/// Tool-side validation failure, rendered through the common error type
pub(crate) fn invalid(message: impl Into<String>) -> String {
    crate::error::JiraError::InvalidInput(message.into()).to_user_string()
}

/// One-line summary prefixed to table output for paginated results
pub(crate) fn page_header(page: &Page, noun: &str) -> String {
    let more = if page.has_more {
        format!("; more available from startAt {}", page.start_at + page.count as u64)
    } else {
        String::new()
    };
    format!(
        "{} of {} {} (startAt {}{})\n\n",
        page.count, page.total, noun, page.start_at, more
    )
}

/// Render a page either as its raw JSON envelope or as a summary table
pub(crate) fn render_page(
    page: &Page,
    format: Option<OutputFormat>,
    noun: &str,
    headers: &[&str],
    row: impl Fn(&Value) -> Vec<String>,
    limit: usize,
) -> String {
    match format.unwrap_or_default() {
        OutputFormat::Json => format::json_block(&page.to_value(), limit),
        OutputFormat::Table => {
            if page.items.is_empty() {
                return format!("No {} found.", noun);
            }
            let rows: Vec<Vec<String>> = page.items.iter().map(row).collect();
            let table = format::markdown_table(headers, &rows);
            format::truncate(&format!("{}{}", page_header(page, noun), table), limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(count: usize, total: u64) -> Page {
        Page::from_envelope(
            &json!({
                "startAt": 0,
                "maxResults": 50,
                "total": total,
                "values": (0..count).map(|i| json!({"name": format!("item-{i}")})).collect::<Vec<_>>(),
            }),
            "values",
        )
    }

    #[test]
    fn test_page_header_more_available() {
        let header = page_header(&page(2, 10), "boards");
        assert!(header.contains("2 of 10 boards"));
        assert!(header.contains("more available from startAt 2"));
    }

    #[test]
    fn test_page_header_end_of_results() {
        let header = page_header(&page(2, 2), "boards");
        assert!(!header.contains("more available"));
    }

    #[test]
    fn test_render_page_empty() {
        let out = render_page(&page(0, 0), None, "boards", &["Name"], |_| vec![], 1000);
        assert_eq!(out, "No boards found.");
    }

    #[test]
    fn test_render_page_table() {
        let out = render_page(
            &page(2, 2),
            None,
            "boards",
            &["Name"],
            |v| vec![format::field_str(v, &["name"])],
            1000,
        );
        assert!(out.contains("| Name |"));
        assert!(out.contains("| item-0 |"));
    }

    #[test]
    fn test_render_page_json() {
        let out = render_page(
            &page(1, 1),
            Some(OutputFormat::Json),
            "boards",
            &["Name"],
            |_| vec![],
            1000,
        );
        assert!(out.contains("\"hasMore\": false"));
        assert!(out.contains("\"items\""));
    }
}
