// src/mcp/tools/comments.rs
// Comment tools

use super::page_header;
use crate::document;
use crate::format::{self, field_str};
use crate::mcp::JiraMcpServer;
use crate::mcp::requests::*;
use serde_json::Value;

const EXCERPT_CHARS: usize = 120;

fn comment_row(comment: &Value) -> Vec<String> {
    let body = comment
        .get("body")
        .and_then(document::extract_text)
        .unwrap_or_default();
    let excerpt: String = body.chars().take(EXCERPT_CHARS).collect();
    vec![
        field_str(comment, &["id"]),
        field_str(comment, &["author", "displayName"]),
        field_str(comment, &["created"]),
        excerpt,
    ]
}

pub async fn get_comments(server: &JiraMcpServer, req: GetCommentsRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .get_comments(
            &req.issue_key,
            req.start_at,
            server.page(req.max_results),
            req.order_by,
        )
        .await
        .map_err(|e| e.to_user_string())?;
    // Raw envelope by default; the table view flattens ADF bodies to text
    match req.format.unwrap_or(OutputFormat::Json) {
        OutputFormat::Json => Ok(format::json_block(&page.to_value(), server.limit())),
        OutputFormat::Table => {
            if page.items.is_empty() {
                return Ok("No comments found.".to_string());
            }
            let rows: Vec<Vec<String>> = page.items.iter().map(comment_row).collect();
            let table = format::markdown_table(&["ID", "Author", "Created", "Body"], &rows);
            Ok(format::truncate(
                &format!("{}{}", page_header(&page, "comments"), table),
                server.limit(),
            ))
        }
    }
}

pub async fn add_comment(server: &JiraMcpServer, req: AddCommentRequest) -> Result<String, String> {
    let comment = server
        .client()
        .await?
        .add_comment(&req.issue_key, req.body)
        .await
        .map_err(|e| e.to_user_string())?;
    let id = format::field_str(&comment, &["id"]);
    Ok(format!(
        "Added comment {} to {}\n{}",
        id,
        req.issue_key,
        format::json_block(&comment, server.limit())
    ))
}

pub async fn update_comment(server: &JiraMcpServer, req: UpdateCommentRequest) -> Result<String, String> {
    let comment = server
        .client()
        .await?
        .update_comment(&req.issue_key, &req.comment_id, req.body)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!(
        "Updated comment {} on {}\n{}",
        req.comment_id,
        req.issue_key,
        format::json_block(&comment, server.limit())
    ))
}

pub async fn delete_comment(server: &JiraMcpServer, req: DeleteCommentRequest) -> Result<String, String> {
    server
        .client()
        .await?
        .delete_comment(&req.issue_key, &req.comment_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Deleted comment {} from {}", req.comment_id, req.issue_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adf_comment(id: &str, text: &str) -> Value {
        json!({
            "id": id,
            "author": { "displayName": "Dana Dev" },
            "created": "2026-08-01T09:00:00.000+0000",
            "body": {
                "type": "doc",
                "version": 1,
                "content": [
                    { "type": "paragraph", "content": [{ "type": "text", "text": text }] }
                ]
            }
        })
    }

    #[test]
    fn test_comment_row_flattens_adf_body() {
        let row = comment_row(&adf_comment("10001", "looks good to me"));
        assert_eq!(row[0], "10001");
        assert_eq!(row[1], "Dana Dev");
        assert_eq!(row[3], "looks good to me");
    }

    #[test]
    fn test_comment_row_truncates_long_bodies() {
        let long = "x".repeat(500);
        let row = comment_row(&adf_comment("10002", &long));
        assert_eq!(row[3].chars().count(), EXCERPT_CHARS);
    }

    #[test]
    fn test_comment_row_missing_body() {
        let row = comment_row(&json!({ "id": "10003" }));
        assert_eq!(row[3], "");
    }
}
