// src/mcp/tools/metadata.rs
// Instance metadata tools

use super::render_page;
use crate::format::{self, field_str};
use crate::mcp::JiraMcpServer;
use crate::mcp::requests::*;
use serde_json::Value;

pub async fn list_fields(server: &JiraMcpServer) -> Result<String, String> {
    let fields = server
        .client()
        .await?
        .list_fields()
        .await
        .map_err(|e| e.to_user_string())?;
    let items = fields.as_array().cloned().unwrap_or_default();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|f| {
            vec![
                field_str(f, &["id"]),
                field_str(f, &["name"]),
                field_str(f, &["custom"]),
                field_str(f, &["schema", "type"]),
            ]
        })
        .collect();
    Ok(format::truncate(
        &format::markdown_table(&["ID", "Name", "Custom", "Type"], &rows),
        server.limit(),
    ))
}

pub async fn list_issue_types(server: &JiraMcpServer, req: ListIssueTypesRequest) -> Result<String, String> {
    let types = server
        .client()
        .await?
        .list_issue_types(req.project_key)
        .await
        .map_err(|e| e.to_user_string())?;
    let items = types.as_array().cloned().unwrap_or_default();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|t| {
            vec![
                field_str(t, &["id"]),
                field_str(t, &["name"]),
                field_str(t, &["subtask"]),
                field_str(t, &["description"]),
            ]
        })
        .collect();
    Ok(format::truncate(
        &format::markdown_table(&["ID", "Name", "Subtask", "Description"], &rows),
        server.limit(),
    ))
}

pub async fn list_priorities(server: &JiraMcpServer) -> Result<String, String> {
    let priorities = server
        .client()
        .await?
        .list_priorities()
        .await
        .map_err(|e| e.to_user_string())?;
    let items = priorities.as_array().cloned().unwrap_or_default();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|p| vec![field_str(p, &["id"]), field_str(p, &["name"])])
        .collect();
    Ok(format::markdown_table(&["ID", "Name"], &rows))
}

pub async fn list_statuses(server: &JiraMcpServer, req: ListStatusesRequest) -> Result<String, String> {
    let statuses = server
        .client()
        .await?
        .list_statuses(req.project_key.clone())
        .await
        .map_err(|e| e.to_user_string())?;

    // Project-scoped statuses come back grouped by issue type; the global
    // list is flat
    if req.project_key.is_some() {
        return Ok(format::json_block(&statuses, server.limit()));
    }
    let items = statuses.as_array().cloned().unwrap_or_default();
    let rows: Vec<Vec<String>> = items.iter().map(status_row).collect();
    Ok(format::truncate(
        &format::markdown_table(&["ID", "Name", "Category"], &rows),
        server.limit(),
    ))
}

fn status_row(status: &Value) -> Vec<String> {
    vec![
        field_str(status, &["id"]),
        field_str(status, &["name"]),
        field_str(status, &["statusCategory", "name"]),
    ]
}

pub async fn list_resolutions(server: &JiraMcpServer) -> Result<String, String> {
    let resolutions = server
        .client()
        .await?
        .list_resolutions()
        .await
        .map_err(|e| e.to_user_string())?;
    let items = resolutions.as_array().cloned().unwrap_or_default();
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|r| {
            vec![
                field_str(r, &["id"]),
                field_str(r, &["name"]),
                field_str(r, &["description"]),
            ]
        })
        .collect();
    Ok(format::markdown_table(&["ID", "Name", "Description"], &rows))
}

pub async fn get_create_meta(server: &JiraMcpServer, req: GetCreateMetaRequest) -> Result<String, String> {
    let meta = server
        .client()
        .await?
        .get_create_meta(&req.project_key, req.issue_type_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&meta, server.limit()))
}

pub async fn list_labels(server: &JiraMcpServer, req: ListLabelsRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .list_labels(req.start_at, server.page(req.max_results))
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "labels",
        &["Label"],
        |l| vec![l.as_str().unwrap_or_default().to_string()],
        server.limit(),
    ))
}

pub async fn get_server_info(server: &JiraMcpServer) -> Result<String, String> {
    let info = server
        .client()
        .await?
        .get_server_info()
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&info, server.limit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_row() {
        let status = json!({"id": "3", "name": "Done", "statusCategory": {"name": "Done"}});
        assert_eq!(status_row(&status), vec!["3", "Done", "Done"]);
    }
}
