// src/mcp/tools/filters.rs
// Saved filter and dashboard tools

use super::{invalid, render_page};
use crate::format::{self, field_str};
use crate::mcp::JiraMcpServer;
use crate::mcp::requests::*;
use serde_json::Value;

fn filter_row(filter: &Value) -> Vec<String> {
    vec![
        field_str(filter, &["id"]),
        field_str(filter, &["name"]),
        field_str(filter, &["owner", "displayName"]),
        field_str(filter, &["jql"]),
    ]
}

pub async fn list_filters(server: &JiraMcpServer, req: ListFiltersRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .list_filters(req.start_at, server.page(req.max_results), req.name)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        req.format,
        "filters",
        &["ID", "Name", "Owner", "JQL"],
        filter_row,
        server.limit(),
    ))
}

pub async fn get_filter(server: &JiraMcpServer, req: FilterRequest) -> Result<String, String> {
    let filter = server
        .client()
        .await?
        .get_filter(&req.filter_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&filter, server.limit()))
}

pub async fn create_filter(server: &JiraMcpServer, req: CreateFilterRequest) -> Result<String, String> {
    let filter = server
        .client()
        .await?
        .create_filter(&req.name, &req.jql, req.description, req.favourite)
        .await
        .map_err(|e| e.to_user_string())?;
    let id = field_str(&filter, &["id"]);
    Ok(format!(
        "Created filter {} (id {})\n{}",
        req.name,
        id,
        format::json_block(&filter, server.limit())
    ))
}

pub async fn update_filter(server: &JiraMcpServer, req: UpdateFilterRequest) -> Result<String, String> {
    let mut patch = serde_json::Map::new();
    if let Some(name) = req.name {
        patch.insert("name".into(), name.into());
    }
    if let Some(jql) = req.jql {
        patch.insert("jql".into(), jql.into());
    }
    if let Some(description) = req.description {
        patch.insert("description".into(), description.into());
    }
    if patch.is_empty() {
        return Err(invalid("no filter fields to update"));
    }
    let filter = server
        .client()
        .await?
        .update_filter(&req.filter_id, patch.into())
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!(
        "Updated filter {}\n{}",
        req.filter_id,
        format::json_block(&filter, server.limit())
    ))
}

pub async fn delete_filter(server: &JiraMcpServer, req: FilterRequest) -> Result<String, String> {
    server
        .client()
        .await?
        .delete_filter(&req.filter_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Deleted filter {}", req.filter_id))
}

pub async fn get_my_filters(server: &JiraMcpServer) -> Result<String, String> {
    let filters = server
        .client()
        .await?
        .get_my_filters()
        .await
        .map_err(|e| e.to_user_string())?;
    let items = filters.as_array().cloned().unwrap_or_default();
    if items.is_empty() {
        return Ok("You own no filters.".to_string());
    }
    let rows: Vec<Vec<String>> = items.iter().map(filter_row).collect();
    Ok(format::markdown_table(&["ID", "Name", "Owner", "JQL"], &rows))
}

pub async fn list_dashboards(server: &JiraMcpServer, req: ListDashboardsRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .list_dashboards(req.start_at, server.page(req.max_results))
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "dashboards",
        &["ID", "Name", "Owner", "View URL"],
        |d| {
            vec![
                field_str(d, &["id"]),
                field_str(d, &["name"]),
                field_str(d, &["owner", "displayName"]),
                field_str(d, &["view"]),
            ]
        },
        server.limit(),
    ))
}

pub async fn get_dashboard(server: &JiraMcpServer, req: GetDashboardRequest) -> Result<String, String> {
    let dashboard = server
        .client()
        .await?
        .get_dashboard(&req.dashboard_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&dashboard, server.limit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_row() {
        let filter = json!({
            "id": "10042",
            "name": "My open bugs",
            "owner": {"displayName": "Sam"},
            "jql": "type = Bug AND resolution = Unresolved",
        });
        let row = filter_row(&filter);
        assert_eq!(row[0], "10042");
        assert_eq!(row[3], "type = Bug AND resolution = Unresolved");
    }
}
