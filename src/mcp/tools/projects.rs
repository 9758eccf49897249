// src/mcp/tools/projects.rs
// Project tools: listing, components, versions, roles, statuses

use super::render_page;
use crate::format::{self, field_str};
use crate::mcp::JiraMcpServer;
use crate::mcp::requests::*;
use serde_json::Value;

pub async fn list_projects(server: &JiraMcpServer, req: ListProjectsRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .list_projects(req.start_at, server.page(req.max_results), req.query)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        req.format,
        "projects",
        &["Key", "Name", "Type", "Lead"],
        |p| {
            vec![
                field_str(p, &["key"]),
                field_str(p, &["name"]),
                field_str(p, &["projectTypeKey"]),
                field_str(p, &["lead", "displayName"]),
            ]
        },
        server.limit(),
    ))
}

pub async fn get_project(server: &JiraMcpServer, req: GetProjectRequest) -> Result<String, String> {
    let project = server
        .client()
        .await?
        .get_project(&req.project_key, req.expand)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&project, server.limit()))
}

pub async fn get_project_components(
    server: &JiraMcpServer,
    req: ProjectScopedRequest,
) -> Result<String, String> {
    let components = server
        .client()
        .await?
        .get_project_components(&req.project_key)
        .await
        .map_err(|e| e.to_user_string())?;
    let items = components.as_array().cloned().unwrap_or_default();
    if items.is_empty() {
        return Ok(format!("No components in {}.", req.project_key));
    }
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|c| {
            vec![
                field_str(c, &["id"]),
                field_str(c, &["name"]),
                field_str(c, &["lead", "displayName"]),
                field_str(c, &["description"]),
            ]
        })
        .collect();
    Ok(format::markdown_table(&["ID", "Name", "Lead", "Description"], &rows))
}

pub async fn get_project_versions(
    server: &JiraMcpServer,
    req: ProjectScopedRequest,
) -> Result<String, String> {
    let versions = server
        .client()
        .await?
        .get_project_versions(&req.project_key)
        .await
        .map_err(|e| e.to_user_string())?;
    let items = versions.as_array().cloned().unwrap_or_default();
    if items.is_empty() {
        return Ok(format!("No versions in {}.", req.project_key));
    }
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|v| {
            vec![
                field_str(v, &["id"]),
                field_str(v, &["name"]),
                field_str(v, &["released"]),
                field_str(v, &["releaseDate"]),
            ]
        })
        .collect();
    Ok(format::markdown_table(&["ID", "Name", "Released", "Release Date"], &rows))
}

pub async fn create_version(server: &JiraMcpServer, req: CreateVersionRequest) -> Result<String, String> {
    let version = server
        .client()
        .await?
        .create_version(
            &req.project_key,
            &req.name,
            req.description,
            req.release_date,
            req.released,
        )
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!(
        "Created version {} in {}\n{}",
        req.name,
        req.project_key,
        format::json_block(&version, server.limit())
    ))
}

pub async fn get_project_roles(
    server: &JiraMcpServer,
    req: ProjectScopedRequest,
) -> Result<String, String> {
    let roles = server
        .client()
        .await?
        .get_project_roles(&req.project_key)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&roles, server.limit()))
}

pub async fn get_project_statuses(
    server: &JiraMcpServer,
    req: ProjectScopedRequest,
) -> Result<String, String> {
    let statuses = server
        .client()
        .await?
        .get_project_statuses(&req.project_key)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_statuses_by_type(&req.project_key, &statuses))
}

/// The statuses endpoint groups by issue type; flatten into one table
fn render_statuses_by_type(project_key: &str, statuses: &Value) -> String {
    let groups = statuses.as_array().cloned().unwrap_or_default();
    if groups.is_empty() {
        return format!("No statuses found for {}.", project_key);
    }
    let mut rows = Vec::new();
    for group in &groups {
        let issue_type = field_str(group, &["name"]);
        for status in group.get("statuses").and_then(|s| s.as_array()).into_iter().flatten() {
            rows.push(vec![
                issue_type.clone(),
                field_str(status, &["id"]),
                field_str(status, &["name"]),
                field_str(status, &["statusCategory", "name"]),
            ]);
        }
    }
    format::markdown_table(&["Issue Type", "Status ID", "Status", "Category"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_statuses_flattens_groups() {
        let statuses = json!([
            {
                "name": "Task",
                "statuses": [
                    {"id": "1", "name": "To Do", "statusCategory": {"name": "To Do"}},
                    {"id": "3", "name": "Done", "statusCategory": {"name": "Done"}},
                ]
            },
            {
                "name": "Bug",
                "statuses": [{"id": "1", "name": "To Do", "statusCategory": {"name": "To Do"}}]
            }
        ]);
        let table = render_statuses_by_type("PROJ", &statuses);
        assert!(table.contains("| Task | 1 | To Do | To Do |"));
        assert!(table.contains("| Bug | 1 | To Do | To Do |"));
    }

    #[test]
    fn test_render_statuses_empty() {
        assert!(render_statuses_by_type("PROJ", &json!([])).contains("No statuses"));
    }
}
