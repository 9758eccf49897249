// src/mcp/tools/users.rs
// User and group tools

use super::{invalid, render_page};
use crate::format::{self, field_str};
use crate::mcp::JiraMcpServer;
use crate::mcp::requests::*;
use serde_json::Value;

fn user_row(user: &Value) -> Vec<String> {
    vec![
        field_str(user, &["accountId"]),
        field_str(user, &["displayName"]),
        field_str(user, &["emailAddress"]),
        field_str(user, &["active"]),
    ]
}

pub async fn get_current_user(server: &JiraMcpServer) -> Result<String, String> {
    let user = server
        .client()
        .await?
        .get_current_user()
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&user, server.limit()))
}

pub async fn get_user(server: &JiraMcpServer, req: GetUserRequest) -> Result<String, String> {
    let user = server
        .client()
        .await?
        .get_user(&req.account_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&user, server.limit()))
}

pub async fn search_users(server: &JiraMcpServer, req: SearchUsersRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .search_users(&req.query, req.start_at, server.page(req.max_results))
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "users",
        &["Account ID", "Display Name", "Email", "Active"],
        user_row,
        server.limit(),
    ))
}

pub async fn find_assignable_users(
    server: &JiraMcpServer,
    req: FindAssignableUsersRequest,
) -> Result<String, String> {
    if req.issue_key.is_none() && req.project_key.is_none() {
        return Err(invalid("supply issue_key or project_key"));
    }
    let page = server
        .client()
        .await?
        .find_assignable_users(
            req.issue_key,
            req.project_key,
            req.query,
            server.page(req.max_results),
        )
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "assignable users",
        &["Account ID", "Display Name", "Email", "Active"],
        user_row,
        server.limit(),
    ))
}

pub async fn list_groups(server: &JiraMcpServer, req: ListGroupsRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .list_groups(req.start_at, server.page(req.max_results), req.query)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "groups",
        &["Group ID", "Name"],
        |g| vec![field_str(g, &["groupId"]), field_str(g, &["name"])],
        server.limit(),
    ))
}

pub async fn get_group_members(
    server: &JiraMcpServer,
    req: GetGroupMembersRequest,
) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .get_group_members(&req.group_id, req.start_at, server.page(req.max_results))
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "group members",
        &["Account ID", "Display Name", "Email", "Active"],
        user_row,
        server.limit(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_row() {
        let user = json!({
            "accountId": "5b10a2",
            "displayName": "Mia",
            "emailAddress": "mia@example.com",
            "active": true,
        });
        assert_eq!(user_row(&user), vec!["5b10a2", "Mia", "mia@example.com", "true"]);
    }
}
