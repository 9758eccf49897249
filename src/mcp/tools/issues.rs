// src/mcp/tools/issues.rs
// Issue tools: CRUD, search, transitions, links, watchers, attachments

use super::{invalid, render_page};
use crate::format::{self, field_str};
use crate::mcp::JiraMcpServer;
use crate::mcp::requests::*;
use serde_json::{Map, Value, json};

pub async fn get_issue(server: &JiraMcpServer, req: GetIssueRequest) -> Result<String, String> {
    let issue = server
        .client()
        .await?
        .get_issue(&req.issue_key, req.fields, req.expand)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&issue, server.limit()))
}

pub async fn create_issue(server: &JiraMcpServer, req: CreateIssueRequest) -> Result<String, String> {
    let mut fields = Map::new();
    fields.insert("project".into(), json!({ "key": req.project_key }));
    fields.insert("summary".into(), json!(req.summary));
    fields.insert("issuetype".into(), json!({ "name": req.issue_type }));
    if let Some(description) = req.description {
        fields.insert("description".into(), description);
    }
    if let Some(priority) = req.priority {
        fields.insert("priority".into(), json!({ "name": priority }));
    }
    if let Some(account_id) = req.assignee_account_id {
        fields.insert("assignee".into(), json!({ "accountId": account_id }));
    }
    if let Some(labels) = req.labels {
        fields.insert("labels".into(), json!(labels));
    }
    if let Some(components) = req.components {
        let components: Vec<Value> = components.iter().map(|c| json!({ "name": c })).collect();
        fields.insert("components".into(), Value::Array(components));
    }
    if let Some(parent_key) = req.parent_key {
        fields.insert("parent".into(), json!({ "key": parent_key }));
    }
    merge_extra(&mut fields, req.extra_fields)?;

    let created = server
        .client()
        .await?
        .create_issue(fields)
        .await
        .map_err(|e| e.to_user_string())?;
    let key = field_str(&created, &["key"]);
    Ok(format!(
        "Created issue {}\n{}",
        key,
        format::json_block(&created, server.limit())
    ))
}

pub async fn update_issue(server: &JiraMcpServer, req: UpdateIssueRequest) -> Result<String, String> {
    let mut fields = Map::new();
    if let Some(summary) = req.summary {
        fields.insert("summary".into(), json!(summary));
    }
    if let Some(description) = req.description {
        fields.insert("description".into(), description);
    }
    if let Some(priority) = req.priority {
        fields.insert("priority".into(), json!({ "name": priority }));
    }
    if let Some(account_id) = req.assignee_account_id {
        fields.insert("assignee".into(), json!({ "accountId": account_id }));
    }
    if let Some(labels) = req.labels {
        fields.insert("labels".into(), json!(labels));
    }
    merge_extra(&mut fields, req.extra_fields)?;

    if fields.is_empty() {
        return Err(invalid("no fields to update"));
    }

    server
        .client()
        .await?
        .update_issue(&req.issue_key, fields)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Updated issue {}", req.issue_key))
}

pub async fn delete_issue(server: &JiraMcpServer, req: DeleteIssueRequest) -> Result<String, String> {
    server
        .client()
        .await?
        .delete_issue(&req.issue_key, req.delete_subtasks.unwrap_or(false))
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Deleted issue {}", req.issue_key))
}

pub async fn search_issues(server: &JiraMcpServer, req: SearchIssuesRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .search_issues(
            &req.jql,
            req.start_at,
            server.page(req.max_results),
            req.fields,
        )
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        req.format,
        "issues",
        &["Key", "Type", "Status", "Priority", "Assignee", "Summary"],
        issue_row,
        server.limit(),
    ))
}

pub(crate) fn issue_row(issue: &Value) -> Vec<String> {
    vec![
        field_str(issue, &["key"]),
        field_str(issue, &["fields", "issuetype", "name"]),
        field_str(issue, &["fields", "status", "name"]),
        field_str(issue, &["fields", "priority", "name"]),
        field_str(issue, &["fields", "assignee", "displayName"]),
        field_str(issue, &["fields", "summary"]),
    ]
}

pub async fn get_transitions(server: &JiraMcpServer, req: GetTransitionsRequest) -> Result<String, String> {
    let body = server
        .client()
        .await?
        .get_transitions(&req.issue_key)
        .await
        .map_err(|e| e.to_user_string())?;
    let transitions = body
        .get("transitions")
        .and_then(|t| t.as_array())
        .cloned()
        .unwrap_or_default();
    if transitions.is_empty() {
        return Ok(format!("No transitions available for {}.", req.issue_key));
    }
    let rows: Vec<Vec<String>> = transitions
        .iter()
        .map(|t| {
            vec![
                field_str(t, &["id"]),
                field_str(t, &["name"]),
                field_str(t, &["to", "name"]),
            ]
        })
        .collect();
    Ok(format::markdown_table(&["ID", "Name", "To Status"], &rows))
}

pub async fn transition_issue(server: &JiraMcpServer, req: TransitionIssueRequest) -> Result<String, String> {
    server
        .client()
        .await?
        .transition_issue(&req.issue_key, &req.transition_id, req.fields, req.comment)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!(
        "Transitioned issue {} (transition {})",
        req.issue_key, req.transition_id
    ))
}

pub async fn assign_issue(server: &JiraMcpServer, req: AssignIssueRequest) -> Result<String, String> {
    let assignee = req.account_id.clone();
    server
        .client()
        .await?
        .assign_issue(&req.issue_key, req.account_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(match assignee {
        Some(id) => format!("Assigned {} to account {}", req.issue_key, id),
        None => format!("Unassigned {}", req.issue_key),
    })
}

pub async fn get_issue_changelog(
    server: &JiraMcpServer,
    req: GetIssueChangelogRequest,
) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .get_changelog(&req.issue_key, req.start_at, server.page(req.max_results))
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&page.to_value(), server.limit()))
}

pub async fn get_issue_edit_meta(
    server: &JiraMcpServer,
    req: GetIssueEditMetaRequest,
) -> Result<String, String> {
    let meta = server
        .client()
        .await?
        .get_edit_meta(&req.issue_key)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&meta, server.limit()))
}

pub async fn link_issues(server: &JiraMcpServer, req: LinkIssuesRequest) -> Result<String, String> {
    server
        .client()
        .await?
        .link_issues(&req.link_type, &req.inward_key, &req.outward_key, req.comment)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!(
        "Linked {} -> {} ({})",
        req.inward_key, req.outward_key, req.link_type
    ))
}

pub async fn delete_issue_link(
    server: &JiraMcpServer,
    req: DeleteIssueLinkRequest,
) -> Result<String, String> {
    server
        .client()
        .await?
        .delete_issue_link(&req.link_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Deleted issue link {}", req.link_id))
}

pub async fn get_issue_link_types(server: &JiraMcpServer) -> Result<String, String> {
    let body = server
        .client()
        .await?
        .get_issue_link_types()
        .await
        .map_err(|e| e.to_user_string())?;
    let types = body
        .get("issueLinkTypes")
        .and_then(|t| t.as_array())
        .cloned()
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = types
        .iter()
        .map(|t| {
            vec![
                field_str(t, &["id"]),
                field_str(t, &["name"]),
                field_str(t, &["inward"]),
                field_str(t, &["outward"]),
            ]
        })
        .collect();
    Ok(format::markdown_table(&["ID", "Name", "Inward", "Outward"], &rows))
}

pub async fn get_watchers(server: &JiraMcpServer, req: GetWatchersRequest) -> Result<String, String> {
    let body = server
        .client()
        .await?
        .get_watchers(&req.issue_key)
        .await
        .map_err(|e| e.to_user_string())?;
    let watchers = body
        .get("watchers")
        .and_then(|w| w.as_array())
        .cloned()
        .unwrap_or_default();
    if watchers.is_empty() {
        return Ok(format!("No watchers on {}.", req.issue_key));
    }
    let rows: Vec<Vec<String>> = watchers
        .iter()
        .map(|w| {
            vec![
                field_str(w, &["accountId"]),
                field_str(w, &["displayName"]),
                field_str(w, &["active"]),
            ]
        })
        .collect();
    Ok(format::markdown_table(&["Account ID", "Display Name", "Active"], &rows))
}

pub async fn add_watcher(server: &JiraMcpServer, req: WatcherRequest) -> Result<String, String> {
    server
        .client()
        .await?
        .add_watcher(&req.issue_key, &req.account_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Added watcher {} to {}", req.account_id, req.issue_key))
}

pub async fn remove_watcher(server: &JiraMcpServer, req: WatcherRequest) -> Result<String, String> {
    server
        .client()
        .await?
        .remove_watcher(&req.issue_key, &req.account_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Removed watcher {} from {}", req.account_id, req.issue_key))
}

pub async fn list_attachments(
    server: &JiraMcpServer,
    req: ListAttachmentsRequest,
) -> Result<String, String> {
    let attachments = server
        .client()
        .await?
        .list_attachments(&req.issue_key)
        .await
        .map_err(|e| e.to_user_string())?;
    let items = attachments.as_array().cloned().unwrap_or_default();
    if items.is_empty() {
        return Ok(format!("No attachments on {}.", req.issue_key));
    }
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|a| {
            vec![
                field_str(a, &["id"]),
                field_str(a, &["filename"]),
                field_str(a, &["size"]),
                field_str(a, &["author", "displayName"]),
                field_str(a, &["created"]),
            ]
        })
        .collect();
    Ok(format::markdown_table(
        &["ID", "Filename", "Size", "Author", "Created"],
        &rows,
    ))
}

pub async fn delete_attachment(
    server: &JiraMcpServer,
    req: DeleteAttachmentRequest,
) -> Result<String, String> {
    server
        .client()
        .await?
        .delete_attachment(&req.attachment_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Deleted attachment {}", req.attachment_id))
}

/// Merge caller-supplied raw fields last, so explicit parameters win only
/// when the caller does not override them deliberately
fn merge_extra(fields: &mut Map<String, Value>, extra: Option<Value>) -> Result<(), String> {
    match extra {
        None => Ok(()),
        Some(Value::Object(map)) => {
            for (key, value) in map {
                fields.insert(key, value);
            }
            Ok(())
        }
        Some(_) => Err(invalid("extra_fields must be a JSON object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_row_extracts_columns() {
        let issue = json!({
            "key": "PROJ-7",
            "fields": {
                "issuetype": {"name": "Bug"},
                "status": {"name": "To Do"},
                "priority": {"name": "High"},
                "assignee": {"displayName": "Dana"},
                "summary": "Crash on save",
            }
        });
        assert_eq!(
            issue_row(&issue),
            vec!["PROJ-7", "Bug", "To Do", "High", "Dana", "Crash on save"]
        );
    }

    #[test]
    fn test_issue_row_tolerates_missing_fields() {
        let issue = json!({"key": "PROJ-8", "fields": {}});
        let row = issue_row(&issue);
        assert_eq!(row[0], "PROJ-8");
        assert!(row[1..].iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_merge_extra_object() {
        let mut fields = Map::new();
        fields.insert("summary".into(), json!("original"));
        merge_extra(
            &mut fields,
            Some(json!({"customfield_10010": 5, "summary": "overridden"})),
        )
        .unwrap();
        assert_eq!(fields["customfield_10010"], 5);
        assert_eq!(fields["summary"], "overridden");
    }

    #[test]
    fn test_merge_extra_rejects_non_object() {
        let mut fields = Map::new();
        assert!(merge_extra(&mut fields, Some(json!(["not", "object"]))).is_err());
    }
}
