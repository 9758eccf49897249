// src/mcp/tools/worklogs.rs
// Worklog tools

use super::invalid;
use crate::format;
use crate::mcp::JiraMcpServer;
use crate::mcp::requests::*;

/// Jira rejects `started` values that are not in its exact datetime shape,
/// with an unhelpful 400. Catch the common mistakes up front.
fn check_started(started: &Option<String>) -> Result<(), String> {
    if let Some(started) = started {
        chrono::DateTime::parse_from_str(started, "%Y-%m-%dT%H:%M:%S%.3f%z").map_err(|_| {
            invalid(format!(
                "invalid started timestamp '{}': expected e.g. 2026-08-29T10:15:00.000+0000",
                started
            ))
        })?;
    }
    Ok(())
}

pub async fn get_worklogs(server: &JiraMcpServer, req: GetWorklogsRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .get_worklogs(&req.issue_key, req.start_at, server.page(req.max_results))
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&page.to_value(), server.limit()))
}

pub async fn add_worklog(server: &JiraMcpServer, req: AddWorklogRequest) -> Result<String, String> {
    check_started(&req.started)?;
    let worklog = server
        .client()
        .await?
        .add_worklog(&req.issue_key, &req.time_spent, req.comment, req.started)
        .await
        .map_err(|e| e.to_user_string())?;
    let id = format::field_str(&worklog, &["id"]);
    Ok(format!(
        "Logged {} on {} (worklog {})\n{}",
        req.time_spent,
        req.issue_key,
        id,
        format::json_block(&worklog, server.limit())
    ))
}

pub async fn update_worklog(server: &JiraMcpServer, req: UpdateWorklogRequest) -> Result<String, String> {
    if req.time_spent.is_none() && req.comment.is_none() && req.started.is_none() {
        return Err(invalid("nothing to update: supply time_spent, comment, or started"));
    }
    check_started(&req.started)?;
    let worklog = server
        .client()
        .await?
        .update_worklog(
            &req.issue_key,
            &req.worklog_id,
            req.time_spent,
            req.comment,
            req.started,
        )
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!(
        "Updated worklog {} on {}\n{}",
        req.worklog_id,
        req.issue_key,
        format::json_block(&worklog, server.limit())
    ))
}

pub async fn delete_worklog(server: &JiraMcpServer, req: DeleteWorklogRequest) -> Result<String, String> {
    server
        .client()
        .await?
        .delete_worklog(&req.issue_key, &req.worklog_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Deleted worklog {} from {}", req.worklog_id, req.issue_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_started_accepts_jira_format() {
        assert!(check_started(&Some("2026-08-29T10:15:00.000+0000".into())).is_ok());
        assert!(check_started(&None).is_ok());
    }

    #[test]
    fn test_check_started_rejects_bare_date() {
        let err = check_started(&Some("2026-08-29".into())).unwrap_err();
        assert!(err.contains("invalid started timestamp"));
    }

    #[test]
    fn test_check_started_rejects_free_text() {
        assert!(check_started(&Some("yesterday at noon".into())).is_err());
    }
}
