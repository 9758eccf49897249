// src/mcp/tools/agile.rs
// Agile tools: boards, sprints, epics, backlog, ranking

use super::{invalid, issues::issue_row, render_page};
use crate::format::{self, field_str};
use crate::mcp::JiraMcpServer;
use crate::mcp::requests::*;

/// The Agile bulk-move endpoints cap the payload at 50 issues
const MAX_MOVE_BATCH: usize = 50;

fn check_batch(issue_keys: &[String]) -> Result<(), String> {
    if issue_keys.is_empty() {
        return Err(invalid("issue_keys must not be empty"));
    }
    if issue_keys.len() > MAX_MOVE_BATCH {
        return Err(invalid(format!(
            "at most {} issues can be moved per call, got {}",
            MAX_MOVE_BATCH,
            issue_keys.len()
        )));
    }
    Ok(())
}

pub async fn list_boards(server: &JiraMcpServer, req: ListBoardsRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .list_boards(
            req.start_at,
            server.page(req.max_results),
            req.project_key,
            req.board_type,
            req.name,
        )
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "boards",
        &["ID", "Name", "Type", "Project"],
        |b| {
            vec![
                field_str(b, &["id"]),
                field_str(b, &["name"]),
                field_str(b, &["type"]),
                field_str(b, &["location", "projectKey"]),
            ]
        },
        server.limit(),
    ))
}

pub async fn get_board(server: &JiraMcpServer, req: BoardRequest) -> Result<String, String> {
    let board = server
        .client()
        .await?
        .get_board(req.board_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&board, server.limit()))
}

pub async fn get_board_configuration(server: &JiraMcpServer, req: BoardRequest) -> Result<String, String> {
    let config = server
        .client()
        .await?
        .get_board_configuration(req.board_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&config, server.limit()))
}

pub async fn get_board_issues(server: &JiraMcpServer, req: BoardIssuesRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .get_board_issues(req.board_id, req.start_at, server.page(req.max_results), req.jql)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "issues",
        &["Key", "Type", "Status", "Priority", "Assignee", "Summary"],
        issue_row,
        server.limit(),
    ))
}

pub async fn get_board_backlog(server: &JiraMcpServer, req: BoardIssuesRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .get_board_backlog(req.board_id, req.start_at, server.page(req.max_results), req.jql)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "backlog issues",
        &["Key", "Type", "Status", "Priority", "Assignee", "Summary"],
        issue_row,
        server.limit(),
    ))
}

pub async fn list_sprints(server: &JiraMcpServer, req: ListSprintsRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .list_sprints(req.board_id, req.start_at, server.page(req.max_results), req.state)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "sprints",
        &["ID", "Name", "State", "Start", "End", "Goal"],
        |s| {
            vec![
                field_str(s, &["id"]),
                field_str(s, &["name"]),
                field_str(s, &["state"]),
                field_str(s, &["startDate"]),
                field_str(s, &["endDate"]),
                field_str(s, &["goal"]),
            ]
        },
        server.limit(),
    ))
}

pub async fn get_sprint(server: &JiraMcpServer, req: SprintRequest) -> Result<String, String> {
    let sprint = server
        .client()
        .await?
        .get_sprint(req.sprint_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format::json_block(&sprint, server.limit()))
}

pub async fn create_sprint(server: &JiraMcpServer, req: CreateSprintRequest) -> Result<String, String> {
    let sprint = server
        .client()
        .await?
        .create_sprint(req.board_id, &req.name, req.start_date, req.end_date, req.goal)
        .await
        .map_err(|e| e.to_user_string())?;
    let id = field_str(&sprint, &["id"]);
    Ok(format!(
        "Created sprint {} (id {})\n{}",
        req.name,
        id,
        format::json_block(&sprint, server.limit())
    ))
}

pub async fn update_sprint(server: &JiraMcpServer, req: UpdateSprintRequest) -> Result<String, String> {
    let mut patch = serde_json::Map::new();
    if let Some(name) = req.name {
        patch.insert("name".into(), name.into());
    }
    if let Some(state) = req.state {
        patch.insert("state".into(), state.into());
    }
    if let Some(start_date) = req.start_date {
        patch.insert("startDate".into(), start_date.into());
    }
    if let Some(end_date) = req.end_date {
        patch.insert("endDate".into(), end_date.into());
    }
    if let Some(goal) = req.goal {
        patch.insert("goal".into(), goal.into());
    }
    if patch.is_empty() {
        return Err(invalid("no sprint fields to update"));
    }
    let sprint = server
        .client()
        .await?
        .update_sprint(req.sprint_id, patch.into())
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!(
        "Updated sprint {}\n{}",
        req.sprint_id,
        format::json_block(&sprint, server.limit())
    ))
}

pub async fn delete_sprint(server: &JiraMcpServer, req: SprintRequest) -> Result<String, String> {
    server
        .client()
        .await?
        .delete_sprint(req.sprint_id)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Deleted sprint {}", req.sprint_id))
}

pub async fn get_sprint_issues(server: &JiraMcpServer, req: SprintIssuesRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .get_sprint_issues(req.sprint_id, req.start_at, server.page(req.max_results), req.jql)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "issues",
        &["Key", "Type", "Status", "Priority", "Assignee", "Summary"],
        issue_row,
        server.limit(),
    ))
}

pub async fn move_issues_to_sprint(
    server: &JiraMcpServer,
    req: MoveIssuesToSprintRequest,
) -> Result<String, String> {
    check_batch(&req.issue_keys)?;
    let count = req.issue_keys.len();
    server
        .client()
        .await?
        .move_issues_to_sprint(req.sprint_id, req.issue_keys)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Moved {} issue(s) to sprint {}", count, req.sprint_id))
}

pub async fn move_issues_to_backlog(
    server: &JiraMcpServer,
    req: MoveIssuesToBacklogRequest,
) -> Result<String, String> {
    check_batch(&req.issue_keys)?;
    let count = req.issue_keys.len();
    server
        .client()
        .await?
        .move_issues_to_backlog(req.issue_keys)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Moved {} issue(s) to the backlog", count))
}

pub async fn list_epics(server: &JiraMcpServer, req: ListEpicsRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .list_epics(req.board_id, req.start_at, server.page(req.max_results), req.done)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "epics",
        &["ID", "Key", "Name", "Done"],
        |e| {
            vec![
                field_str(e, &["id"]),
                field_str(e, &["key"]),
                field_str(e, &["name"]),
                field_str(e, &["done"]),
            ]
        },
        server.limit(),
    ))
}

pub async fn get_epic_issues(server: &JiraMcpServer, req: EpicIssuesRequest) -> Result<String, String> {
    let page = server
        .client()
        .await?
        .get_epic_issues(&req.epic_key, req.start_at, server.page(req.max_results), req.jql)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(render_page(
        &page,
        None,
        "issues",
        &["Key", "Type", "Status", "Priority", "Assignee", "Summary"],
        issue_row,
        server.limit(),
    ))
}

pub async fn move_issues_to_epic(
    server: &JiraMcpServer,
    req: MoveIssuesToEpicRequest,
) -> Result<String, String> {
    check_batch(&req.issue_keys)?;
    let count = req.issue_keys.len();
    server
        .client()
        .await?
        .move_issues_to_epic(&req.epic_key, req.issue_keys)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Moved {} issue(s) to epic {}", count, req.epic_key))
}

pub async fn rank_issues(server: &JiraMcpServer, req: RankIssuesRequest) -> Result<String, String> {
    check_batch(&req.issue_keys)?;
    match (&req.rank_before_key, &req.rank_after_key) {
        (None, None) => {
            return Err(invalid("supply rank_before_key or rank_after_key"));
        }
        (Some(_), Some(_)) => {
            return Err(invalid("supply only one of rank_before_key and rank_after_key"));
        }
        _ => {}
    }
    let count = req.issue_keys.len();
    server
        .client()
        .await?
        .rank_issues(req.issue_keys, req.rank_before_key, req.rank_after_key)
        .await
        .map_err(|e| e.to_user_string())?;
    Ok(format!("Ranked {} issue(s)", count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_batch_empty() {
        assert!(check_batch(&[]).is_err());
    }

    #[test]
    fn test_check_batch_too_many() {
        let keys: Vec<String> = (0..51).map(|i| format!("PROJ-{i}")).collect();
        let err = check_batch(&keys).unwrap_err();
        assert!(err.contains("50"));
        assert!(err.starts_with("invalid input:"));
    }

    #[test]
    fn test_check_batch_ok() {
        assert!(check_batch(&["PROJ-1".to_string()]).is_ok());
    }
}
