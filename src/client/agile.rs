// src/client/agile.rs
// Agile API: boards, sprints, epics, backlog, ranking

use super::{JiraClient, Page, page_query};
use crate::error::Result;
use serde_json::{Value, json};
use urlencoding::encode;

impl JiraClient {
    pub async fn list_boards(
        &self,
        start_at: Option<u64>,
        max_results: u32,
        project_key: Option<String>,
        board_type: Option<String>,
        name: Option<String>,
    ) -> Result<Page> {
        let mut query = page_query(start_at, max_results);
        if let Some(project_key) = project_key {
            query.push(("projectKeyOrId", project_key));
        }
        if let Some(board_type) = board_type {
            query.push(("type", board_type));
        }
        if let Some(name) = name {
            query.push(("name", name));
        }
        let envelope = self.get(self.agile_url("/board"), &query).await?;
        Ok(Page::from_envelope(&envelope, "values"))
    }

    pub async fn get_board(&self, board_id: u64) -> Result<Value> {
        self.get(self.agile_url(&format!("/board/{}", board_id)), &[])
            .await
    }

    pub async fn get_board_configuration(&self, board_id: u64) -> Result<Value> {
        self.get(self.agile_url(&format!("/board/{}/configuration", board_id)), &[])
            .await
    }

    pub async fn get_board_issues(
        &self,
        board_id: u64,
        start_at: Option<u64>,
        max_results: u32,
        jql: Option<String>,
    ) -> Result<Page> {
        let mut query = page_query(start_at, max_results);
        if let Some(jql) = jql {
            query.push(("jql", jql));
        }
        let envelope = self
            .get(self.agile_url(&format!("/board/{}/issue", board_id)), &query)
            .await?;
        Ok(Page::from_envelope(&envelope, "issues"))
    }

    pub async fn get_board_backlog(
        &self,
        board_id: u64,
        start_at: Option<u64>,
        max_results: u32,
        jql: Option<String>,
    ) -> Result<Page> {
        let mut query = page_query(start_at, max_results);
        if let Some(jql) = jql {
            query.push(("jql", jql));
        }
        let envelope = self
            .get(self.agile_url(&format!("/board/{}/backlog", board_id)), &query)
            .await?;
        Ok(Page::from_envelope(&envelope, "issues"))
    }

    pub async fn list_sprints(
        &self,
        board_id: u64,
        start_at: Option<u64>,
        max_results: u32,
        state: Option<String>,
    ) -> Result<Page> {
        let mut query = page_query(start_at, max_results);
        if let Some(state) = state {
            query.push(("state", state));
        }
        let envelope = self
            .get(self.agile_url(&format!("/board/{}/sprint", board_id)), &query)
            .await?;
        Ok(Page::from_envelope(&envelope, "values"))
    }

    pub async fn get_sprint(&self, sprint_id: u64) -> Result<Value> {
        self.get(self.agile_url(&format!("/sprint/{}", sprint_id)), &[])
            .await
    }

    pub async fn create_sprint(
        &self,
        board_id: u64,
        name: &str,
        start_date: Option<String>,
        end_date: Option<String>,
        goal: Option<String>,
    ) -> Result<Value> {
        let mut body = json!({ "originBoardId": board_id, "name": name });
        if let Some(start_date) = start_date {
            body["startDate"] = json!(start_date);
        }
        if let Some(end_date) = end_date {
            body["endDate"] = json!(end_date);
        }
        if let Some(goal) = goal {
            body["goal"] = json!(goal);
        }
        self.post(self.agile_url("/sprint"), body).await
    }

    /// Partial sprint update; the Agile API uses POST for partial updates
    pub async fn update_sprint(&self, sprint_id: u64, patch: Value) -> Result<Value> {
        self.post(self.agile_url(&format!("/sprint/{}", sprint_id)), patch)
            .await
    }

    pub async fn delete_sprint(&self, sprint_id: u64) -> Result<Value> {
        self.delete(self.agile_url(&format!("/sprint/{}", sprint_id)), &[])
            .await
    }

    pub async fn get_sprint_issues(
        &self,
        sprint_id: u64,
        start_at: Option<u64>,
        max_results: u32,
        jql: Option<String>,
    ) -> Result<Page> {
        let mut query = page_query(start_at, max_results);
        if let Some(jql) = jql {
            query.push(("jql", jql));
        }
        let envelope = self
            .get(self.agile_url(&format!("/sprint/{}/issue", sprint_id)), &query)
            .await?;
        Ok(Page::from_envelope(&envelope, "issues"))
    }

    pub async fn move_issues_to_sprint(
        &self,
        sprint_id: u64,
        issue_keys: Vec<String>,
    ) -> Result<Value> {
        self.post(
            self.agile_url(&format!("/sprint/{}/issue", sprint_id)),
            json!({ "issues": issue_keys }),
        )
        .await
    }

    pub async fn move_issues_to_backlog(&self, issue_keys: Vec<String>) -> Result<Value> {
        self.post(self.agile_url("/backlog/issue"), json!({ "issues": issue_keys }))
            .await
    }

    pub async fn list_epics(
        &self,
        board_id: u64,
        start_at: Option<u64>,
        max_results: u32,
        done: Option<bool>,
    ) -> Result<Page> {
        let mut query = page_query(start_at, max_results);
        if let Some(done) = done {
            query.push(("done", done.to_string()));
        }
        let envelope = self
            .get(self.agile_url(&format!("/board/{}/epic", board_id)), &query)
            .await?;
        Ok(Page::from_envelope(&envelope, "values"))
    }

    pub async fn get_epic_issues(
        &self,
        epic_key: &str,
        start_at: Option<u64>,
        max_results: u32,
        jql: Option<String>,
    ) -> Result<Page> {
        let mut query = page_query(start_at, max_results);
        if let Some(jql) = jql {
            query.push(("jql", jql));
        }
        let envelope = self
            .get(
                self.agile_url(&format!("/epic/{}/issue", encode(epic_key))),
                &query,
            )
            .await?;
        Ok(Page::from_envelope(&envelope, "issues"))
    }

    pub async fn move_issues_to_epic(
        &self,
        epic_key: &str,
        issue_keys: Vec<String>,
    ) -> Result<Value> {
        self.post(
            self.agile_url(&format!("/epic/{}/issue", encode(epic_key))),
            json!({ "issues": issue_keys }),
        )
        .await
    }

    /// Rank issues before or after an anchor issue
    pub async fn rank_issues(
        &self,
        issue_keys: Vec<String>,
        rank_before: Option<String>,
        rank_after: Option<String>,
    ) -> Result<Value> {
        let mut body = json!({ "issues": issue_keys });
        if let Some(before) = rank_before {
            body["rankBeforeIssue"] = json!(before);
        } else if let Some(after) = rank_after {
            body["rankAfterIssue"] = json!(after);
        }
        self.put(self.agile_url("/issue/rank"), body).await
    }
}
