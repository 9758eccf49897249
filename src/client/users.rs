// src/client/users.rs
// Users and groups

use super::{JiraClient, Page, page_query};
use crate::error::Result;
use serde_json::Value;

impl JiraClient {
    pub async fn get_current_user(&self) -> Result<Value> {
        self.get(self.rest_url("/myself"), &[]).await
    }

    pub async fn get_user(&self, account_id: &str) -> Result<Value> {
        self.get(
            self.rest_url("/user"),
            &[("accountId", account_id.to_string())],
        )
        .await
    }

    /// User search returns a bare array, not an envelope
    pub async fn search_users(
        &self,
        query: &str,
        start_at: Option<u64>,
        max_results: u32,
    ) -> Result<Page> {
        let mut params = page_query(start_at, max_results);
        params.push(("query", query.to_string()));
        let body = self.get(self.rest_url("/user/search"), &params).await?;
        Ok(Page::from_array(&body))
    }

    /// Users assignable to an issue or within a project
    pub async fn find_assignable_users(
        &self,
        issue_key: Option<String>,
        project_key: Option<String>,
        query: Option<String>,
        max_results: u32,
    ) -> Result<Page> {
        let mut params = vec![("maxResults", max_results.to_string())];
        if let Some(issue_key) = issue_key {
            params.push(("issueKey", issue_key));
        }
        if let Some(project_key) = project_key {
            params.push(("project", project_key));
        }
        if let Some(query) = query {
            params.push(("query", query));
        }
        let body = self
            .get(self.rest_url("/user/assignable/search"), &params)
            .await?;
        Ok(Page::from_array(&body))
    }

    pub async fn list_groups(
        &self,
        start_at: Option<u64>,
        max_results: u32,
        query: Option<String>,
    ) -> Result<Page> {
        let mut params = page_query(start_at, max_results);
        if let Some(query) = query {
            params.push(("query", query));
        }
        let envelope = self.get(self.rest_url("/group/bulk"), &params).await?;
        Ok(Page::from_envelope(&envelope, "values"))
    }

    pub async fn get_group_members(
        &self,
        group_id: &str,
        start_at: Option<u64>,
        max_results: u32,
    ) -> Result<Page> {
        let mut params = page_query(start_at, max_results);
        params.push(("groupId", group_id.to_string()));
        let envelope = self.get(self.rest_url("/group/member"), &params).await?;
        Ok(Page::from_envelope(&envelope, "values"))
    }
}
