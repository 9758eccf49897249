// src/client/metadata.rs
// Instance metadata: fields, issue types, priorities, statuses, labels

use super::{JiraClient, Page, page_query};
use crate::error::Result;
use serde_json::Value;

impl JiraClient {
    pub async fn list_fields(&self) -> Result<Value> {
        self.get(self.rest_url("/field"), &[]).await
    }

    /// All issue types, or the ones available in one project
    pub async fn list_issue_types(&self, project_key: Option<String>) -> Result<Value> {
        match project_key {
            None => self.get(self.rest_url("/issuetype"), &[]).await,
            Some(key) => {
                let project = self.get_project(&key, Some("issueTypes".to_string())).await?;
                Ok(project
                    .get("issueTypes")
                    .cloned()
                    .unwrap_or(Value::Array(vec![])))
            }
        }
    }

    pub async fn list_priorities(&self) -> Result<Value> {
        self.get(self.rest_url("/priority"), &[]).await
    }

    /// All statuses, or the project's statuses grouped by issue type
    pub async fn list_statuses(&self, project_key: Option<String>) -> Result<Value> {
        match project_key {
            None => self.get(self.rest_url("/status"), &[]).await,
            Some(key) => self.get_project_statuses(&key).await,
        }
    }

    pub async fn list_resolutions(&self) -> Result<Value> {
        self.get(self.rest_url("/resolution"), &[]).await
    }

    /// Field metadata for creating issues in a project
    pub async fn get_create_meta(
        &self,
        project_key: &str,
        issue_type_id: Option<String>,
    ) -> Result<Value> {
        let mut query = vec![
            ("projectKeys", project_key.to_string()),
            ("expand", "projects.issuetypes.fields".to_string()),
        ];
        if let Some(issue_type_id) = issue_type_id {
            query.push(("issuetypeIds", issue_type_id));
        }
        self.get(self.rest_url("/issue/createmeta"), &query).await
    }

    pub async fn list_labels(&self, start_at: Option<u64>, max_results: u32) -> Result<Page> {
        let envelope = self
            .get(self.rest_url("/label"), &page_query(start_at, max_results))
            .await?;
        Ok(Page::from_envelope(&envelope, "values"))
    }

    pub async fn get_server_info(&self) -> Result<Value> {
        self.get(self.rest_url("/serverInfo"), &[]).await
    }
}
