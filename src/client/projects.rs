// src/client/projects.rs
// Projects, components, versions, roles

use super::{JiraClient, Page, page_query};
use crate::error::{JiraError, Result};
use serde_json::{Value, json};
use urlencoding::encode;

impl JiraClient {
    pub async fn list_projects(
        &self,
        start_at: Option<u64>,
        max_results: u32,
        query: Option<String>,
    ) -> Result<Page> {
        let mut params = page_query(start_at, max_results);
        if let Some(query) = query {
            params.push(("query", query));
        }
        let envelope = self.get(self.rest_url("/project/search"), &params).await?;
        Ok(Page::from_envelope(&envelope, "values"))
    }

    pub async fn get_project(&self, key: &str, expand: Option<String>) -> Result<Value> {
        let mut query = Vec::new();
        if let Some(expand) = expand {
            query.push(("expand", expand));
        }
        self.get(self.rest_url(&format!("/project/{}", encode(key))), &query)
            .await
    }

    pub async fn get_project_components(&self, key: &str) -> Result<Value> {
        self.get(self.rest_url(&format!("/project/{}/components", encode(key))), &[])
            .await
    }

    pub async fn get_project_versions(&self, key: &str) -> Result<Value> {
        self.get(self.rest_url(&format!("/project/{}/versions", encode(key))), &[])
            .await
    }

    /// Create a version. The versions endpoint wants the numeric project id,
    /// so this resolves the key first (the one two-call operation here).
    pub async fn create_version(
        &self,
        project_key: &str,
        name: &str,
        description: Option<String>,
        release_date: Option<String>,
        released: Option<bool>,
    ) -> Result<Value> {
        let project = self.get_project(project_key, None).await?;
        let project_id = project
            .get("id")
            .and_then(|id| id.as_str())
            .and_then(|id| id.parse::<u64>().ok())
            .ok_or_else(|| {
                JiraError::InvalidInput(format!("project {} has no numeric id", project_key))
            })?;

        let mut body = json!({ "projectId": project_id, "name": name });
        if let Some(description) = description {
            body["description"] = json!(description);
        }
        if let Some(release_date) = release_date {
            body["releaseDate"] = json!(release_date);
        }
        if let Some(released) = released {
            body["released"] = json!(released);
        }
        self.post(self.rest_url("/version"), body).await
    }

    pub async fn get_project_roles(&self, key: &str) -> Result<Value> {
        self.get(self.rest_url(&format!("/project/{}/role", encode(key))), &[])
            .await
    }

    /// Statuses per issue type for the project
    pub async fn get_project_statuses(&self, key: &str) -> Result<Value> {
        self.get(self.rest_url(&format!("/project/{}/statuses", encode(key))), &[])
            .await
    }
}
