// src/client/filters.rs
// Saved filters and dashboards

use super::{JiraClient, Page, page_query};
use crate::error::Result;
use serde_json::{Value, json};
use urlencoding::encode;

impl JiraClient {
    pub async fn list_filters(
        &self,
        start_at: Option<u64>,
        max_results: u32,
        name: Option<String>,
    ) -> Result<Page> {
        let mut query = page_query(start_at, max_results);
        if let Some(name) = name {
            query.push(("filterName", name));
        }
        let envelope = self.get(self.rest_url("/filter/search"), &query).await?;
        Ok(Page::from_envelope(&envelope, "values"))
    }

    pub async fn get_filter(&self, filter_id: &str) -> Result<Value> {
        self.get(self.rest_url(&format!("/filter/{}", encode(filter_id))), &[])
            .await
    }

    pub async fn create_filter(
        &self,
        name: &str,
        jql: &str,
        description: Option<String>,
        favourite: Option<bool>,
    ) -> Result<Value> {
        let mut body = json!({ "name": name, "jql": jql });
        if let Some(description) = description {
            body["description"] = json!(description);
        }
        if let Some(favourite) = favourite {
            body["favourite"] = json!(favourite);
        }
        self.post(self.rest_url("/filter"), body).await
    }

    pub async fn update_filter(&self, filter_id: &str, patch: Value) -> Result<Value> {
        self.put(self.rest_url(&format!("/filter/{}", encode(filter_id))), patch)
            .await
    }

    pub async fn delete_filter(&self, filter_id: &str) -> Result<Value> {
        self.delete(self.rest_url(&format!("/filter/{}", encode(filter_id))), &[])
            .await
    }

    /// Filters owned by the calling user (bare array)
    pub async fn get_my_filters(&self) -> Result<Value> {
        self.get(self.rest_url("/filter/my"), &[]).await
    }

    pub async fn list_dashboards(
        &self,
        start_at: Option<u64>,
        max_results: u32,
    ) -> Result<Page> {
        let envelope = self
            .get(self.rest_url("/dashboard"), &page_query(start_at, max_results))
            .await?;
        Ok(Page::from_envelope(&envelope, "dashboards"))
    }

    pub async fn get_dashboard(&self, dashboard_id: &str) -> Result<Value> {
        self.get(
            self.rest_url(&format!("/dashboard/{}", encode(dashboard_id))),
            &[],
        )
        .await
    }
}
