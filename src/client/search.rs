// src/client/search.rs
// JQL issue search

use super::{JiraClient, Page, page_query};
use crate::error::Result;

impl JiraClient {
    /// Search issues by JQL, returning the normalized pagination envelope
    pub async fn search_issues(
        &self,
        jql: &str,
        start_at: Option<u64>,
        max_results: u32,
        fields: Option<String>,
    ) -> Result<Page> {
        let mut query = page_query(start_at, max_results);
        query.push(("jql", jql.to_string()));
        if let Some(fields) = fields {
            query.push(("fields", fields));
        }
        let envelope = self.get(self.rest_url("/search"), &query).await?;
        Ok(Page::from_envelope(&envelope, "issues"))
    }
}
