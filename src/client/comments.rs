// src/client/comments.rs
// Issue comments

use super::{JiraClient, Page, page_query};
use crate::document;
use crate::error::Result;
use serde_json::{Value, json};
use urlencoding::encode;

impl JiraClient {
    pub async fn get_comments(
        &self,
        key: &str,
        start_at: Option<u64>,
        max_results: u32,
        order_by: Option<String>,
    ) -> Result<Page> {
        let mut query = page_query(start_at, max_results);
        if let Some(order_by) = order_by {
            query.push(("orderBy", order_by));
        }
        let envelope = self
            .get(self.rest_url(&format!("/issue/{}/comment", encode(key))), &query)
            .await?;
        Ok(Page::from_envelope(&envelope, "comments"))
    }

    /// Add a comment; `body` may be a plain string or a pre-formed ADF doc
    pub async fn add_comment(&self, key: &str, body: Value) -> Result<Value> {
        self.post(
            self.rest_url(&format!("/issue/{}/comment", encode(key))),
            json!({ "body": document::to_adf(body) }),
        )
        .await
    }

    pub async fn update_comment(&self, key: &str, comment_id: &str, body: Value) -> Result<Value> {
        self.put(
            self.rest_url(&format!("/issue/{}/comment/{}", encode(key), encode(comment_id))),
            json!({ "body": document::to_adf(body) }),
        )
        .await
    }

    pub async fn delete_comment(&self, key: &str, comment_id: &str) -> Result<Value> {
        self.delete(
            self.rest_url(&format!("/issue/{}/comment/{}", encode(key), encode(comment_id))),
            &[],
        )
        .await
    }
}
