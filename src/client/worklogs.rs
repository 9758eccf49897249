// src/client/worklogs.rs
// Issue worklogs

use super::{JiraClient, Page, page_query};
use crate::document;
use crate::error::Result;
use serde_json::{Value, json};
use urlencoding::encode;

impl JiraClient {
    pub async fn get_worklogs(
        &self,
        key: &str,
        start_at: Option<u64>,
        max_results: u32,
    ) -> Result<Page> {
        let envelope = self
            .get(
                self.rest_url(&format!("/issue/{}/worklog", encode(key))),
                &page_query(start_at, max_results),
            )
            .await?;
        Ok(Page::from_envelope(&envelope, "worklogs"))
    }

    pub async fn add_worklog(
        &self,
        key: &str,
        time_spent: &str,
        comment: Option<String>,
        started: Option<String>,
    ) -> Result<Value> {
        let body = worklog_body(time_spent, comment, started);
        self.post(self.rest_url(&format!("/issue/{}/worklog", encode(key))), body)
            .await
    }

    pub async fn update_worklog(
        &self,
        key: &str,
        worklog_id: &str,
        time_spent: Option<String>,
        comment: Option<String>,
        started: Option<String>,
    ) -> Result<Value> {
        let mut body = json!({});
        if let Some(time_spent) = time_spent {
            body["timeSpent"] = json!(time_spent);
        }
        if let Some(comment) = comment {
            body["comment"] = document::text_to_adf(&comment);
        }
        if let Some(started) = started {
            body["started"] = json!(started);
        }
        self.put(
            self.rest_url(&format!("/issue/{}/worklog/{}", encode(key), encode(worklog_id))),
            body,
        )
        .await
    }

    pub async fn delete_worklog(&self, key: &str, worklog_id: &str) -> Result<Value> {
        self.delete(
            self.rest_url(&format!("/issue/{}/worklog/{}", encode(key), encode(worklog_id))),
            &[],
        )
        .await
    }
}

fn worklog_body(time_spent: &str, comment: Option<String>, started: Option<String>) -> Value {
    let mut body = json!({ "timeSpent": time_spent });
    if let Some(comment) = comment {
        body["comment"] = document::text_to_adf(&comment);
    }
    if let Some(started) = started {
        body["started"] = json!(started);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worklog_body_minimal() {
        let body = worklog_body("3h 20m", None, None);
        assert_eq!(body["timeSpent"], "3h 20m");
        assert!(body.get("comment").is_none());
        assert!(body.get("started").is_none());
    }

    #[test]
    fn test_worklog_body_comment_wrapped_as_adf() {
        let body = worklog_body("1h", Some("did things".into()), None);
        assert_eq!(body["comment"]["type"], "doc");
    }
}
