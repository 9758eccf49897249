// src/client/issues.rs
// Issue CRUD, transitions, links, watchers, attachments

use super::{JiraClient, Page, page_query};
use crate::document;
use crate::error::Result;
use serde_json::{Map, Value, json};
use urlencoding::encode;

impl JiraClient {
    /// Fetch one issue, optionally restricting fields or expanding extras
    pub async fn get_issue(
        &self,
        key: &str,
        fields: Option<String>,
        expand: Option<String>,
    ) -> Result<Value> {
        let mut query = Vec::new();
        if let Some(fields) = fields {
            query.push(("fields", fields));
        }
        if let Some(expand) = expand {
            query.push(("expand", expand));
        }
        self.get(self.rest_url(&format!("/issue/{}", encode(key))), &query)
            .await
    }

    /// Create an issue from an already-shaped `fields` object.
    ///
    /// The description is coerced to ADF here, so callers may pass a plain
    /// string.
    pub async fn create_issue(&self, mut fields: Map<String, Value>) -> Result<Value> {
        if let Some(description) = fields.remove("description") {
            fields.insert("description".into(), document::to_adf(description));
        }
        self.post(self.rest_url("/issue"), json!({ "fields": fields }))
            .await
    }

    pub async fn update_issue(&self, key: &str, mut fields: Map<String, Value>) -> Result<Value> {
        if let Some(description) = fields.remove("description") {
            fields.insert("description".into(), document::to_adf(description));
        }
        self.put(
            self.rest_url(&format!("/issue/{}", encode(key))),
            json!({ "fields": fields }),
        )
        .await
    }

    pub async fn delete_issue(&self, key: &str, delete_subtasks: bool) -> Result<Value> {
        self.delete(
            self.rest_url(&format!("/issue/{}", encode(key))),
            &[("deleteSubtasks", delete_subtasks.to_string())],
        )
        .await
    }

    /// Transitions currently available for the issue
    pub async fn get_transitions(&self, key: &str) -> Result<Value> {
        self.get(
            self.rest_url(&format!("/issue/{}/transitions", encode(key))),
            &[],
        )
        .await
    }

    /// Perform a workflow transition, optionally setting fields or leaving a
    /// comment in the same call
    pub async fn transition_issue(
        &self,
        key: &str,
        transition_id: &str,
        fields: Option<Value>,
        comment: Option<String>,
    ) -> Result<Value> {
        let mut body = json!({ "transition": { "id": transition_id } });
        if let Some(fields) = fields {
            body["fields"] = fields;
        }
        if let Some(comment) = comment {
            body["update"] = json!({
                "comment": [{ "add": { "body": document::text_to_adf(&comment) } }]
            });
        }
        self.post(
            self.rest_url(&format!("/issue/{}/transitions", encode(key))),
            body,
        )
        .await
    }

    /// Assign the issue; `None` unassigns it
    pub async fn assign_issue(&self, key: &str, account_id: Option<String>) -> Result<Value> {
        let body = match account_id {
            Some(id) => json!({ "accountId": id }),
            None => json!({ "accountId": null }),
        };
        self.put(self.rest_url(&format!("/issue/{}/assignee", encode(key))), body)
            .await
    }

    pub async fn get_changelog(
        &self,
        key: &str,
        start_at: Option<u64>,
        max_results: u32,
    ) -> Result<Page> {
        let envelope = self
            .get(
                self.rest_url(&format!("/issue/{}/changelog", encode(key))),
                &page_query(start_at, max_results),
            )
            .await?;
        Ok(Page::from_envelope(&envelope, "values"))
    }

    pub async fn get_edit_meta(&self, key: &str) -> Result<Value> {
        self.get(self.rest_url(&format!("/issue/{}/editmeta", encode(key))), &[])
            .await
    }

    pub async fn link_issues(
        &self,
        link_type: &str,
        inward_key: &str,
        outward_key: &str,
        comment: Option<String>,
    ) -> Result<Value> {
        let mut body = json!({
            "type": { "name": link_type },
            "inwardIssue": { "key": inward_key },
            "outwardIssue": { "key": outward_key },
        });
        if let Some(comment) = comment {
            body["comment"] = json!({ "body": document::text_to_adf(&comment) });
        }
        self.post(self.rest_url("/issueLink"), body).await
    }

    pub async fn delete_issue_link(&self, link_id: &str) -> Result<Value> {
        self.delete(self.rest_url(&format!("/issueLink/{}", encode(link_id))), &[])
            .await
    }

    pub async fn get_issue_link_types(&self) -> Result<Value> {
        self.get(self.rest_url("/issueLinkType"), &[]).await
    }

    pub async fn get_watchers(&self, key: &str) -> Result<Value> {
        self.get(self.rest_url(&format!("/issue/{}/watchers", encode(key))), &[])
            .await
    }

    /// The watchers endpoint takes the bare account id as a JSON string body
    pub async fn add_watcher(&self, key: &str, account_id: &str) -> Result<Value> {
        self.post(
            self.rest_url(&format!("/issue/{}/watchers", encode(key))),
            Value::String(account_id.to_string()),
        )
        .await
    }

    pub async fn remove_watcher(&self, key: &str, account_id: &str) -> Result<Value> {
        self.delete(
            self.rest_url(&format!("/issue/{}/watchers", encode(key))),
            &[("accountId", account_id.to_string())],
        )
        .await
    }

    /// Attachments are a field on the issue, not a collection endpoint
    pub async fn list_attachments(&self, key: &str) -> Result<Value> {
        let issue = self
            .get_issue(key, Some("attachment".to_string()), None)
            .await?;
        Ok(issue
            .get("fields")
            .and_then(|f| f.get("attachment"))
            .cloned()
            .unwrap_or(Value::Array(vec![])))
    }

    pub async fn delete_attachment(&self, attachment_id: &str) -> Result<Value> {
        self.delete(
            self.rest_url(&format!("/attachment/{}", encode(attachment_id))),
            &[],
        )
        .await
    }
}
