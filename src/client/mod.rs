// src/client/mod.rs
// Typed facade over the Jira REST (v3) and Agile (1.0) APIs

pub mod agile;
pub mod comments;
pub mod filters;
pub mod issues;
pub mod metadata;
pub mod projects;
pub mod search;
pub mod users;
pub mod worklogs;

use crate::auth::TenantCredentials;
use crate::error::{JiraError, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// One authenticated Jira tenant.
///
/// Cheap to construct per request; the underlying reqwest client is shared
/// and pools connections across tenants.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    rest_base: String,
    agile_base: String,
    auth_header: String,
}

impl JiraClient {
    pub fn new(http: reqwest::Client, creds: &TenantCredentials) -> Result<Self> {
        Ok(Self {
            http,
            rest_base: creds.rest_base(),
            agile_base: creds.agile_base(),
            auth_header: creds.auth_header()?,
        })
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}{}", self.rest_base, path)
    }

    fn agile_url(&self, path: &str) -> String {
        format!("{}{}", self.agile_base, path)
    }

    pub(crate) async fn get(&self, url: String, query: &[(&str, String)]) -> Result<Value> {
        self.send(self.http.get(&url).query(query), &url).await
    }

    pub(crate) async fn post(&self, url: String, body: Value) -> Result<Value> {
        self.send(self.http.post(&url).json(&body), &url).await
    }

    pub(crate) async fn put(&self, url: String, body: Value) -> Result<Value> {
        self.send(self.http.put(&url).json(&body), &url).await
    }

    pub(crate) async fn delete(&self, url: String, query: &[(&str, String)]) -> Result<Value> {
        self.send(self.http.delete(&url).query(query), &url).await
    }

    /// Fire one request and map the response: 2xx -> JSON value (204 -> Null),
    /// non-2xx -> classified error.
    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> Result<Value> {
        let response = request
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!(%status, url, "Jira response");

        if status.as_u16() == 204 {
            return Ok(Value::Null);
        }

        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());

        let text = response.text().await?;
        let body: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if status.is_success() {
            Ok(body)
        } else {
            Err(JiraError::from_status(status.as_u16(), &body, retry_after))
        }
    }
}

/// Offset/limit pass-through for paginated endpoints
pub(crate) fn page_query(start_at: Option<u64>, max_results: u32) -> Vec<(&'static str, String)> {
    vec![
        ("startAt", start_at.unwrap_or(0).to_string()),
        ("maxResults", max_results.to_string()),
    ]
}

/// Uniform pagination envelope produced for every list result.
///
/// `hasMore` is true iff `startAt + items.len() < total`; Agile endpoints
/// that report `isLast` instead of `total` use `hasMore = !isLast`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<Value>,
    pub count: usize,
    pub total: u64,
    pub start_at: u64,
    pub max_results: u32,
    pub has_more: bool,
}

impl Page {
    /// Normalize a vendor `{startAt, maxResults, total, <items_key>}` envelope
    pub fn from_envelope(envelope: &Value, items_key: &str) -> Self {
        let items: Vec<Value> = envelope
            .get(items_key)
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        let start_at = envelope.get("startAt").and_then(|v| v.as_u64()).unwrap_or(0);
        let max_results = envelope
            .get("maxResults")
            .and_then(|v| v.as_u64())
            .unwrap_or(items.len() as u64) as u32;

        let consumed = start_at + items.len() as u64;
        let (total, has_more) = match envelope.get("total").and_then(|v| v.as_u64()) {
            Some(total) => (total, consumed < total),
            None => match envelope.get("isLast").and_then(|v| v.as_bool()) {
                Some(is_last) => (consumed, !is_last),
                None => (consumed, false),
            },
        };

        Self {
            count: items.len(),
            items,
            total,
            start_at,
            max_results,
            has_more,
        }
    }

    /// Wrap a bare JSON array (endpoints with no envelope at all)
    pub fn from_array(value: &Value) -> Self {
        let items: Vec<Value> = value.as_array().cloned().unwrap_or_default();
        Self {
            count: items.len(),
            total: items.len() as u64,
            max_results: items.len() as u32,
            items,
            start_at: 0,
            has_more: false,
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_has_more_true() {
        let envelope = json!({
            "startAt": 0,
            "maxResults": 50,
            "total": 120,
            "issues": (0..50).map(|i| json!({"id": i})).collect::<Vec<_>>(),
        });
        let page = Page::from_envelope(&envelope, "issues");
        assert_eq!(page.count, 50);
        assert_eq!(page.total, 120);
        assert_eq!(page.start_at, 0);
        assert_eq!(page.max_results, 50);
        assert!(page.has_more);
    }

    #[test]
    fn test_page_has_more_false_at_end() {
        let envelope = json!({
            "startAt": 100,
            "maxResults": 50,
            "total": 120,
            "issues": (0..20).map(|i| json!({"id": i})).collect::<Vec<_>>(),
        });
        let page = Page::from_envelope(&envelope, "issues");
        assert_eq!(page.count, 20);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_is_last_envelope() {
        let envelope = json!({
            "startAt": 0,
            "maxResults": 50,
            "isLast": false,
            "values": [json!({"id": 1})],
        });
        let page = Page::from_envelope(&envelope, "values");
        assert!(page.has_more);
        assert_eq!(page.total, 1);

        let last = json!({
            "startAt": 0,
            "maxResults": 50,
            "isLast": true,
            "values": [json!({"id": 1})],
        });
        assert!(!Page::from_envelope(&last, "values").has_more);
    }

    #[test]
    fn test_page_missing_items_key() {
        let envelope = json!({"startAt": 0, "maxResults": 50, "total": 0});
        let page = Page::from_envelope(&envelope, "values");
        assert_eq!(page.count, 0);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_from_array() {
        let page = Page::from_array(&json!([{"id": 1}, {"id": 2}]));
        assert_eq!(page.count, 2);
        assert_eq!(page.total, 2);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::from_array(&json!([]));
        let value = page.to_value();
        assert!(value.get("hasMore").is_some());
        assert!(value.get("startAt").is_some());
        assert!(value.get("maxResults").is_some());
    }
}
