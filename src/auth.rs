// src/auth.rs
// Per-request tenant credential resolution

use crate::error::{JiraError, Result};
use axum::http::HeaderMap;
use base64::Engine;

/// Tenant header carrying the Jira site domain (bare subdomain or full host)
pub const HEADER_DOMAIN: &str = "x-jira-domain";
/// Tenant header carrying the account email for Basic auth
pub const HEADER_EMAIL: &str = "x-jira-email";
/// Tenant header carrying the API token for Basic auth
pub const HEADER_API_TOKEN: &str = "x-jira-api-token";
/// Tenant header carrying an OAuth access token for Bearer auth
pub const HEADER_OAUTH_TOKEN: &str = "x-jira-oauth-token";

/// All tenant headers, for error messages and the request guard
pub const TENANT_HEADERS: [&str; 4] =
    [HEADER_DOMAIN, HEADER_EMAIL, HEADER_API_TOKEN, HEADER_OAUTH_TOKEN];

/// Credentials for one tenant, carried per request.
///
/// A tenant is identified by its Jira site domain plus either an OAuth
/// access token (preferred) or an email + API token pair.
#[derive(Debug, Clone)]
pub struct TenantCredentials {
    pub domain: String,
    pub email: Option<String>,
    pub api_token: Option<String>,
    pub oauth_token: Option<String>,
}

impl TenantCredentials {
    /// Read tenant credentials from HTTP request headers.
    ///
    /// Returns Ok(None) when no tenant header is present at all, so the
    /// caller can fall back to environment credentials.
    pub fn from_headers(headers: &HeaderMap) -> Result<Option<Self>> {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let domain = get(HEADER_DOMAIN);
        let email = get(HEADER_EMAIL);
        let api_token = get(HEADER_API_TOKEN);
        let oauth_token = get(HEADER_OAUTH_TOKEN);

        if domain.is_none() && email.is_none() && api_token.is_none() && oauth_token.is_none() {
            return Ok(None);
        }

        let domain = domain.ok_or(JiraError::MissingCredentials)?;
        let creds = Self {
            domain,
            email,
            api_token,
            oauth_token,
        };
        creds.check()?;
        Ok(Some(creds))
    }

    /// Read tenant credentials from environment variables (stdio mode,
    /// or HTTP fallback when no tenant headers are supplied).
    pub fn from_env() -> Option<Self> {
        let get = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let domain = get("JIRA_DOMAIN")?;
        let creds = Self {
            domain,
            email: get("JIRA_EMAIL"),
            api_token: get("JIRA_API_TOKEN"),
            oauth_token: get("JIRA_OAUTH_TOKEN"),
        };
        creds.check().ok()?;
        Some(creds)
    }

    /// Verify at least one complete auth scheme is present
    fn check(&self) -> Result<()> {
        if self.oauth_token.is_some() || (self.email.is_some() && self.api_token.is_some()) {
            Ok(())
        } else {
            Err(JiraError::MissingCredentials)
        }
    }

    /// Build the Authorization header value.
    ///
    /// OAuth takes precedence over Basic when both are configured.
    pub fn auth_header(&self) -> Result<String> {
        if let Some(token) = &self.oauth_token {
            return Ok(format!("Bearer {}", token));
        }
        if let (Some(email), Some(token)) = (&self.email, &self.api_token) {
            let encoded =
                base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", email, token));
            return Ok(format!("Basic {}", encoded));
        }
        Err(JiraError::MissingCredentials)
    }

    /// Fully-qualified site host. A bare subdomain gets the Atlassian
    /// cloud suffix appended; anything with a dot passes through.
    pub fn site_host(&self) -> String {
        if self.domain.contains('.') {
            self.domain.clone()
        } else {
            format!("{}.atlassian.net", self.domain)
        }
    }

    /// Site base URL. Domains carrying an explicit scheme pass through
    /// verbatim (local proxies, test fixtures); everything else is https.
    fn site_base(&self) -> String {
        if self.domain.starts_with("http://") || self.domain.starts_with("https://") {
            self.domain.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", self.site_host())
        }
    }

    /// Base URL for the core REST API (v3)
    pub fn rest_base(&self) -> String {
        format!("{}/rest/api/3", self.site_base())
    }

    /// Base URL for the Agile API (boards, sprints, epics)
    pub fn agile_base(&self) -> String {
        format!("{}/rest/agile/1.0", self.site_base())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn creds(
        email: Option<&str>,
        api_token: Option<&str>,
        oauth_token: Option<&str>,
    ) -> TenantCredentials {
        TenantCredentials {
            domain: "acme".into(),
            email: email.map(String::from),
            api_token: api_token.map(String::from),
            oauth_token: oauth_token.map(String::from),
        }
    }

    #[test]
    fn test_bearer_only() {
        let c = creds(None, None, Some("tok-123"));
        assert_eq!(c.auth_header().unwrap(), "Bearer tok-123");
    }

    #[test]
    fn test_basic_only() {
        let c = creds(Some("user@example.com"), Some("secret"), None);
        let expected = base64::engine::general_purpose::STANDARD.encode("user@example.com:secret");
        assert_eq!(c.auth_header().unwrap(), format!("Basic {}", expected));
    }

    #[test]
    fn test_oauth_takes_precedence() {
        let c = creds(Some("user@example.com"), Some("secret"), Some("tok-123"));
        assert_eq!(c.auth_header().unwrap(), "Bearer tok-123");
    }

    #[test]
    fn test_neither_scheme_fails() {
        let c = creds(None, None, None);
        assert!(matches!(c.auth_header(), Err(JiraError::MissingCredentials)));
        assert!(c.check().is_err());
    }

    #[test]
    fn test_email_without_token_fails() {
        let c = creds(Some("user@example.com"), None, None);
        assert!(c.check().is_err());
    }

    #[test]
    fn test_site_host_bare_subdomain() {
        let c = creds(None, None, Some("t"));
        assert_eq!(c.site_host(), "acme.atlassian.net");
        assert_eq!(c.rest_base(), "https://acme.atlassian.net/rest/api/3");
        assert_eq!(c.agile_base(), "https://acme.atlassian.net/rest/agile/1.0");
    }

    #[test]
    fn test_site_host_full_domain_passes_through() {
        let mut c = creds(None, None, Some("t"));
        c.domain = "jira.example.org".into();
        assert_eq!(c.site_host(), "jira.example.org");
    }

    #[test]
    fn test_explicit_scheme_passes_through() {
        let mut c = creds(None, None, Some("t"));
        c.domain = "http://127.0.0.1:9999".into();
        assert_eq!(c.rest_base(), "http://127.0.0.1:9999/rest/api/3");
        assert_eq!(c.agile_base(), "http://127.0.0.1:9999/rest/agile/1.0");
    }

    #[test]
    fn test_from_headers_absent_is_none() {
        let headers = HeaderMap::new();
        assert!(TenantCredentials::from_headers(&headers).unwrap().is_none());
    }

    #[test]
    fn test_from_headers_complete_basic() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_DOMAIN, HeaderValue::from_static("acme"));
        headers.insert(HEADER_EMAIL, HeaderValue::from_static("user@example.com"));
        headers.insert(HEADER_API_TOKEN, HeaderValue::from_static("secret"));

        let creds = TenantCredentials::from_headers(&headers).unwrap().unwrap();
        assert_eq!(creds.domain, "acme");
        assert!(creds.auth_header().unwrap().starts_with("Basic "));
    }

    #[test]
    fn test_from_headers_partial_is_error() {
        // A domain with no auth scheme is a configuration error, not "no tenant"
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_DOMAIN, HeaderValue::from_static("acme"));
        assert!(TenantCredentials::from_headers(&headers).is_err());
    }

    #[test]
    fn test_from_headers_empty_values_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_DOMAIN, HeaderValue::from_static("  "));
        assert!(TenantCredentials::from_headers(&headers).unwrap().is_none());
    }
}
