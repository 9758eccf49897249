// src/config/mod.rs
// Environment-based configuration - single source of truth for all env vars

use tracing::{debug, warn};

/// Default cap on rendered tool output, in characters
pub const DEFAULT_RESPONSE_CHAR_LIMIT: usize = 25_000;

/// Default page size for list operations when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Hard ceiling on page size regardless of what the caller asks for
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// Default HTTP bind port
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime settings, loaded once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    /// Rendered output cap in characters (JIRA_MCP_RESPONSE_CHAR_LIMIT)
    pub response_char_limit: usize,
    /// Page size used when a tool call omits max_results (JIRA_MCP_DEFAULT_PAGE_SIZE)
    pub default_page_size: u32,
    /// Upper bound on any requested page size (JIRA_MCP_MAX_PAGE_SIZE)
    pub max_page_size: u32,
    /// HTTP bind host (JIRA_MCP_HOST)
    pub host: String,
    /// HTTP bind port (JIRA_MCP_PORT)
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            response_char_limit: DEFAULT_RESPONSE_CHAR_LIMIT,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Load settings from environment variables (call once at startup)
    pub fn from_env() -> Self {
        let settings = Self {
            response_char_limit: parse_env("JIRA_MCP_RESPONSE_CHAR_LIMIT")
                .unwrap_or(DEFAULT_RESPONSE_CHAR_LIMIT),
            default_page_size: parse_env("JIRA_MCP_DEFAULT_PAGE_SIZE").unwrap_or(DEFAULT_PAGE_SIZE),
            max_page_size: parse_env("JIRA_MCP_MAX_PAGE_SIZE").unwrap_or(DEFAULT_MAX_PAGE_SIZE),
            host: std::env::var("JIRA_MCP_HOST")
                .ok()
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_env("JIRA_MCP_PORT").unwrap_or(DEFAULT_PORT),
        };

        debug!(
            response_char_limit = settings.response_char_limit,
            default_page_size = settings.default_page_size,
            max_page_size = settings.max_page_size,
            "Settings loaded"
        );
        settings.validate()
    }

    /// Clamp nonsensical values back into a usable range
    fn validate(mut self) -> Self {
        if self.default_page_size == 0 {
            warn!("JIRA_MCP_DEFAULT_PAGE_SIZE was 0, using {}", DEFAULT_PAGE_SIZE);
            self.default_page_size = DEFAULT_PAGE_SIZE;
        }
        if self.max_page_size == 0 {
            warn!("JIRA_MCP_MAX_PAGE_SIZE was 0, using {}", DEFAULT_MAX_PAGE_SIZE);
            self.max_page_size = DEFAULT_MAX_PAGE_SIZE;
        }
        if self.default_page_size > self.max_page_size {
            self.default_page_size = self.max_page_size;
        }
        self
    }

    /// Resolve a caller-supplied page size against the configured bounds.
    ///
    /// Absent -> default; present -> clamped to [1, max_page_size].
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        match requested {
            None => self.default_page_size,
            Some(n) => n.clamp(1, self.max_page_size),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "Unparseable env value, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.response_char_limit, DEFAULT_RESPONSE_CHAR_LIMIT);
        assert_eq!(settings.default_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(settings.max_page_size, DEFAULT_MAX_PAGE_SIZE);
        assert_eq!(settings.port, DEFAULT_PORT);
    }

    #[test]
    fn test_page_size_absent_uses_default() {
        let settings = Settings::default();
        assert_eq!(settings.page_size(None), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_page_size_clamped_to_max() {
        let settings = Settings::default();
        assert_eq!(settings.page_size(Some(5000)), DEFAULT_MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_size_zero_clamped_to_one() {
        let settings = Settings::default();
        assert_eq!(settings.page_size(Some(0)), 1);
    }

    #[test]
    fn test_page_size_in_range_passes_through() {
        let settings = Settings::default();
        assert_eq!(settings.page_size(Some(50)), 50);
    }

    #[test]
    fn test_validate_rescues_zero_page_sizes() {
        let settings = Settings {
            default_page_size: 0,
            max_page_size: 0,
            ..Settings::default()
        }
        .validate();
        assert_eq!(settings.default_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(settings.max_page_size, DEFAULT_MAX_PAGE_SIZE);
    }

    #[test]
    fn test_validate_caps_default_at_max() {
        let settings = Settings {
            default_page_size: 200,
            max_page_size: 100,
            ..Settings::default()
        }
        .validate();
        assert_eq!(settings.default_page_size, 100);
    }
}
