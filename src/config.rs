//! Service endpoint configuration.
//!
//! The base URL comes from (in priority order) an explicit CLI flag, the
//! `DEBATE_API_URL` environment variable, or the local development default.
//! Deployments whose host matches a local marker are treated as unrestricted:
//! no API key is required and none is sent.

use std::env;

/// Environment variable that overrides the service base URL.
pub const API_URL_ENV: &str = "DEBATE_API_URL";

/// Default base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Host substrings that mark a local/unrestricted deployment.
const LOCAL_HOST_MARKERS: &[&str] = &["localhost", "127.0.0.1"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Resolve the base URL: explicit flag wins, then the environment
    /// variable, then the local default.
    pub fn resolve(flag: Option<&str>) -> Self {
        match flag {
            Some(url) => Self::new(url),
            None => match env::var(API_URL_ENV) {
                Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
                _ => Self::new(DEFAULT_API_URL),
            },
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether this deployment skips API-key auth entirely. The check is a
    /// substring match on the base URL host, mirroring how the service itself
    /// distinguishes local from deployed environments.
    pub fn is_unrestricted(&self) -> bool {
        LOCAL_HOST_MARKERS.iter().any(|marker| self.base_url.contains(marker))
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    pub fn conversation_url(&self, id: &str) -> String {
        format!("{}/conversations/{}", self.base_url, id)
    }

    pub fn conversations_url(&self, limit: usize, offset: usize) -> String {
        format!("{}/conversations?limit={}&offset={}", self.base_url, limit, offset)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}
