use std::time::Duration;

use thiserror::Error;

/// Base URLs of the token and listing hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub auth_base: String,
    pub api_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth_base: "https://www.reddit.com".to_string(),
            api_base: "https://oauth.reddit.com".to_string(),
        }
    }
}

impl Endpoints {
    /// Point both hosts at one base URL, e.g. a local mock server.
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            auth_base: base.clone(),
            api_base: base,
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}/api/v1/access_token", self.auth_base.trim_end_matches('/'))
    }

    /// Listing URL built by plain substitution; the cursor is not escaped.
    pub fn listing_url(&self, collection: &str, cursor: &str, limit: u32) -> String {
        format!(
            "{}/r/{}/new?after={}&limit={}",
            self.api_base.trim_end_matches('/'),
            collection,
            cursor,
            limit
        )
    }
}

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("listing-harvester/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(String),
}
