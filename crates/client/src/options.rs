// ABOUTME: Configuration for the LinkedIn client: Options, environment overlay, and ClientBuilder.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances with custom settings.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::Client;
use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "https://www.linkedin.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Browser-like headers sent with every guest request.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("Upgrade-Insecure-Requests", "1"),
];

pub const ENV_BASE_URL: &str = "LINKEDIN_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "LINKEDIN_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "LINKEDIN_USER_AGENT";

/// Configuration options for the LinkedIn client.
#[derive(Debug, Clone)]
pub struct Options {
    /// Origin every endpoint path is resolved against.
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_client: None,
            headers: DEFAULT_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Options {
    /// Defaults overlaid with `LINKEDIN_BASE_URL`, `LINKEDIN_TIMEOUT_SECS`
    /// and `LINKEDIN_USER_AGENT` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for the known keys.
    /// Empty values are ignored; an unparsable timeout keeps the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut opts = Self::default();

        if let Some(base) = get(ENV_BASE_URL) {
            opts.base_url = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => opts.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }
        if let Some(agent) = get(ENV_USER_AGENT) {
            opts.user_agent = agent;
        }
        opts
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Start from existing options, e.g. [`Options::from_env`].
    pub fn with_options(opts: Options) -> Self {
        Self { opts }
    }

    /// Set the origin endpoints are resolved against.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.opts.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, ClientError> {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
