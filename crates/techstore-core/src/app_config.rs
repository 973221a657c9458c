use std::net::SocketAddr;

use reqwest::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Origin of the remote catalog API. Every loader builds its URLs from
    /// this single value.
    pub api_url: Url,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Outbound request timeout; `0` means no client-side timeout.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub prerender: bool,
    pub prerender_concurrency: usize,
}

impl AppConfig {
    /// Returns the configured outbound timeout, or `None` when disabled.
    #[must_use]
    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        (self.request_timeout_secs > 0)
            .then(|| std::time::Duration::from_secs(self.request_timeout_secs))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &redacted_origin(&self.api_url))
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("prerender", &self.prerender)
            .field("prerender_concurrency", &self.prerender_concurrency)
            .finish()
    }
}

/// Renders the API URL for logs with any embedded password replaced.
fn redacted_origin(url: &Url) -> String {
    if url.password().is_none() {
        return url.to_string();
    }
    let mut shown = url.clone();
    // set_password only fails for cannot-be-a-base URLs, which carry no password.
    let _ = shown.set_password(Some("redacted"));
    shown.to_string()
}
