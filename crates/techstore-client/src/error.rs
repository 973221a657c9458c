use thiserror::Error;

/// Errors returned by the catalog API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered 404 for a single-resource lookup.
    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// `true` when the API positively reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}
