use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// Direct request failed and the proxy could not be used or failed too.
    #[error("fetch exhausted for {url}: {reason}")]
    Exhausted { url: String, reason: String },
    #[error("invalid proxy endpoint: {0}")]
    InvalidProxy(String),
}
