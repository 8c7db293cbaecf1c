use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("observer location unavailable")]
    Unavailable,
    #[error("observer location timed out")]
    Timeout,
}

#[derive(Debug, Error)]
pub enum LiveApiError {
    #[error("live tracking API key not configured")]
    NotConfigured,
    #[error("live tracking request failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("malformed live tracking response: {0}")]
    Malformed(String),
    #[error("live tracking response has no usable position")]
    NoSamples,
}
