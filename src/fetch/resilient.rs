use reqwest::Url;
use std::sync::Arc;

use super::error::FetchError;
use super::transport::{FetchOptions, HttpResponse, HttpTransport};
use crate::config::ProxyConfig;

/// HTTP GET with a two-strike policy: the direct request, then at most one
/// retry through the configured proxy.
#[derive(Clone)]
pub struct ResilientFetcher {
    transport: Arc<dyn HttpTransport>,
    proxy: Url,
    proxy_param: String,
}

impl ResilientFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>, proxy: &ProxyConfig) -> Result<Self, FetchError> {
        let mut endpoint = Url::parse(&proxy.endpoint)
            .map_err(|e| FetchError::InvalidProxy(format!("{}: {}", proxy.endpoint, e)))?;
        if proxy.param.is_empty() {
            return Err(FetchError::InvalidProxy(format!(
                "{}: empty query parameter name",
                proxy.endpoint
            )));
        }

        // Endpoints written as "...?url=" carry an empty slot for the target.
        let kept: Vec<(String, String)> = endpoint
            .query_pairs()
            .filter(|(key, _)| key != proxy.param.as_str())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        endpoint.set_query(None);
        if !kept.is_empty() {
            endpoint.query_pairs_mut().extend_pairs(kept);
        }

        Ok(Self {
            transport,
            proxy: endpoint,
            proxy_param: proxy.param.clone(),
        })
    }

    pub fn is_proxied(&self, url: &str) -> bool {
        url.starts_with(self.proxy.as_str())
    }

    /// `url` wrapped as a proxy request, percent-encoded into the query.
    pub fn proxied_url(&self, url: &str) -> String {
        let mut proxied = self.proxy.clone();
        proxied
            .query_pairs_mut()
            .append_pair(&self.proxy_param, url);
        proxied.to_string()
    }

    pub async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<HttpResponse, FetchError> {
        let direct_failure = match self.attempt(url, options).await {
            Ok(response) => return Ok(response),
            Err(reason) => reason,
        };

        if self.is_proxied(url) {
            return Err(FetchError::Exhausted {
                url: url.to_string(),
                reason: direct_failure,
            });
        }

        log::debug!("Direct fetch of {} failed ({}), retrying via proxy", url, direct_failure);
        let proxied = self.proxied_url(url);
        self.attempt(&proxied, options)
            .await
            .map_err(|proxy_failure| {
                log::warn!("Fetch of {} exhausted: {}", url, proxy_failure);
                FetchError::Exhausted {
                    url: url.to_string(),
                    reason: format!("direct: {}; proxy: {}", direct_failure, proxy_failure),
                }
            })
    }

    async fn attempt(&self, url: &str, options: &FetchOptions) -> Result<HttpResponse, String> {
        match self.transport.get(url, options).await {
            Ok(response) if is_blocked(response.status) => {
                Err(format!("blocked with status {}", response.status))
            }
            Ok(response) if !response.is_success() => Err(format!("status {}", response.status)),
            Ok(response) => Ok(response),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Explicit rate-limit or block signals.
fn is_blocked(status: u16) -> bool {
    status == 403 || status == 429
}
