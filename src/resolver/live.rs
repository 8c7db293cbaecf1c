use serde::Deserialize;
use serde_json::Value;

use super::error::LiveApiError;
use super::observer::Observer;
use crate::config::LiveApiConfig;
use crate::fetch::{FetchOptions, ResilientFetcher};

/// First usable sample of a live tracking response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveSample {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PositionsResponse {
    #[serde(default)]
    positions: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct PositionEntry {
    satlatitude: f64,
    satlongitude: f64,
    #[serde(default)]
    sataltitude: Option<f64>,
}

#[derive(Clone)]
pub struct LiveTrackingClient {
    fetcher: ResilientFetcher,
    config: LiveApiConfig,
}

impl LiveTrackingClient {
    pub fn new(fetcher: ResilientFetcher, config: LiveApiConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn positions_url(&self, object_id: &str, observer: &Observer) -> Option<String> {
        let key = self.config.api_key.as_deref()?;
        Some(format!(
            "{}/positions/{}/{}/{}/{}/1?apiKey={}",
            self.config.base_url.trim_end_matches('/'),
            object_id,
            observer.latitude_deg,
            observer.longitude_deg,
            observer.altitude_m,
            key
        ))
    }

    pub async fn position(
        &self,
        object_id: &str,
        observer: &Observer,
    ) -> Result<LiveSample, LiveApiError> {
        let url = self
            .positions_url(object_id, observer)
            .ok_or(LiveApiError::NotConfigured)?;
        let response = self.fetcher.fetch(&url, &FetchOptions::default()).await?;
        parse_positions(&response.body)
    }
}

/// Only the first element of `positions` is considered. A missing or empty
/// array is treated the same as a failed request.
fn parse_positions(body: &str) -> Result<LiveSample, LiveApiError> {
    let response: PositionsResponse =
        serde_json::from_str(body).map_err(|e| LiveApiError::Malformed(e.to_string()))?;
    let first = response
        .positions
        .and_then(|p| p.into_iter().next())
        .ok_or(LiveApiError::NoSamples)?;
    let entry: PositionEntry =
        serde_json::from_value(first).map_err(|e| LiveApiError::Malformed(e.to_string()))?;

    let usable = entry.satlatitude.is_finite()
        && entry.satlongitude.is_finite()
        && entry.satlatitude.abs() <= 90.0
        && entry.satlongitude.abs() <= 180.0;
    if !usable {
        return Err(LiveApiError::NoSamples);
    }

    Ok(LiveSample {
        latitude_deg: entry.satlatitude,
        longitude_deg: entry.satlongitude,
        altitude_km: entry.sataltitude,
    })
}
