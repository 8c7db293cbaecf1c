use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use super::error::GeolocationError;

/// Where the live tracking query is made from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Observer {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
}

impl Default for Observer {
    fn default() -> Self {
        Self {
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_m: 0.0,
        }
    }
}

impl Observer {
    /// Parse `"lat, lon"` in degrees.
    pub fn from_coordinates(coordinates: &str, altitude_m: Option<f64>) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() < 2 {
            return None;
        }
        let lat: f64 = parts[0].parse().ok()?;
        let lon: f64 = parts[1].parse().ok()?;
        if lat.abs() > 90.0 || lon.abs() > 180.0 {
            return None;
        }
        Some(Self {
            latitude_deg: lat,
            longitude_deg: lon,
            altitude_m: altitude_m.unwrap_or(0.0),
        })
    }
}

#[async_trait]
pub trait ObserverLocator: Send + Sync {
    async fn locate(&self) -> Result<Observer, GeolocationError>;
}

/// Locator backed by a configured station, if any.
pub struct StaticLocator {
    observer: Option<Observer>,
}

impl StaticLocator {
    pub fn new(observer: Option<Observer>) -> Self {
        Self { observer }
    }
}

#[async_trait]
impl ObserverLocator for StaticLocator {
    async fn locate(&self) -> Result<Observer, GeolocationError> {
        self.observer.ok_or(GeolocationError::Unavailable)
    }
}
