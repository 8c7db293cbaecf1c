use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

use crate::fleet::OrbitSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
pub enum PositionSource {
    #[serde(rename = "live-api")]
    #[strum(to_string = "live-api")]
    LiveApi,
    #[serde(rename = "tle-computed")]
    #[strum(to_string = "tle-computed")]
    TleComputed,
    #[serde(rename = "unknown")]
    #[strum(to_string = "unknown")]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrackedPosition {
    pub object_id: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: Option<f64>,
    pub source: PositionSource,
    pub resolved_at: DateTime<Utc>,
}

impl TrackedPosition {
    /// Placeholder when every strategy failed.
    pub fn unknown(object_id: &str, resolved_at: DateTime<Utc>) -> Self {
        Self {
            object_id: object_id.to_string(),
            latitude_deg: 0.0,
            longitude_deg: 0.0,
            altitude_km: None,
            source: PositionSource::Unknown,
            resolved_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResolverState {
    Idle,
    Resolving,
    Resolved,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResolverStatus {
    pub state: ResolverState,
    pub generation: u64,
    pub selected: Option<String>,
    pub position: Option<TrackedPosition>,
    /// Orbit figures for the selection, refreshed with the tracked altitude.
    pub orbit: Option<OrbitSummary>,
}
