use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Asteroid {
    pub id: String,
    pub name: String,
    pub miss_distance_km: Option<f64>,
    pub hazardous: bool,
    pub nasa_jpl_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct KpReading {
    pub time_tag: String,
    pub kp_index: f64,
}

impl KpReading {
    /// Kp 5 and above is a geomagnetic storm.
    pub fn is_storm(&self) -> bool {
        self.kp_index >= 5.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct XrayFlux {
    pub time_tag: String,
    pub flux: f64,
    pub energy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AuroraPower {
    pub power_north_gw: f64,
    pub power_south_gw: f64,
    pub forecast_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AstroEvent {
    pub date: String,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct MeteorShower {
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub date: &'static str,
    #[schema(value_type = String)]
    pub peak: &'static str,
}

pub const METEOR_SHOWERS: &[MeteorShower] = &[MeteorShower {
    name: "Eta Aquariids",
    date: "May 5-6",
    peak: "2024-05-06",
}];

/// Snapshot of every space-weather feed. Each feed that failed is empty or
/// `None`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpaceWeather {
    pub fetched_at: DateTime<Utc>,
    pub asteroids: Vec<Asteroid>,
    pub kp_index: Vec<KpReading>,
    pub solar_flares: Vec<XrayFlux>,
    pub aurora: Option<AuroraPower>,
    pub meteor_showers: Vec<MeteorShower>,
    pub astro_events: Vec<AstroEvent>,
    pub tracked_debris: Option<usize>,
}
