use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

use super::types::SatelliteRecord;

const MINUTES_PER_DAY: f64 = 1440.0;
const EARTH_MU_KM3_S2: f64 = 398600.4418;
const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
pub enum OrbitType {
    Polar,
    Geostationary,
    #[serde(rename = "LEO")]
    #[strum(to_string = "LEO")]
    Leo,
}

/// Figures derived from a record's elements and its current altitude.
/// A field is `None` whenever one of its inputs is missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, ToSchema)]
pub struct OrbitSummary {
    pub period_min: Option<f64>,
    /// Circular-orbit speed scaled by 3.6, as shown on the details panel.
    pub estimated_velocity: Option<f64>,
    pub footprint_radius_km: Option<f64>,
    pub orbit_type: Option<OrbitType>,
}

impl OrbitSummary {
    pub fn from_record(record: &SatelliteRecord, altitude_km: Option<f64>) -> Self {
        let mean_motion = parse_element(record.mean_motion.as_deref()).filter(|m| *m > 0.0);
        let inclination = parse_element(record.inclination.as_deref());
        // A zero altitude reads as "no altitude".
        let altitude = altitude_km.filter(|a| a.is_finite() && *a > 0.0);

        Self {
            period_min: mean_motion.map(|m| MINUTES_PER_DAY / m),
            estimated_velocity: altitude
                .map(|a| (EARTH_MU_KM3_S2 / (a + EARTH_RADIUS_KM)).sqrt() * 3.6),
            footprint_radius_km: altitude.map(|a| 2.0 * (a * EARTH_RADIUS_KM).sqrt()),
            orbit_type: inclination.zip(altitude).map(|(i, a)| classify(i, a)),
        }
    }
}

fn classify(inclination_deg: f64, altitude_km: f64) -> OrbitType {
    if inclination_deg > 60.0 {
        OrbitType::Polar
    } else if altitude_km > 20000.0 {
        OrbitType::Geostationary
    } else {
        OrbitType::Leo
    }
}

fn parse_element(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
