use serde::Serialize;
use utoipa::ToSchema;

use super::error::PropagationError;

/// A validated sub-satellite point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GeodeticFix {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

impl GeodeticFix {
    /// Accepts only finite coordinates inside [-90, 90] x [-180, 180] and a
    /// finite, non-negative altitude.
    pub fn validated(
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_km: f64,
    ) -> Result<Self, PropagationError> {
        let in_range = latitude_deg.is_finite()
            && longitude_deg.is_finite()
            && latitude_deg.abs() <= 90.0
            && longitude_deg.abs() <= 180.0
            && altitude_km.is_finite()
            && altitude_km >= 0.0;
        if !in_range {
            return Err(PropagationError::OutOfRange {
                latitude_deg,
                longitude_deg,
                altitude_km,
            });
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
            altitude_km,
        })
    }
}
