use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use super::error::PropagationError;
use super::geodetic::teme_to_geodetic;
use super::types::GeodeticFix;

/// Parsed orbital elements with their SGP4 constants.
pub struct OrbitalElements {
    elements: Elements,
    constants: Constants,
}

impl OrbitalElements {
    pub fn from_tle(
        name: Option<String>,
        line1: &str,
        line2: &str,
    ) -> Result<Self, PropagationError> {
        let elements = Elements::from_tle(name, line1.trim().as_bytes(), line2.trim().as_bytes())
            .map_err(|e| PropagationError::Parse(e.to_string()))?;
        let constants = Constants::from_elements(&elements)
            .map_err(|e| PropagationError::Parse(e.to_string()))?;
        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    pub fn object_name(&self) -> Option<&str> {
        self.elements.object_name.as_deref()
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.elements.datetime.and_utc()
    }

    /// Sub-satellite point at `at`.
    pub fn fix_at(&self, at: DateTime<Utc>) -> Result<GeodeticFix, PropagationError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| PropagationError::NoPosition(e.to_string()))?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| PropagationError::NoPosition(e.to_string()))?;

        let sidereal =
            sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()));

        let geo = teme_to_geodetic(prediction.position, sidereal);
        GeodeticFix::validated(geo.latitude_deg(), geo.longitude_deg(), geo.height_km())
    }
}

/// Propagate a raw TLE pair to a validated geodetic fix at `at`.
pub fn propagate(
    line1: &str,
    line2: &str,
    at: DateTime<Utc>,
) -> Result<GeodeticFix, PropagationError> {
    OrbitalElements::from_tle(None, line1, line2)?.fix_at(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const ISS_L1: &str = "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
    const ISS_L2: &str = "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

    fn epoch() -> DateTime<Utc> {
        OrbitalElements::from_tle(None, ISS_L1, ISS_L2)
            .unwrap()
            .epoch()
    }

    #[test]
    fn iss_fix_is_in_range_and_low_earth_orbit() {
        let at = epoch() + Duration::minutes(42);
        let fix = propagate(ISS_L1, ISS_L2, at).unwrap();
        assert!(fix.latitude_deg.abs() <= 51.7);
        assert!(fix.longitude_deg.abs() <= 180.0);
        assert!(fix.altitude_km > 350.0 && fix.altitude_km < 460.0);
    }

    #[test]
    fn fixes_move_along_the_orbit() {
        let at = epoch();
        let a = propagate(ISS_L1, ISS_L2, at).unwrap();
        let b = propagate(ISS_L1, ISS_L2, at + Duration::minutes(10)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn elements_expose_catalog_number() {
        let elements = OrbitalElements::from_tle(Some("ISS".into()), ISS_L1, ISS_L2).unwrap();
        assert_eq!(elements.norad_id(), 25544);
        assert_eq!(elements.object_name(), Some("ISS"));
    }

    #[test]
    fn garbage_lines_are_parse_errors() {
        let err = propagate("1 garbage", "2 garbage", Utc::now()).unwrap_err();
        assert!(matches!(err, PropagationError::Parse(_)));
    }

    #[test]
    fn swapped_lines_are_parse_errors() {
        let err = propagate(ISS_L2, ISS_L1, Utc::now()).unwrap_err();
        assert!(matches!(err, PropagationError::Parse(_)));
    }
}
