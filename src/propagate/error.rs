use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropagationError {
    #[error("invalid TLE: {0}")]
    Parse(String),
    #[error("no position: {0}")]
    NoPosition(String),
    #[error("position out of range: lat {latitude_deg}, lon {longitude_deg}, alt {altitude_km} km")]
    OutOfRange {
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_km: f64,
    },
}
