mod error;
mod geodetic;
mod propagator;
mod tle;
mod types;

pub use propagator::{propagate, OrbitalElements};
pub use tle::parse_multi_tle;
pub use types::GeodeticFix;
