mod catalog;
mod feed;
mod loader;
mod orbit;
pub mod query;
mod types;

#[cfg(test)]
pub use catalog::{featured_records, FEATURED};
pub use catalog::CATEGORIES;
pub use loader::FleetLoader;
pub use orbit::{OrbitSummary, OrbitType};
pub use types::{Category, Fleet, SatelliteRecord};
