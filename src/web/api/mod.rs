pub mod error;
pub mod fleet;
pub mod tracking;
pub mod weather;
