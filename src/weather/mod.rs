mod feeds;
mod ical;
mod types;

pub use feeds::SpaceWeatherClient;
pub use types::SpaceWeather;
