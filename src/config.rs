use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::resolver::Observer;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub station: StationConfig,
    pub feeds: FeedsConfig,
    pub proxy: ProxyConfig,
    pub live_api: LiveApiConfig,
    pub weather: WeatherConfig,
    pub http: HttpConfig,
    pub resolver: ResolverConfig,
    pub web: WebConfig,
}

/// Observer location used for live tracking queries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub coordinates: Option<String>,
    pub altitude_m: f64,
}

impl StationConfig {
    pub fn observer(&self) -> Option<Observer> {
        self.coordinates
            .as_deref()
            .and_then(|c| Observer::from_coordinates(c, Some(self.altitude_m)))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    /// CelesTrak GP endpoint, queried as `?GROUP=<group>&FORMAT=json`.
    pub group_url: String,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            group_url: "https://celestrak.org/NORAD/elements/gp.php".to_string(),
        }
    }
}

impl FeedsConfig {
    pub fn group_feed_url(&self, group: &str) -> String {
        format!("{}?GROUP={}&FORMAT=json", self.group_url, group)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub endpoint: String,
    pub param: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.cors.lol/".to_string(),
            param: "url".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LiveApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for LiveApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.n2yo.com/rest/v1/satellite".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub nasa_api_key: String,
    pub neo_url: String,
    pub kp_index_url: String,
    pub xray_url: String,
    pub aurora_url: String,
    pub events_url: String,
    pub debris_group: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            nasa_api_key: "DEMO_KEY".to_string(),
            neo_url: "https://api.nasa.gov/neo/rest/v1/feed".to_string(),
            kp_index_url: "https://services.swpc.noaa.gov/json/planetary_k_index_3_day.json"
                .to_string(),
            xray_url: "https://services.swpc.noaa.gov/json/goes/primary/xrays-6-hour.json"
                .to_string(),
            aurora_url: "https://services.swpc.noaa.gov/json/ovation_aurora_latest.json"
                .to_string(),
            events_url: "https://in-the-sky.org/newscal.php?maxdiff=31&feed=ical".to_string(),
            debris_group: "debris".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(with = "humantime_serde_compat")]
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("spaceshield/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    #[serde(with = "humantime_serde_compat")]
    pub geolocation_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            geolocation_timeout: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

/// Durations written the humantime way ("30s", "1500ms").
mod humantime_serde_compat {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8080");
        assert_eq!(config.resolver.geolocation_timeout, Duration::from_secs(1));
        assert!(config.live_api.api_key.is_none());
        assert!(config.station.observer().is_none());
    }

    #[test]
    fn parses_sections_and_durations() {
        let yaml = r#"
station:
  coordinates: "52.2, 4.4"
  altitude_m: 12
proxy:
  endpoint: "https://proxy.example/fetch"
  param: target
live_api:
  api_key: ABC
http:
  timeout: 5s
resolver:
  geolocation_timeout: 250ms
"#;
        let config = Config::from_str(yaml).unwrap();
        let observer = config.station.observer().unwrap();
        assert_eq!(observer.latitude_deg, 52.2);
        assert_eq!(observer.longitude_deg, 4.4);
        assert_eq!(observer.altitude_m, 12.0);
        assert_eq!(config.proxy.param, "target");
        assert_eq!(config.live_api.api_key.as_deref(), Some("ABC"));
        assert_eq!(config.http.timeout, Duration::from_secs(5));
        assert_eq!(
            config.resolver.geolocation_timeout,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn group_feed_url_carries_group_and_format() {
        let feeds = FeedsConfig::default();
        assert_eq!(
            feeds.group_feed_url("starlink"),
            "https://celestrak.org/NORAD/elements/gp.php?GROUP=starlink&FORMAT=json"
        );
    }
}
