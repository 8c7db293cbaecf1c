use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::ical::parse_events;
use super::types::{
    Asteroid, AuroraPower, KpReading, SpaceWeather, XrayFlux, METEOR_SHOWERS,
};
use crate::config::{FeedsConfig, WeatherConfig};
use crate::fetch::{FetchOptions, HttpTransport};

const KP_READINGS_KEPT: usize = 8;
const FLUX_READINGS_KEPT: usize = 12;

/// Space-weather feeds. Each feed gets a single attempt; failures become
/// empty values.
pub struct SpaceWeatherClient {
    transport: Arc<dyn HttpTransport>,
    config: WeatherConfig,
    feeds: FeedsConfig,
}

impl SpaceWeatherClient {
    pub fn new(transport: Arc<dyn HttpTransport>, config: WeatherConfig, feeds: FeedsConfig) -> Self {
        Self {
            transport,
            config,
            feeds,
        }
    }

    pub async fn fetch(&self) -> SpaceWeather {
        self.fetch_for(Utc::now().date_naive()).await
    }

    pub async fn fetch_for(&self, today: NaiveDate) -> SpaceWeather {
        let neo_url = self.neo_url(today);
        let debris_url = self.feeds.group_feed_url(&self.config.debris_group);

        let (neo, kp, xray, aurora, events, debris) = tokio::join!(
            self.get(&neo_url),
            self.get(&self.config.kp_index_url),
            self.get(&self.config.xray_url),
            self.get(&self.config.aurora_url),
            self.get(&self.config.events_url),
            self.get(&debris_url),
        );

        let kp_index = kp.map(|b| parse_kp_index(&b)).unwrap_or_default();
        if let Some(latest) = kp_index.last().filter(|r| r.is_storm()) {
            log::warn!("Geomagnetic storm in progress, Kp {}", latest.kp_index);
        }

        SpaceWeather {
            fetched_at: Utc::now(),
            asteroids: neo.map(|b| parse_asteroids(&b, today)).unwrap_or_default(),
            kp_index,
            solar_flares: xray.map(|b| parse_xray_flux(&b)).unwrap_or_default(),
            aurora: aurora.and_then(|b| parse_aurora(&b)),
            meteor_showers: METEOR_SHOWERS.to_vec(),
            astro_events: events.map(|b| parse_events(&b)).unwrap_or_default(),
            tracked_debris: debris.and_then(|b| count_entries(&b)),
        }
    }

    fn neo_url(&self, today: NaiveDate) -> String {
        let day = today.format("%Y-%m-%d");
        format!(
            "{}?start_date={}&end_date={}&api_key={}",
            self.config.neo_url, day, day, self.config.nasa_api_key
        )
    }

    async fn get(&self, url: &str) -> Option<String> {
        match self.transport.get(url, &FetchOptions::default()).await {
            Ok(response) if response.is_success() => Some(response.body),
            Ok(response) => {
                log::warn!("{} answered with status {}", url, response.status);
                None
            }
            Err(e) => {
                log::warn!("{} unavailable: {}", url, e);
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct NeoFeed {
    #[serde(default)]
    near_earth_objects: std::collections::HashMap<String, Vec<NeoObject>>,
}

#[derive(Debug, Deserialize)]
struct NeoObject {
    id: String,
    name: String,
    #[serde(default)]
    nasa_jpl_url: Option<String>,
    #[serde(default)]
    is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    close_approach_data: Vec<CloseApproach>,
}

#[derive(Debug, Deserialize)]
struct CloseApproach {
    miss_distance: MissDistance,
}

#[derive(Debug, Deserialize)]
struct MissDistance {
    kilometers: String,
}

fn parse_asteroids(body: &str, today: NaiveDate) -> Vec<Asteroid> {
    let Ok(mut feed) = serde_json::from_str::<NeoFeed>(body) else {
        return Vec::new();
    };
    let key = today.format("%Y-%m-%d").to_string();
    feed.near_earth_objects
        .remove(&key)
        .unwrap_or_default()
        .into_iter()
        .map(|neo| Asteroid {
            miss_distance_km: neo
                .close_approach_data
                .first()
                .and_then(|c| c.miss_distance.kilometers.parse().ok()),
            id: neo.id,
            name: neo.name,
            hazardous: neo.is_potentially_hazardous_asteroid,
            nasa_jpl_url: neo.nasa_jpl_url,
        })
        .collect()
}

fn json_array(body: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(entries)) => entries,
        _ => Vec::new(),
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn last_n<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    let skip = items.len().saturating_sub(n);
    items.drain(..skip);
    items
}

fn parse_kp_index(body: &str) -> Vec<KpReading> {
    let readings = json_array(body)
        .iter()
        .filter_map(|entry| {
            let time_tag = entry.get("time_tag")?.as_str()?.to_string();
            let kp_index = number(entry.get("kp_index").or_else(|| entry.get("Kp")))?;
            Some(KpReading { time_tag, kp_index })
        })
        .collect();
    last_n(readings, KP_READINGS_KEPT)
}

fn parse_xray_flux(body: &str) -> Vec<XrayFlux> {
    let readings = json_array(body)
        .iter()
        .filter_map(|entry| {
            Some(XrayFlux {
                time_tag: entry.get("time_tag")?.as_str()?.to_string(),
                flux: number(entry.get("flux"))?,
                energy: entry.get("energy").and_then(Value::as_str).map(String::from),
            })
        })
        .collect();
    last_n(readings, FLUX_READINGS_KEPT)
}

fn parse_aurora(body: &str) -> Option<AuroraPower> {
    let value: Value = serde_json::from_str(body).ok()?;
    Some(AuroraPower {
        power_north_gw: number(value.get("Power_N"))?,
        power_south_gw: number(value.get("Power_S"))?,
        forecast_time: value
            .get("Forecast Time")
            .and_then(Value::as_str)
            .map(String::from),
    })
}

fn count_entries(body: &str) -> Option<usize> {
    match serde_json::from_str::<Value>(body).ok()? {
        Value::Array(entries) => Some(entries.len()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::ScriptedTransport;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    #[test]
    fn asteroids_for_today_only() {
        let body = r#"{"near_earth_objects": {
            "2024-05-06": [{"id": "1", "name": "(2024 JA)", "nasa_jpl_url": "https://ssd.jpl.nasa.gov/1",
                            "is_potentially_hazardous_asteroid": true,
                            "close_approach_data": [{"miss_distance": {"kilometers": "1234567.8"}}]}],
            "2024-05-07": [{"id": "2", "name": "(2024 JB)"}]}}"#;
        let asteroids = parse_asteroids(body, day());
        assert_eq!(asteroids.len(), 1);
        assert_eq!(asteroids[0].miss_distance_km, Some(1234567.8));
        assert!(asteroids[0].hazardous);
    }

    #[test]
    fn kp_keeps_last_eight() {
        let entries: Vec<String> = (0..10)
            .map(|i| format!(r#"{{"time_tag": "2024-05-06T{:02}:00:00", "kp_index": {}}}"#, i, i))
            .collect();
        let body = format!("[{}]", entries.join(","));
        let readings = parse_kp_index(&body);
        assert_eq!(readings.len(), 8);
        assert_eq!(readings[0].kp_index, 2.0);
        assert!(readings.last().unwrap().is_storm());
    }

    #[test]
    fn xray_flux_accepts_numeric_strings() {
        let body = r#"[{"time_tag": "2024-05-06T00:00:00Z", "flux": "1.5e-6", "energy": "0.1-0.8nm"},
                       {"time_tag": "2024-05-06T00:01:00Z", "flux": 2.0e-6},
                       {"flux": 1.0}]"#;
        let flux = parse_xray_flux(body);
        assert_eq!(flux.len(), 2);
        assert_eq!(flux[0].flux, 1.5e-6);
        assert_eq!(flux[0].energy.as_deref(), Some("0.1-0.8nm"));
    }

    #[test]
    fn aurora_power() {
        let aurora =
            parse_aurora(r#"{"Forecast Time": "2024-05-06T10:00:00Z", "Power_N": 12.5, "Power_S": 7}"#)
                .unwrap();
        assert_eq!(aurora.power_north_gw, 12.5);
        assert_eq!(aurora.power_south_gw, 7.0);
        assert!(parse_aurora("[]").is_none());
    }

    #[tokio::test]
    async fn unreachable_feeds_default_to_empty() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = SpaceWeatherClient::new(
            transport.clone(),
            WeatherConfig::default(),
            FeedsConfig::default(),
        );

        let weather = client.fetch_for(day()).await;
        assert!(weather.asteroids.is_empty());
        assert!(weather.kp_index.is_empty());
        assert!(weather.solar_flares.is_empty());
        assert!(weather.aurora.is_none());
        assert!(weather.astro_events.is_empty());
        assert!(weather.tracked_debris.is_none());
        assert_eq!(weather.meteor_showers.len(), METEOR_SHOWERS.len());
        // one attempt per feed, no proxy
        assert_eq!(transport.requested().len(), 6);
    }

    #[tokio::test]
    async fn debris_count_from_group_feed() {
        let feeds = FeedsConfig::default();
        let transport = Arc::new(ScriptedTransport::new().respond(
            &feeds.group_feed_url("debris"),
            200,
            r#"[{"OBJECT_ID": "1"}, {"OBJECT_ID": "2"}, {"OBJECT_ID": "3"}]"#,
        ));
        let client = SpaceWeatherClient::new(transport, WeatherConfig::default(), feeds);
        let weather = client.fetch_for(day()).await;
        assert_eq!(weather.tracked_debris, Some(3));
    }
}
