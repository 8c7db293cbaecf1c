use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use super::error::GeolocationError;
use super::live::LiveTrackingClient;
use super::observer::{Observer, ObserverLocator};
use super::types::{PositionSource, ResolverState, ResolverStatus, TrackedPosition};
use crate::fleet::{OrbitSummary, SatelliteRecord};
use crate::propagate::propagate;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Ticket for one selection. Results are committed only while its
/// generation is still the current one.
#[derive(Debug, Clone)]
pub struct Selection {
    pub generation: u64,
    pub satellite: SatelliteRecord,
}

#[derive(Debug)]
struct Shared {
    generation: u64,
    status: ResolverStatus,
}

/// Resolves the position of the selected satellite through the live API,
/// then local TLE propagation, then a sentinel.
#[derive(Clone)]
pub struct PositionResolver {
    live: LiveTrackingClient,
    locator: Arc<dyn ObserverLocator>,
    geolocation_timeout: Duration,
    clock: Clock,
    shared: Arc<StdMutex<Shared>>,
}

impl PositionResolver {
    pub fn new(
        live: LiveTrackingClient,
        locator: Arc<dyn ObserverLocator>,
        geolocation_timeout: Duration,
    ) -> Self {
        Self {
            live,
            locator,
            geolocation_timeout,
            clock: Arc::new(Utc::now),
            shared: Arc::new(StdMutex::new(Shared {
                generation: 0,
                status: ResolverStatus {
                    state: ResolverState::Idle,
                    generation: 0,
                    selected: None,
                    position: None,
                    orbit: None,
                },
            })),
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn status(&self) -> ResolverStatus {
        self.lock().status.clone()
    }

    /// Start a new selection, superseding any resolution in flight.
    pub fn begin(&self, satellite: SatelliteRecord) -> Selection {
        let mut locked = self.lock();
        locked.generation += 1;
        locked.status = ResolverStatus {
            state: ResolverState::Resolving,
            generation: locked.generation,
            selected: Some(satellite.object_id.clone()),
            position: None,
            orbit: Some(OrbitSummary::from_record(&satellite, None)),
        };
        Selection {
            generation: locked.generation,
            satellite,
        }
    }

    /// Drop the selection and any tracked position.
    pub fn clear(&self) {
        let mut locked = self.lock();
        locked.generation += 1;
        locked.status = ResolverStatus {
            state: ResolverState::Idle,
            generation: locked.generation,
            selected: None,
            position: None,
            orbit: None,
        };
    }

    /// Store `position` if `selection` is still current. Returns whether it
    /// was stored.
    pub fn commit(&self, selection: &Selection, position: TrackedPosition) -> bool {
        let mut locked = self.lock();
        if locked.generation != selection.generation {
            log::debug!(
                "Discarding stale position for {} (generation {} != {})",
                selection.satellite.object_id,
                selection.generation,
                locked.generation
            );
            return false;
        }
        locked.status.state = ResolverState::Resolved;
        locked.status.orbit = Some(OrbitSummary::from_record(
            &selection.satellite,
            position.altitude_km,
        ));
        locked.status.position = Some(position);
        true
    }

    /// Select `satellite` and run one full resolution cycle. Returns the
    /// committed position, or `None` if a later selection superseded it.
    pub async fn select(&self, satellite: SatelliteRecord) -> Option<TrackedPosition> {
        let selection = self.begin(satellite);
        let position = self.resolve(&selection).await;
        self.commit(&selection, position.clone()).then_some(position)
    }

    /// Run the fallback chain for `selection` without touching state.
    pub async fn resolve(&self, selection: &Selection) -> TrackedPosition {
        let satellite = &selection.satellite;
        let observer = match self.observer().await {
            Ok(observer) => observer,
            Err(e) => {
                log::debug!("{}, using default observer", e);
                Observer::default()
            }
        };

        match self.live.position(&satellite.object_id, &observer).await {
            Ok(sample) => {
                return TrackedPosition {
                    object_id: satellite.object_id.clone(),
                    latitude_deg: sample.latitude_deg,
                    longitude_deg: sample.longitude_deg,
                    altitude_km: sample.altitude_km,
                    source: PositionSource::LiveApi,
                    resolved_at: (self.clock)(),
                };
            }
            Err(e) => log::warn!("Live position for {} unavailable: {}", satellite.name, e),
        }

        let now = (self.clock)();
        if let Some((line1, line2)) = satellite.tle() {
            match propagate(line1, line2, now) {
                Ok(fix) => {
                    return TrackedPosition {
                        object_id: satellite.object_id.clone(),
                        latitude_deg: fix.latitude_deg,
                        longitude_deg: fix.longitude_deg,
                        altitude_km: Some(fix.altitude_km),
                        source: PositionSource::TleComputed,
                        resolved_at: now,
                    };
                }
                Err(e) => log::warn!("TLE fallback for {} failed: {}", satellite.name, e),
            }
        }

        log::warn!("No position for {}, using placeholder", satellite.name);
        TrackedPosition::unknown(&satellite.object_id, now)
    }

    async fn observer(&self) -> Result<Observer, GeolocationError> {
        tokio::time::timeout(self.geolocation_timeout, self.locator.locate())
            .await
            .map_err(|_| GeolocationError::Timeout)?
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Shared> {
        // Guards are never held across an await; a poisoned lock still
        // holds a consistent status.
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LiveApiConfig, ProxyConfig};
    use crate::fetch::testing::ScriptedTransport;
    use crate::fetch::ResilientFetcher;
    use crate::fleet::{Category, OrbitType, FEATURED};
    use crate::propagate::OrbitalElements;
    use crate::resolver::StaticLocator;
    use async_trait::async_trait;

    const ISS_L1: &str = "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
    const ISS_L2: &str = "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";
    const LIVE_ISS: &str =
        r#"{"positions": [{"satlatitude": -12.75, "satlongitude": 101.5, "sataltitude": 418.2}]}"#;

    fn live_config() -> LiveApiConfig {
        LiveApiConfig {
            base_url: "https://live.test/satellite".to_string(),
            api_key: Some("KEY".to_string()),
        }
    }

    fn live_url(id: &str, lat: &str, lng: &str, alt: &str) -> String {
        format!("https://live.test/satellite/positions/{id}/{lat}/{lng}/{alt}/1?apiKey=KEY")
    }

    fn resolver_with(transport: Arc<ScriptedTransport>, observer: Option<Observer>) -> PositionResolver {
        let proxy = ProxyConfig {
            endpoint: "https://proxy.test/".to_string(),
            param: "url".to_string(),
        };
        let fetcher = ResilientFetcher::new(transport, &proxy).unwrap();
        let epoch = OrbitalElements::from_tle(None, ISS_L1, ISS_L2).unwrap().epoch();
        PositionResolver::new(
            LiveTrackingClient::new(fetcher, live_config()),
            Arc::new(StaticLocator::new(observer)),
            Duration::from_millis(200),
        )
        .with_clock(Arc::new(move || epoch))
    }

    fn iss(with_tle: bool) -> SatelliteRecord {
        let mut record = FEATURED[0].to_record();
        if with_tle {
            record.tle_line1 = Some(ISS_L1.to_string());
            record.tle_line2 = Some(ISS_L2.to_string());
        }
        record
    }

    #[tokio::test]
    async fn reachable_live_api_wins() {
        let transport =
            Arc::new(ScriptedTransport::new().respond(&live_url("25544", "0", "0", "0"), 200, LIVE_ISS));
        let resolver = resolver_with(transport, None);

        let position = resolver.select(iss(true)).await.unwrap();
        assert_eq!(position.source, PositionSource::LiveApi);
        assert_eq!(position.latitude_deg, -12.75);
        assert_eq!(position.altitude_km, Some(418.2));
        assert_eq!(resolver.status().state, ResolverState::Resolved);
    }

    #[tokio::test]
    async fn observer_location_is_passed_to_live_api() {
        let observer = Observer {
            latitude_deg: 52.5,
            longitude_deg: 4.25,
            altitude_m: 12.0,
        };
        let transport = Arc::new(ScriptedTransport::new().respond(
            &live_url("25544", "52.5", "4.25", "12"),
            200,
            LIVE_ISS,
        ));
        let resolver = resolver_with(transport.clone(), Some(observer));

        let position = resolver.select(iss(false)).await.unwrap();
        assert_eq!(position.source, PositionSource::LiveApi);
        assert_eq!(transport.requested().len(), 1);
    }

    #[tokio::test]
    async fn failing_live_api_falls_back_to_tle() {
        let resolver = resolver_with(Arc::new(ScriptedTransport::new()), None);

        let position = resolver.select(iss(true)).await.unwrap();
        assert_eq!(position.source, PositionSource::TleComputed);
        assert!(position.latitude_deg.abs() <= 90.0);
        assert!(position.longitude_deg.abs() <= 180.0);
        assert!(position.altitude_km.unwrap() > 0.0);
    }

    #[tokio::test]
    async fn empty_live_response_falls_back_to_tle() {
        let transport = Arc::new(ScriptedTransport::new().respond(
            &live_url("25544", "0", "0", "0"),
            200,
            r#"{"info": {"satid": 25544}}"#,
        ));
        let resolver = resolver_with(transport, None);

        let position = resolver.select(iss(true)).await.unwrap();
        assert_eq!(position.source, PositionSource::TleComputed);
    }

    #[tokio::test]
    async fn no_tle_and_failing_live_api_is_unknown() {
        let resolver = resolver_with(Arc::new(ScriptedTransport::new()), None);

        let position = resolver.select(iss(false)).await.unwrap();
        assert_eq!(position.source, PositionSource::Unknown);
        assert_eq!((position.latitude_deg, position.longitude_deg), (0.0, 0.0));
        assert_eq!(position.altitude_km, None);
    }

    #[tokio::test]
    async fn broken_tle_is_unknown() {
        let resolver = resolver_with(Arc::new(ScriptedTransport::new()), None);
        let mut record = SatelliteRecord::new("X", "BROKEN", Category::Starlink);
        record.tle_line1 = Some("1 nonsense".into());
        record.tle_line2 = Some("2 nonsense".into());

        let position = resolver.select(record).await.unwrap();
        assert_eq!(position.source, PositionSource::Unknown);
    }

    #[tokio::test]
    async fn stale_results_are_discarded() {
        let resolver = resolver_with(Arc::new(ScriptedTransport::new()), None);

        let first = resolver.begin(iss(true));
        let second = resolver.begin(SatelliteRecord::new("B", "OTHER", Category::Starlink));

        let stale = resolver.resolve(&first).await;
        assert!(!resolver.commit(&first, stale));
        assert_eq!(resolver.status().state, ResolverState::Resolving);
        assert!(resolver.status().position.is_none());

        let fresh = resolver.resolve(&second).await;
        assert!(resolver.commit(&second, fresh));
        let status = resolver.status();
        assert_eq!(status.selected.as_deref(), Some("B"));
        assert_eq!(status.position.unwrap().object_id, "B");
    }

    #[tokio::test]
    async fn clearing_returns_to_idle_and_rejects_in_flight_results() {
        let resolver = resolver_with(Arc::new(ScriptedTransport::new()), None);
        resolver.select(iss(true)).await.unwrap();

        let pending = resolver.begin(iss(true));
        resolver.clear();
        let position = resolver.resolve(&pending).await;
        assert!(!resolver.commit(&pending, position));

        let status = resolver.status();
        assert_eq!(status.state, ResolverState::Idle);
        assert!(status.selected.is_none());
        assert!(status.position.is_none());
    }

    #[tokio::test]
    async fn status_carries_orbit_summary_for_tracked_altitude() {
        let transport =
            Arc::new(ScriptedTransport::new().respond(&live_url("25544", "0", "0", "0"), 200, LIVE_ISS));
        let resolver = resolver_with(transport, None);

        let pending = resolver.begin(iss(false));
        let resolving = resolver.status().orbit.unwrap();
        assert!((resolving.period_min.unwrap() - 92.96).abs() < 0.01);
        assert_eq!(resolving.footprint_radius_km, None);

        let position = resolver.resolve(&pending).await;
        assert!(resolver.commit(&pending, position));
        let orbit = resolver.status().orbit.unwrap();
        let expected = 2.0 * (418.2_f64 * 6371.0).sqrt();
        assert!((orbit.footprint_radius_km.unwrap() - expected).abs() < 1e-9);
        assert_eq!(orbit.orbit_type, Some(OrbitType::Leo));

        resolver.clear();
        assert!(resolver.status().orbit.is_none());
    }

    #[tokio::test]
    async fn unknown_position_has_no_altitude_figures() {
        let resolver = resolver_with(Arc::new(ScriptedTransport::new()), None);
        resolver.select(iss(false)).await.unwrap();

        let orbit = resolver.status().orbit.unwrap();
        assert!(orbit.period_min.is_some());
        assert_eq!(orbit.estimated_velocity, None);
        assert_eq!(orbit.orbit_type, None);
    }

    struct SlowLocator;

    #[async_trait]
    impl ObserverLocator for SlowLocator {
        async fn locate(&self) -> Result<Observer, GeolocationError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Observer {
                latitude_deg: 10.0,
                longitude_deg: 10.0,
                altitude_m: 0.0,
            })
        }
    }

    #[tokio::test]
    async fn slow_geolocation_times_out_to_default_observer() {
        let transport =
            Arc::new(ScriptedTransport::new().respond(&live_url("25544", "0", "0", "0"), 200, LIVE_ISS));
        let proxy = ProxyConfig::default();
        let fetcher = ResilientFetcher::new(transport, &proxy).unwrap();
        let resolver = PositionResolver::new(
            LiveTrackingClient::new(fetcher, live_config()),
            Arc::new(SlowLocator),
            Duration::from_millis(20),
        );

        let position = resolver.select(iss(false)).await.unwrap();
        assert_eq!(position.source, PositionSource::LiveApi);
    }
}
