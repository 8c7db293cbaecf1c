use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::fleet::{FleetResponse, SatelliteDetail};
use super::api::tracking::SelectRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::fleet::list_fleet,
        super::api::fleet::fleet_stats,
        super::api::fleet::fleet_markers,
        super::api::fleet::get_satellite,
        super::api::tracking::select,
        super::api::tracking::clear,
        super::api::tracking::status,
        super::api::weather::space_weather,
    ),
    components(
        schemas(
            FleetResponse,
            SatelliteDetail,
            SelectRequest,
            ErrorResponse,
            crate::fleet::SatelliteRecord,
            crate::fleet::Category,
            crate::fleet::OrbitSummary,
            crate::fleet::OrbitType,
            crate::fleet::query::CategoryGroup,
            crate::fleet::query::FleetStats,
            crate::fleet::query::CategoryCount,
            crate::propagate::GeodeticFix,
            crate::resolver::ResolverStatus,
            crate::resolver::ResolverState,
            crate::resolver::TrackedPosition,
            crate::resolver::PositionSource,
            crate::weather::SpaceWeather,
        )
    ),
    info(
        title = "SpaceShield API",
        description = "Satellite fleet positions, live tracking and space-weather feeds",
        version = "0.1.0"
    ),
    tags(
        (name = "fleet", description = "Loaded satellite fleet"),
        (name = "tracking", description = "Selected satellite position"),
        (name = "space-weather", description = "Space-weather feeds")
    )
)]
pub struct ApiDoc;
