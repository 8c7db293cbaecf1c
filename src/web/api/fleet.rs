use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::fleet::query::{self, CategoryFilter, CategoryGroup, FleetStats};
use crate::fleet::{OrbitSummary, SatelliteRecord, CATEGORIES};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct FleetQuery {
    /// "All" or a category label, case-insensitive
    pub category: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FleetResponse {
    pub loaded_at: DateTime<Utc>,
    pub total: usize,
    pub groups: Vec<CategoryGroup>,
}

/// One record together with its orbit figures at the propagated altitude.
#[derive(Debug, Serialize, ToSchema)]
pub struct SatelliteDetail {
    #[serde(flatten)]
    pub record: SatelliteRecord,
    pub orbit: OrbitSummary,
}

#[utoipa::path(
    get,
    path = "/api/fleet",
    params(FleetQuery),
    responses(
        (status = 200, description = "Fleet grouped by category", body = FleetResponse),
        (status = 400, description = "Unknown category", body = ErrorResponse),
        (status = 503, description = "Fleet not loaded yet", body = ErrorResponse)
    ),
    tag = "fleet"
)]
pub async fn list_fleet(
    State(state): State<AppState>,
    Query(params): Query<FleetQuery>,
) -> ApiResult<Json<FleetResponse>> {
    let filter: CategoryFilter = params
        .category
        .as_deref()
        .unwrap_or("All")
        .parse()
        .map_err(|_| ApiError::Validation("unknown category".into()))?;

    let guard = state.fleet.read().await;
    let fleet = guard.as_ref().ok_or(ApiError::Unavailable("fleet_loading"))?;
    let groups = query::group_by_category(query::filter(&fleet.satellites, filter));

    Ok(Json(FleetResponse {
        loaded_at: fleet.loaded_at,
        total: groups.iter().map(|g| g.satellites.len()).sum(),
        groups,
    }))
}

#[utoipa::path(
    get,
    path = "/api/fleet/stats",
    responses(
        (status = 200, description = "Fleet statistics", body = FleetStats),
        (status = 503, description = "Fleet not loaded yet", body = ErrorResponse)
    ),
    tag = "fleet"
)]
pub async fn fleet_stats(State(state): State<AppState>) -> ApiResult<Json<FleetStats>> {
    let guard = state.fleet.read().await;
    let fleet = guard.as_ref().ok_or(ApiError::Unavailable("fleet_loading"))?;
    Ok(Json(query::stats(&fleet.satellites, CATEGORIES)))
}

#[utoipa::path(
    get,
    path = "/api/fleet/markers",
    responses(
        (status = 200, description = "Satellites with a computed position", body = Vec<SatelliteRecord>),
        (status = 503, description = "Fleet not loaded yet", body = ErrorResponse)
    ),
    tag = "fleet"
)]
pub async fn fleet_markers(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SatelliteRecord>>> {
    let guard = state.fleet.read().await;
    let fleet = guard.as_ref().ok_or(ApiError::Unavailable("fleet_loading"))?;
    Ok(Json(
        query::markers(&fleet.satellites).into_iter().cloned().collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/fleet/{object_id}",
    params(("object_id" = String, Path, description = "Satellite identifier")),
    responses(
        (status = 200, description = "Satellite record with orbit figures", body = SatelliteDetail),
        (status = 404, description = "Unknown satellite", body = ErrorResponse),
        (status = 503, description = "Fleet not loaded yet", body = ErrorResponse)
    ),
    tag = "fleet"
)]
pub async fn get_satellite(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
) -> ApiResult<Json<SatelliteDetail>> {
    let guard = state.fleet.read().await;
    let fleet = guard.as_ref().ok_or(ApiError::Unavailable("fleet_loading"))?;
    let record = fleet
        .find(&object_id)
        .cloned()
        .ok_or(ApiError::NotFound("satellite_not_found"))?;
    let orbit = OrbitSummary::from_record(&record, record.position.map(|p| p.altitude_km));
    Ok(Json(SatelliteDetail { record, orbit }))
}
