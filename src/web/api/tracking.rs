use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::resolver::ResolverStatus;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectRequest {
    pub object_id: String,
}

#[utoipa::path(
    post,
    path = "/api/tracking/select",
    request_body = SelectRequest,
    responses(
        (status = 202, description = "Resolution started", body = ResolverStatus),
        (status = 404, description = "Unknown satellite", body = ErrorResponse),
        (status = 503, description = "Fleet not loaded yet", body = ErrorResponse)
    ),
    tag = "tracking"
)]
pub async fn select(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> ApiResult<(StatusCode, Json<ResolverStatus>)> {
    let satellite = {
        let guard = state.fleet.read().await;
        let fleet = guard.as_ref().ok_or(ApiError::Unavailable("fleet_loading"))?;
        fleet
            .find(&request.object_id)
            .cloned()
            .ok_or(ApiError::NotFound("satellite_not_found"))?
    };

    let resolver = state.resolver.clone();
    let selection = resolver.begin(satellite);
    let status = resolver.status();

    tokio::spawn(async move {
        let position = resolver.resolve(&selection).await;
        if resolver.commit(&selection, position.clone()) {
            log::info!(
                "Tracking {} at {:.2}, {:.2} ({})",
                selection.satellite.name,
                position.latitude_deg,
                position.longitude_deg,
                position.source
            );
        }
    });

    Ok((StatusCode::ACCEPTED, Json(status)))
}

#[utoipa::path(
    delete,
    path = "/api/tracking/select",
    responses(
        (status = 200, description = "Selection cleared", body = ResolverStatus)
    ),
    tag = "tracking"
)]
pub async fn clear(State(state): State<AppState>) -> Json<ResolverStatus> {
    state.resolver.clear();
    Json(state.resolver.status())
}

#[utoipa::path(
    get,
    path = "/api/tracking/status",
    responses(
        (status = 200, description = "Current selection and tracked position", body = ResolverStatus)
    ),
    tag = "tracking"
)]
pub async fn status(State(state): State<AppState>) -> Json<ResolverStatus> {
    Json(state.resolver.status())
}
