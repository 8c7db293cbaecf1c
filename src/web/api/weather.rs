use axum::{extract::State, Json};

use crate::weather::SpaceWeather;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/space-weather",
    responses(
        (status = 200, description = "Space-weather snapshot; failed feeds are empty", body = SpaceWeather)
    ),
    tag = "space-weather"
)]
pub async fn space_weather(State(state): State<AppState>) -> Json<SpaceWeather> {
    Json(state.weather.fetch().await)
}
