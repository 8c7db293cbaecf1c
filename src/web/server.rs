use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::WebConfig;
use crate::fleet::FleetLoader;
use crate::resolver::PositionResolver;
use crate::weather::SpaceWeatherClient;

use super::api::fleet as fleet_handlers;
use super::api::tracking as tracking_handlers;
use super::api::weather as weather_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Fleet
        .route("/api/fleet", get(fleet_handlers::list_fleet))
        .route("/api/fleet/stats", get(fleet_handlers::fleet_stats))
        .route("/api/fleet/markers", get(fleet_handlers::fleet_markers))
        .route("/api/fleet/{object_id}", get(fleet_handlers::get_satellite))
        // Tracking
        .route(
            "/api/tracking/select",
            post(tracking_handlers::select).delete(tracking_handlers::clear),
        )
        .route("/api/tracking/status", get(tracking_handlers::status))
        // Space weather
        .route("/api/space-weather", get(weather_handlers::space_weather))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(
    web: &WebConfig,
    loader: FleetLoader,
    resolver: PositionResolver,
    weather: SpaceWeatherClient,
) -> std::io::Result<()> {
    let bind_addr = web.bind.clone();

    let state = AppState {
        fleet: Arc::new(RwLock::new(None)),
        resolver,
        weather: Arc::new(weather),
    };

    let loading = state.clone();
    tokio::spawn(async move {
        loading.load_fleet(&loader).await;
    });

    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
