use axum::{routing::get, routing::post, routing::put, Router};
use chrono::Utc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::Catalog;

use super::api::catalog as catalog_handlers;
use super::api::sky as sky_handlers;
use super::api::tracking as tracking_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub async fn run_server(config: Config, catalog: Catalog) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let tick_interval = config.tracking.interval;
    let reload_interval = config.catalog.reload_interval;
    let state = AppState::new(config, catalog);

    tick_once(&state).await;
    tokio::spawn(tick_loop(state.clone(), tick_interval));
    if let Some(every) = reload_interval {
        tokio::spawn(reload_loop(state.clone(), every));
    }

    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/sky", get(sky_handlers::sky))
        .route(
            "/api/selection/{name}",
            get(sky_handlers::get_selection).post(sky_handlers::toggle_selection),
        )
        .route("/api/catalog", get(catalog_handlers::get_catalog))
        .route("/api/catalog/reload", post(catalog_handlers::reload_catalog))
        .route("/api/tracking", get(tracking_handlers::status))
        .route("/api/tracking/pause", post(tracking_handlers::pause))
        .route("/api/tracking/resume", post(tracking_handlers::resume))
        .route("/api/tracking/toggle", post(tracking_handlers::toggle))
        .route("/api/tracking/cutoffs", put(tracking_handlers::set_cutoffs))
        .route(
            "/api/observer",
            get(tracking_handlers::observer).put(tracking_handlers::set_observer),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn tick_once(state: &AppState) {
    let mut tracker = state.tracker.lock().await;
    tracker.tick_at(Utc::now());
}

async fn tick_loop(state: AppState, every: Duration) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        tick_once(&state).await;
    }
}

async fn reload_loop(state: AppState, every: Duration) {
    let mut interval = tokio::time::interval(every);
    // the first tick completes immediately and the catalog is already loaded
    interval.tick().await;
    loop {
        interval.tick().await;
        if let Err(e) = state.reload_catalog().await {
            log::warn!("Periodic catalog reload failed, keeping previous catalog: {}", e);
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
