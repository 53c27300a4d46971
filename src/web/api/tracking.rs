use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::observer::{NearestCity, Observer};
use crate::tracker::{Cutoffs, TrackingStatus};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/tracking",
    responses(
        (status = 200, description = "Tracking status", body = TrackingStatus)
    ),
    tag = "tracking"
)]
pub async fn status(State(state): State<AppState>) -> Json<TrackingStatus> {
    let tracker = state.tracker.lock().await;
    Json(tracker.status())
}

#[utoipa::path(
    post,
    path = "/api/tracking/pause",
    responses(
        (status = 200, description = "Tracking paused", body = TrackingStatus)
    ),
    tag = "tracking"
)]
pub async fn pause(State(state): State<AppState>) -> Json<TrackingStatus> {
    let mut tracker = state.tracker.lock().await;
    tracker.pause();
    Json(tracker.status())
}

#[utoipa::path(
    post,
    path = "/api/tracking/resume",
    responses(
        (status = 200, description = "Tracking resumed", body = TrackingStatus)
    ),
    tag = "tracking"
)]
pub async fn resume(State(state): State<AppState>) -> Json<TrackingStatus> {
    let mut tracker = state.tracker.lock().await;
    tracker.resume();
    Json(tracker.status())
}

#[utoipa::path(
    post,
    path = "/api/tracking/toggle",
    responses(
        (status = 200, description = "Tracking paused or resumed", body = TrackingStatus)
    ),
    tag = "tracking"
)]
pub async fn toggle(State(state): State<AppState>) -> Json<TrackingStatus> {
    let mut tracker = state.tracker.lock().await;
    tracker.toggle_running();
    Json(tracker.status())
}

#[utoipa::path(
    put,
    path = "/api/tracking/cutoffs",
    request_body = Cutoffs,
    responses(
        (status = 200, description = "Cutoffs applied from the next tick", body = TrackingStatus)
    ),
    tag = "tracking"
)]
pub async fn set_cutoffs(
    State(state): State<AppState>,
    Json(cutoffs): Json<Cutoffs>,
) -> Json<TrackingStatus> {
    let mut tracker = state.tracker.lock().await;
    tracker.set_cutoffs(cutoffs);
    Json(tracker.status())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ObserverResponse {
    pub observer: Observer,
    pub nearest_city: Option<NearestCity>,
    /// `Nearest Big City: <name>, <miles> miles <direction>`
    pub nearest_city_text: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/observer",
    responses(
        (status = 200, description = "Observer location", body = ObserverResponse)
    ),
    tag = "tracking"
)]
pub async fn observer(State(state): State<AppState>) -> Json<ObserverResponse> {
    let observer = state.tracker.lock().await.observer().clone();
    Json(ObserverResponse::new(observer))
}

impl ObserverResponse {
    fn new(observer: Observer) -> Self {
        let nearest_city = observer.nearest_city();
        Self {
            nearest_city_text: nearest_city.as_ref().map(|c| c.to_string()),
            nearest_city,
            observer,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ObserverUpdate {
    /// `"lat, lon"` in degrees.
    pub coordinates: String,
    pub altitude_km: Option<f64>,
    pub label: Option<String>,
}

#[utoipa::path(
    put,
    path = "/api/observer",
    request_body = ObserverUpdate,
    responses(
        (status = 200, description = "Observer moved", body = ObserverResponse),
        (status = 422, description = "Coordinates rejected", body = ErrorResponse)
    ),
    tag = "tracking"
)]
pub async fn set_observer(
    State(state): State<AppState>,
    Json(update): Json<ObserverUpdate>,
) -> ApiResult<Json<ObserverResponse>> {
    let observer =
        Observer::from_coordinates(&update.coordinates, update.altitude_km, update.label)?;
    state.tracker.lock().await.set_observer(observer.clone());
    Ok(Json(ObserverResponse::new(observer)))
}
