use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::observer::ObserverError;
use crate::tracker::TrackerError;
use crate::web::state::ReloadError;

pub enum ApiError {
    NotVisible(String),
    NoCatalog,
    InvalidObserver(ObserverError),
    Reload(ReloadError),
}

impl From<ObserverError> for ApiError {
    fn from(e: ObserverError) -> Self {
        ApiError::InvalidObserver(e)
    }
}

impl From<TrackerError> for ApiError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::NotVisible(name) => ApiError::NotVisible(name),
        }
    }
}

impl From<ReloadError> for ApiError {
    fn from(e: ReloadError) -> Self {
        ApiError::Reload(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotVisible(name) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::with_message(
                    "not_visible",
                    &format!("{} is not currently visible", name),
                )),
            )
                .into_response(),
            ApiError::NoCatalog => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new("no_catalog")),
            )
                .into_response(),
            ApiError::InvalidObserver(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::with_message("invalid_observer", &e.to_string())),
            )
                .into_response(),
            ApiError::Reload(e @ ReloadError::Catalog(_)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::with_message("catalog_rejected", &e.to_string())),
            )
                .into_response(),
            ApiError::Reload(e @ ReloadError::Join(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_message("reload_failed", &e.to_string())),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: None,
        }
    }

    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
