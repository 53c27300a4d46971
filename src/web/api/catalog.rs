use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{format_age, Catalog, ParseDiagnostics};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub path: String,
    pub records: usize,
    /// When the element data was last updated.
    pub freshness: DateTime<Utc>,
    /// `HH:MM:SS since last TLE update`
    pub age: String,
    pub loaded_at: DateTime<Utc>,
    pub diagnostics: ParseDiagnostics,
}

impl CatalogResponse {
    fn new(path: String, catalog: &Catalog, now: DateTime<Utc>) -> Self {
        Self {
            path,
            records: catalog.len(),
            freshness: catalog.freshness(),
            age: format_age(catalog.freshness(), now),
            loaded_at: catalog.loaded_at(),
            diagnostics: catalog.diagnostics().clone(),
        }
    }
}

fn describe(state: &AppState, catalog: &Catalog) -> CatalogResponse {
    CatalogResponse::new(
        state.config.catalog.path.display().to_string(),
        catalog,
        Utc::now(),
    )
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    responses(
        (status = 200, description = "Loaded catalog", body = CatalogResponse),
        (status = 503, description = "No catalog loaded", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn get_catalog(State(state): State<AppState>) -> ApiResult<Json<CatalogResponse>> {
    let catalog = state.catalog.snapshot().ok_or(ApiError::NoCatalog)?;
    Ok(Json(describe(&state, &catalog)))
}

#[utoipa::path(
    post,
    path = "/api/catalog/reload",
    responses(
        (status = 200, description = "Catalog reloaded", body = CatalogResponse),
        (status = 422, description = "New catalog rejected, previous one kept", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn reload_catalog(State(state): State<AppState>) -> ApiResult<Json<CatalogResponse>> {
    let catalog = state.reload_catalog().await?;
    Ok(Json(describe(&state, &catalog)))
}
