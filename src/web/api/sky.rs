use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::view::{SkySnapshot, SortKey, ViewOptions};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

/// Per-request overrides of the configured view options.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SkyQuery {
    pub sort: Option<SortKey>,
    pub colorize: Option<bool>,
    pub east_left: Option<bool>,
    /// Case-insensitive name filter.
    pub filter: Option<String>,
}

impl SkyQuery {
    fn apply(&self, base: &ViewOptions) -> ViewOptions {
        ViewOptions {
            sort: self.sort.unwrap_or(base.sort),
            colorize: self.colorize.unwrap_or(base.colorize),
            east_left: self.east_left.unwrap_or(base.east_left),
            radius: base.radius,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SelectionResponse {
    pub name: String,
    pub selected: bool,
}

#[utoipa::path(
    get,
    path = "/api/sky",
    params(SkyQuery),
    responses(
        (status = 200, description = "Visible objects from the latest tick", body = SkySnapshot)
    ),
    tag = "sky"
)]
pub async fn sky(
    State(state): State<AppState>,
    Query(query): Query<SkyQuery>,
) -> Json<SkySnapshot> {
    let options = query.apply(&state.config.view);
    let tracker = state.tracker.lock().await;
    Json(SkySnapshot::build(
        tracker.items(),
        tracker.selection(),
        &options,
        query.filter.as_deref().unwrap_or(""),
        tracker.cutoffs().elevation_deg,
        Utc::now(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/selection/{name}",
    params(("name" = String, Path, description = "Object name")),
    responses(
        (status = 200, description = "Selection state", body = SelectionResponse)
    ),
    tag = "sky"
)]
pub async fn get_selection(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<SelectionResponse> {
    let tracker = state.tracker.lock().await;
    let selected = tracker.selection().contains(&name);
    Json(SelectionResponse { name, selected })
}

#[utoipa::path(
    post,
    path = "/api/selection/{name}",
    params(("name" = String, Path, description = "Object name")),
    responses(
        (status = 200, description = "Selection toggled", body = SelectionResponse),
        (status = 404, description = "Object not visible", body = ErrorResponse)
    ),
    tag = "sky"
)]
pub async fn toggle_selection(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<SelectionResponse>> {
    let mut tracker = state.tracker.lock().await;
    let selected = tracker.toggle_selection(&name)?;
    log::debug!("{} {}", name, if selected { "selected" } else { "deselected" });
    Ok(Json(SelectionResponse { name, selected }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_overrides_only_given_fields() {
        let base = ViewOptions {
            sort: SortKey::Altitude,
            colorize: true,
            east_left: false,
            radius: 250.0,
        };
        let query = SkyQuery {
            sort: Some(SortKey::Name),
            east_left: Some(true),
            ..Default::default()
        };
        let options = query.apply(&base);
        assert_eq!(options.sort, SortKey::Name);
        assert!(options.colorize);
        assert!(options.east_left);
        assert_eq!(options.radius, 250.0);
    }
}
